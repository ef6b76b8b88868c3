//! Countdown engine for the timer widget.
//!
//! This module owns the countdown state machine: the pending target duration
//! entered by the user, the seconds remaining on an active countdown, and the
//! running flag. Everything else in the crate is presentation.
//!
//! # Basic Usage
//!
//! ```rust
//! use minitimer::countdown;
//!
//! let mut engine = countdown::new();
//! engine.set_input_minutes(1);
//! engine.set_input_seconds(30);
//!
//! // Nothing is counting down yet; the display previews the pending duration.
//! assert_eq!(engine.display_seconds(), 90);
//! assert_eq!(engine.view(), "01:30");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! The engine follows the message-passing shape of the runtime: control
//! methods return commands, and the resulting messages are fed back through
//! [`Model::update`].
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use minitimer::countdown::{self, TimeoutMsg};
//!
//! struct MyApp {
//!     engine: countdown::Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { engine: countdown::new() }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.engine.id() {
//!                 // Countdown finished.
//!             }
//!         }
//!         self.engine.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.engine.view()
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers for engine instances, so several countdowns
/// could coexist in one program without message cross-talk.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Formats a second count as zero-padded `MM:SS`.
///
/// Minutes have no upper bound: from 100 minutes up the left part simply
/// grows to three or more digits.
///
/// # Examples
///
/// ```rust
/// use minitimer::countdown::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(90), "01:30");
/// assert_eq!(format_time(6005), "100:05");
/// ```
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Coerces raw field text to a non-negative count.
///
/// Empty, unparsable, and negative input all become 0. There is no error
/// path: malformed input is treated as zero by design of the widget.
///
/// # Examples
///
/// ```rust
/// use minitimer::countdown::coerce;
///
/// assert_eq!(coerce("42"), 42);
/// assert_eq!(coerce(""), 0);
/// assert_eq!(coerce("abc"), 0);
/// assert_eq!(coerce("-5"), 0);
/// ```
pub fn coerce(raw: &str) -> u64 {
    raw.trim()
        .parse::<i64>()
        .map(|n| n.max(0) as u64)
        .unwrap_or(0)
}

/// Message used to start and stop the countdown.
///
/// Sent by [`Model::start`], [`Model::stop`], and [`Model::toggle`]. The
/// `running` field is private so the flag can only change through the
/// engine's control methods.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// The engine instance this message targets.
    pub id: i64,
    running: bool,
}

/// Message sent once per elapsed second while the countdown is active.
///
/// Ticks are filtered three ways before they mutate state: the engine must
/// be running, the ID must match, and the generation tag must be current.
/// The tag filter is what keeps a pause/resume cycle from leaving a stale
/// tick stream alive alongside the new one.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The engine instance that scheduled this tick.
    pub id: i64,
    /// Whether this tick is expected to exhaust the countdown.
    pub timeout: bool,
    /// Generation tag; ticks from a superseded run are rejected.
    tag: i64,
}

/// Message that returns the engine to its initial state.
///
/// Sent by [`Model::reset`]. Unlike pausing, this clears the remaining time
/// and the pending inputs.
#[derive(Debug, Clone)]
pub struct ResetMsg {
    /// The engine instance this message targets.
    pub id: i64,
}

/// Message sent when the countdown reaches zero.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// The engine instance that expired.
    pub id: i64,
}

/// The countdown state machine.
///
/// State is created zeroed, mutated only by the engine's operations, and
/// holds two invariants:
///
/// - the remaining time is never negative;
/// - the running flag is true only while there is time on the clock. The
///   tick that exhausts the countdown also clears the flag.
///
/// Editing the pending inputs while a countdown is active never touches the
/// remaining time; the edits accumulate as the next duration and take effect
/// when a countdown is armed from idle.
#[derive(Debug, Clone)]
pub struct Model {
    remaining: u64,
    input_minutes: u64,
    input_seconds: u64,
    running: bool,
    /// The time between ticks. Default is 1 second.
    pub interval: Duration,
    id: i64,
    tag: i64,
}

/// Creates a new engine with everything zeroed and a custom tick interval.
///
/// Intervals other than one second compress or stretch wall-clock time while
/// keeping the second-per-tick arithmetic; useful in demos and tests.
pub fn new_with_interval(interval: Duration) -> Model {
    Model {
        remaining: 0,
        input_minutes: 0,
        input_seconds: 0,
        running: false,
        interval,
        id: next_id(),
        tag: 0,
    }
}

/// Creates a new engine with everything zeroed and the default 1-second tick.
///
/// # Examples
///
/// ```rust
/// use minitimer::countdown;
///
/// let engine = countdown::new();
/// assert_eq!(engine.remaining(), 0);
/// assert!(!engine.running());
/// ```
pub fn new() -> Model {
    new_with_interval(Duration::from_secs(1))
}

impl Model {
    /// Returns the unique identifier of this engine instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the countdown is actively decrementing.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Seconds left on the active countdown. Zero when idle.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// The pending minutes component of the target duration.
    pub fn input_minutes(&self) -> u64 {
        self.input_minutes
    }

    /// The pending seconds component of the target duration.
    pub fn input_seconds(&self) -> u64 {
        self.input_seconds
    }

    /// Stores the pending minutes component.
    ///
    /// Has no effect on an active countdown; the value is picked up the next
    /// time a countdown is armed from idle.
    pub fn set_input_minutes(&mut self, minutes: u64) {
        self.input_minutes = minutes;
    }

    /// Stores the pending seconds component.
    ///
    /// Values of 60 and above are accepted and normalized by the arming
    /// arithmetic rather than rejected.
    pub fn set_input_seconds(&mut self, seconds: u64) {
        self.input_seconds = seconds;
    }

    /// The pending target duration in seconds.
    pub fn pending_seconds(&self) -> u64 {
        self.input_minutes * 60 + self.input_seconds
    }

    /// The second count the display should show.
    ///
    /// While a countdown holds time this is the remaining time; otherwise it
    /// previews the pending duration, so the user sees the upcoming countdown
    /// before starting it.
    pub fn display_seconds(&self) -> u64 {
        if self.remaining == 0 {
            self.pending_seconds()
        } else {
            self.remaining
        }
    }

    /// Returns a command that resumes the countdown.
    pub fn start(&self) -> Cmd {
        self.start_stop(true)
    }

    /// Returns a command that pauses the countdown, retaining the remaining
    /// time.
    pub fn stop(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Returns a command that flips between running and paused.
    ///
    /// When the engine is idle (no time on the clock), processing the
    /// resulting message first arms the countdown from the pending inputs.
    /// When paused mid-countdown it resumes at the retained remaining time
    /// without recomputation.
    pub fn toggle(&self) -> Cmd {
        self.start_stop(!self.running)
    }

    /// Returns a command that restores the initial state: paused, no
    /// remaining time, pending inputs cleared.
    pub fn reset(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ResetMsg { id }) as Msg
        })
    }

    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let timeout = self.remaining <= 1;
        let interval = self.interval;
        bubbletea_tick(interval, move |_| {
            Box::new(TickMsg { id, timeout, tag }) as Msg
        })
    }

    fn timeout_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }

    /// Processes engine messages and advances the state machine.
    ///
    /// Handles [`StartStopMsg`], [`ResetMsg`], and [`TickMsg`]; everything
    /// else is ignored. The periodic tick is re-armed only from here, which
    /// is what releases it on every exit path: pausing, resetting, and
    /// exhaustion all simply decline to schedule the next tick.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            if start_stop.running && !self.running && self.remaining == 0 {
                self.remaining = self.pending_seconds();
            }
            // A countdown only runs with time on the clock, so toggling with
            // a zero pending duration is a no-op.
            self.running = start_stop.running && self.remaining > 0;
            if self.running {
                self.tag += 1;
                return Some(self.tick_cmd());
            }
            return None;
        }

        if let Some(reset) = msg.downcast_ref::<ResetMsg>() {
            if reset.id != 0 && reset.id != self.id {
                return None;
            }
            self.running = false;
            self.remaining = 0;
            self.input_minutes = 0;
            self.input_seconds = 0;
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.running || (tick.id != 0 && tick.id != self.id) {
                return None;
            }
            // Ticks scheduled before the latest start are stale; rejecting
            // them keeps a pause/resume cycle from doubling the tick rate.
            if tick.tag > 0 && tick.tag != self.tag {
                return None;
            }

            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.running = false;
                return Some(self.timeout_cmd());
            }
            return Some(self.tick_cmd());
        }

        None
    }

    /// Renders the display value as zero-padded `MM:SS`.
    pub fn view(&self) -> String {
        format_time(self.display_seconds())
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_for(engine: &Model) -> TickMsg {
        TickMsg {
            id: engine.id(),
            timeout: false,
            tag: engine.tag,
        }
    }

    fn start_msg(engine: &Model, running: bool) -> StartStopMsg {
        StartStopMsg {
            id: engine.id(),
            running,
        }
    }

    #[test]
    fn test_new_is_initial_state() {
        let engine = new();
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.input_minutes(), 0);
        assert_eq!(engine.input_seconds(), 0);
        assert!(!engine.running());
        assert_eq!(engine.interval, Duration::from_secs(1));
        assert!(engine.id() > 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = new();
        let b = new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_format_time_zero_pads() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(90), "01:30");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn test_format_time_minutes_unbounded() {
        assert_eq!(format_time(100 * 60), "100:00");
        assert_eq!(format_time(100 * 60 + 5), "100:05");
    }

    #[test]
    fn test_coerce_sanitizes() {
        assert_eq!(coerce("42"), 42);
        assert_eq!(coerce(" 7 "), 7);
        assert_eq!(coerce(""), 0);
        assert_eq!(coerce("abc"), 0);
        assert_eq!(coerce("-5"), 0);
    }

    #[test]
    fn test_start_from_idle_arms_from_inputs() {
        let mut engine = new();
        engine.set_input_minutes(1);
        engine.set_input_seconds(30);

        let cmd = engine.update(Box::new(start_msg(&engine, true)));
        assert!(cmd.is_some());
        assert_eq!(engine.remaining(), 90);
        assert!(engine.running());
    }

    #[test]
    fn test_start_with_zero_duration_is_noop() {
        let mut engine = new();
        let cmd = engine.update(Box::new(start_msg(&engine, true)));
        assert!(cmd.is_none());
        assert!(!engine.running());
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_pause_retains_remaining_and_resume_skips_recompute() {
        let mut engine = new();
        engine.set_input_seconds(45);
        engine.update(Box::new(start_msg(&engine, true)));
        assert_eq!(engine.remaining(), 45);

        engine.update(Box::new(start_msg(&engine, false)));
        assert!(!engine.running());
        assert_eq!(engine.remaining(), 45);

        // Pending edits while paused must not leak into the live countdown.
        engine.set_input_minutes(9);
        engine.update(Box::new(start_msg(&engine, true)));
        assert!(engine.running());
        assert_eq!(engine.remaining(), 45);
    }

    #[test]
    fn test_tick_decrements_by_one() {
        let mut engine = new();
        engine.set_input_seconds(10);
        engine.update(Box::new(start_msg(&engine, true)));

        let cmd = engine.update(Box::new(tick_for(&engine)));
        assert!(cmd.is_some());
        assert_eq!(engine.remaining(), 9);
        assert!(engine.running());
    }

    #[test]
    fn test_exactly_two_ticks_to_exhaustion() {
        let mut engine = new();
        engine.set_input_seconds(2);
        engine.update(Box::new(start_msg(&engine, true)));

        engine.update(Box::new(tick_for(&engine)));
        assert_eq!(engine.remaining(), 1);
        assert!(engine.running());

        let cmd = engine.update(Box::new(tick_for(&engine)));
        assert_eq!(engine.remaining(), 0);
        assert!(!engine.running());
        // The exhausting tick announces the expiry.
        assert!(cmd.is_some());

        // A stray third tick changes nothing and is never negative.
        let cmd = engine.update(Box::new(tick_for(&engine)));
        assert!(cmd.is_none());
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_tick_rejected_when_not_running() {
        let mut engine = new();
        engine.set_input_seconds(5);
        engine.update(Box::new(start_msg(&engine, true)));
        engine.update(Box::new(start_msg(&engine, false)));

        let cmd = engine.update(Box::new(tick_for(&engine)));
        assert!(cmd.is_none());
        assert_eq!(engine.remaining(), 5);
    }

    #[test]
    fn test_stale_tag_rejected_after_resume() {
        let mut engine = new();
        engine.set_input_seconds(30);
        engine.update(Box::new(start_msg(&engine, true)));
        let stale = tick_for(&engine);

        engine.update(Box::new(start_msg(&engine, false)));
        engine.update(Box::new(start_msg(&engine, true)));

        let cmd = engine.update(Box::new(stale));
        assert!(cmd.is_none());
        assert_eq!(engine.remaining(), 30);
    }

    #[test]
    fn test_wrong_id_rejected() {
        let mut engine = new();
        engine.set_input_seconds(5);
        engine.update(Box::new(start_msg(&engine, true)));

        let foreign = StartStopMsg {
            id: engine.id() + 999,
            running: false,
        };
        let cmd = engine.update(Box::new(foreign));
        assert!(cmd.is_none());
        assert!(engine.running());
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let mut engine = new();
        engine.set_input_minutes(2);
        engine.set_input_seconds(30);
        engine.update(Box::new(start_msg(&engine, true)));
        engine.update(Box::new(tick_for(&engine)));

        let cmd = engine.update(Box::new(ResetMsg { id: engine.id() }));
        assert!(cmd.is_none());
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.input_minutes(), 0);
        assert_eq!(engine.input_seconds(), 0);
        assert!(!engine.running());
    }

    #[test]
    fn test_display_previews_pending_duration_when_idle() {
        let mut engine = new();
        engine.set_input_minutes(2);
        engine.set_input_seconds(5);
        assert_eq!(engine.display_seconds(), 125);
        assert_eq!(engine.view(), "02:05");
    }

    #[test]
    fn test_display_tracks_remaining_while_active() {
        let mut engine = new();
        engine.set_input_seconds(10);
        engine.update(Box::new(start_msg(&engine, true)));
        engine.update(Box::new(tick_for(&engine)));

        // Pending edits show up in the preview only after the countdown ends.
        engine.set_input_minutes(5);
        assert_eq!(engine.display_seconds(), 9);
        assert_eq!(engine.view(), "00:09");
    }

    #[test]
    fn test_seconds_overflow_normalized_on_arming() {
        let mut engine = new();
        engine.set_input_seconds(90);
        engine.update(Box::new(start_msg(&engine, true)));
        assert_eq!(engine.remaining(), 90);
        assert_eq!(engine.view(), "01:30");
    }

    #[test]
    fn test_terminal_tick_flags_timeout() {
        let mut engine = new();
        engine.set_input_seconds(1);
        engine.update(Box::new(start_msg(&engine, true)));
        // The scheduled tick knows it will exhaust the countdown.
        assert!(engine.remaining() <= 1);
        let msg = tick_for(&engine);
        engine.update(Box::new(msg));
        assert!(!engine.running());
    }
}
