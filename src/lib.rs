#![warn(missing_docs)]

//! # minitimer
//!
//! A single-screen countdown timer for the terminal, built with
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! The user enters a target duration as minutes and seconds, starts, pauses,
//! and resets the countdown with key presses, and watches the remaining time
//! tick down as a zero-padded `MM:SS` display. Each concern lives in its own
//! component following the Elm Architecture pattern — `init()`, `update()`,
//! `view()` — with message types for everything asynchronous:
//!
//! - [`countdown`] — the countdown state machine and its tick scheduling.
//!   The only module with real invariants; everything else is presentation.
//! - [`input`] — a focusable digits-only field for one duration component.
//! - [`key`] — type-safe key bindings with help metadata.
//! - [`help`] — compact and expanded help views generated from bindings.
//! - [`app`] — the page shell wiring the pieces together.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bubbletea_rs::Program;
//! use minitimer::app::App;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = Program::<App>::builder()
//!         .alt_screen(true)
//!         .signal_handler(true)
//!         .build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Using the engine on its own
//!
//! The engine has no opinion about rendering and can back any shell:
//!
//! ```rust
//! use minitimer::countdown;
//!
//! let mut engine = countdown::new();
//! engine.set_input_minutes(5);
//! assert_eq!(engine.view(), "05:00");
//! ```

pub mod app;
pub mod countdown;
pub mod help;
pub mod input;
pub mod key;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Only the focused component receives forwarded input, so the shell moves
/// focus by blurring one component and focusing another.
///
/// ```rust
/// use minitimer::prelude::*;
///
/// let mut field = input_new();
/// let _cmd = field.focus();
/// assert!(field.focused());
/// field.blur();
/// assert!(!field.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization tasks such as triggering an
    /// immediate redraw.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use app::{big_time, App, AppKeyMap, Styles as AppStyles};
pub use countdown::{
    coerce, format_time, new as countdown_new, Model as Countdown,
    ResetMsg as CountdownResetMsg, StartStopMsg as CountdownStartStopMsg,
    TickMsg as CountdownTickMsg, TimeoutMsg as CountdownTimeoutMsg,
};
pub use help::{KeyMap, Model as HelpModel};
pub use input::{
    default_key_map as input_default_key_map, new as input_new, paste,
    KeyMap as DurationInputKeyMap, Model as DurationInput, PasteErrMsg, PasteMsg,
};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
    Binding, KeyPress,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use minitimer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{big_time, App};
    pub use crate::countdown::{
        coerce, format_time, new as countdown_new, Model as Countdown,
        TimeoutMsg as CountdownTimeoutMsg,
    };
    pub use crate::help::{KeyMap, Model as HelpModel};
    pub use crate::input::{
        new as input_new, KeyMap as DurationInputKeyMap, Model as DurationInput,
    };
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys,
        with_keys_str, Binding, KeyPress,
    };
    pub use crate::Component;
}
