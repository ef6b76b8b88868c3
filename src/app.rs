//! The timer page: duration inputs, formatted display, and controls.
//!
//! This is the shell around the [`countdown`](crate::countdown) engine. It
//! owns no timing logic: key presses either map to engine commands through
//! the application key bindings or fall through to the focused duration
//! field, whose contents are mirrored into the engine's pending inputs
//! after every edit.

use crate::countdown;
use crate::help;
use crate::input;
use crate::key::{matches_binding, new_binding, with_help, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Segment glyphs for the oversized time display, one entry per renderable
// character, three rows tall.
static FIGURES: Lazy<HashMap<char, [&'static str; 3]>> = Lazy::new(|| {
    HashMap::from([
        ('0', [" _ ", "| |", "|_|"]),
        ('1', ["   ", "  |", "  |"]),
        ('2', [" _ ", " _|", "|_ "]),
        ('3', [" _ ", " _|", " _|"]),
        ('4', ["   ", "|_|", "  |"]),
        ('5', [" _ ", "|_ ", " _|"]),
        ('6', [" _ ", "|_ ", "|_|"]),
        ('7', [" _ ", "  |", "  |"]),
        ('8', [" _ ", "|_|", "|_|"]),
        ('9', [" _ ", "|_|", " _|"]),
        (':', ["   ", " . ", " . "]),
    ])
});

/// Renders a time string like `"01:30"` as three rows of segment figures.
/// Characters without a glyph are skipped.
pub fn big_time(text: &str) -> String {
    let mut rows = [String::new(), String::new(), String::new()];
    for ch in text.chars() {
        if let Some(glyph) = FIGURES.get(&ch) {
            for (row, part) in rows.iter_mut().zip(glyph.iter()) {
                if !row.is_empty() {
                    row.push(' ');
                }
                row.push_str(part);
            }
        }
    }
    rows.join("\n")
}

/// Which duration field currently receives typed digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Minutes,
    Seconds,
}

/// Application-level key bindings.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Start or pause the countdown.
    pub toggle: Binding,
    /// Return everything to the initial state.
    pub reset: Binding,
    /// Focus the next duration field.
    pub next_field: Binding,
    /// Focus the previous duration field.
    pub prev_field: Binding,
    /// Switch between short and expanded help.
    pub help: Binding,
    /// Leave the program.
    pub quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            toggle: new_binding(vec![
                with_keys_str(&["space"]),
                with_help("space", "start/pause"),
            ]),
            reset: new_binding(vec![
                with_keys_str(&["r"]),
                with_help("r", "reset"),
            ]),
            next_field: new_binding(vec![
                with_keys_str(&["tab"]),
                with_help("tab", "next field"),
            ]),
            prev_field: new_binding(vec![
                with_keys_str(&["shift+tab"]),
                with_help("shift+tab", "prev field"),
            ]),
            help: new_binding(vec![
                with_keys_str(&["?"]),
                with_help("?", "more"),
            ]),
            quit: new_binding(vec![
                with_keys_str(&["q", "ctrl+c"]),
                with_help("q", "quit"),
            ]),
        }
    }
}

/// Styling for the page.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The page title.
    pub title: Style,
    /// The oversized time figures.
    pub figure: Style,
    /// The caption under the time display.
    pub caption: Style,
    /// Labels next to blurred fields.
    pub label: Style,
    /// Label next to the focused field.
    pub label_focused: Style,
    /// Status line while counting down.
    pub status_running: Style,
    /// Status line while paused mid-countdown.
    pub status_paused: Style,
    /// Status line while idle.
    pub status_idle: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            title: Style::new().bold(true),
            figure: Style::new().foreground(AdaptiveColor {
                Light: "#5A56E0",
                Dark: "#7571F9",
            }),
            caption: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            label: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            label_focused: Style::new().bold(true),
            status_running: Style::new().foreground(Color::from("35")),
            status_paused: Style::new().foreground(Color::from("214")),
            status_idle: Style::new().foreground(Color::from("240")),
        }
    }
}

/// The page model: engine, duration fields, key map, help, and styling.
pub struct App {
    countdown: countdown::Model,
    minutes: input::Model,
    seconds: input::Model,
    focus: Focus,
    keys: AppKeyMap,
    help: help::Model,
    styles: Styles,
    width: usize,
}

impl App {
    fn new() -> Self {
        let mut minutes = input::new();
        minutes.char_limit = 4;
        let _ = minutes.focus();

        let mut seconds = input::new();
        seconds.char_limit = 2;

        Self {
            countdown: countdown::new(),
            minutes,
            seconds,
            focus: Focus::Minutes,
            keys: AppKeyMap::default(),
            help: help::Model::new(),
            styles: Styles::default(),
            width: 0,
        }
    }

    // Mirror the raw field contents into the engine's pending duration.
    fn sync_inputs(&mut self) {
        self.countdown
            .set_input_minutes(countdown::coerce(&self.minutes.value()));
        self.countdown
            .set_input_seconds(countdown::coerce(&self.seconds.value()));
    }

    fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Minutes => {
                self.minutes.blur();
                let _ = self.seconds.focus();
                self.focus = Focus::Seconds;
            }
            Focus::Seconds => {
                self.seconds.blur();
                let _ = self.minutes.focus();
                self.focus = Focus::Minutes;
            }
        }
    }

    fn status_line(&self) -> String {
        if self.countdown.running() {
            self.styles.status_running.clone().render("▶ counting down")
        } else if self.countdown.remaining() > 0 {
            self.styles.status_paused.clone().render("⏸ paused")
        } else {
            self.styles.status_idle.clone().render("∙ ready")
        }
    }
}

impl help::KeyMap for App {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.keys.toggle,
            &self.keys.reset,
            &self.keys.help,
            &self.keys.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.keys.toggle, &self.keys.reset],
            vec![&self.keys.next_field, &self.keys.prev_field],
            vec![&self.keys.help, &self.keys.quit],
        ]
    }
}

fn indent(text: &str, pad: usize) -> String {
    let prefix = " ".repeat(pad);
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        (App::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.help.width = self.width.saturating_sub(2);
            return None;
        }

        let mut field_key = false;
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.keys.quit) {
                return Some(quit());
            }
            if matches_binding(key_msg, &self.keys.help) {
                self.help.show_all = !self.help.show_all;
                return None;
            }
            if matches_binding(key_msg, &self.keys.toggle) {
                return Some(self.countdown.toggle());
            }
            if matches_binding(key_msg, &self.keys.reset) {
                self.minutes.reset();
                self.seconds.reset();
                return Some(self.countdown.reset());
            }
            if matches_binding(key_msg, &self.keys.next_field)
                || matches_binding(key_msg, &self.keys.prev_field)
            {
                self.cycle_focus();
                return None;
            }
            field_key = true;
        }

        if field_key
            || msg.downcast_ref::<input::PasteMsg>().is_some()
            || msg.downcast_ref::<input::PasteErrMsg>().is_some()
        {
            let cmd = match self.focus {
                Focus::Minutes => self.minutes.update(msg),
                Focus::Seconds => self.seconds.update(msg),
            };
            self.sync_inputs();
            return cmd;
        }

        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        let time = countdown::format_time(self.countdown.display_seconds());

        let minutes_label = if self.focus == Focus::Minutes {
            self.styles.label_focused.clone().render("Minutes")
        } else {
            self.styles.label.clone().render("Minutes")
        };
        let seconds_label = if self.focus == Focus::Seconds {
            self.styles.label_focused.clone().render("Seconds")
        } else {
            self.styles.label.clone().render("Seconds")
        };

        let fields = format!(
            "{} {}   {} {}",
            self.minutes.view(),
            minutes_label,
            self.seconds.view(),
            seconds_label
        );

        format!(
            "\n{}\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}\n",
            indent(&self.styles.title.clone().render("MiniTimer"), 2),
            indent(&self.styles.figure.clone().render(&big_time(&time)), 2),
            indent(&self.styles.caption.clone().render("Time Remaining"), 2),
            indent(&fields, 2),
            indent(&self.status_line(), 2),
            indent(&self.help.view(self), 2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn strip(s: &str) -> String {
        lipgloss::strip_ansi(s)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Cmd> {
        app.update(Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[test]
    fn test_initial_view_is_idle() {
        let (app, cmd) = App::init();
        assert!(cmd.is_none());
        let out = strip(&app.view());
        assert!(out.contains("MiniTimer"));
        assert!(out.contains("Time Remaining"));
        assert!(out.contains("ready"));
        assert!(out.contains("start/pause"));
    }

    #[test]
    fn test_big_time_is_three_uniform_rows() {
        let art = big_time("00:00");
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 3);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(art.contains("|_|"));
    }

    #[test]
    fn test_digits_route_to_focused_field() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.minutes.value(), "5");
        assert_eq!(app.countdown.input_minutes(), 5);
        assert_eq!(app.countdown.input_seconds(), 0);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Tab);
        assert!(app.seconds.focused());
        assert!(!app.minutes.focused());

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.seconds.value(), "3");
        assert_eq!(app.countdown.input_seconds(), 3);

        press(&mut app, KeyCode::BackTab);
        assert!(app.minutes.focused());
    }

    #[test]
    fn test_pending_duration_previewed() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.countdown.view(), "01:30");
    }

    #[test]
    fn test_space_returns_engine_command() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Char('1'));
        let cmd = press(&mut app, KeyCode::Char(' '));
        assert!(cmd.is_some());
    }

    #[test]
    fn test_reset_clears_fields() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Char('7'));
        let cmd = press(&mut app, KeyCode::Char('r'));
        assert!(cmd.is_some());
        assert_eq!(app.minutes.value(), "");
        assert_eq!(app.seconds.value(), "");
    }

    #[test]
    fn test_help_toggle() {
        let (mut app, _) = App::init();
        assert!(!app.help.show_all);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help.show_all);
        press(&mut app, KeyCode::Char('?'));
        assert!(!app.help.show_all);
    }

    #[test]
    fn test_quit_returns_command() {
        let (mut app, _) = App::init();
        assert!(press(&mut app, KeyCode::Char('q')).is_some());
    }

    #[test]
    fn test_window_size_bounds_help() {
        let (mut app, _) = App::init();
        app.update(Box::new(WindowSizeMsg {
            width: 40,
            height: 12,
        }));
        assert_eq!(app.help.width, 38);
    }

    #[test]
    fn test_letters_never_reach_the_fields() {
        let (mut app, _) = App::init();
        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.minutes.value(), "");
        assert_eq!(app.countdown.input_minutes(), 0);
    }
}
