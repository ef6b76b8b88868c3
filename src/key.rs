//! Type-safe key bindings with help metadata.
//!
//! Bindings pair one or more key presses with the help text shown for them,
//! so a single definition drives both input matching and the help view.
//!
//! ```rust
//! use minitimer::key::{matches_binding, new_binding, with_help, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let toggle = new_binding(vec![
//!     with_keys_str(&["space"]),
//!     with_help("space", "start/pause"),
//! ]);
//!
//! let msg = KeyMsg {
//!     key: KeyCode::Char(' '),
//!     modifiers: KeyModifiers::NONE,
//! };
//! assert!(matches_binding(&msg, &toggle));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifier keys held during the press.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help metadata for a binding: the key label and what it does.
#[derive(Debug, Clone, Default)]
pub struct Help {
    /// The key label shown in help, e.g. `"space"` or `"ctrl+c"`.
    pub key: String,
    /// Short description of the action, e.g. `"start/pause"`.
    pub desc: String,
}

/// A key binding: the presses that trigger it, its help text, and whether
/// it is currently enabled.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from a list of key presses.
    ///
    /// ```rust
    /// use minitimer::key::Binding;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
    /// let force = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
    /// assert!(quit.enabled());
    /// assert!(force.enabled());
    /// ```
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<KeyPress>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// Returns the key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help metadata for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether this binding should match keys and appear in help.
    ///
    /// A binding with no keys is never enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether the given key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|kp| {
            if kp.code != msg.key {
                return false;
            }
            // Character keys may arrive with SHIFT set (the shift is already
            // encoded in the character itself), so ignore it for comparison.
            let mut mods = msg.modifiers;
            if matches!(msg.key, KeyCode::Char(_)) {
                mods.remove(KeyModifiers::SHIFT);
            }
            mods == kp.modifiers
        })
    }
}

/// A functional option for [`new_binding`].
#[derive(Debug, Clone)]
pub enum BindingOpt {
    /// Sets the key presses that trigger the binding.
    Keys(Vec<KeyPress>),
    /// Sets the help metadata.
    Help(Help),
    /// Disables the binding.
    Disabled,
}

/// Option: keys given as [`KeyPress`] values.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    BindingOpt::Keys(keys)
}

/// Option: keys given by name, e.g. `"left"`, `"ctrl+v"`, `"shift+tab"`.
///
/// Unknown names are ignored rather than erroring; a binding that ends up
/// with no keys is simply never matched.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().filter_map(|s| parse_key(s)).collect())
}

/// Option: help text for the binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    BindingOpt::Help(Help {
        key: key.to_string(),
        desc: desc.to_string(),
    })
}

/// Option: create the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Builds a [`Binding`] from functional options.
///
/// ```rust
/// use minitimer::key::{new_binding, with_help, with_keys_str};
///
/// let reset = new_binding(vec![
///     with_keys_str(&["r"]),
///     with_help("r", "reset"),
/// ]);
/// assert_eq!(reset.help().desc, "reset");
/// ```
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys = keys,
            BindingOpt::Help(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Reports whether the key message triggers the given binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Reports whether the key message triggers any of the given bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Parses a key name like `"q"`, `"enter"`, or `"ctrl+v"` into a press.
fn parse_key(s: &str) -> Option<KeyPress> {
    let mut modifiers = KeyModifiers::NONE;
    let mut name = s;
    while let Some((prefix, rest)) = name.split_once('+') {
        match prefix {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        name = rest;
    }

    // Terminals report shift+tab as its own key code.
    if name == "tab" && modifiers.contains(KeyModifiers::SHIFT) {
        modifiers.remove(KeyModifiers::SHIFT);
        return Some(KeyPress {
            code: KeyCode::BackTab,
            modifiers,
        });
    }

    let code = match name {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "esc" => KeyCode::Esc,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdown" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = name.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyPress { code, modifiers })
}
