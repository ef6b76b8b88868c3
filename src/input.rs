//! Single-line numeric input for one duration component.
//!
//! A narrowed text input that accepts ASCII digits only. Malformed content
//! is never an error at this layer: whatever ends up in the field is read
//! out with [`crate::countdown::coerce`], which treats anything unparsable
//! as zero.

use crate::key::{matches_binding, new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Key bindings for editing within the field.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move the cursor one character right.
    pub character_forward: Binding,
    /// Move the cursor one character left.
    pub character_backward: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Move to the start of the field.
    pub line_start: Binding,
    /// Move to the end of the field.
    pub line_end: Binding,
    /// Paste from the clipboard.
    pub paste: Binding,
}

/// The default set of editing key bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
        paste: new_binding(vec![with_keys_str(&["ctrl+v"])]),
    }
}

/// Clipboard paste message carrying raw text.
#[derive(Debug, Clone)]
pub struct PasteMsg(pub String);

/// Clipboard paste error message.
#[derive(Debug, Clone)]
pub struct PasteErrMsg(pub String);

/// A focusable numeric field holding one duration component.
#[derive(Debug)]
pub struct Model {
    /// Text rendered before the field content.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the typed digits.
    pub text_style: Style,
    /// Text shown while the field is empty.
    pub placeholder: String,
    /// Style for the placeholder text.
    pub placeholder_style: Style,
    /// Style for the cell under the cursor while focused.
    pub cursor_style: Style,
    /// Editing key bindings.
    pub key_map: KeyMap,
    /// Fixed display width in terminal cells.
    pub width: usize,
    /// Maximum number of digits accepted. 0 means no limit.
    pub char_limit: usize,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

/// Creates a field with defaults suitable for a duration component: empty,
/// a `"0"` placeholder, and four cells of width.
pub fn new() -> Model {
    Model {
        prompt: String::new(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: "0".to_string(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new().reverse(true),
        key_map: default_key_map(),
        width: 4,
        char_limit: 0,
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Returns the raw field content.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the field content. Non-digits are dropped and the result is
    /// truncated to the char limit; the cursor moves to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().filter(|c| c.is_ascii_digit()).collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Clears the field back to empty.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    fn insert_runes_from_user_input(&mut self, runes: Vec<char>) {
        for ch in runes.into_iter().filter(|c| c.is_ascii_digit()) {
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, ch);
            self.pos += 1;
        }
    }

    /// Processes a message while focused; blurred fields ignore everything.
    ///
    /// Handles editing keys, plain digit input, and clipboard replies. All
    /// other keys fall through untouched so the surrounding model can bind
    /// them globally.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.key_map.paste) {
                return Some(paste());
            }

            if matches_binding(key_msg, &self.key_map.delete_character_backward) {
                if !self.value.is_empty() && self.pos > 0 {
                    self.value.remove(self.pos - 1);
                    self.pos -= 1;
                }
            } else if matches_binding(key_msg, &self.key_map.delete_character_forward) {
                if self.pos < self.value.len() {
                    self.value.remove(self.pos);
                }
            } else if matches_binding(key_msg, &self.key_map.character_backward) {
                if self.pos > 0 {
                    self.pos -= 1;
                }
            } else if matches_binding(key_msg, &self.key_map.character_forward) {
                if self.pos < self.value.len() {
                    self.pos += 1;
                }
            } else if matches_binding(key_msg, &self.key_map.line_start) {
                self.pos = 0;
            } else if matches_binding(key_msg, &self.key_map.line_end) {
                self.pos = self.value.len();
            } else if let KeyCode::Char(ch) = key_msg.key {
                if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                    && !key_msg.modifiers.contains(KeyModifiers::ALT)
                {
                    self.insert_runes_from_user_input(vec![ch]);
                }
            }
            return None;
        }

        if let Some(paste_msg) = msg.downcast_ref::<PasteMsg>() {
            self.insert_runes_from_user_input(paste_msg.0.chars().collect());
            return None;
        }

        // A failed paste inserts nothing; the widget has no error surface.
        None
    }

    /// Renders the field: prompt, content (or placeholder), cursor cell when
    /// focused, padded to the configured width.
    pub fn view(&self) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return self.placeholder_view();
        }

        let value_str = self.value();
        let mut v = String::new();

        if self.focus {
            for (i, ch) in self.value.iter().enumerate() {
                let cell = ch.to_string();
                if i == self.pos {
                    v.push_str(&self.cursor_style.clone().inline(true).render(&cell));
                } else {
                    v.push_str(&self.text_style.clone().inline(true).render(&cell));
                }
            }
            if self.pos >= self.value.len() {
                v.push_str(&self.cursor_style.clone().inline(true).render(" "));
            }
        } else {
            v.push_str(&self.text_style.clone().inline(true).render(&value_str));
        }

        let mut shown = UnicodeWidthStr::width(value_str.as_str());
        if self.focus && self.pos >= self.value.len() {
            shown += 1;
        }
        if self.width > shown {
            v.push_str(&" ".repeat(self.width - shown));
        }

        format!("{}{}", self.prompt_style.clone().inline(true).render(&self.prompt), v)
    }

    fn placeholder_view(&self) -> String {
        let chars: Vec<char> = self.placeholder.chars().collect();
        let mut v = String::new();

        if self.focus {
            v.push_str(
                &self
                    .cursor_style
                    .clone()
                    .inline(true)
                    .render(&chars[0].to_string()),
            );
            if chars.len() > 1 {
                let rest: String = chars[1..].iter().collect();
                v.push_str(&self.placeholder_style.clone().inline(true).render(&rest));
            }
        } else {
            v.push_str(
                &self
                    .placeholder_style
                    .clone()
                    .inline(true)
                    .render(&self.placeholder),
            );
        }

        let shown = UnicodeWidthStr::width(self.placeholder.as_str());
        if self.width > shown {
            v.push_str(&" ".repeat(self.width - shown));
        }

        format!("{}{}", self.prompt_style.clone().inline(true).render(&self.prompt), v)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Creates a command that reads the system clipboard and replies with
/// [`PasteMsg`] or [`PasteErrMsg`].
pub fn paste() -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), |_| {
        #[cfg(feature = "clipboard-support")]
        {
            use clipboard::{ClipboardContext, ClipboardProvider};
            let res: Result<String, String> = (|| {
                let mut ctx: ClipboardContext = ClipboardProvider::new()
                    .map_err(|e| format!("Failed to create clipboard context: {}", e))?;
                ctx.get_contents()
                    .map_err(|e| format!("Failed to read clipboard: {}", e))
            })();
            match res {
                Ok(s) => Box::new(PasteMsg(s)) as Msg,
                Err(e) => Box::new(PasteErrMsg(e)) as Msg,
            }
        }
        #[cfg(not(feature = "clipboard-support"))]
        {
            Box::new(PasteErrMsg("Clipboard support not enabled".to_string())) as Msg
        }
    })
}
