//! Help view generated from key bindings.
//!
//! Renders either a compact single-line summary of the most important keys
//! or an expanded multi-column layout, driven by whatever implements
//! [`KeyMap`]. This is the widget's instructions panel: the same binding
//! definitions that route input also document it.

use crate::key::Binding;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// The key bindings a model exposes to the help view.
pub trait KeyMap {
    /// The essential bindings, shown in the one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// All bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Styling for the help text.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the truncation ellipsis.
    pub ellipsis: Style,
    /// Key style in the short view.
    pub short_key: Style,
    /// Description style in the short view.
    pub short_desc: Style,
    /// Separator style in the short view.
    pub short_separator: Style,
    /// Key style in the full view.
    pub full_key: Style,
    /// Description style in the full view.
    pub full_desc: Style,
    /// Column separator style in the full view.
    pub full_separator: Style,
}

impl Default for Styles {
    /// A subdued gray palette that adapts to light and dark terminals.
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help model: view mode, width constraint, separators, and styles.
#[derive(Debug, Clone)]
pub struct Model {
    /// When true, renders the expanded multi-column view.
    pub show_all: bool,
    /// Maximum width in cells; 0 disables truncation.
    pub width: usize,
    /// Separator between items in the short view.
    pub short_separator: String,
    /// Separator between columns in the full view.
    pub full_separator: String,
    /// Marker appended when content is truncated.
    pub ellipsis: String,
    /// Visual styling.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

/// Creates a help model with default separators and styling.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// Creates a help model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum render width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders help for the given key map in the current view mode.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders the one-line help: `key desc • key desc • …`.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        if bindings.is_empty() {
            return String::new();
        }

        let mut builder = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        for kb in bindings.iter() {
            if !kb.enabled() {
                continue;
            }

            let sep = if total_width > 0 { separator.as_str() } else { "" };

            let help = kb.help();
            let key_part = self.styles.short_key.clone().inline(true).render(&help.key);
            let desc_part = self
                .styles
                .short_desc
                .clone()
                .inline(true)
                .render(&help.desc);
            let item_str = format!("{}{} {}", sep, key_part, desc_part);

            let item_width = lipgloss::width_visible(&item_str);

            if let Some(tail) = self.should_add_item(total_width, item_width) {
                if !tail.is_empty() {
                    builder.push_str(&tail);
                }
                break;
            }

            total_width += item_width;
            builder.push_str(&item_str);
        }
        builder
    }

    /// Renders the expanded help: one column per binding group, keys and
    /// descriptions aligned, columns joined side by side.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        if groups.is_empty() {
            return String::new();
        }

        let mut columns = Vec::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        for group in groups.iter() {
            if group.is_empty() || !group.iter().any(|b| b.enabled()) {
                continue;
            }

            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    let key_part = self.styles.full_key.clone().inline(true).render(&help.key);
                    let desc_part = self
                        .styles
                        .full_desc
                        .clone()
                        .inline(true)
                        .render(&help.desc);
                    format!("{} {}", key_part, desc_part)
                })
                .collect();

            let col_str = rows.join("\n");
            let col_width = lipgloss::width_visible(&col_str);

            if let Some(tail) = self.should_add_item(total_width, col_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }

            total_width += col_width;
            columns.push(col_str);
        }

        let mut result_parts = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                result_parts.push(separator.as_str());
            }
            result_parts.push(col.as_str());
        }

        lipgloss::join_horizontal(lipgloss::TOP, &result_parts)
    }

    // Decides whether an item of the given width still fits. Returns None
    // when it fits; otherwise the tail to append before stopping (the
    // ellipsis when there is room for it, an empty string when not).
    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(
                " {}",
                self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
            );
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{new_binding, with_help, with_keys_str};

    struct TestKeys {
        toggle: Binding,
        quit: Binding,
    }

    impl KeyMap for TestKeys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.toggle, &self.quit]
        }
        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.toggle], vec![&self.quit]]
        }
    }

    fn keys() -> TestKeys {
        TestKeys {
            toggle: new_binding(vec![
                with_keys_str(&["space"]),
                with_help("space", "start/pause"),
            ]),
            quit: new_binding(vec![with_keys_str(&["q"]), with_help("q", "quit")]),
        }
    }

    fn strip(s: &str) -> String {
        lipgloss::strip_ansi(s)
    }

    #[test]
    fn test_short_help_lists_bindings() {
        let help = Model::new();
        let out = strip(&help.view(&keys()));
        assert!(out.contains("space start/pause"));
        assert!(out.contains("q quit"));
        assert!(out.contains("•"));
    }

    #[test]
    fn test_disabled_bindings_hidden() {
        let mut k = keys();
        k.quit.set_enabled(false);
        let help = Model::new();
        let out = strip(&help.view(&k));
        assert!(out.contains("start/pause"));
        assert!(!out.contains("quit"));
    }

    #[test]
    fn test_short_help_truncates_with_ellipsis() {
        let help = Model::new().with_width(22);
        let out = strip(&help.view(&keys()));
        assert!(out.contains("…"), "expected ellipsis in {:?}", out);
        assert!(!out.contains("quit"));
    }

    #[test]
    fn test_full_help_has_columns() {
        let mut help = Model::new();
        help.show_all = true;
        let out = strip(&help.view(&keys()));
        assert!(out.contains("space start/pause"));
        assert!(out.contains("q quit"));
    }

    #[test]
    fn test_empty_keymap_renders_nothing() {
        struct Empty;
        impl KeyMap for Empty {
            fn short_help(&self) -> Vec<&Binding> {
                vec![]
            }
            fn full_help(&self) -> Vec<Vec<&Binding>> {
                vec![]
            }
        }
        let help = Model::new();
        assert_eq!(help.view(&Empty), "");
        let mut help = help;
        help.show_all = true;
        assert_eq!(help.view(&Empty), "");
    }
}
