//! Editor settings and workspace layout.
//!
//! Neither affects composition except `autoUpdate`, which gates the refresh
//! scheduler. The shell receives settings as a declarative [`EditorStyle`].

use super::persist;
use super::storage::SharedStorage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keymap {
    Default,
    Vim,
    Emacs,
}

/// Persisted under `settings`; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub font_size: u8,
    pub tab_size: u8,
    pub auto_update: bool,
    pub theme: Theme,
    pub show_line_numbers: bool,
    pub auto_close_brackets: bool,
    pub word_wrap: bool,
    pub highlight_active_line: bool,
    pub keymap: Keymap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14,
            tab_size: 2,
            auto_update: true,
            theme: Theme::Dark,
            show_line_numbers: true,
            auto_close_brackets: true,
            word_wrap: false,
            highlight_active_line: true,
            keymap: Keymap::Default,
        }
    }
}

impl Settings {
    pub fn load(storage: &SharedStorage) -> Self {
        persist::load_json(storage, persist::SETTINGS).unwrap_or_default()
    }

    pub fn save(&self, storage: &SharedStorage) {
        persist::save_json(storage, persist::SETTINGS, self);
    }
}

/// Declarative editor appearance: CSS custom properties and element
/// attributes the shell applies verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorStyle {
    pub vars: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

/// Pure mapping from settings to editor style.
pub fn editor_style(settings: &Settings) -> EditorStyle {
    let (background, foreground) = match settings.theme {
        Theme::Dark => ("#1e1e1e", "#d4d4d4"),
        Theme::Light => ("#ffffff", "#1f2328"),
    };
    let vars = [
        ("--editor-font-size", format!("{}px", settings.font_size)),
        ("--editor-tab-size", settings.tab_size.to_string()),
        ("--editor-background", background.to_string()),
        ("--editor-foreground", foreground.to_string()),
    ];
    let keymap = match settings.keymap {
        Keymap::Default => "default",
        Keymap::Vim => "vim",
        Keymap::Emacs => "emacs",
    };
    let attributes = [
        ("data-theme", theme_name(settings.theme).to_string()),
        ("data-line-numbers", settings.show_line_numbers.to_string()),
        ("data-auto-close-brackets", settings.auto_close_brackets.to_string()),
        ("data-word-wrap", settings.word_wrap.to_string()),
        ("data-highlight-active-line", settings.highlight_active_line.to_string()),
        ("data-keymap", keymap.to_string()),
    ];

    EditorStyle {
        vars: vars.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        attributes: attributes.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    }
}

const fn theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Split,
    Editor,
    Preview,
}

pub const MIN_PANEL_PERCENT: u8 = 20;
pub const MAX_PANEL_PERCENT: u8 = 80;

/// Workspace layout, persisted as three `layout.*` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub view: View,
    pub panel_width_percent: u8,
    pub docked_files: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            view: View::Split,
            panel_width_percent: 50,
            docked_files: Vec::new(),
        }
    }
}

impl Layout {
    pub fn load(storage: &SharedStorage) -> Self {
        let defaults = Self::default();
        Self {
            view: persist::load_json(storage, persist::LAYOUT_VIEW).unwrap_or(defaults.view),
            panel_width_percent: persist::load_json::<f64>(storage, persist::LAYOUT_PANEL_WIDTH)
                .map(clamp_panel)
                .unwrap_or(defaults.panel_width_percent),
            docked_files: persist::load_json(storage, persist::LAYOUT_DOCKED)
                .unwrap_or(defaults.docked_files),
        }
    }

    pub fn save(&self, storage: &SharedStorage) {
        persist::save_json(storage, persist::LAYOUT_VIEW, &self.view);
        persist::save_json(storage, persist::LAYOUT_PANEL_WIDTH, &self.panel_width_percent);
        persist::save_json(storage, persist::LAYOUT_DOCKED, &self.docked_files);
    }

    /// Copy with the panel width clamped into range.
    pub fn normalized(mut self) -> Self {
        self.panel_width_percent = clamp_panel(f64::from(self.panel_width_percent));
        self
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_panel(percent: f64) -> u8 {
    if percent.is_nan() {
        return Layout::default().panel_width_percent;
    }
    percent.round().clamp(f64::from(MIN_PANEL_PERCENT), f64::from(MAX_PANEL_PERCENT)) as u8
}
