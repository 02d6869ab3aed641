//! Application settings

use serde::{Deserialize, Serialize};

use super::board::{BoardOptions, CurateStyle, Mode};
use crate::i18n::Lang;

/// Where the board talks to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Backend root, with trailing slash
    pub base_url: String,
    /// Board loaded at startup
    pub start_location: String,
    /// Board opened after a successful submission
    pub results_location: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3001/".to_string(),
            start_location: "search/9".to_string(),
            results_location: "search/2".to_string(),
        }
    }
}

/// Board behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Last mode, restored at load when `persist_mode` is on
    pub is_editing: bool,
    pub persist_mode: bool,
    /// Show a lightweight overlay on hover
    pub hover_preview: bool,
    pub curate_style: CurateStyle,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            is_editing: false,
            persist_mode: true,
            hover_preview: true,
            curate_style: CurateStyle::Toggle,
        }
    }
}

/// Marker colours RGB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerColors {
    pub normal: [u8; 3],
    pub selected: [u8; 3],
    pub active: [u8; 3],
    pub background: [u8; 3],
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self {
            normal: [220, 60, 50],
            selected: [40, 120, 230],
            active: [250, 180, 40],
            background: [232, 236, 228],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    pub language: Lang,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Lang::default(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub markers: MarkerColors,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "gmarker", "gmarker") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring {}: {e}", config_path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "gmarker", "gmarker") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to write {}: {e}", config_path.display());
                    }
                }
            }
        }
    }

    /// Mode a freshly loaded board starts in
    pub fn initial_mode(&self) -> Mode {
        if self.board.persist_mode && self.board.is_editing {
            Mode::Curate
        } else {
            Mode::Browse
        }
    }

    pub fn board_options(&self, initial_mode: Mode) -> BoardOptions {
        BoardOptions {
            initial_mode,
            hover_preview: self.board.hover_preview,
            curate_style: self.board.curate_style,
            results_location: self.connection.results_location.clone(),
        }
    }
}
