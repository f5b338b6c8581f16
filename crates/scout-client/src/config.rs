use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api_client::DEFAULT_BASE_URL;
use crate::error::{Result, ScoutError};
use crate::tui::Tab;

/// Value shipped in sample env files; treated the same as no token at all.
pub const MAP_TOKEN_PLACEHOLDER: &str = "your_mapbox_access_token_here";

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Secondary text, inactive tabs
    pub muted: Rgb,
    /// Verified reports, success messages
    pub success: Rgb,
    /// Unverified reports
    pub warning: Rgb,
    /// Errors and the map configuration panel
    pub error: Rgb,
    /// Report markers
    pub info: Rgb,
    /// Active tab and the user's own position
    pub accent: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            muted: Rgb::new(136, 136, 136),
            success: Rgb::new(134, 239, 172),
            warning: Rgb::new(253, 224, 71),
            error: Rgb::new(255, 68, 68),
            info: Rgb::new(147, 197, 253),
            accent: Rgb::new(0, 212, 255),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            muted: Rgb::new(166, 173, 200),   // Subtext0
            success: Rgb::new(166, 227, 161), // Green
            warning: Rgb::new(249, 226, 175), // Yellow
            error: Rgb::new(243, 139, 168),   // Red
            info: Rgb::new(137, 180, 250),    // Blue
            accent: Rgb::new(137, 220, 235),  // Sky
        }
    }

    /// Catppuccin Latte theme (light theme)
    pub fn catppuccin_latte() -> Self {
        Self {
            muted: Rgb::new(108, 111, 133),  // Subtext0
            success: Rgb::new(64, 160, 43),  // Green
            warning: Rgb::new(223, 142, 29), // Yellow
            error: Rgb::new(210, 15, 57),    // Red
            info: Rgb::new(30, 102, 245),    // Blue
            accent: Rgb::new(4, 165, 229),   // Sky
        }
    }

    /// High contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            muted: Rgb::new(200, 200, 200),
            success: Rgb::new(0, 255, 0),
            warning: Rgb::new(255, 255, 0),
            error: Rgb::new(255, 0, 0),
            info: Rgb::new(0, 255, 255),
            accent: Rgb::new(255, 0, 255),
        }
    }

    /// Get theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "default" => Some(Self::default()),
            "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            "catppuccinlatte" => Some(Self::catppuccin_latte()),
            "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    Preset(String),
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    /// Resolve to actual theme colors
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_default(),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// Where and how to reach the Scout API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Map provider credential and the report search around the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(default)]
    pub access_token: Option<String>,

    /// Kilometres
    #[serde(default = "default_search_radius")]
    pub search_radius_km: f64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub min_verifications: u32,
}

fn default_search_radius() -> f64 {
    5.0
}

fn default_page_size() -> u32 {
    50
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            search_radius_km: default_search_radius(),
            page_size: default_page_size(),
            min_verifications: 0,
        }
    }
}

impl MapConfig {
    /// The usable credential, if one is configured.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != MAP_TOKEN_PLACEHOLDER)
    }
}

/// Configuration settings for scout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub default_tab: Tab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            map: MapConfig::default(),
            theme: ThemeConfig::default(),
            default_tab: Tab::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.scout.json)
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".scout.json"))
            .ok_or_else(|| ScoutError::Config("could not find home directory".to_string()))
    }

    /// Load configuration from the default path, then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_file_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`, writing a default file there first if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            Config::default().save_to(path)?;
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config, using defaults");
                let mut config = Self::default();
                config.apply_env(|key| std::env::var(key).ok());
                config
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// `SCOUT_API_BASE_URL` and `SCOUT_MAP_ACCESS_TOKEN` win over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SCOUT_API_BASE_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup("SCOUT_MAP_ACCESS_TOKEN") {
            self.map.access_token = Some(token);
        }
    }
}
