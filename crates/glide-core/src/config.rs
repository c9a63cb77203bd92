use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Easing curve used for smooth scrolling and reveal tweens.
///
/// GSAP-style names are accepted as aliases, e.g. `"power3.out"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value
    None,
    #[serde(alias = "none.out")]
    Linear,
    /// 1 - (1-t)^2
    #[serde(alias = "power1.out")]
    Power1Out,
    /// 1 - (1-t)^3
    #[serde(alias = "power2.out")]
    Power2Out,
    /// 1 - (1-t)^4
    #[serde(alias = "power3.out")]
    Power3Out,
    /// 1 - (1-t)^5
    #[serde(alias = "power4.out")]
    Power4Out,
    /// Symmetric cubic ease-in-out
    #[serde(alias = "power2.inOut")]
    Power2InOut,
    /// min(1, 1.001 - 2^(-10t))
    #[default]
    #[serde(alias = "expo.out")]
    ExpoOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Smooth wheel input (false = native jumps)
    #[serde(default = "default_true")]
    pub smooth_wheel: bool,
    /// Smooth touch input
    #[serde(default)]
    pub smooth_touch: bool,
    /// Glide duration in milliseconds (duration mode)
    #[serde(default = "default_scroll_duration")]
    pub duration_ms: u64,
    /// Easing for duration mode
    #[serde(default)]
    pub easing: EasingType,
    /// Damping factor per 60fps frame; switches to damping mode when set
    #[serde(default)]
    pub lerp: Option<f64>,
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
    #[serde(default = "default_touch_multiplier")]
    pub touch_multiplier: f64,
    /// Frame rate while anything is moving
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_wheel: default_true(),
            smooth_touch: false,
            duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            lerp: None,
            wheel_multiplier: default_wheel_multiplier(),
            touch_multiplier: default_touch_multiplier(),
            frame_rate: default_frame_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Play reveal animations (false = show everything at its final state)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to every duration, stagger and delay
    #[serde(default = "default_duration_scale")]
    pub duration_scale: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            duration_scale: default_duration_scale(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Page variant: "smart-home" or "metaverse"
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Pixel width of one terminal cell, used to convert pixel presets
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Pixel height of one terminal cell
    #[serde(default = "default_cell_height")]
    pub cell_height_px: f64,
    /// Scroll distance after which the header switches to its compact style
    #[serde(default = "default_header_threshold")]
    pub header_threshold_px: f64,
    /// Rows scrolled per mouse wheel notch
    #[serde(default = "default_wheel_rows")]
    pub wheel_rows: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            variant: default_variant(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            header_threshold_px: default_header_threshold(),
            wheel_rows: default_wheel_rows(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glide")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_scroll_duration() -> u64 {
    1200
}

fn default_wheel_multiplier() -> f64 {
    1.0
}

fn default_touch_multiplier() -> f64 {
    2.0
}

fn default_frame_rate() -> u32 {
    60
}

fn default_duration_scale() -> f64 {
    1.0
}

fn default_tick_rate() -> u64 {
    250
}

fn default_variant() -> String {
    "smart-home".to_string()
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

fn default_header_threshold() -> f64 {
    50.0
}

fn default_wheel_rows() -> f64 {
    3.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glide/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glide")
            .join("config.toml")
    }

    /// Get the log file path used by the interactive preview
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("glide.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.scroll.duration_ms, 1200);
        assert_eq!(config.scroll.easing, EasingType::ExpoOut);
        assert!(config.scroll.smooth_wheel);
        assert!(!config.scroll.smooth_touch);
        assert_eq!(config.scroll.touch_multiplier, 2.0);
        assert_eq!(config.ui.header_threshold_px, 50.0);
        assert!(config.reveal.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [scroll]
            lerp = 0.1
            easing = "power3.out"

            [ui]
            variant = "metaverse"
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.lerp, Some(0.1));
        assert_eq!(config.scroll.easing, EasingType::Power3Out);
        assert_eq!(config.scroll.duration_ms, 1200);
        assert_eq!(config.ui.variant, "metaverse");
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[scroll]\nduration_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_easing() {
        let mut config = AppConfig::default();
        config.scroll.easing = EasingType::Power2InOut;
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.scroll.easing, EasingType::Power2InOut);
    }
}
