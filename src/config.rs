//! Configuration loader plus strongly typed settings structures.
//!
//! Settings live in `~/.nanji/config.toml` (or `$NANJI_DIR/config.toml`).
//! The shipped defaults are embedded at compile time and extracted on first
//! run; every field also has a serde default so partial files load fine.

use crate::core::drag::{HandLengths, FACE_RADIUS};
use crate::core::state::Variant;
use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed entire directory - automatically includes all files
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NANJI_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub tts: TtsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_variant")]
    pub variant: Variant,
    #[serde(default = "default_hour_hand_length")]
    pub hour_hand_length: f64, // Face units (face radius = 100)
    #[serde(default = "default_minute_hand_length")]
    pub minute_hand_length: f64,
    #[serde(default = "default_next_question_delay_ms")]
    pub next_question_delay_ms: u64,
}

fn default_variant() -> Variant {
    Variant::FiveMinute
}

fn default_hour_hand_length() -> f64 {
    60.0
}

fn default_minute_hand_length() -> f64 {
    90.0
}

fn default_next_question_delay_ms() -> u64 {
    500
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            hour_hand_length: default_hour_hand_length(),
            minute_hand_length: default_minute_hand_length(),
            next_question_delay_ms: default_next_question_delay_ms(),
        }
    }
}

impl ClockConfig {
    pub fn hand_lengths(&self) -> HandLengths {
        HandLengths {
            hour: self.hour_hand_length,
            minute: self.minute_hand_length,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_face_color")]
    pub face_color: String,
    #[serde(default = "default_number_color")]
    pub number_color: String,
    #[serde(default = "default_hour_hand_color")]
    pub hour_hand_color: String,
    #[serde(default = "default_minute_hand_color")]
    pub minute_hand_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

fn default_poll_timeout_ms() -> u64 {
    16 // ~60 FPS
}

fn default_face_color() -> String {
    "#c0c0c0".to_string()
}

fn default_number_color() -> String {
    "#ffffff".to_string()
}

fn default_hour_hand_color() -> String {
    "#ff6060".to_string()
}

fn default_minute_hand_color() -> String {
    "#60a0ff".to_string()
}

fn default_accent_color() -> String {
    "#ffd700".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            face_color: default_face_color(),
            number_color: default_number_color(),
            hour_hand_color: default_hour_hand_color(),
            minute_hand_color: default_minute_hand_color(),
            accent_color: default_accent_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_tts_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub voice: Option<String>, // Voice name (None = first voice for `language`)
    #[serde(default = "default_tts_rate")]
    pub rate: f32, // Speech rate (0.5 to 2.0, 1.0 = normal)
    #[serde(default = "default_tts_volume")]
    pub volume: f32, // Volume (0.0 to 1.0)
    #[serde(default = "default_tts_language")]
    pub language: String,
}

fn default_tts_enabled() -> bool {
    true
}

fn default_tts_rate() -> f32 {
    1.0 // Normal speech rate
}

fn default_tts_volume() -> f32 {
    1.0 // Full volume
}

fn default_tts_language() -> String {
    "ja-JP".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            enabled: default_tts_enabled(),
            voice: None,
            rate: default_tts_rate(),
            volume: default_tts_volume(),
            language: default_tts_language(),
        }
    }
}

impl Config {
    /// Load config.toml from the data directory, extracting defaults first
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load an explicit config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and sanitize a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.sanitize();
        Ok(config)
    }

    /// Replace values that would break hit-testing with defaults
    fn sanitize(&mut self) {
        let clock = &mut self.clock;
        let valid = clock.hour_hand_length > 0.0
            && clock.minute_hand_length > clock.hour_hand_length
            && clock.minute_hand_length <= FACE_RADIUS;
        if !valid {
            tracing::warn!(
                "Invalid hand lengths (hour={}, minute={}), using defaults",
                clock.hour_hand_length,
                clock.minute_hand_length
            );
            clock.hour_hand_length = default_hour_hand_length();
            clock.minute_hand_length = default_minute_hand_length();
        }
        if self.ui.poll_timeout_ms == 0 {
            self.ui.poll_timeout_ms = default_poll_timeout_ms();
        }
        self.tts.volume = self.tts.volume.clamp(0.0, 1.0);
        self.tts.rate = self.tts.rate.clamp(0.5, 2.0);
    }

    /// Write embedded default files that don't exist yet
    fn extract_defaults() -> Result<()> {
        let base = Self::base_dir()?;
        fs::create_dir_all(&base).context(format!("Failed to create {:?}", base))?;

        // Automatically extract all files from embedded defaults directory
        for file in DEFAULTS_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid default filename")?;
            let path = base.join(filename);

            if !path.exists() {
                fs::write(&path, file.contents())
                    .context(format!("Failed to write {}", filename))?;
                tracing::info!("Extracted {} to {:?}", filename, path);
            }
        }
        Ok(())
    }

    /// Get the base nanji directory (~/.nanji/)
    /// Can be overridden with NANJI_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".nanji"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("nanji.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_config_parses() {
        let file = DEFAULTS_DIR
            .get_file("config.toml")
            .expect("default config embedded");
        let contents = file.contents_utf8().expect("utf-8 config");
        let config = Config::from_toml(contents).expect("default config parses");
        assert_eq!(config.clock.variant, Variant::FiveMinute);
        assert_eq!(config.clock.hour_hand_length, 60.0);
        assert_eq!(config.tts.language, "ja-JP");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[clock]\nvariant = \"offset\"\n").unwrap();
        assert_eq!(config.clock.variant, Variant::Offset);
        assert_eq!(config.clock.minute_hand_length, 90.0);
        assert_eq!(config.clock.next_question_delay_ms, 500);
        assert_eq!(config.ui.poll_timeout_ms, 16);
        assert!(config.tts.enabled);

        let empty = Config::from_toml("").unwrap();
        assert_eq!(empty.clock.variant, Variant::FiveMinute);
    }

    #[test]
    fn test_invalid_hand_lengths_fall_back() {
        let config = Config::from_toml(
            "[clock]\nhour_hand_length = 95.0\nminute_hand_length = 40.0\n",
        )
        .unwrap();
        assert_eq!(config.clock.hand_lengths(), HandLengths::default());
    }

    #[test]
    fn test_tts_values_clamped() {
        let config = Config::from_toml("[tts]\nvolume = 3.0\nrate = 0.1\n").unwrap();
        assert_eq!(config.tts.volume, 1.0);
        assert_eq!(config.tts.rate, 0.5);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Config::from_toml("[clock]\nvariant = \"seconds\"\n").is_err());
    }
}
