//! Display configuration document
//!
//! A JSON document with the recognized fields below. Missing fields take
//! the built-in defaults; unknown fields are ignored. If the document
//! cannot be read or parsed at all, the whole default configuration
//! applies and startup continues.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Process-wide configuration, immutable after load
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Text drawn by the overlay compositor
    pub display_text: String,
    /// Show the active effect's name bottom-right
    pub show_effect_name: bool,
    /// Show the display text (ignored while a logo is active)
    pub show_text: bool,
    /// Automatic effect rotation dwell range, in seconds
    pub effect_duration: DurationRange,
    pub logo: LogoConfig,
    pub glitch_effects: GlitchEffects,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_text: "LUMEN".to_string(),
            show_effect_name: false,
            show_text: true,
            effect_duration: DurationRange::default(),
            logo: LogoConfig::default(),
            glitch_effects: GlitchEffects::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults on any
    /// failure (degraded-start: the session still runs).
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "using built-in default config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Directory holding the config document and the logo image
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lumen")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}

/// Dwell range for automatic effect rotation, in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DurationRange {
    pub min: f64,
    pub max: f64,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self {
            min: 20.0,
            max: 35.0,
        }
    }
}

impl DurationRange {
    /// The dwell range in milliseconds, with min <= max enforced
    pub fn as_millis(&self) -> (u64, u64) {
        let min = (self.min.max(0.0) * 1000.0) as u64;
        let max = (self.max.max(0.0) * 1000.0) as u64;
        (min.min(max), max.max(min))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoConfig {
    pub enabled: bool,
    /// Image file name, resolved under `<config dir>/img/`
    pub image_name: String,
    pub scale: f32,
    pub visibility_interval: VisibilityInterval,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            image_name: "logo.png".to_string(),
            scale: 0.5,
            visibility_interval: VisibilityInterval::default(),
        }
    }
}

impl LogoConfig {
    pub fn image_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join("img").join(&self.image_name)
    }
}

/// Cyclic show/hide window for the logo
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilityInterval {
    pub enabled: bool,
    /// Visible portion of the cycle, milliseconds
    pub duration: u64,
    /// Hidden portion of the cycle, milliseconds
    pub hide_interval: u64,
    pub low_frequency_trigger: LowFreqTrigger,
}

impl Default for VisibilityInterval {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: 8000,
            hide_interval: 12000,
            low_frequency_trigger: LowFreqTrigger::default(),
        }
    }
}

/// Bass-transient override for the visibility window
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LowFreqTrigger {
    pub enabled: bool,
    pub threshold: f32,
    pub sensitivity: f32,
}

impl Default for LowFreqTrigger {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 180.0,
            sensitivity: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlitchEffects {
    pub text: GlitchParams,
    pub logo: GlitchParams,
}

/// Glitch jitter parameters for one overlay element
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlitchParams {
    pub intensity: f32,
    /// Re-roll period for the glitch offset, milliseconds
    pub frequency: u64,
    pub offset_multiplier: f32,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            frequency: 100,
            offset_multiplier: 1.0,
        }
    }
}

impl GlitchParams {
    /// Built-in defaults for the logo passes
    pub fn logo_default() -> Self {
        Self {
            intensity: 0.8,
            frequency: 100,
            offset_multiplier: 0.8,
        }
    }
}

impl Default for GlitchEffects {
    fn default() -> Self {
        Self {
            text: GlitchParams::default(),
            logo: GlitchParams::logo_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_fallback() {
        let config = Config::default();
        assert_eq!(config.glitch_effects.text.intensity, 1.0);
        assert_eq!(config.glitch_effects.text.frequency, 100);
        assert_eq!(config.glitch_effects.text.offset_multiplier, 1.0);
        assert_eq!(config.glitch_effects.logo.intensity, 0.8);
        assert_eq!(config.glitch_effects.logo.frequency, 100);
        assert_eq!(config.glitch_effects.logo.offset_multiplier, 0.8);
        assert_eq!(config.effect_duration.as_millis(), (20_000, 35_000));
        assert!(!config.logo.enabled);
        assert!(!config.logo.visibility_interval.enabled);
        assert_eq!(config.logo.visibility_interval.duration, 8000);
        assert_eq!(config.logo.visibility_interval.hide_interval, 12_000);
    }

    #[test]
    fn empty_document_parses_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.display_text, "LUMEN");
        assert!(config.show_text);
        assert!(!config.show_effect_name);
    }

    #[test]
    fn full_document_parses() {
        let doc = r#"{
            "displayText": "NIGHT",
            "showEffectName": true,
            "showText": false,
            "effectDuration": { "min": 5, "max": 10 },
            "logo": {
                "enabled": true,
                "imageName": "mark.png",
                "scale": 0.75,
                "visibilityInterval": {
                    "enabled": true,
                    "duration": 4000,
                    "hideInterval": 6000,
                    "lowFrequencyTrigger": {
                        "enabled": true,
                        "threshold": 150,
                        "sensitivity": 0.5
                    }
                }
            },
            "glitchEffects": {
                "text": { "intensity": 2.0, "frequency": 50, "offsetMultiplier": 1.5 },
                "logo": { "intensity": 0.4, "frequency": 200, "offsetMultiplier": 0.6 }
            }
        }"#;
        let config: Config = serde_json::from_str(doc).unwrap();
        assert_eq!(config.display_text, "NIGHT");
        assert!(config.show_effect_name);
        assert!(!config.show_text);
        assert_eq!(config.effect_duration.as_millis(), (5000, 10_000));
        assert!(config.logo.enabled);
        assert_eq!(config.logo.image_name, "mark.png");
        assert_eq!(config.logo.scale, 0.75);
        let vis = config.logo.visibility_interval;
        assert!(vis.enabled);
        assert_eq!(vis.duration, 4000);
        assert_eq!(vis.hide_interval, 6000);
        assert!(vis.low_frequency_trigger.enabled);
        assert_eq!(vis.low_frequency_trigger.threshold, 150.0);
        assert_eq!(config.glitch_effects.text.frequency, 50);
        assert_eq!(config.glitch_effects.logo.offset_multiplier, 0.6);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config: Config = serde_json::from_str(r#"{"futureKnob": 3}"#).unwrap();
        assert_eq!(config.display_text, "LUMEN");
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(serde_json::from_str::<Config>("not json").is_err());
    }

    #[test]
    fn inverted_duration_range_is_normalized() {
        let range = DurationRange { min: 30.0, max: 10.0 };
        let (min, max) = range.as_millis();
        assert!(min <= max);
    }
}
