use std::path::{Path, PathBuf};

use serde::Deserialize;

use descant_types::KeyLabel;

use crate::error::HarmonyError;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const FALLBACK_KEY: &str = "C Major";
const FALLBACK_MODEL: &str = "mock-pitch";
const FALLBACK_SAMPLE_RATE: u32 = 22050;
const FALLBACK_NOTE_DURATION: f64 = 0.25;
const FALLBACK_VELOCITY: f32 = 0.8;
const FALLBACK_MELODY: [i32; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    transcriber: TranscriberConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    key: Option<String>,
}

#[derive(Deserialize, Default)]
struct TranscriberConfig {
    model: Option<String>,
    sample_rate: Option<u32>,
    note_duration: Option<f64>,
    velocity: Option<f32>,
    melody: Option<Vec<i32>>,
}

/// Settings for the mock transcriber.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriberSettings {
    pub model: String,
    pub sample_rate: u32,
    pub note_duration: f64,
    pub velocity: f32,
    pub melody: Vec<i32>,
}

pub struct Config {
    defaults: DefaultsConfig,
    transcriber: TranscriberConfig,
}

impl Config {
    /// Embedded defaults overlaid with `~/.config/descant/config.toml`, if present.
    pub fn load() -> Self {
        let mut config = Self::embedded();
        if let Some(path) = user_config_path() {
            if path.exists() {
                config.overlay_file(&path);
            }
        }
        config
    }

    /// Embedded defaults overlaid with an explicit file. Problems with the file
    /// are logged and the defaults kept.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::embedded();
        config.overlay_file(path);
        config
    }

    /// Parse a complete config document with no defaults behind it.
    pub fn from_toml_str(contents: &str) -> Result<Self, HarmonyError> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| HarmonyError::Config(e.to_string()))?;
        Ok(Self {
            defaults: file.defaults,
            transcriber: file.transcriber,
        })
    }

    fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!(target: "config", "embedded config.toml unusable: {}", e);
            Self {
                defaults: DefaultsConfig::default(),
                transcriber: TranscriberConfig::default(),
            }
        })
    }

    fn overlay_file(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => {
                    merge_defaults(&mut self.defaults, user.defaults);
                    merge_transcriber(&mut self.transcriber, user.transcriber);
                }
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
    }

    /// Global key for requests that don't specify one.
    pub fn default_key(&self) -> KeyLabel {
        match self.defaults.key.as_deref() {
            Some(key) if !key.trim().is_empty() => KeyLabel::new(key),
            _ => KeyLabel::new(FALLBACK_KEY),
        }
    }

    pub fn transcriber(&self) -> TranscriberSettings {
        let t = &self.transcriber;
        TranscriberSettings {
            model: t
                .model
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_MODEL.to_string()),
            sample_rate: t.sample_rate.filter(|&r| r > 0).unwrap_or(FALLBACK_SAMPLE_RATE),
            note_duration: t
                .note_duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(FALLBACK_NOTE_DURATION),
            velocity: t
                .velocity
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(FALLBACK_VELOCITY),
            melody: t
                .melody
                .as_ref()
                .map(|m| m.iter().map(|&p| p.clamp(0, 127)).collect())
                .unwrap_or_else(|| FALLBACK_MELODY.to_vec()),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("descant").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.key.is_some() {
        base.key = user.key;
    }
}

fn merge_transcriber(base: &mut TranscriberConfig, user: TranscriberConfig) {
    if user.model.is_some() {
        base.model = user.model;
    }
    if user.sample_rate.is_some() {
        base.sample_rate = user.sample_rate;
    }
    if user.note_duration.is_some() {
        base.note_duration = user.note_duration;
    }
    if user.velocity.is_some() {
        base.velocity = user.velocity;
    }
    if user.melody.is_some() {
        base.melody = user.melody;
    }
}
