use serde::{Deserialize, Serialize};

/// A single detected note. A rest keeps its position in the sequence and has
/// no pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Onset in seconds
    pub start: f64,
    /// Release in seconds
    pub end: f64,
    /// MIDI pitch; out-of-range values are clamped when harmonized
    #[serde(rename = "midi", default)]
    pub pitch: Option<i32>,
    pub velocity: f32, // 0.0-1.0
}

impl NoteEvent {
    pub fn new(start: f64, end: f64, pitch: i32, velocity: f32) -> Self {
        Self {
            start,
            end,
            pitch: Some(pitch),
            velocity,
        }
    }

    pub fn rest(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            pitch: None,
            velocity: 0.0,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }
}

/// Free-text key name such as "C Major", "A minor" or "F#-maj".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyLabel(String);

impl KeyLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for KeyLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for KeyLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for KeyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A key that applies over the half-open interval `[start, end)` in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: f64,
    pub end: f64,
    pub key: KeyLabel,
}

impl KeyRange {
    pub fn new(start: f64, end: f64, key: impl Into<KeyLabel>) -> Self {
        Self {
            start,
            end,
            key: key.into(),
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}
