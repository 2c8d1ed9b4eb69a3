use descant_types::KeyError;

/// Failure of a harmony request, from payload decoding through harmonization.
#[derive(Debug)]
pub enum HarmonyError {
    Key(KeyError),
    /// Bad base64 or data URI
    Decode(String),
    /// Payload is not a readable WAV
    InvalidAudio(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
}

impl HarmonyError {
    /// Whether the caller caused this (bad key, bad payload) rather than the host.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Key(_) | Self::Decode(_) | Self::InvalidAudio(_) | Self::Json(_) => true,
            Self::Io(_) | Self::Config(_) => false,
        }
    }
}

impl From<KeyError> for HarmonyError {
    fn from(e: KeyError) -> Self {
        Self::Key(e)
    }
}

impl From<std::io::Error> for HarmonyError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for HarmonyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for HarmonyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(e) => write!(f, "{}", e),
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
            Self::InvalidAudio(msg) => write!(f, "Invalid audio: {}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for HarmonyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Key(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}
