/// Why a key label could not be turned into a scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Empty label, fewer than two tokens, or no "maj"/"min" mode word
    InvalidKeyFormat(String),
    /// Root token is not one of the recognized spellings
    UnsupportedRoot(String),
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeyFormat(msg) => write!(f, "Invalid key format: {}", msg),
            Self::UnsupportedRoot(root) => write!(f, "Unsupported key root '{}'", root),
        }
    }
}

impl std::error::Error for KeyError {}
