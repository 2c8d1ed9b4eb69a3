use serde::{Deserialize, Serialize};

use crate::KeyLabel;

/// Two harmony voices generated from a melody, plus the key used for each note.
///
/// All three sequences have the melody's length; a rest in the melody is a
/// rest (`None`) in both voices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonyResult {
    #[serde(rename = "major_third_up")]
    pub third_up: Vec<Option<u8>>,
    #[serde(rename = "perfect_fifth_up")]
    pub fifth_up: Vec<Option<u8>>,
    pub keys_assigned: Vec<KeyLabel>,
}

impl HarmonyResult {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            third_up: Vec::with_capacity(len),
            fifth_up: Vec::with_capacity(len),
            keys_assigned: Vec::with_capacity(len),
        }
    }

    pub fn len(&self) -> usize {
        self.third_up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.third_up.is_empty()
    }
}
