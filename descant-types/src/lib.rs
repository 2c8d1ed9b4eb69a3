//! # descant-types
//!
//! Shared type definitions for the descant harmony generator.
//! Plain data only: melody notes, key labels and ranges, scales, and the
//! harmony result. The algorithms live in descant-core.

mod error;
mod harmony;
pub mod music;
mod note;

pub use error::KeyError;
pub use harmony::HarmonyResult;
pub use music::{root_pitch_class, Mode, Scale, ROOT_SPELLINGS};
pub use note::{KeyLabel, KeyRange, NoteEvent};

/// Highest valid MIDI note number.
pub const MIDI_MAX: i32 = 127;

/// Clamp an arbitrary pitch into the MIDI range.
pub fn clamp_midi(pitch: i32) -> i32 {
    pitch.clamp(0, MIDI_MAX)
}
