//! # descant-core
//!
//! Key-constrained harmony generation. Given a melody and a key configuration,
//! produces a voice a third above and a voice a fifth above, each snapped into
//! the key that applies to its note.
//!
//! ## Quick Start
//!
//! ```rust
//! use descant_core::harmony::harmonize_pitches;
//!
//! let melody = vec![Some(60), Some(62), None, Some(64)];
//! let result = harmonize_pitches(&melody, &"C Major".into(), None)?;
//! assert_eq!(result.third_up, vec![Some(64), Some(65), None, Some(67)]);
//! # Ok::<(), descant_types::KeyError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`key`]: key label parsing ("C Major", "F♯-min") into a seven-tone scale
//! - [`assign`]: per-note key assignment: global, time-ranged, or by index
//! - [`quantize`]: nearest-scale-tone snapping with low-pitch tie-break
//! - [`harmony`]: the third-up / fifth-up synthesizer and entry points
//! - [`payload`]: base64 / data-URI decoding and WAV header checks
//! - [`transcribe`]: the pitch transcription seam and its mock
//! - [`request`]: JSON request/response documents for the analyze paths
//! - [`config`]: TOML configuration loading (embedded + user override)

pub mod assign;
pub mod config;
pub mod error;
pub mod harmony;
pub mod key;
pub mod payload;
pub mod quantize;
pub mod request;
pub mod transcribe;

pub use error::HarmonyError;
