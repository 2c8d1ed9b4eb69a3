//! Incoming audio payloads: base64 / data-URI decoding and WAV checks.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::HarmonyError;

/// Decode base64 audio, accepting either bare base64 or a `data:...;base64,` URI.
pub fn decode_base64_audio(data: &str) -> Result<Vec<u8>, HarmonyError> {
    let data = data.trim();
    let encoded = if data.starts_with("data:") {
        match data.split_once(',') {
            Some((_, body)) => body,
            None => {
                return Err(HarmonyError::Decode(
                    "data URI has no payload after its header".to_string(),
                ))
            }
        }
    } else {
        data
    };
    STANDARD
        .decode(encoded)
        .map_err(|e| HarmonyError::Decode(format!("base64: {}", e)))
}

/// Reject uploads that are neither named `*.wav` nor typed as WAV.
pub fn check_wav_name(filename: Option<&str>, content_type: Option<&str>) -> Result<(), HarmonyError> {
    let filename = filename.unwrap_or("input.wav");
    let content_type = content_type.unwrap_or("");
    if filename.to_lowercase().ends_with(".wav") || content_type.to_lowercase().contains("wav") {
        Ok(())
    } else {
        Err(HarmonyError::InvalidAudio(
            "Please upload a valid WAV file (.wav)".to_string(),
        ))
    }
}

/// Header facts about a WAV payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f32,
}

/// Read a WAV header from memory.
pub fn read_wav_info(bytes: &[u8]) -> Result<WavInfo, HarmonyError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| HarmonyError::InvalidAudio(format!("unreadable WAV: {}", e)))?;
    let spec = reader.spec();
    // `duration` counts frames, i.e. samples per channel.
    let duration_secs = reader.duration() as f32 / spec.sample_rate.max(1) as f32;
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration_secs,
    })
}
