//! Pitch transcription collaborator.
//!
//! Real pitch detection happens outside this crate. [`Transcriber`] is the seam;
//! [`MockTranscriber`] checks the payload is a WAV and returns a fixed melody,
//! which is what the service runs with until a model is wired in.

use std::f32::consts::PI;
use std::path::Path;

use descant_types::NoteEvent;

use crate::config::TranscriberSettings;
use crate::error::HarmonyError;
use crate::payload::read_wav_info;

pub trait Transcriber {
    fn model_name(&self) -> &str;
    /// Sample rate the model analyzes at (reported back to callers).
    fn sample_rate(&self) -> u32;
    /// Note events for a WAV payload, ordered by start time.
    fn transcribe(&self, wav: &[u8]) -> Result<Vec<NoteEvent>, HarmonyError>;
}

pub struct MockTranscriber {
    settings: TranscriberSettings,
}

impl MockTranscriber {
    pub fn new(settings: TranscriberSettings) -> Self {
        Self { settings }
    }
}

impl Transcriber for MockTranscriber {
    fn model_name(&self) -> &str {
        &self.settings.model
    }

    fn sample_rate(&self) -> u32 {
        self.settings.sample_rate
    }

    fn transcribe(&self, wav: &[u8]) -> Result<Vec<NoteEvent>, HarmonyError> {
        let info = read_wav_info(wav)?;
        log::debug!(
            target: "transcribe",
            "mock transcription of {:.2}s WAV ({} Hz, {} ch)",
            info.duration_secs,
            info.sample_rate,
            info.channels
        );

        let d = self.settings.note_duration;
        Ok(self
            .settings
            .melody
            .iter()
            .enumerate()
            .map(|(i, &pitch)| {
                let start = i as f64 * d;
                NoteEvent::new(start, start + d, pitch, self.settings.velocity)
            })
            .collect())
    }
}

/// Frequency in Hz of a MIDI pitch (A4 = 69 = 440 Hz).
pub fn midi_to_freq(pitch: i32) -> f32 {
    440.0 * 2f32.powf((pitch - 69) as f32 / 12.0)
}

/// Write a mono sine-wave rendition of `melody` spread evenly over `seconds`.
pub fn synthesize_test_melody(
    path: &Path,
    melody: &[i32],
    sample_rate: u32,
    seconds: f32,
) -> Result<(), HarmonyError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_write_error)?;

    if !melody.is_empty() {
        let frames_per_note = (sample_rate as f32 * seconds / melody.len() as f32) as u32;
        for &pitch in melody {
            let freq = midi_to_freq(pitch);
            for n in 0..frames_per_note {
                let t = n as f32 / sample_rate as f32;
                writer
                    .write_sample(0.3 * (2.0 * PI * freq * t).sin())
                    .map_err(wav_write_error)?;
            }
        }
    }

    writer.finalize().map_err(wav_write_error)?;
    Ok(())
}

fn wav_write_error(e: hound::Error) -> HarmonyError {
    match e {
        hound::Error::IoError(io) => HarmonyError::Io(io),
        other => HarmonyError::InvalidAudio(other.to_string()),
    }
}
