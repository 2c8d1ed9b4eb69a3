//! Request and response documents for the analyze endpoints.
//!
//! Two ways in: a JSON document carrying base64 audio plus key options
//! ([`analyze_json`]), and a raw WAV upload with a single key
//! ([`analyze_upload`]). Both transcribe, harmonize, and return an
//! [`AnalyzeResponse`].

use serde::{Deserialize, Serialize};

use descant_types::{HarmonyResult, KeyLabel, KeyRange, NoteEvent};

use crate::error::HarmonyError;
use crate::harmony::harmonize_notes;
use crate::payload::{check_wav_name, decode_base64_audio};
use crate::transcribe::Transcriber;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub wav_base64: Option<String>,
    /// Absent means the configured default key; an explicit `null` is rejected.
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub musical_key: Option<KeyLabel>,
    #[serde(default)]
    pub musical_keys: Option<Vec<KeyRange>>,
    #[serde(default)]
    pub musical_keys_by_index: Option<Vec<KeyLabel>>,
}

fn present_key<'de, D>(deserializer: D) -> Result<Option<KeyLabel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    KeyLabel::deserialize(deserializer).map(Some)
}

impl AnalyzeRequest {
    pub fn from_json(json: &str) -> Result<Self, HarmonyError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub model: String,
    pub sample_rate: u32,
    pub key: KeyLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musical_keys: Option<Vec<KeyRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musical_keys_by_index: Option<Vec<KeyLabel>>,
    pub notes: Vec<NoteEvent>,
    pub melody_midi: Vec<Option<i32>>,
    pub harmonies: HarmonyResult,
}

/// Handle a JSON analyze request. `default_key` stands in for a missing `musical_key`.
pub fn analyze_json(
    request: AnalyzeRequest,
    transcriber: &dyn Transcriber,
    default_key: &KeyLabel,
) -> Result<AnalyzeResponse, HarmonyError> {
    let encoded = request
        .wav_base64
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| HarmonyError::Decode("wav_base64 is required".to_string()))?;
    let wav = decode_base64_audio(encoded)?;

    let key = request.musical_key.unwrap_or_else(|| default_key.clone());
    let notes = transcriber.transcribe(&wav)?;
    let harmonies = harmonize_notes(
        &notes,
        &key,
        request.musical_keys.clone(),
        request.musical_keys_by_index.clone(),
    )?;

    Ok(AnalyzeResponse {
        model: transcriber.model_name().to_string(),
        sample_rate: transcriber.sample_rate(),
        key,
        musical_keys: request.musical_keys,
        musical_keys_by_index: request.musical_keys_by_index,
        melody_midi: notes.iter().map(|n| n.pitch).collect(),
        notes,
        harmonies,
    })
}

/// Handle an uploaded WAV file harmonized in a single key.
pub fn analyze_upload(
    wav: &[u8],
    filename: Option<&str>,
    content_type: Option<&str>,
    key: &KeyLabel,
    transcriber: &dyn Transcriber,
) -> Result<AnalyzeResponse, HarmonyError> {
    check_wav_name(filename, content_type)?;
    let notes = transcriber.transcribe(wav)?;
    let harmonies = harmonize_notes(&notes, key, None, None)?;

    Ok(AnalyzeResponse {
        model: transcriber.model_name().to_string(),
        sample_rate: transcriber.sample_rate(),
        key: key.clone(),
        musical_keys: None,
        musical_keys_by_index: None,
        melody_midi: notes.iter().map(|n| n.pitch).collect(),
        notes,
        harmonies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTranscriber(Vec<NoteEvent>);

    impl Transcriber for FixedTranscriber {
        fn model_name(&self) -> &str {
            "fixed"
        }
        fn sample_rate(&self) -> u32 {
            16000
        }
        fn transcribe(&self, _wav: &[u8]) -> Result<Vec<NoteEvent>, HarmonyError> {
            Ok(self.0.clone())
        }
    }

    fn fixed() -> FixedTranscriber {
        FixedTranscriber(vec![
            NoteEvent::new(0.0, 0.5, 60, 0.9),
            NoteEvent::rest(0.5, 1.0),
            NoteEvent::new(1.0, 1.5, 62, 0.9),
        ])
    }

    #[test]
    fn request_fields_are_optional() {
        let req = AnalyzeRequest::from_json("{}").unwrap();
        assert_eq!(req, AnalyzeRequest::default());
    }

    #[test]
    fn null_key_is_rejected() {
        let err = AnalyzeRequest::from_json(r#"{"musical_key": null}"#)
            .err()
            .unwrap();
        assert!(matches!(err, HarmonyError::Json(_)));
        assert!(err.is_client_error());

        let req = AnalyzeRequest::from_json(r#"{"musical_key": "A minor"}"#).unwrap();
        assert_eq!(req.musical_key, Some(KeyLabel::from("A minor")));
    }

    #[test]
    fn missing_audio_is_rejected() {
        let err = analyze_json(AnalyzeRequest::default(), &fixed(), &"C Major".into())
            .err()
            .unwrap();
        assert!(matches!(err, HarmonyError::Decode(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn default_key_fills_in() {
        let req = AnalyzeRequest {
            wav_base64: Some("UklGRg==".into()),
            ..Default::default()
        };
        let resp = analyze_json(req, &fixed(), &"G Major".into()).unwrap();
        assert_eq!(resp.key.as_str(), "G Major");
        assert_eq!(resp.model, "fixed");
        assert_eq!(resp.sample_rate, 16000);
        assert_eq!(resp.melody_midi, vec![Some(60), None, Some(62)]);
        assert_eq!(resp.harmonies.third_up, vec![Some(64), None, Some(66)]);
    }

    #[test]
    fn ranges_drive_keys() {
        let req = AnalyzeRequest::from_json(
            r#"{
                "wav_base64": "data:audio/wav;base64,UklGRg==",
                "musical_key": "C Major",
                "musical_keys": [
                    {"start": 0.0, "end": 1.0, "key": "C Major"},
                    {"start": 1.0, "end": 2.0, "key": "A minor"}
                ],
                "musical_keys_by_index": ["D Major"]
            }"#,
        )
        .unwrap();
        let resp = analyze_json(req, &fixed(), &"F Major".into()).unwrap();
        let keys: Vec<&str> = resp.harmonies.keys_assigned.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["C Major", "C Major", "A minor"]);
        assert_eq!(resp.musical_keys.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn bad_key_is_a_client_error() {
        let req = AnalyzeRequest {
            wav_base64: Some("UklGRg==".into()),
            musical_key: Some("C Lydian".into()),
            ..Default::default()
        };
        let err = analyze_json(req, &fixed(), &"C Major".into()).err().unwrap();
        assert!(matches!(err, HarmonyError::Key(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn upload_checks_file_name() {
        let err = analyze_upload(b"", Some("a.mp3"), None, &"C Major".into(), &fixed())
            .err()
            .unwrap();
        assert!(matches!(err, HarmonyError::InvalidAudio(_)));

        let resp =
            analyze_upload(b"", Some("a.wav"), None, &"C Major".into(), &fixed()).unwrap();
        assert!(resp.musical_keys.is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("musical_keys").is_none());
        assert_eq!(json["harmonies"]["perfect_fifth_up"], serde_json::json!([67, null, 69]));
    }
}
