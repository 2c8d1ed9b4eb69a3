//! Third-up and fifth-up harmony voices, snapped into each note's key.

use descant_types::{clamp_midi, HarmonyResult, KeyError, KeyLabel, KeyRange, NoteEvent};

use crate::assign::{self, KeyAssignment, NotePosition};
use crate::key;
use crate::quantize::snap;

/// Raw offset for the upper third (a major third).
pub const THIRD_UP: i32 = 4;
/// Raw offset for the upper fifth (a perfect fifth).
pub const FIFTH_UP: i32 = 7;

/// Build both harmony voices for a melody whose keys are already resolved.
///
/// `keys_per_note[i]` is parsed for every sounding note; rests skip parsing.
/// The first key that fails to parse aborts the whole computation.
pub fn synthesize(
    melody: &[Option<i32>],
    keys_per_note: &[KeyLabel],
) -> Result<HarmonyResult, KeyError> {
    let mut result = HarmonyResult::with_capacity(melody.len());

    for (i, pitch) in melody.iter().enumerate() {
        let Some(base) = *pitch else {
            result.third_up.push(None);
            result.fifth_up.push(None);
            continue;
        };

        let label = keys_per_note.get(i).ok_or_else(|| {
            KeyError::InvalidKeyFormat(format!("no key assigned to note {}", i))
        })?;
        let scale = key::parse(label)?;

        result
            .third_up
            .push(Some(snap(clamp_midi(base.saturating_add(THIRD_UP)), &scale)));
        result
            .fifth_up
            .push(Some(snap(clamp_midi(base.saturating_add(FIFTH_UP)), &scale)));
    }

    result.keys_assigned = keys_per_note.to_vec();
    Ok(result)
}

/// Harmonize transcribed notes. Ranged keys are honored since notes carry onsets.
pub fn harmonize_notes(
    notes: &[NoteEvent],
    global_key: &KeyLabel,
    ranges: Option<Vec<KeyRange>>,
    by_index: Option<Vec<KeyLabel>>,
) -> Result<HarmonyResult, KeyError> {
    let pitches: Vec<Option<i32>> = notes.iter().map(|n| n.pitch).collect();
    let assignment = KeyAssignment::select(ranges, by_index, true);
    harmonize(&pitches, &assign::timed_positions(notes), global_key, &assignment)
}

/// Harmonize a bare pitch sequence. Without onsets only index or global keys apply.
pub fn harmonize_pitches(
    melody: &[Option<i32>],
    global_key: &KeyLabel,
    by_index: Option<Vec<KeyLabel>>,
) -> Result<HarmonyResult, KeyError> {
    let assignment = KeyAssignment::select(None, by_index, false);
    harmonize(
        melody,
        &assign::untimed_positions(melody.len()),
        global_key,
        &assignment,
    )
}

fn harmonize(
    melody: &[Option<i32>],
    positions: &[NotePosition],
    global_key: &KeyLabel,
    assignment: &KeyAssignment,
) -> Result<HarmonyResult, KeyError> {
    let keys = assign::resolve(positions, global_key, assignment);
    let result = synthesize(melody, &keys)?;
    log::debug!(
        target: "harmony",
        "harmonized {} notes ({} rests) with {} keys",
        result.len(),
        melody.iter().filter(|p| p.is_none()).count(),
        assignment.name()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(ps: &[i32]) -> Vec<Option<i32>> {
        ps.iter().map(|&p| Some(p)).collect()
    }

    fn voice(ps: &[u8]) -> Vec<Option<u8>> {
        ps.iter().map(|&p| Some(p)).collect()
    }

    #[test]
    fn c_major_scale_harmony() {
        let melody = pitches(&[60, 62, 64, 65, 67, 69, 71, 72]);
        let keys = vec![KeyLabel::from("C Major"); melody.len()];
        let result = synthesize(&melody, &keys).unwrap();
        // Raw thirds 64 66 68 69 71 73 75 76; ties snap down.
        assert_eq!(result.third_up, voice(&[64, 65, 67, 69, 71, 72, 74, 76]));
        // Raw fifths 67 69 71 72 74 76 78 79.
        assert_eq!(result.fifth_up, voice(&[67, 69, 71, 72, 74, 76, 77, 79]));
        assert_eq!(result.keys_assigned, keys);
    }

    #[test]
    fn rests_stay_in_place() {
        let melody = vec![Some(60), None, Some(64), None];
        let keys = vec![KeyLabel::from("C Major"); 4];
        let result = synthesize(&melody, &keys).unwrap();
        assert_eq!(result.third_up, vec![Some(64), None, Some(67), None]);
        assert_eq!(result.fifth_up, vec![Some(67), None, Some(71), None]);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn rests_do_not_parse_their_key() {
        let melody = vec![Some(60), None];
        let keys = vec![KeyLabel::from("C Major"), KeyLabel::from("nonsense")];
        assert!(synthesize(&melody, &keys).is_ok());
    }

    #[test]
    fn bad_key_aborts_everything() {
        let melody = pitches(&[60, 62, 64]);
        let keys: Vec<KeyLabel> = vec!["C Major".into(), "X Major".into(), "C Major".into()];
        assert_eq!(
            synthesize(&melody, &keys),
            Err(KeyError::UnsupportedRoot("X".to_string()))
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let melody = pitches(&[60, 62]);
        let keys = vec![KeyLabel::from("C Major")];
        assert!(matches!(
            synthesize(&melody, &keys),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn extreme_pitches_clamp() {
        let melody = pitches(&[125, 127, -30]);
        let keys = vec![KeyLabel::from("C Major"); 3];
        let result = synthesize(&melody, &keys).unwrap();
        // 129 and 131 clamp to 127 (G9); -26 and -23 clamp to 0 (C-1).
        assert_eq!(result.third_up, voice(&[127, 127, 0]));
        assert_eq!(result.fifth_up, voice(&[127, 127, 0]));
    }

    #[test]
    fn integer_limits_clamp_without_overflow() {
        let melody = vec![Some(i32::MAX), Some(i32::MAX - 2), Some(i32::MIN)];
        let keys = vec![KeyLabel::from("C Major"); 3];
        let result = synthesize(&melody, &keys).unwrap();
        assert_eq!(result.third_up, voice(&[127, 127, 0]));
        assert_eq!(result.fifth_up, voice(&[127, 127, 0]));

        let result = harmonize_pitches(&[Some(i32::MAX)], &"C Major".into(), None).unwrap();
        assert_eq!(result.third_up, voice(&[127]));
    }

    #[test]
    fn minor_key_lowers_the_third() {
        // A minor over A4: raw C#5 (73) is out of key; C5 and D5 tie → C5.
        let result = synthesize(&[Some(69)], &[KeyLabel::from("A minor")]).unwrap();
        assert_eq!(result.third_up, vec![Some(72)]);
        assert_eq!(result.fifth_up, vec![Some(76)]);
    }

    #[test]
    fn empty_melody() {
        let result = synthesize(&[], &[]).unwrap();
        assert!(result.is_empty());
        assert!(result.keys_assigned.is_empty());
    }

    #[test]
    fn harmonize_pitches_pads_index_keys() {
        let melody = pitches(&[60, 62, 64, 65, 67]);
        let result = harmonize_pitches(
            &melody,
            &"F Major".into(),
            Some(vec!["C Major".into(), "G Major".into()]),
        )
        .unwrap();
        let keys: Vec<&str> = result.keys_assigned.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["C Major", "G Major", "G Major", "G Major", "G Major"]);
        // 64+4=68 in G major: G (67) and A (69) tie → 67.
        assert_eq!(result.third_up[2], Some(67));
        // 62+4=66 is F#, in G major.
        assert_eq!(result.third_up[1], Some(66));
    }

    #[test]
    fn harmonize_notes_uses_ranges() {
        let notes = vec![
            NoteEvent::new(0.0, 0.5, 62, 0.8),
            NoteEvent::new(0.5, 1.0, 62, 0.8),
        ];
        let ranges = vec![
            KeyRange::new(0.0, 0.5, "C Major"),
            KeyRange::new(0.5, 1.0, "D Major"),
        ];
        let result = harmonize_notes(&notes, &"C Major".into(), Some(ranges), None).unwrap();
        // Raw third 66: C major → F (65), D major → F# (66).
        assert_eq!(result.third_up, vec![Some(65), Some(66)]);
        assert_eq!(result.keys_assigned[1].as_str(), "D Major");
    }
}
