//! Per-note key assignment.
//!
//! A request carries a global key and optionally a list of time ranges or a
//! list of per-index keys. Which of the three applies is decided once per
//! request ([`KeyAssignment::select`]) and then [`resolve`] produces one key
//! label per melody position.

use descant_types::{KeyLabel, KeyRange, NoteEvent};

/// How keys are assigned to the notes of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAssignment {
    /// Every note uses the global key.
    Global,
    /// Keys come from time ranges matched against note onsets.
    Ranged(Vec<KeyRange>),
    /// Note `i` uses entry `i`; notes past the end reuse the last entry.
    Indexed(Vec<KeyLabel>),
}

impl KeyAssignment {
    /// Pick the assignment mode for a request.
    ///
    /// Ranges win whenever they are non-empty and the melody has timing, even
    /// if an index list is also given. Empty lists count as absent.
    pub fn select(
        ranges: Option<Vec<KeyRange>>,
        by_index: Option<Vec<KeyLabel>>,
        timed: bool,
    ) -> Self {
        match (ranges, by_index) {
            (Some(ranges), _) if timed && !ranges.is_empty() => Self::Ranged(ranges),
            (_, Some(keys)) if !keys.is_empty() => Self::Indexed(keys),
            _ => Self::Global,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Ranged(_) => "ranged",
            Self::Indexed(_) => "indexed",
        }
    }
}

/// Where a melody note sits: its sequence position and, if known, its onset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePosition {
    pub index: usize,
    pub start: Option<f64>,
}

/// Positions for a timed melody.
pub fn timed_positions(notes: &[NoteEvent]) -> Vec<NotePosition> {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| NotePosition {
            index,
            start: Some(note.start),
        })
        .collect()
}

/// Positions for a melody with no timing information.
pub fn untimed_positions(len: usize) -> Vec<NotePosition> {
    (0..len)
        .map(|index| NotePosition { index, start: None })
        .collect()
}

/// Resolve the key for every melody position. Output length equals input length.
pub fn resolve(
    melody: &[NotePosition],
    global_key: &KeyLabel,
    assignment: &KeyAssignment,
) -> Vec<KeyLabel> {
    log::debug!(
        target: "assign",
        "resolving {} notes with {} keys",
        melody.len(),
        assignment.name()
    );
    match assignment {
        KeyAssignment::Global => vec![global_key.clone(); melody.len()],
        KeyAssignment::Ranged(ranges) => melody
            .iter()
            .map(|pos| {
                // A note without an onset can't be placed; treat it as onset 0.
                let start = pos.start.unwrap_or(0.0);
                match key_for(start, ranges) {
                    Some(key) => key.clone(),
                    None => {
                        log::debug!(
                            target: "assign",
                            "note {} at {}s: no usable range, using global key",
                            pos.index,
                            start
                        );
                        global_key.clone()
                    }
                }
            })
            .collect(),
        KeyAssignment::Indexed(keys) => melody
            .iter()
            .map(|pos| match keys.get(pos.index).or(keys.last()) {
                Some(key) => key.clone(),
                None => global_key.clone(),
            })
            .collect(),
    }
}

/// Key of the first range containing `start`. If there is none, or its key is
/// empty, the key of the range whose start is nearest (earliest in the list on
/// ties). None if that key is empty too, or no distance is finite.
fn key_for(start: f64, ranges: &[KeyRange]) -> Option<&KeyLabel> {
    let containing = ranges.iter().find(|r| r.contains(start));
    if let Some(range) = containing.filter(|r| !r.key.is_empty()) {
        return Some(&range.key);
    }

    let mut best: Option<(f64, &KeyRange)> = None;
    for range in ranges {
        let dist = (start - range.start).abs();
        if best.map_or(dist.is_finite(), |(best_dist, _)| dist < best_dist) {
            best = Some((dist, range));
        }
    }
    best.map(|(_, range)| &range.key).filter(|key| !key.is_empty())
}
