//! Snap pitches to the nearest tone of a scale.

use descant_types::{clamp_midi, Scale};

/// Octaves searched on each side of the target's own octave.
const OCTAVE_WINDOW: i32 = 2;

/// Snap a MIDI pitch to the nearest scale tone within `[0, 127]`.
///
/// The target is clamped first. Every candidate in the five octaves around the
/// target is scored; on a tie the lower pitch wins. The scan never exits
/// early so the tie-break does not depend on iteration order.
pub fn snap(target: i32, scale: &Scale) -> u8 {
    let target = clamp_midi(target);
    let target_octave = target / 12;

    let mut best: Option<(i32, i32)> = None; // (distance, candidate)
    for shift in (target_octave - OCTAVE_WINDOW)..=(target_octave + OCTAVE_WINDOW) {
        for &pc in scale.pitch_classes() {
            let candidate = pc as i32 + 12 * shift;
            if clamp_midi(candidate) != candidate {
                continue;
            }
            let dist = (candidate - target).abs();
            let better = match best {
                None => true,
                Some((best_dist, best_note)) => {
                    dist < best_dist || (dist == best_dist && candidate < best_note)
                }
            };
            if better {
                best = Some((dist, candidate));
            }
        }
    }

    // An empty window can't happen with a seven-tone scale; keep the target.
    best.map_or(target, |(_, note)| note) as u8
}
