//! Key label parsing: "C Major", "a-minor", "F♯ min" → diatonic scale.

use descant_types::{root_pitch_class, KeyError, KeyLabel, Mode, Scale};

/// Parse a key label into its scale.
///
/// Tokens are split on whitespace and hyphens. The first token is the root;
/// the rest are joined and searched for "maj" or "min" (major wins if both).
pub fn parse(label: &KeyLabel) -> Result<Scale, KeyError> {
    let text = label.as_str().trim();
    if text.is_empty() {
        return Err(KeyError::InvalidKeyFormat(
            "key must be a non-empty string".to_string(),
        ));
    }

    let parts: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() < 2 {
        return Err(KeyError::InvalidKeyFormat(format!(
            "'{}'; use e.g. 'C Major' or 'A minor'",
            text
        )));
    }

    let mode = parse_mode(&parts[1..].concat()).ok_or_else(|| {
        KeyError::InvalidKeyFormat(format!("'{}' must specify Major or Minor", text))
    })?;

    let root = normalize_root(parts[0]);
    let root_pc = root_pitch_class(&root).ok_or(KeyError::UnsupportedRoot(root))?;

    Ok(Scale::new(root_pc, mode))
}

fn parse_mode(words: &str) -> Option<Mode> {
    let words = words.to_lowercase();
    if words.contains("maj") {
        Some(Mode::Major)
    } else if words.contains("min") {
        Some(Mode::Minor)
    } else {
        None
    }
}

/// Letter upper-cased, accidentals folded to ASCII: "d♭" → "Db", "F♯" → "F#".
fn normalize_root(token: &str) -> String {
    let mut chars = token.chars();
    let mut out = String::with_capacity(token.len());
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    for c in chars {
        match c {
            '♯' => out.push('#'),
            '♭' => out.push('b'),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use descant_types::ROOT_SPELLINGS;

    fn pcs(label: &str) -> Vec<u8> {
        parse(&KeyLabel::from(label)).unwrap().pitch_classes().to_vec()
    }

    #[test]
    fn c_major() {
        assert_eq!(pcs("C Major"), vec![0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn a_minor() {
        assert_eq!(pcs("A minor"), vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(parse(&"A minor".into()).unwrap().root(), 9);
    }

    #[test]
    fn hyphen_and_case_variants() {
        assert_eq!(pcs("g-maj"), pcs("G Major"));
        assert_eq!(pcs("  e   MINOR "), pcs("E Minor"));
        assert_eq!(pcs("Bb - major"), pcs("A# Major"));
    }

    #[test]
    fn flats_in_any_case() {
        assert_eq!(pcs("DB Major"), pcs("C# Major"));
        assert_eq!(pcs("eb minor"), pcs("D# minor"));
    }

    #[test]
    fn unicode_accidentals() {
        assert_eq!(pcs("F♯ Major"), pcs("F# Major"));
        assert_eq!(pcs("B♭ minor"), pcs("Bb minor"));
    }

    #[test]
    fn mode_words_match_by_substring() {
        assert_eq!(parse(&"C Majeur".into()).unwrap().mode(), Mode::Major);
        assert_eq!(parse(&"C harmonic minor".into()).unwrap().mode(), Mode::Minor);
        // Tokens are joined before matching.
        assert_eq!(parse(&"C ma j".into()).unwrap().mode(), Mode::Major);
    }

    #[test]
    fn every_spelling_and_mode_yields_seven_tones_with_root() {
        for &(root, pc) in ROOT_SPELLINGS.iter() {
            for mode in Mode::ALL {
                let label = KeyLabel::new(format!("{} {}", root, mode.name()));
                let scale = parse(&label).unwrap();
                let tones = scale.pitch_classes();
                assert_eq!(tones.len(), 7);
                assert!(tones.windows(2).all(|w| w[0] < w[1]));
                assert!(tones.contains(&pc), "{} missing its root", label);
            }
        }
    }

    #[test]
    fn empty_label_is_invalid_format() {
        assert!(matches!(
            parse(&KeyLabel::new("")),
            Err(KeyError::InvalidKeyFormat(_))
        ));
        assert!(matches!(
            parse(&KeyLabel::new("   ")),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn single_token_is_invalid_format() {
        assert!(matches!(
            parse(&"CMajor".into()),
            Err(KeyError::InvalidKeyFormat(_))
        ));
        assert!(matches!(
            parse(&"C--".into()),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn missing_mode_word_is_invalid_format() {
        assert!(matches!(
            parse(&"C dorian".into()),
            Err(KeyError::InvalidKeyFormat(_))
        ));
        // Mode is checked before the root.
        assert!(matches!(
            parse(&"H dorian".into()),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn unknown_root_is_unsupported() {
        assert_eq!(
            parse(&"H Major".into()),
            Err(KeyError::UnsupportedRoot("H".to_string()))
        );
        assert!(matches!(
            parse(&"C## minor".into()),
            Err(KeyError::UnsupportedRoot(_))
        ));
    }
}
