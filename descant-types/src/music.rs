use serde::{Deserialize, Serialize};

/// Every root spelling a key label may use, with its pitch class.
/// Includes the enharmonic oddities (B#, Cb, E#, Fb).
pub const ROOT_SPELLINGS: [(&str, u8); 21] = [
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("Fb", 4),
    ("E#", 5),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("Cb", 11),
];

/// Pitch class (0-11) for a root spelling, or None if it isn't recognized.
/// The spelling must already be normalized (`"Db"`, not `"DB"` or `"d♭"`).
pub fn root_pitch_class(spelling: &str) -> Option<u8> {
    ROOT_SPELLINGS
        .iter()
        .find(|(name, _)| *name == spelling)
        .map(|&(_, pc)| pc)
}

/// Key mode. Only major and natural minor are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }

    /// Semitone intervals from root for this mode
    pub fn intervals(&self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }
}

/// A diatonic scale: seven distinct pitch classes in ascending order.
///
/// Scales are derived from a root and a mode and never stored; build one per
/// note with [`Scale::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    root: u8,
    mode: Mode,
    pitch_classes: [u8; 7],
}

impl Scale {
    pub fn new(root: u8, mode: Mode) -> Self {
        let root = root % 12;
        let mut pitch_classes = mode.intervals().map(|iv| (root + iv) % 12);
        pitch_classes.sort_unstable();
        Self {
            root,
            mode,
            pitch_classes,
        }
    }

    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sorted pitch classes of the scale.
    pub fn pitch_classes(&self) -> &[u8; 7] {
        &self.pitch_classes
    }

    /// Whether a MIDI pitch (any octave) belongs to the scale.
    pub fn contains(&self, pitch: i32) -> bool {
        let pc = pitch.rem_euclid(12) as u8;
        self.pitch_classes.binary_search(&pc).is_ok()
    }
}
