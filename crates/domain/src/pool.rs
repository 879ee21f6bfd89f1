use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::note::{Clef, LetterName, NoteRecord, PitchKey};
use crate::DomainError;

/// Treble clef practice range, middle C up to G5.
const TREBLE_RANGE: (PitchKey, PitchKey) = (
    PitchKey { letter: LetterName::C, octave: 4 },
    PitchKey { letter: LetterName::G, octave: 5 },
);
/// Bass clef practice range, F2 up to middle C.
const BASS_RANGE: (PitchKey, PitchKey) = (
    PitchKey { letter: LetterName::F, octave: 2 },
    PitchKey { letter: LetterName::C, octave: 4 },
);

static BUILTIN: Lazy<NotePool> = Lazy::new(|| {
    NotePool::new(builtin_records()).expect("built-in note pool must be valid")
});

/// Ordered, non-empty collection of notes the drill draws from.
///
/// The only way to obtain a pool is through validation, so every consumer
/// can rely on it being non-empty with unique ids.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<NoteRecord>", into = "Vec<NoteRecord>")]
pub struct NotePool {
    notes: Vec<NoteRecord>,
}

impl NotePool {
    pub fn new(notes: Vec<NoteRecord>) -> Result<Self, DomainError> {
        if notes.is_empty() {
            return Err(DomainError::validation("note pool must not be empty"));
        }
        let mut seen = HashSet::new();
        for note in &notes {
            note.validate()?;
            if !seen.insert(note.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate note id `{}`",
                    note.id
                )));
            }
        }
        Ok(Self { notes })
    }

    /// The process-wide pool shipped with the trainer. Panics on first use if
    /// the table is inconsistent, which is a build defect.
    pub fn builtin() -> &'static NotePool {
        &BUILTIN
    }

    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NoteRecord> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Lowest and highest pitches in the pool.
    pub fn pitch_range(&self) -> (PitchKey, PitchKey) {
        let pitches = self.notes.iter().filter_map(|note| note.pitch().ok());
        let mut low: Option<PitchKey> = None;
        let mut high: Option<PitchKey> = None;
        for pitch in pitches {
            if low.map_or(true, |l| pitch.diatonic_index() < l.diatonic_index()) {
                low = Some(pitch);
            }
            if high.map_or(true, |h| pitch.diatonic_index() > h.diatonic_index()) {
                high = Some(pitch);
            }
        }
        // validation guarantees every pitch key parses and the pool is non-empty
        let fallback = PitchKey::new(LetterName::C, 4);
        (low.unwrap_or(fallback), high.unwrap_or(fallback))
    }
}

impl TryFrom<Vec<NoteRecord>> for NotePool {
    type Error = DomainError;

    fn try_from(notes: Vec<NoteRecord>) -> Result<Self, Self::Error> {
        Self::new(notes)
    }
}

impl From<NotePool> for Vec<NoteRecord> {
    fn from(pool: NotePool) -> Self {
        pool.notes
    }
}

fn clef_range(clef: Clef, (low, high): (PitchKey, PitchKey)) -> impl Iterator<Item = NoteRecord> {
    (low.diatonic_index()..=high.diatonic_index())
        .filter_map(PitchKey::from_diatonic_index)
        .map(move |pitch| NoteRecord::natural(clef, pitch))
}

/// Treble notes first, then bass. Middle C appears in both clefs on purpose.
pub fn builtin_records() -> Vec<NoteRecord> {
    clef_range(Clef::Treble, TREBLE_RANGE)
        .chain(clef_range(Clef::Bass, BASS_RANGE))
        .collect()
}
