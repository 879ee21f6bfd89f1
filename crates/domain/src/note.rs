use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    pub fn as_str(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl LetterName {
    pub const ALL: [LetterName; 7] = [
        LetterName::C,
        LetterName::D,
        LetterName::E,
        LetterName::F,
        LetterName::G,
        LetterName::A,
        LetterName::B,
    ];

    /// Position within the octave starting from C, which is also the
    /// C-major scale degree minus one.
    pub fn index(self) -> u8 {
        match self {
            LetterName::C => 0,
            LetterName::D => 1,
            LetterName::E => 2,
            LetterName::F => 3,
            LetterName::G => 4,
            LetterName::A => 5,
            LetterName::B => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterName::C => "C",
            LetterName::D => "D",
            LetterName::E => "E",
            LetterName::F => "F",
            LetterName::G => "G",
            LetterName::A => "A",
            LetterName::B => "B",
        }
    }

    /// Whether a black key sits directly above this white key.
    pub fn has_sharp(self) -> bool {
        !matches!(self, LetterName::E | LetterName::B)
    }
}

impl fmt::Display for LetterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(LetterName::C),
            "D" => Ok(LetterName::D),
            "E" => Ok(LetterName::E),
            "F" => Ok(LetterName::F),
            "G" => Ok(LetterName::G),
            "A" => Ok(LetterName::A),
            "B" => Ok(LetterName::B),
            other => Err(DomainError::validation(format!(
                "`{other}` is not a note letter"
            ))),
        }
    }
}

/// A natural pitch in the `letter/octave` notation used by staff renderers,
/// e.g. `c/4` for middle C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PitchKey {
    pub letter: LetterName,
    pub octave: u8,
}

impl PitchKey {
    pub fn new(letter: LetterName, octave: u8) -> Self {
        Self { letter, octave }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let (letter, octave) = raw
            .split_once('/')
            .ok_or_else(|| DomainError::validation(format!("pitch key `{raw}` is missing `/`")))?;
        let letter: LetterName = letter.parse()?;
        let octave: u8 = octave
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("pitch key `{raw}` has a bad octave")))?;
        if octave > 9 {
            return Err(DomainError::validation(format!(
                "pitch key `{raw}` octave out of range"
            )));
        }
        Ok(Self { letter, octave })
    }

    /// Number of diatonic steps above C0.
    pub fn diatonic_index(&self) -> i32 {
        self.octave as i32 * 7 + self.letter.index() as i32
    }

    pub fn from_diatonic_index(index: i32) -> Option<Self> {
        if !(0..70).contains(&index) {
            return None;
        }
        let letter = LetterName::from_index((index % 7) as u8)?;
        Some(Self::new(letter, (index / 7) as u8))
    }

    pub fn piano_label(&self) -> String {
        format!("{}{}", self.letter, self.octave)
    }
}

impl fmt::Display for PitchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.letter.as_str().to_ascii_lowercase(),
            self.octave
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: String,
    pub clef: Clef,
    /// Renderer notation such as `c/4`. Quiz logic only uses it for identity.
    pub pitch_key: String,
    /// Index into the solfege label table, Do = 0 through Ti/Si = 6.
    pub solfege_index: u8,
    pub letter_name: LetterName,
    pub number_label: String,
    pub piano_label: String,
}

impl NoteRecord {
    /// Builds a record for a natural note, deriving every label from the pitch.
    pub fn natural(clef: Clef, pitch: PitchKey) -> Self {
        let degree = pitch.letter.index();
        let piano_label = pitch.piano_label();
        Self {
            id: format!("{}-{}", clef, piano_label),
            clef,
            pitch_key: pitch.to_string(),
            solfege_index: degree,
            letter_name: pitch.letter,
            number_label: (degree + 1).to_string(),
            piano_label,
        }
    }

    pub fn pitch(&self) -> Result<PitchKey, DomainError> {
        PitchKey::parse(&self.pitch_key)
    }

    /// Checks that the labels of this record agree with each other.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.solfege_index > 6 {
            return Err(DomainError::validation(format!(
                "{}: solfege index {} out of range",
                self.id, self.solfege_index
            )));
        }
        if self.letter_name.index() != self.solfege_index {
            return Err(DomainError::validation(format!(
                "{}: letter {} does not match solfege index {}",
                self.id, self.letter_name, self.solfege_index
            )));
        }
        if self.number_label != (self.solfege_index + 1).to_string() {
            return Err(DomainError::validation(format!(
                "{}: number label `{}` does not match solfege index {}",
                self.id, self.number_label, self.solfege_index
            )));
        }
        let pitch = self.pitch()?;
        if pitch.letter != self.letter_name {
            return Err(DomainError::validation(format!(
                "{}: pitch key `{}` disagrees with letter {}",
                self.id, self.pitch_key, self.letter_name
            )));
        }
        if pitch.piano_label() != self.piano_label {
            return Err(DomainError::validation(format!(
                "{}: piano label `{}` disagrees with pitch key `{}`",
                self.id, self.piano_label, self.pitch_key
            )));
        }
        let expected_id = format!("{}-{}", self.clef, self.piano_label);
        if self.id != expected_id {
            return Err(DomainError::validation(format!(
                "id `{}` should be `{}`",
                self.id, expected_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_key_parses_renderer_notation() {
        let key = PitchKey::parse("c/4").unwrap();
        assert_eq!(key, PitchKey::new(LetterName::C, 4));
        assert_eq!(key.to_string(), "c/4");
        assert_eq!(key.piano_label(), "C4");
        assert_eq!(PitchKey::parse("G/5").unwrap().letter, LetterName::G);
    }

    #[test]
    fn pitch_key_rejects_garbage() {
        assert!(PitchKey::parse("c4").is_err());
        assert!(PitchKey::parse("h/4").is_err());
        assert!(PitchKey::parse("c/x").is_err());
        assert!(PitchKey::parse("c/12").is_err());
    }

    #[test]
    fn diatonic_index_round_trips_across_octaves() {
        let b3 = PitchKey::new(LetterName::B, 3);
        let c4 = PitchKey::new(LetterName::C, 4);
        assert_eq!(c4.diatonic_index() - b3.diatonic_index(), 1);
        assert_eq!(PitchKey::from_diatonic_index(c4.diatonic_index()), Some(c4));
        assert_eq!(PitchKey::from_diatonic_index(-1), None);
    }

    #[test]
    fn natural_record_derives_labels() {
        let note = NoteRecord::natural(Clef::Treble, PitchKey::new(LetterName::C, 4));
        assert_eq!(note.id, "treble-C4");
        assert_eq!(note.pitch_key, "c/4");
        assert_eq!(note.solfege_index, 0);
        assert_eq!(note.number_label, "1");
        assert_eq!(note.piano_label, "C4");
        assert!(note.validate().is_ok());
    }

    #[test]
    fn validate_catches_inconsistent_labels() {
        let mut note = NoteRecord::natural(Clef::Bass, PitchKey::new(LetterName::B, 2));
        assert!(note.validate().is_ok());
        note.number_label = "3".into();
        assert!(note.validate().is_err());

        let mut note = NoteRecord::natural(Clef::Bass, PitchKey::new(LetterName::B, 2));
        note.id = "treble-B2".into();
        assert!(note.validate().is_err());

        let mut note = NoteRecord::natural(Clef::Bass, PitchKey::new(LetterName::B, 2));
        note.solfege_index = 7;
        assert!(note.validate().is_err());
    }
}
