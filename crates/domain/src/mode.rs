use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Which naming convention the learner answers in.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    #[default]
    Solfege,
    Letter,
    Number,
    Piano,
}

impl AnswerMode {
    pub const ALL: [AnswerMode; 4] = [
        AnswerMode::Solfege,
        AnswerMode::Letter,
        AnswerMode::Number,
        AnswerMode::Piano,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerMode::Solfege => "solfege",
            AnswerMode::Letter => "letter",
            AnswerMode::Number => "number",
            AnswerMode::Piano => "piano",
        }
    }

    /// Piano answers are given on the keyboard rather than from a choice list.
    pub fn is_multiple_choice(self) -> bool {
        !matches!(self, AnswerMode::Piano)
    }
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solfege" => Ok(AnswerMode::Solfege),
            "letter" => Ok(AnswerMode::Letter),
            "number" => Ok(AnswerMode::Number),
            "piano" => Ok(AnswerMode::Piano),
            _ => Err(DomainError::UnknownAnswerMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(DomainError::UnknownLanguage(s.to_string())),
        }
    }
}

const SOLFEGE_EN: [&str; 7] = ["Do", "Re", "Mi", "Fa", "So", "La", "Ti"];
const SOLFEGE_ZH: [&str; 7] = ["Do", "Re", "Mi", "Fa", "So", "La", "Si"];

pub fn solfege_table(language: Language) -> &'static [&'static str; 7] {
    match language {
        Language::En => &SOLFEGE_EN,
        Language::Zh => &SOLFEGE_ZH,
    }
}

/// Solfege syllable for a scale degree index; `None` past Ti/Si.
pub fn solfege_label(index: u8, language: Language) -> Option<&'static str> {
    solfege_table(language).get(index as usize).copied()
}
