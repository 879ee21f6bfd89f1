use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::mode::{AnswerMode, Language};

pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 1000;
pub const AUTO_ADVANCE_RANGE_MS: (u64, u64) = (200, 5000);

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

/// Learner preferences. Never carries progress; stats live only in memory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "StoredSettings")]
pub struct DrillSettings {
    pub answer_mode: AnswerMode,
    pub language: Language,
    /// Delay before moving on after a correct answer.
    pub auto_advance_ms: u64,
    pub theme: ThemePreference,
}

impl DrillSettings {
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    pub fn set_auto_advance_ms(&mut self, millis: u64) {
        self.auto_advance_ms = clamp_delay(millis);
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            answer_mode: AnswerMode::default(),
            language: Language::default(),
            auto_advance_ms: DEFAULT_AUTO_ADVANCE_MS,
            theme: ThemePreference::default(),
        }
    }
}

fn clamp_delay(millis: u64) -> u64 {
    millis.clamp(AUTO_ADVANCE_RANGE_MS.0, AUTO_ADVANCE_RANGE_MS.1)
}

/// On-disk shape: every field optional and untyped so that an older or
/// hand-edited file degrades to defaults instead of failing to load.
#[derive(Deserialize)]
struct StoredSettings {
    answer_mode: Option<String>,
    language: Option<String>,
    auto_advance_ms: Option<u64>,
    theme: Option<String>,
}

impl From<StoredSettings> for DrillSettings {
    fn from(stored: StoredSettings) -> Self {
        let defaults = DrillSettings::default();
        let answer_mode = match stored.answer_mode {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%err, "ignoring stored answer mode");
                defaults.answer_mode
            }),
            None => defaults.answer_mode,
        };
        let language = match stored.language {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%err, "ignoring stored language");
                defaults.language
            }),
            None => defaults.language,
        };
        let theme = match stored.theme.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("dark") | None => ThemePreference::Dark,
            Some("light") => ThemePreference::Light,
            Some(other) => {
                warn!(theme = other, "ignoring stored theme");
                defaults.theme
            }
        };
        let auto_advance_ms = stored
            .auto_advance_ms
            .map(clamp_delay)
            .unwrap_or(defaults.auto_advance_ms);
        Self {
            answer_mode,
            language,
            auto_advance_ms,
            theme,
        }
    }
}
