pub mod error;
pub mod io;
pub mod mode;
pub mod note;
pub mod pool;
pub mod settings;

pub use crate::error::DomainError;
pub use crate::io::{load_pool, PoolExporter, PoolFormat, SerdeExporter};
pub use crate::mode::{solfege_label, solfege_table, AnswerMode, Language};
pub use crate::note::{Clef, LetterName, NoteRecord, PitchKey};
pub use crate::pool::NotePool;
pub use crate::settings::{DrillSettings, ThemePreference};
