pub mod generator;
pub mod session;
pub mod stats;
pub mod timer;

pub use generator::{
    answer_space, build_choice_set, derive_answer, evaluate_answer, select_next_note, Verdict,
};
pub use session::{Question, QuestionStatus, QuizSession};
pub use stats::SessionStats;
pub use timer::AutoAdvance;
