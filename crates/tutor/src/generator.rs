use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use staffdrill_domain::{solfege_label, AnswerMode, Language, NotePool, NoteRecord};
use tracing::debug;

/// Most distractors shown next to the correct answer.
pub const MAX_DISTRACTORS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Draws the next prompt uniformly, never repeating `exclude_id` unless the
/// pool only holds that one note.
pub fn select_next_note<'a, R: Rng + ?Sized>(
    pool: &'a NotePool,
    exclude_id: Option<&str>,
    rng: &mut R,
) -> &'a NoteRecord {
    let notes = pool.notes();
    if notes.len() == 1 {
        return &notes[0];
    }
    loop {
        let candidate = &notes[rng.gen_range(0..notes.len())];
        if exclude_id != Some(candidate.id.as_str()) {
            debug!(note = %candidate.id, "selected next note");
            return candidate;
        }
    }
}

pub fn derive_answer(note: &NoteRecord, mode: AnswerMode, language: Language) -> String {
    match mode {
        AnswerMode::Solfege => solfege_label(note.solfege_index, language)
            .expect("solfege index validated by NotePool")
            .to_string(),
        AnswerMode::Letter => note.letter_name.to_string(),
        AnswerMode::Number => note.number_label.clone(),
        AnswerMode::Piano => note.piano_label.clone(),
    }
}

/// Every distinct answer the pool can produce in this mode, sorted.
pub fn answer_space(pool: &NotePool, mode: AnswerMode, language: Language) -> BTreeSet<String> {
    pool.notes()
        .iter()
        .map(|note| derive_answer(note, mode, language))
        .collect()
}

pub fn build_choice_set<R: Rng + ?Sized>(
    note: &NoteRecord,
    mode: AnswerMode,
    language: Language,
    pool: &NotePool,
    rng: &mut R,
) -> Vec<String> {
    let correct = derive_answer(note, mode, language);
    if !mode.is_multiple_choice() {
        return vec![correct];
    }
    let mut space = answer_space(pool, mode, language);
    space.remove(&correct);
    let distractors: Vec<String> = space.into_iter().collect();
    let mut choices: Vec<String> = distractors
        .choose_multiple(rng, MAX_DISTRACTORS)
        .cloned()
        .collect();
    choices.push(correct);
    choices.shuffle(rng);
    choices
}

pub fn evaluate_answer(selected: &str, correct: &str) -> Verdict {
    if selected == correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}
