use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use staffdrill_domain::{AnswerMode, DrillSettings, Language, NotePool, NoteRecord};
use tracing::{debug, info};

use crate::generator::{
    build_choice_set, derive_answer, evaluate_answer, select_next_note, Verdict,
};
use crate::stats::SessionStats;
use crate::timer::AutoAdvance;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestionStatus {
    #[default]
    Idle,
    Correct,
    Incorrect,
}

impl From<Verdict> for QuestionStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => QuestionStatus::Correct,
            Verdict::Incorrect => QuestionStatus::Incorrect,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub correct_answer: String,
    pub choices: Vec<String>,
}

/// One learner's drill: the note on screen, the answer set built for it and
/// the outcome of the current question.
///
/// All transitions happen on the caller's thread. The auto-advance after a
/// correct answer is a deadline checked by [`QuizSession::tick`], so dropping
/// the session also drops anything pending.
pub struct QuizSession<R = StdRng> {
    pool: Arc<NotePool>,
    rng: R,
    active: NoteRecord,
    mode: AnswerMode,
    language: Language,
    question: Question,
    status: QuestionStatus,
    selected: Option<String>,
    serial: u64,
    stats: SessionStats,
    auto_advance: AutoAdvance,
}

impl QuizSession<StdRng> {
    pub fn from_entropy(pool: Arc<NotePool>, settings: &DrillSettings) -> Self {
        Self::new(pool, settings, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn new(pool: Arc<NotePool>, settings: &DrillSettings, mut rng: R) -> Self {
        let active = select_next_note(&pool, None, &mut rng).clone();
        let question = build_question(
            &active,
            settings.answer_mode,
            settings.language,
            &pool,
            &mut rng,
        );
        info!(note = %active.id, mode = %settings.answer_mode, "starting quiz session");
        Self {
            pool,
            rng,
            active,
            mode: settings.answer_mode,
            language: settings.language,
            question,
            status: QuestionStatus::Idle,
            selected: None,
            serial: 0,
            stats: SessionStats::new(),
            auto_advance: AutoAdvance::new(settings.auto_advance_delay()),
        }
    }

    pub fn pool(&self) -> &NotePool {
        &self.pool
    }

    pub fn active_note(&self) -> &NoteRecord {
        &self.active
    }

    pub fn answer_mode(&self) -> AnswerMode {
        self.mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn correct_answer(&self) -> &str {
        &self.question.correct_answer
    }

    pub fn choices(&self) -> &[String] {
        &self.question.choices
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    /// The answer given for the current question, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Increments every time the question is rebuilt.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn auto_advance_pending(&self) -> bool {
        self.auto_advance.is_pending()
    }

    pub fn auto_advance_remaining(&self, now: Instant) -> Option<Duration> {
        self.auto_advance.remaining(now)
    }

    pub fn set_auto_advance_delay(&mut self, delay: Duration) {
        self.auto_advance.set_delay(delay);
    }

    /// Accepts the first answer to an idle question. Later answers are
    /// ignored and return `None`.
    pub fn submit(&mut self, selected: &str, now: Instant) -> Option<Verdict> {
        if self.status != QuestionStatus::Idle {
            debug!(status = ?self.status, "ignoring answer to a settled question");
            return None;
        }
        let verdict = evaluate_answer(selected, &self.question.correct_answer);
        self.status = verdict.into();
        self.selected = Some(selected.to_string());
        self.stats.record(verdict);
        info!(note = %self.active.id, selected, ?verdict, "answer submitted");
        if verdict == Verdict::Correct {
            self.auto_advance.schedule(now, self.serial);
        }
        Some(verdict)
    }

    /// Fires a due auto-advance. Returns true if the question changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.auto_advance.take_due(now, self.serial) {
            self.next_question();
            true
        } else {
            false
        }
    }

    /// Moves to a different note. From an idle question this is a skip and
    /// is not counted as an answer.
    pub fn advance(&mut self) {
        self.auto_advance.cancel();
        self.next_question();
    }

    /// Switches the answer convention for the note already on screen.
    pub fn set_answer_mode(&mut self, mode: AnswerMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.rebuild_question();
    }

    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        self.rebuild_question();
    }

    fn next_question(&mut self) {
        let next = select_next_note(&self.pool, Some(&self.active.id), &mut self.rng).clone();
        info!(from = %self.active.id, to = %next.id, "advancing to next note");
        self.active = next;
        self.rebuild_question();
    }

    fn rebuild_question(&mut self) {
        self.auto_advance.cancel();
        self.question = build_question(
            &self.active,
            self.mode,
            self.language,
            &self.pool,
            &mut self.rng,
        );
        self.status = QuestionStatus::Idle;
        self.selected = None;
        self.serial += 1;
        debug!(
            note = %self.active.id,
            mode = %self.mode,
            language = %self.language,
            choices = self.question.choices.len(),
            "question rebuilt"
        );
    }
}

fn build_question<R: Rng + ?Sized>(
    note: &NoteRecord,
    mode: AnswerMode,
    language: Language,
    pool: &NotePool,
    rng: &mut R,
) -> Question {
    Question {
        correct_answer: derive_answer(note, mode, language),
        choices: build_choice_set(note, mode, language, pool, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdrill_domain::{Clef, LetterName, PitchKey};

    fn session_with(settings: DrillSettings) -> QuizSession<StdRng> {
        QuizSession::new(
            Arc::new(NotePool::builtin().clone()),
            &settings,
            StdRng::seed_from_u64(11),
        )
    }

    fn session() -> QuizSession<StdRng> {
        session_with(DrillSettings::default())
    }

    fn wrong_choice(session: &QuizSession<StdRng>) -> String {
        session
            .choices()
            .iter()
            .find(|c| c.as_str() != session.correct_answer())
            .cloned()
            .unwrap()
    }

    #[test]
    fn starts_idle_with_consistent_question() {
        let session = session();
        assert_eq!(session.status(), QuestionStatus::Idle);
        assert_eq!(
            session.correct_answer(),
            derive_answer(session.active_note(), AnswerMode::Solfege, Language::En)
        );
        assert_eq!(session.choices().len(), 4);
        assert!(session.choices().iter().any(|c| c == session.correct_answer()));
        assert!(!session.auto_advance_pending());
    }

    #[test]
    fn correct_answer_auto_advances_after_delay() {
        let mut session = session();
        let start = Instant::now();
        let first = session.active_note().id.clone();
        let answer = session.correct_answer().to_string();

        assert_eq!(session.submit(&answer, start), Some(Verdict::Correct));
        assert_eq!(session.status(), QuestionStatus::Correct);
        assert!(session.auto_advance_pending());

        assert!(!session.tick(start + Duration::from_millis(999)));
        assert_eq!(session.active_note().id, first);

        assert!(session.tick(start + Duration::from_millis(1000)));
        assert_ne!(session.active_note().id, first);
        assert_eq!(session.status(), QuestionStatus::Idle);
        assert_eq!(session.selected(), None);
        assert_eq!(session.stats().correct, 1);
    }

    #[test]
    fn incorrect_answer_waits_for_explicit_advance() {
        let mut session = session();
        let start = Instant::now();
        let first = session.active_note().id.clone();
        let wrong = wrong_choice(&session);

        assert_eq!(session.submit(&wrong, start), Some(Verdict::Incorrect));
        assert_eq!(session.status(), QuestionStatus::Incorrect);
        assert!(!session.auto_advance_pending());
        assert!(!session.tick(start + Duration::from_secs(60)));
        assert_eq!(session.active_note().id, first);
        assert_eq!(session.status(), QuestionStatus::Incorrect);

        session.advance();
        assert_ne!(session.active_note().id, first);
        assert_eq!(session.status(), QuestionStatus::Idle);
        assert_eq!(session.stats().answered, 1);
        assert_eq!(session.stats().correct, 0);
    }

    #[test]
    fn every_distractor_is_judged_incorrect() {
        let reference = session();
        let note = reference.active_note().id.clone();
        let distractors: Vec<String> = reference
            .choices()
            .iter()
            .filter(|c| c.as_str() != reference.correct_answer())
            .cloned()
            .collect();
        assert_eq!(distractors.len(), reference.choices().len() - 1);

        for wrong in &distractors {
            let mut fresh = session();
            assert_eq!(fresh.active_note().id, note);
            assert_eq!(fresh.submit(wrong, Instant::now()), Some(Verdict::Incorrect));
            assert_eq!(fresh.status(), QuestionStatus::Incorrect);
            assert_eq!(fresh.selected(), Some(wrong.as_str()));
            assert!(!fresh.auto_advance_pending());
            assert_eq!(fresh.stats().correct, 0);
        }
    }

    #[test]
    fn only_first_answer_is_accepted() {
        let mut session = session();
        let now = Instant::now();
        let wrong = wrong_choice(&session);
        let answer = session.correct_answer().to_string();
        assert_eq!(session.submit(&wrong, now), Some(Verdict::Incorrect));
        assert_eq!(session.submit(&answer, now), None);
        assert_eq!(session.status(), QuestionStatus::Incorrect);
        assert_eq!(session.selected(), Some(wrong.as_str()));
        assert_eq!(session.stats().answered, 1);
    }

    #[test]
    fn changing_mode_keeps_note_and_cancels_pending_advance() {
        let mut session = session();
        let start = Instant::now();
        let note = session.active_note().clone();
        let answer = session.correct_answer().to_string();
        session.submit(&answer, start);
        assert!(session.auto_advance_pending());

        session.set_answer_mode(AnswerMode::Letter);
        assert!(!session.auto_advance_pending());
        assert_eq!(session.status(), QuestionStatus::Idle);
        assert_eq!(session.active_note(), &note);
        assert_eq!(session.correct_answer(), note.letter_name.to_string());

        assert!(!session.tick(start + Duration::from_secs(10)));
        assert_eq!(session.active_note(), &note);
    }

    #[test]
    fn changing_language_rebuilds_solfege_answer() {
        let pool = NotePool::new(vec![
            NoteRecord::natural(Clef::Treble, PitchKey::new(LetterName::B, 4)),
            NoteRecord::natural(Clef::Treble, PitchKey::new(LetterName::C, 5)),
        ])
        .unwrap();
        let mut session = QuizSession::new(
            Arc::new(pool),
            &DrillSettings::default(),
            StdRng::seed_from_u64(3),
        );
        while session.active_note().id != "treble-B4" {
            session.advance();
        }
        assert_eq!(session.correct_answer(), "Ti");
        let serial = session.serial();
        session.set_language(Language::Zh);
        assert_eq!(session.correct_answer(), "Si");
        assert!(session.choices().iter().any(|c| c == "Si"));
        assert!(!session.choices().iter().any(|c| c == "Ti"));
        assert_eq!(session.serial(), serial + 1);
        session.set_language(Language::Zh);
        assert_eq!(session.serial(), serial + 1);
    }

    #[test]
    fn piano_mode_offers_only_the_key() {
        let settings = DrillSettings {
            answer_mode: AnswerMode::Piano,
            ..DrillSettings::default()
        };
        let mut session = session_with(settings);
        assert_eq!(session.choices(), &[session.active_note().piano_label.clone()]);
        let key = session.active_note().piano_label.clone();
        assert_eq!(session.submit(&key, Instant::now()), Some(Verdict::Correct));
    }

    #[test]
    fn manual_advance_cancels_pending_timer() {
        let mut session = session();
        let start = Instant::now();
        let answer = session.correct_answer().to_string();
        session.submit(&answer, start);
        session.advance();
        let after_manual = session.active_note().id.clone();
        assert!(!session.auto_advance_pending());
        assert!(!session.tick(start + Duration::from_secs(5)));
        assert_eq!(session.active_note().id, after_manual);
    }

    #[test]
    fn skipping_an_idle_question_is_not_scored() {
        let mut session = session();
        let first = session.active_note().id.clone();
        session.advance();
        assert_ne!(session.active_note().id, first);
        assert_eq!(session.stats().answered, 0);
    }

    #[test]
    fn delay_comes_from_settings() {
        let settings = DrillSettings {
            auto_advance_ms: 300,
            ..DrillSettings::default()
        };
        let mut session = session_with(settings);
        let start = Instant::now();
        let answer = session.correct_answer().to_string();
        session.submit(&answer, start);
        assert_eq!(
            session.auto_advance_remaining(start),
            Some(Duration::from_millis(300))
        );
        assert!(session.tick(start + Duration::from_millis(300)));
    }
}
