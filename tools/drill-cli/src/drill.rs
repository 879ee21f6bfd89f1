use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use staffdrill_domain::{AnswerMode, NoteRecord, PitchKey};
use staffdrill_notation::{ledger_lines, staff_step, TOP_LINE_STEP};
use staffdrill_tutor::{QuizSession, SessionStats, Verdict};
use tracing::debug;

const STAFF_WIDTH: usize = 21;

/// Text rendering of one note on a staff, top row first.
pub fn ascii_staff(note: &NoteRecord) -> Vec<String> {
    let Ok(pitch) = PitchKey::parse(&note.pitch_key) else {
        return vec![format!("[{}]", note.pitch_key)];
    };
    let step = staff_step(pitch, note.clef);
    let ledgers = ledger_lines(step);
    let top = step.max(TOP_LINE_STEP);
    let bottom = step.min(0);
    let center = STAFF_WIDTH / 2;

    (bottom..=top)
        .rev()
        .map(|row| {
            let on_staff = (0..=TOP_LINE_STEP).contains(&row) && row % 2 == 0;
            let mut cells: Vec<char> = if on_staff {
                vec!['-'; STAFF_WIDTH]
            } else {
                vec![' '; STAFF_WIDTH]
            };
            if ledgers.contains(&row) {
                for cell in &mut cells[center - 2..=center + 2] {
                    *cell = '-';
                }
            }
            if row == step {
                cells[center] = 'o';
            }
            cells.into_iter().collect::<String>().trim_end().to_string()
        })
        .collect()
}

/// Maps a typed reply onto an answer: a 1-based choice number or the label
/// itself. Piano replies are case-insensitive.
pub fn resolve_reply(reply: &str, mode: AnswerMode, choices: &[String]) -> String {
    let reply = reply.trim();
    if mode.is_multiple_choice() {
        if let Ok(index) = reply.parse::<usize>() {
            if (1..=choices.len()).contains(&index) {
                return choices[index - 1].clone();
            }
        }
        return choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(reply))
            .cloned()
            .unwrap_or_else(|| reply.to_string());
    }
    reply.to_ascii_uppercase()
}

/// Runs up to `rounds` questions, stopping early at end of input.
pub fn run<R: Rng, I: BufRead, W: Write>(
    session: &mut QuizSession<R>,
    rounds: u32,
    mut input: I,
    out: &mut W,
) -> Result<SessionStats> {
    for round in 1..=rounds {
        let note = session.active_note().clone();
        writeln!(out, "\nQuestion {round}/{rounds} ({} clef)", note.clef)?;
        for line in ascii_staff(&note) {
            writeln!(out, "  {line}")?;
        }
        if session.answer_mode().is_multiple_choice() {
            for (index, choice) in session.choices().iter().enumerate() {
                writeln!(out, "  {}) {}", index + 1, choice)?;
            }
        } else {
            writeln!(out, "  Name the piano key (e.g. C4)")?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!(round, "input closed");
            break;
        }
        let answer = resolve_reply(&line, session.answer_mode(), session.choices());
        let now = std::time::Instant::now();
        match session.submit(&answer, now) {
            Some(Verdict::Correct) => writeln!(out, "Correct!")?,
            Some(Verdict::Incorrect) => writeln!(
                out,
                "Not quite. The answer was {}.",
                session.correct_answer()
            )?,
            None => {}
        }
        // no delay in the terminal; every answer moves straight on
        session.advance();
    }

    let stats = session.stats().clone();
    writeln!(
        out,
        "\nAnswered {} · correct {} · accuracy {:.0}% · best streak {}",
        stats.answered,
        stats.correct,
        stats.accuracy() * 100.0,
        stats.best_streak
    )?;
    Ok(stats)
}
