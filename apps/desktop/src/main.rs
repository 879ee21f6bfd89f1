mod settings;

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::{egui, egui::Ui};
use staffdrill_domain::{AnswerMode, Clef, DrillSettings, Language, NotePool, ThemePreference};
use staffdrill_notation::StaffView;
use staffdrill_tutor::{QuestionStatus, QuizSession};
use staffdrill_ui::keyboard::{piano_keyboard, KeyboardLayout};
use staffdrill_ui::strings::{language_label, mode_label, tr, TextKey};
use staffdrill_ui::theme as ui_theme;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(600);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // validate the built-in table before any window opens
    let pool = Arc::new(NotePool::builtin().clone());
    info!(notes = pool.len(), "note pool ready");
    let settings = settings::load_settings();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "StaffDrill",
        options,
        Box::new(move |cc| {
            ui_theme::ensure_fonts(&cc.egui_ctx);
            ui_theme::apply(&cc.egui_ctx, settings.theme);
            Box::new(DrillApp::new(pool, settings))
        }),
    )
    .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;
    Ok(())
}

struct DrillApp {
    session: QuizSession,
    settings: DrillSettings,
    keyboard: KeyboardLayout,
    show_settings: bool,
    autosave_due: Option<Instant>,
}

impl DrillApp {
    fn new(pool: Arc<NotePool>, settings: DrillSettings) -> Self {
        let keyboard = KeyboardLayout::for_pool(&pool);
        Self {
            session: QuizSession::from_entropy(pool, &settings),
            settings,
            keyboard,
            show_settings: false,
            autosave_due: None,
        }
    }

    fn lang(&self) -> Language {
        self.settings.language
    }

    fn apply_settings(&mut self, ctx: &egui::Context, next: DrillSettings) {
        if next.theme != self.settings.theme {
            ui_theme::apply(ctx, next.theme);
        }
        self.session.set_answer_mode(next.answer_mode);
        self.session.set_language(next.language);
        self.session.set_auto_advance_delay(next.auto_advance_delay());
        self.settings = next;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.autosave_due = Some(Instant::now() + AUTOSAVE_DEBOUNCE);
    }

    fn tick_autosave(&mut self, now: Instant) {
        if let Some(due) = self.autosave_due {
            if now >= due {
                self.flush_settings();
            }
        }
    }

    fn flush_settings(&mut self) {
        if self.autosave_due.take().is_some() {
            if let Err(err) = settings::save_settings(&self.settings) {
                error!(%err, "failed to save settings");
            }
        }
    }

    fn top_bar(&mut self, ui: &mut Ui) {
        let lang = self.lang();
        ui.horizontal(|ui| {
            ui.heading(tr(lang, TextKey::Title));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(tr(lang, TextKey::Settings)).clicked() {
                    self.show_settings = true;
                }
                ui.separator();
                let stats = self.session.stats();
                ui.label(format!(
                    "{} {}  ·  {} {:.0}%  ·  {} {}  ·  {} {}",
                    tr(lang, TextKey::Answered),
                    stats.answered,
                    tr(lang, TextKey::Accuracy),
                    stats.accuracy() * 100.0,
                    tr(lang, TextKey::Streak),
                    stats.streak,
                    tr(lang, TextKey::BestStreak),
                    stats.best_streak,
                ));
            });
        });
    }

    fn question_ui(&mut self, ui: &mut Ui, now: Instant) {
        let lang = self.lang();
        let tokens = ui_theme::theme(self.settings.theme).tokens;
        let mode = self.session.answer_mode();
        let note = self.session.active_note().clone();

        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            let prompt = if mode == AnswerMode::Piano {
                TextKey::PromptPiano
            } else {
                TextKey::Prompt
            };
            ui.label(egui::RichText::new(tr(lang, prompt)).size(20.0));
            let clef_label = match note.clef {
                Clef::Treble => TextKey::Treble,
                Clef::Bass => TextKey::Bass,
            };
            ui.label(egui::RichText::new(tr(lang, clef_label)).weak());
        });

        if let Some(staff) = StaffView::from_key(&note.pitch_key, note.clef) {
            staff.draw(ui, 180.0);
        }
        ui.add_space(12.0);

        let status = self.session.status();
        let correct = self.session.correct_answer().to_string();
        let selected = self.session.selected().map(str::to_string);
        let mut picked: Option<String> = None;

        if mode.is_multiple_choice() {
            ui.horizontal_wrapped(|ui| {
                for choice in self.session.choices() {
                    let fill = match status {
                        QuestionStatus::Idle => ui.visuals().widgets.inactive.bg_fill,
                        _ if *choice == correct => tokens.success,
                        _ if selected.as_deref() == Some(choice.as_str()) => tokens.failure,
                        _ => ui.visuals().widgets.inactive.bg_fill,
                    };
                    let button = egui::Button::new(egui::RichText::new(choice).size(24.0))
                        .fill(fill)
                        .min_size(egui::vec2(96.0, 52.0));
                    if ui.add_enabled(status == QuestionStatus::Idle, button).clicked() {
                        picked = Some(choice.clone());
                    }
                }
            });
        } else {
            let mut highlights: Vec<(&str, egui::Color32)> = Vec::new();
            if status != QuestionStatus::Idle {
                if let Some(sel) = selected.as_deref() {
                    if sel != correct {
                        highlights.push((sel, tokens.failure));
                    }
                }
                highlights.push((correct.as_str(), tokens.success));
            }
            picked = piano_keyboard(ui, &self.keyboard, 140.0, &highlights);
        }

        if let Some(answer) = picked {
            self.session.submit(&answer, now);
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| match self.session.status() {
            QuestionStatus::Idle => {
                if ui.button(tr(lang, TextKey::Skip)).clicked() {
                    self.session.advance();
                }
            }
            QuestionStatus::Correct => {
                ui.label(
                    egui::RichText::new(tr(lang, TextKey::Correct))
                        .size(20.0)
                        .color(tokens.success),
                );
            }
            QuestionStatus::Incorrect => {
                ui.label(
                    egui::RichText::new(tr(lang, TextKey::Incorrect))
                        .size(20.0)
                        .color(tokens.failure),
                );
                ui.label(format!(
                    "{} {}",
                    tr(lang, TextKey::AnswerWas),
                    self.session.correct_answer()
                ));
                if ui.button(tr(lang, TextKey::Next)).clicked() {
                    self.session.advance();
                }
            }
        });
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let lang = self.lang();
        let mut open = self.show_settings;
        let mut draft = self.settings.clone();
        let mut close_clicked = false;
        egui::Window::new(tr(lang, TextKey::Settings))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(tr(lang, TextKey::AnswerMode));
                ui.horizontal(|ui| {
                    for mode in AnswerMode::ALL {
                        ui.selectable_value(&mut draft.answer_mode, mode, mode_label(lang, mode));
                    }
                });
                ui.add_space(6.0);
                ui.label(tr(lang, TextKey::Language));
                ui.horizontal(|ui| {
                    for language in Language::ALL {
                        ui.selectable_value(
                            &mut draft.language,
                            language,
                            language_label(language),
                        );
                    }
                });
                ui.add_space(6.0);
                ui.label(tr(lang, TextKey::AutoAdvance));
                let mut delay = draft.auto_advance_ms;
                ui.add(egui::Slider::new(&mut delay, 200..=5000).suffix(" ms"));
                draft.set_auto_advance_ms(delay);
                ui.add_space(6.0);
                ui.label(tr(lang, TextKey::Theme));
                ui.horizontal(|ui| {
                    ui.selectable_value(
                        &mut draft.theme,
                        ThemePreference::Dark,
                        tr(lang, TextKey::Dark),
                    );
                    ui.selectable_value(
                        &mut draft.theme,
                        ThemePreference::Light,
                        tr(lang, TextKey::Light),
                    );
                });
                ui.add_space(8.0);
                if ui.button(tr(lang, TextKey::Close)).clicked() {
                    close_clicked = true;
                }
            });
        self.show_settings = open && !close_clicked;
        if draft != self.settings {
            self.apply_settings(ctx, draft);
        }
    }
}

impl eframe::App for DrillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.session.tick(now);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.question_ui(ui, now);
        });
        if self.show_settings {
            self.settings_window(ctx);
        }

        self.tick_autosave(now);
        // keep frames coming while a timer is outstanding
        if let Some(remaining) = self.session.auto_advance_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
        if self.autosave_due.is_some() {
            ctx.request_repaint_after(AUTOSAVE_DEBOUNCE);
        }
    }
}

impl Drop for DrillApp {
    fn drop(&mut self) {
        self.flush_settings();
    }
}
