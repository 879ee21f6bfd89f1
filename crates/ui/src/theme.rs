use egui::{Color32, FontData, FontDefinitions, FontFamily, Stroke, Visuals};
use once_cell::sync::OnceCell;
use staffdrill_domain::ThemePreference;

/// Colours the drill screen draws with. `ink` is used for staff lines, the
/// clef and the note head; `paper` sits behind them.
#[derive(Clone, Debug)]
pub struct ThemeTokens {
    pub ink: Color32,
    pub paper: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub failure: Color32,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub tokens: ThemeTokens,
    pub visuals: Visuals,
}

pub fn theme(mode: ThemePreference) -> Theme {
    match mode {
        ThemePreference::Dark => dark(),
        ThemePreference::Light => light(),
    }
}

pub fn dark() -> Theme {
    let tokens = ThemeTokens {
        ink: Color32::from_rgb(0xEC, 0xE8, 0xDC),
        paper: Color32::from_rgb(0x1A, 0x1C, 0x22),
        accent: Color32::from_rgb(0xE0, 0xA8, 0x3C),
        success: Color32::from_rgb(0x2F, 0x9E, 0x5F),
        failure: Color32::from_rgb(0xC8, 0x45, 0x45),
    };
    Theme {
        visuals: drill_visuals(Visuals::dark(), &tokens),
        tokens,
    }
}

pub fn light() -> Theme {
    let tokens = ThemeTokens {
        ink: Color32::from_rgb(0x1B, 0x1B, 0x1F),
        paper: Color32::from_rgb(0xFB, 0xF8, 0xEF),
        accent: Color32::from_rgb(0x9A, 0x5B, 0x13),
        success: Color32::from_rgb(0x2E, 0x8B, 0x57),
        failure: Color32::from_rgb(0xC0, 0x39, 0x2B),
    };
    Theme {
        visuals: drill_visuals(Visuals::light(), &tokens),
        tokens,
    }
}

// Staff drawing reads `text_color()`, which comes from the noninteractive
// foreground stroke.
fn drill_visuals(mut visuals: Visuals, tokens: &ThemeTokens) -> Visuals {
    visuals.panel_fill = tokens.paper;
    visuals.window_fill = tokens.paper;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, tokens.ink);
    visuals.selection.bg_fill = tokens.accent;
    visuals
}

/// WCAG contrast ratio between two opaque colours, from 1.0 to 21.0.
pub fn contrast_ratio(a: Color32, b: Color32) -> f32 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

fn relative_luminance(color: Color32) -> f32 {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(color.r()) + 0.7152 * channel(color.g()) + 0.0722 * channel(color.b())
}

pub fn apply(ctx: &egui::Context, mode: ThemePreference) {
    ctx.set_visuals(theme(mode).visuals);
}

// Optional music/CJK font so clef glyphs and Chinese labels render; egui
// defaults are kept when none is found.
static FONTS_DONE: OnceCell<()> = OnceCell::new();

pub fn ensure_fonts(ctx: &egui::Context) {
    if FONTS_DONE.get().is_some() {
        return;
    }

    let candidates = [
        "assets/fonts/NotoMusic-Regular.ttf",
        "../assets/fonts/NotoMusic-Regular.ttf",
        "../../assets/fonts/NotoMusic-Regular.ttf",
    ];
    let cjk_candidates = [
        "assets/fonts/NotoSansSC-Regular.ttf",
        "../assets/fonts/NotoSansSC-Regular.ttf",
        "../../assets/fonts/NotoSansSC-Regular.ttf",
    ];

    let read = |paths: &[&str]| -> Option<Vec<u8>> {
        for p in paths {
            if let Ok(bytes) = std::fs::read(p) {
                return Some(bytes);
            }
        }
        None
    };

    let mut defs = FontDefinitions::default();
    let mut changed = false;
    for (name, bytes) in [
        ("NotoMusic", read(&candidates)),
        ("NotoSansSC", read(&cjk_candidates)),
    ] {
        if let Some(bytes) = bytes {
            defs.font_data.insert(name.into(), FontData::from_owned(bytes));
            // fallbacks go after the default proportional fonts
            defs.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push(name.into());
            changed = true;
        }
    }
    if changed {
        ctx.set_fonts(defs);
    }

    let _ = FONTS_DONE.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_map_to_matching_visuals() {
        assert!(theme(ThemePreference::Dark).visuals.dark_mode);
        assert!(!theme(ThemePreference::Light).visuals.dark_mode);
    }

    #[test]
    fn feedback_colors_are_distinct() {
        for mode in [ThemePreference::Dark, ThemePreference::Light] {
            let tokens = theme(mode).tokens;
            assert_ne!(tokens.success, tokens.failure);
        }
    }

    #[test]
    fn staff_ink_stands_out_from_paper() {
        for mode in [ThemePreference::Dark, ThemePreference::Light] {
            let theme = theme(mode);
            let ratio = contrast_ratio(theme.tokens.ink, theme.tokens.paper);
            assert!(ratio >= 7.0, "{mode:?} ink/paper contrast {ratio}");
            assert_eq!(theme.visuals.text_color(), theme.tokens.ink);
            assert_eq!(theme.visuals.panel_fill, theme.tokens.paper);
        }
    }

    #[test]
    fn feedback_labels_stay_readable_on_paper() {
        for mode in [ThemePreference::Dark, ThemePreference::Light] {
            let tokens = theme(mode).tokens;
            assert!(contrast_ratio(tokens.success, tokens.paper) > 3.0);
            assert!(contrast_ratio(tokens.failure, tokens.paper) > 3.0);
        }
    }

    #[test]
    fn contrast_ratio_spans_black_to_white() {
        let ratio = contrast_ratio(Color32::BLACK, Color32::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
        assert!((contrast_ratio(Color32::WHITE, Color32::WHITE) - 1.0).abs() < 1e-6);
    }
}
