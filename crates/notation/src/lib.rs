use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui};
use staffdrill_domain::{Clef, LetterName, PitchKey};
use tracing::warn;

/// Steps spanned by the five staff lines, bottom line = 0, top line = 8.
pub const TOP_LINE_STEP: i32 = 8;

/// Pitch sitting on the bottom line of the staff for each clef.
pub fn bottom_line(clef: Clef) -> PitchKey {
    match clef {
        Clef::Treble => PitchKey::new(LetterName::E, 4),
        Clef::Bass => PitchKey::new(LetterName::G, 2),
    }
}

/// Position of `pitch` in line/space steps above the bottom staff line.
pub fn staff_step(pitch: PitchKey, clef: Clef) -> i32 {
    pitch.diatonic_index() - bottom_line(clef).diatonic_index()
}

/// Ledger lines needed to reach `step`, ordered from the staff outward.
pub fn ledger_lines(step: i32) -> Vec<i32> {
    if step < 0 {
        (step..=-2).rev().filter(|s| s % 2 == 0).collect()
    } else if step > TOP_LINE_STEP {
        (TOP_LINE_STEP + 2..=step).filter(|s| s % 2 == 0).collect()
    } else {
        Vec::new()
    }
}

pub fn clef_glyph(clef: Clef) -> &'static str {
    match clef {
        Clef::Treble => "\u{1D11E}",
        Clef::Bass => "\u{1D122}",
    }
}

/// Vertical placement of a staff inside a rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaffGeometry {
    pub rect: Rect,
    /// Distance between two adjacent staff lines.
    pub spacing: f32,
}

impl StaffGeometry {
    /// Fits the staff plus room for four ledger lines above and below.
    pub fn fit(rect: Rect) -> Self {
        let spacing = (rect.height() / 12.0).max(4.0);
        Self { rect, spacing }
    }

    pub fn bottom_line_y(&self) -> f32 {
        self.rect.center().y + 2.0 * self.spacing
    }

    pub fn y_for_step(&self, step: i32) -> f32 {
        self.bottom_line_y() - step as f32 * self.spacing / 2.0
    }
}

/// Draws a single whole note on a five-line staff.
pub struct StaffView {
    pitch: PitchKey,
    clef: Clef,
}

impl StaffView {
    pub fn new(pitch: PitchKey, clef: Clef) -> Self {
        Self { pitch, clef }
    }

    /// Accepts the renderer notation straight from a note record. Returns
    /// `None` (and logs a warning) if the key does not parse.
    pub fn from_key(pitch_key: &str, clef: Clef) -> Option<Self> {
        match PitchKey::parse(pitch_key) {
            Ok(pitch) => Some(Self::new(pitch, clef)),
            Err(err) => {
                warn!(%err, pitch_key, "cannot render pitch key");
                None
            }
        }
    }

    pub fn step(&self) -> i32 {
        staff_step(self.pitch, self.clef)
    }

    pub fn draw(&self, ui: &mut Ui, height: f32) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
        let painter = ui.painter_at(rect);
        let color = ui.visuals().text_color();
        let geometry = StaffGeometry::fit(rect);
        let line = Stroke::new(1.2, color);
        let s = geometry.spacing;

        let left = rect.left() + s;
        let right = rect.right() - s;
        for index in 0..5 {
            let y = geometry.y_for_step(index * 2);
            painter.line_segment([Pos2::new(left, y), Pos2::new(right, y)], line);
        }

        // treble glyph curls around the G line, bass glyph dots straddle the F line
        let clef_anchor = match self.clef {
            Clef::Treble => geometry.y_for_step(2),
            Clef::Bass => geometry.y_for_step(6),
        };
        painter.text(
            Pos2::new(left + s * 1.6, clef_anchor),
            Align2::CENTER_CENTER,
            clef_glyph(self.clef),
            FontId::proportional(s * 5.0),
            color,
        );

        let step = self.step();
        let center = Pos2::new(rect.center().x, geometry.y_for_step(step));
        let ledger_half = s * 1.1;
        for ledger in ledger_lines(step) {
            let y = geometry.y_for_step(ledger);
            painter.line_segment(
                [Pos2::new(center.x - ledger_half, y), Pos2::new(center.x + ledger_half, y)],
                line,
            );
        }
        draw_whole_note(&painter, center, s, color);
        response
    }
}

fn draw_whole_note(painter: &egui::Painter, center: Pos2, spacing: f32, color: Color32) {
    let radius = spacing * 0.55;
    painter.circle_stroke(center, radius, Stroke::new(spacing * 0.2, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> PitchKey {
        PitchKey::parse(raw).unwrap()
    }

    #[test]
    fn treble_positions() {
        assert_eq!(staff_step(key("e/4"), Clef::Treble), 0);
        assert_eq!(staff_step(key("f/5"), Clef::Treble), TOP_LINE_STEP);
        assert_eq!(staff_step(key("c/4"), Clef::Treble), -2);
        assert_eq!(staff_step(key("g/5"), Clef::Treble), 9);
    }

    #[test]
    fn bass_positions() {
        assert_eq!(staff_step(key("g/2"), Clef::Bass), 0);
        assert_eq!(staff_step(key("a/3"), Clef::Bass), TOP_LINE_STEP);
        assert_eq!(staff_step(key("f/2"), Clef::Bass), -1);
        assert_eq!(staff_step(key("c/4"), Clef::Bass), 10);
    }

    #[test]
    fn ledger_lines_run_outward() {
        assert!(ledger_lines(4).is_empty());
        assert!(ledger_lines(-1).is_empty());
        assert!(ledger_lines(9).is_empty());
        assert_eq!(ledger_lines(-2), vec![-2]);
        assert_eq!(ledger_lines(-5), vec![-2, -4]);
        assert_eq!(ledger_lines(10), vec![10]);
        assert_eq!(ledger_lines(13), vec![10, 12]);
    }

    #[test]
    fn middle_c_needs_one_ledger_in_either_clef() {
        let c4 = key("c/4");
        assert_eq!(ledger_lines(staff_step(c4, Clef::Treble)).len(), 1);
        assert_eq!(ledger_lines(staff_step(c4, Clef::Bass)).len(), 1);
    }

    #[test]
    fn geometry_places_steps_half_a_space_apart() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(300.0, 120.0));
        let geometry = StaffGeometry::fit(rect);
        assert_eq!(geometry.spacing, 10.0);
        assert_eq!(geometry.bottom_line_y(), 80.0);
        assert_eq!(geometry.y_for_step(TOP_LINE_STEP), 40.0);
        assert_eq!(geometry.y_for_step(1), 75.0);
    }

    #[test]
    fn from_key_rejects_unparseable_keys() {
        assert!(StaffView::from_key("c/4", Clef::Treble).is_some());
        assert!(StaffView::from_key("middle-c", Clef::Treble).is_none());
    }
}
