use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui};
use staffdrill_domain::{LetterName, NotePool, PitchKey};

const BLACK_KEY_WIDTH: f32 = 0.6;
/// Fraction of the keyboard height covered by black keys.
const BLACK_KEY_DEPTH: f32 = 0.62;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    White,
    Black,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PianoKey {
    /// Physical key name, `C4` or `C#4`.
    pub label: String,
    pub kind: KeyKind,
    /// Left edge measured in white-key widths from the first key.
    pub x: f32,
    pub width: f32,
}

impl PianoKey {
    fn contains(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Static physical-key layout for the piano answer mode.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardLayout {
    keys: Vec<PianoKey>,
    white_count: usize,
}

impl KeyboardLayout {
    /// Whole octaves from the C at or below `low` to the B at or above `high`.
    pub fn covering(low: PitchKey, high: PitchKey) -> Self {
        let (low, high) = if low.diatonic_index() <= high.diatonic_index() {
            (low, high)
        } else {
            (high, low)
        };
        let mut keys = Vec::new();
        let mut white = 0usize;
        for octave in low.octave..=high.octave {
            for letter in LetterName::ALL {
                keys.push(PianoKey {
                    label: format!("{letter}{octave}"),
                    kind: KeyKind::White,
                    x: white as f32,
                    width: 1.0,
                });
                white += 1;
                if letter.has_sharp() {
                    keys.push(PianoKey {
                        label: format!("{letter}#{octave}"),
                        kind: KeyKind::Black,
                        x: white as f32 - BLACK_KEY_WIDTH / 2.0,
                        width: BLACK_KEY_WIDTH,
                    });
                }
            }
        }
        Self {
            keys,
            white_count: white,
        }
    }

    pub fn for_pool(pool: &NotePool) -> Self {
        let (low, high) = pool.pitch_range();
        Self::covering(low, high)
    }

    pub fn keys(&self) -> &[PianoKey] {
        &self.keys
    }

    pub fn white_count(&self) -> usize {
        self.white_count
    }

    pub fn find(&self, label: &str) -> Option<&PianoKey> {
        self.keys.iter().find(|key| key.label == label)
    }

    /// Key under a point given in white-key units horizontally and as a
    /// 0..1 fraction of the keyboard height. Black keys win where they overlap.
    pub fn key_at(&self, x: f32, depth: f32) -> Option<&PianoKey> {
        if depth < BLACK_KEY_DEPTH {
            if let Some(key) = self
                .keys
                .iter()
                .find(|key| key.kind == KeyKind::Black && key.contains(x))
            {
                return Some(key);
            }
        }
        self.keys
            .iter()
            .find(|key| key.kind == KeyKind::White && key.contains(x))
    }
}

/// Draws the keyboard and returns the label of the key tapped this frame.
/// `highlights` tints individual keys, e.g. the learner's pick and the answer.
pub fn piano_keyboard(
    ui: &mut Ui,
    layout: &KeyboardLayout,
    height: f32,
    highlights: &[(&str, Color32)],
) -> Option<String> {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::click());
    let painter = ui.painter_at(rect);
    let unit = rect.width() / layout.white_count().max(1) as f32;
    let outline = Stroke::new(1.0, Color32::from_gray(90));
    let tint = |label: &str| {
        highlights
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, color)| *color)
    };
    let key_rect = |key: &PianoKey| {
        let depth = match key.kind {
            KeyKind::White => 1.0,
            KeyKind::Black => BLACK_KEY_DEPTH,
        };
        Rect::from_min_size(
            Pos2::new(rect.left() + key.x * unit, rect.top()),
            egui::vec2(key.width * unit, rect.height() * depth),
        )
    };

    for key in layout.keys().iter().filter(|k| k.kind == KeyKind::White) {
        let r = key_rect(key);
        painter.rect_filled(r, Rounding::same(3.0), tint(&key.label).unwrap_or(Color32::WHITE));
        painter.rect_stroke(r, Rounding::same(3.0), outline);
        if key.label.starts_with('C') {
            painter.text(
                Pos2::new(r.center().x, r.bottom() - 10.0),
                egui::Align2::CENTER_CENTER,
                &key.label,
                egui::FontId::proportional((unit * 0.4).clamp(8.0, 14.0)),
                Color32::from_gray(80),
            );
        }
    }
    for key in layout.keys().iter().filter(|k| k.kind == KeyKind::Black) {
        let r = key_rect(key);
        painter.rect_filled(
            r,
            Rounding::same(2.0),
            tint(&key.label).unwrap_or(Color32::from_gray(25)),
        );
    }

    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let x = (pos.x - rect.left()) / unit;
    let depth = (pos.y - rect.top()) / rect.height();
    layout.key_at(x, depth).map(|key| key.label.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> PitchKey {
        PitchKey::parse(raw).unwrap()
    }

    #[test]
    fn covers_whole_octaves() {
        let layout = KeyboardLayout::covering(key("f/2"), key("g/5"));
        assert_eq!(layout.white_count(), 28);
        assert_eq!(layout.keys().len(), 48);
        assert_eq!(layout.keys().first().unwrap().label, "C2");
        assert_eq!(layout.keys().last().unwrap().label, "B5");
    }

    #[test]
    fn pool_layout_contains_every_piano_label() {
        let pool = NotePool::builtin();
        let layout = KeyboardLayout::for_pool(pool);
        for note in pool.notes() {
            let key = layout.find(&note.piano_label).unwrap();
            assert_eq!(key.kind, KeyKind::White);
        }
    }

    #[test]
    fn black_keys_sit_between_whites() {
        let layout = KeyboardLayout::covering(key("c/4"), key("b/4"));
        let c_sharp = layout.find("C#4").unwrap();
        assert_eq!(c_sharp.kind, KeyKind::Black);
        assert!((c_sharp.x - 0.7).abs() < 1e-6);
        assert!(layout.find("E#4").is_none());
        assert!(layout.find("B#4").is_none());
    }

    #[test]
    fn hit_testing_prefers_black_keys_near_the_top() {
        let layout = KeyboardLayout::covering(key("c/4"), key("b/4"));
        assert_eq!(layout.key_at(0.95, 0.2).unwrap().label, "C#4");
        assert_eq!(layout.key_at(0.95, 0.9).unwrap().label, "C4");
        assert_eq!(layout.key_at(2.5, 0.1).unwrap().label, "E4");
        assert!(layout.key_at(7.5, 0.5).is_none());
    }

    #[test]
    fn reversed_bounds_are_normalised() {
        assert_eq!(
            KeyboardLayout::covering(key("g/5"), key("c/4")),
            KeyboardLayout::covering(key("c/4"), key("g/5"))
        );
    }
}
