use super::selection::{MAX_SELECTION, Selection};
use serde::Deserialize;
use tracing::trace;

/// Style commands the engine issues to the external molecular viewer.
///
/// Only the protocol belongs to the engine: every refresh resets all styles,
/// highlights each selected atom with the colour of its slot, then renders.
/// How a highlight looks is up to the implementor.
pub trait HighlightSink {
    fn reset_styles(&mut self);
    fn apply_highlight(&mut self, serial: usize, color: &str);
    fn render(&mut self) {}
}

impl<S: HighlightSink + ?Sized> HighlightSink for &mut S {
    fn reset_styles(&mut self) {
        (**self).reset_styles();
    }
    fn apply_highlight(&mut self, serial: usize, color: &str) {
        (**self).apply_highlight(serial, color);
    }
    fn render(&mut self) {
        (**self).render();
    }
}

/// One colour per selection slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HighlightPalette {
    colors: [String; MAX_SELECTION],
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self::new(["#FF6B6B", "#4ECDC4", "#FFE66D", "#A8E6CF"])
    }
}

impl HighlightPalette {
    pub fn new(colors: [&str; MAX_SELECTION]) -> Self {
        Self {
            colors: colors.map(str::to_string),
        }
    }

    /// Colour of selection slot `slot`, or `None` past [`MAX_SELECTION`].
    pub fn color(&self, slot: usize) -> Option<&str> {
        self.colors.get(slot).map(String::as_str)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

/// Re-renders every slot colour. Indices shift on deselection, so the whole
/// selection is always redrawn from a clean slate.
pub fn refresh(sink: &mut dyn HighlightSink, selection: &Selection, palette: &HighlightPalette) {
    sink.reset_styles();
    for (slot, (atom, color)) in selection.atoms().iter().zip(palette.colors()).enumerate() {
        trace!(serial = atom.serial, slot, color, "Highlighting selected atom");
        sink.apply_highlight(atom.serial, color);
    }
    sink.render();
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingSink, StyleCommand};
    use super::*;
    use crate::core::models::atom::PickedAtom;

    #[test]
    fn default_palette_matches_slot_colors() {
        let palette = HighlightPalette::default();
        assert_eq!(palette.color(0), Some("#FF6B6B"));
        assert_eq!(palette.color(1), Some("#4ECDC4"));
        assert_eq!(palette.color(2), Some("#FFE66D"));
        assert_eq!(palette.color(3), Some("#A8E6CF"));
    }

    #[test]
    fn color_past_last_slot_is_none() {
        let palette = HighlightPalette::default();
        assert_eq!(palette.color(MAX_SELECTION), None);
        assert_eq!(palette.color(usize::MAX), None);
    }

    #[test]
    fn refresh_resets_then_colors_each_slot_then_renders() {
        let mut selection = Selection::new();
        selection.toggle(PickedAtom::new(8, "C", 0.0, 0.0, 0.0));
        selection.toggle(PickedAtom::new(3, "O", 1.0, 0.0, 0.0));

        let mut sink = RecordingSink::default();
        refresh(&mut sink, &selection, &HighlightPalette::default());

        assert_eq!(
            sink.commands,
            vec![
                StyleCommand::Reset,
                StyleCommand::Highlight(8, "#FF6B6B".into()),
                StyleCommand::Highlight(3, "#4ECDC4".into()),
                StyleCommand::Render,
            ]
        );
    }

    #[test]
    fn refresh_of_empty_selection_only_resets() {
        let mut sink = RecordingSink::default();
        refresh(&mut sink, &Selection::new(), &HighlightPalette::default());
        assert_eq!(sink.commands, vec![StyleCommand::Reset, StyleCommand::Render]);
    }

    #[test]
    fn palette_deserializes_from_color_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            palette: HighlightPalette,
        }
        let w: Wrapper =
            toml::from_str(r#"palette = ["red", "green", "blue", "black"]"#).unwrap();
        assert_eq!(w.palette, HighlightPalette::new(["red", "green", "blue", "black"]));

        let short: Result<Wrapper, _> = toml::from_str(r#"palette = ["red"]"#);
        assert!(short.is_err());
    }
}
