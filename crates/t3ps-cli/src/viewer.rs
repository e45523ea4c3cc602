use t3ps::engine::highlight::HighlightSink;
use tracing::{debug, trace};

/// Stand-in for a molecular viewer: style commands become log events, and the
/// last set of highlights is kept for reporting.
#[derive(Debug, Default)]
pub struct LogHighlighter {
    highlighted: Vec<(usize, String)>,
    renders: usize,
}

impl LogHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serial/colour pairs applied since the last reset.
    pub fn highlighted(&self) -> &[(usize, String)] {
        &self.highlighted
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl HighlightSink for LogHighlighter {
    fn reset_styles(&mut self) {
        trace!("Viewer: resetting atom styles");
        self.highlighted.clear();
    }

    fn apply_highlight(&mut self, serial: usize, color: &str) {
        debug!(serial, color, "Viewer: highlighting atom");
        self.highlighted.push((serial, color.to_string()));
    }

    fn render(&mut self) {
        trace!("Viewer: render");
        self.renders += 1;
    }
}
