use crate::core::dihedrals::numbering::ReferenceNumbering;
use crate::core::dihedrals::table::DihedralTable;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::highlight::{HighlightPalette, HighlightSink};
use crate::engine::measurement::MeasurementResult;
use crate::engine::picker::AtomPicker;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasureConfig {
    pub table: DihedralTable,
    pub numbering: ReferenceNumbering,
    pub palette: HighlightPalette,
}

#[derive(Default)]
pub struct MeasureConfigBuilder {
    table: Option<DihedralTable>,
    numbering: Option<ReferenceNumbering>,
    palette: Option<HighlightPalette>,
}

impl MeasureConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: DihedralTable) -> Self {
        self.table = Some(table);
        self
    }
    pub fn numbering(mut self, numbering: ReferenceNumbering) -> Self {
        self.numbering = Some(numbering);
        self
    }
    pub fn palette(mut self, palette: HighlightPalette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn build(self) -> MeasureConfig {
        MeasureConfig {
            table: self.table.unwrap_or_default(),
            numbering: self.numbering.unwrap_or_default(),
            palette: self.palette.unwrap_or_default(),
        }
    }
}

/// Replays a sequence of atom clicks against a freshly loaded structure and
/// returns the final measurement.
///
/// The clicks go through a real [`AtomPicker`], so toggling and eviction apply
/// exactly as they would in a viewer: `[1, 2, 2]` leaves one atom selected and
/// a fifth distinct serial pushes out the first.
///
/// # Errors
///
/// Returns [`EngineError::AtomNotFound`] for the first serial the structure lacks.
#[instrument(skip_all, name = "measure_workflow")]
pub fn run(
    structure: &Structure,
    clicks: &[usize],
    config: &MeasureConfig,
) -> Result<MeasurementResult, EngineError> {
    replay(picker_for(config), structure, clicks)
}

/// Like [`run`], but every highlight refresh is also sent to `sink`.
#[instrument(skip_all, name = "measure_workflow")]
pub fn run_with_highlighter(
    structure: &Structure,
    clicks: &[usize],
    config: &MeasureConfig,
    sink: &mut dyn HighlightSink,
) -> Result<MeasurementResult, EngineError> {
    let picker = picker_for(config).with_highlighter(Box::new(sink));
    replay(picker, structure, clicks)
}

fn picker_for<'a>(config: &MeasureConfig) -> AtomPicker<'a> {
    AtomPicker::new()
        .with_table(config.table.clone())
        .with_numbering(config.numbering)
        .with_palette(config.palette.clone())
}

fn replay(
    mut picker: AtomPicker<'_>,
    structure: &Structure,
    clicks: &[usize],
) -> Result<MeasurementResult, EngineError> {
    let mut result = picker.load_structure(structure);

    for &serial in clicks {
        result = picker.click_serial(structure, serial)?;
    }

    info!(
        clicks = clicks.len(),
        selected = result.count(),
        kind = result.measurement.kind(),
        "Selection replay finished"
    );
    Ok(result)
}
