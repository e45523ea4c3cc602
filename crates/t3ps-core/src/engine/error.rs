use super::session::PanelId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Atom with serial {serial} not found in the loaded structure")]
    AtomNotFound { serial: usize },

    #[error("Viewer panel {0:?} does not exist")]
    PanelNotFound(PanelId),
}
