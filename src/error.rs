//! Error types for Skill Swap.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Defects in the static step catalog.
///
/// These are programmer/configuration errors caught when a `StepRegistry` is
/// built, never a runtime path of the wizard itself.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Step catalog is empty")]
    Empty,

    #[error("Step {field} has no options")]
    NoOptions { field: String },

    #[error("Duplicate field id: {field}")]
    DuplicateField { field: String },

    #[error("Step {field} lists option {option:?} more than once")]
    DuplicateOption { field: String, option: String },
}

/// Recoverable refusals from the wizard controller.
///
/// All variants reject the attempted mutation and leave the session
/// unchanged; none are fatal.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Cannot {action}: session is {phase}")]
    InvalidState { action: String, phase: String },

    #[error("Option {option:?} is not offered by step {field}")]
    InvalidOption { field: String, option: String },

    #[error("Nothing selected for step {field}")]
    EmptySelection { field: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
