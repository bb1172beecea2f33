//! Error types shared across the crate.

use thiserror::Error;

/// Unified result type for tidy-core.
pub type Result<T> = std::result::Result<T, TidyError>;

/// Errors surfaced by tidy operations.
///
/// Detection heuristics never produce these; they degrade to `None`/defaults
/// instead. These are the structural failures that abort a single requested
/// operation before any document mutation happens.
#[derive(Debug, Error)]
pub enum TidyError {
    /// No eligible rectangles in the selection.
    #[error("nothing selected to tidy")]
    EmptySelection,

    /// The target is neither a container nor inside one.
    #[error("selection is not a tidy container or part of one")]
    NotInContainer,

    /// Refresh requested on a container that has no persisted settings.
    #[error("container has no stored tidy settings")]
    NoStoredConfiguration,

    /// The persisted settings blob exists but fails to deserialize.
    #[error("stored tidy settings are malformed: {0}")]
    MalformedStoredConfiguration(#[from] serde_json::Error),

    /// No preset with the given id exists.
    #[error("preset `{0}` not found")]
    PresetNotFound(String),

    /// An underlying storage or host document operation failed.
    #[error("storage failure: {0}")]
    Persistence(String),

    /// Bounding box requested for an empty rectangle set.
    #[error("cannot compute bounds of an empty rectangle set")]
    EmptyInput,
}
