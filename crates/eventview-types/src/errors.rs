use thiserror::Error;

/// Validation failures for the data model itself (not engine/dispatch errors,
/// which live in `eventview-core`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("path is malformed: expected zero or more ref steps followed by exactly one value step")]
    MalformedPath,
    #[error("path exceeds maximum depth of {max}")]
    PathTooDeep { max: usize },
}
