use thiserror::Error;

/// Errors surfaced by the dispatch/engine boundary. Modeled on the
/// exception-across-a-promise behavior of the original design: a worker-side
/// failure becomes a typed error delivered through the caller's future rather
/// than propagating via panic or an untyped string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("operation queue is full")]
    QueueFull,
    #[error("dispatcher worker is not running")]
    WorkerUnavailable,
    #[error("a result promise was dropped before being fulfilled")]
    Poisoned,
    #[error("writer id {0} exceeds the 10-bit writer id space")]
    InvalidWriterId(u16),
    #[error("view path exceeds maximum depth of {max}")]
    PathTooDeep { max: usize },
    #[error("view path is malformed: expected zero or more ref steps followed by exactly one value step")]
    MalformedPath,
}

impl From<eventview_types::TypesError> for DispatchError {
    fn from(e: eventview_types::TypesError) -> Self {
        match e {
            eventview_types::TypesError::MalformedPath => DispatchError::MalformedPath,
            eventview_types::TypesError::PathTooDeep { max } => DispatchError::PathTooDeep { max },
        }
    }
}
