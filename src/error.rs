//! Error type shared by every module of the crate.

/// Errors raised while building or advancing an optimizer.
///
/// Everything here is either a configuration problem (reported when the
/// engine or calculator is constructed) or a malformed input file. The
/// genetic operators themselves cannot fail on a validated engine.
#[derive(Debug, thiserror::Error)]
pub enum TspError {
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("invalid node {id}: {reason}")]
    InvalidNode { id: String, reason: String },
    #[error("start node not found among nodes: {0}")]
    UnknownStartNode(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("empty random range [{min}, {max}]")]
    InvalidRange { min: String, max: String },
    #[error("malformed tour: {0}")]
    MalformedTour(String),
    #[error("scenario io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scenario json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;
