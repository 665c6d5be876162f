use thiserror::Error;

/// Errors that abort a whole join.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The region names and boundary descriptions do not pair up.
    #[error("got {names} region names but {boundaries} boundary descriptions")]
    ContractViolation { names: usize, boundaries: usize },

    /// The worker threads could not be started.
    #[error("failed to start the worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Reasons a boundary description is rejected.
///
/// A rejected boundary never aborts a join: its region simply never matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("invalid WKT: {0}")]
    Parse(String),

    #[error("expected a POLYGON or MULTIPOLYGON, found a {0}")]
    NotPolygonal(&'static str),

    #[error("boundary is empty")]
    Empty,
}
