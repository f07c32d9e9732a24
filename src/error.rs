use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Malformed construction input: unequal category sizes, duplicate item
    /// names, empty categories, or a clue that references unknown names.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An internal precondition was broken (self-category neighbor lookup,
    /// unknown item id). Always a rule-authoring bug, never user-recoverable.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Propagation reached a state where some item has no possible match in
    /// some category: the puzzle as specified has no solution.
    #[error("contradiction: {0}")]
    Contradiction(String),

    /// The caller-supplied round ceiling was exceeded before the fixed point
    /// was reached.
    #[error("no convergence after {rounds} rounds")]
    NonConvergence { rounds: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The underlying solver error, without the captured backtrace.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
