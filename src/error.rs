use thiserror::Error;

/// Errors raised while building, validating or persisting transactions.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Malformed date or amount input
    #[error("Format error: {0}")]
    Format(String),

    /// A well-formed transaction that the store refuses to accept
    #[error("{0}")]
    Validation(String),

    /// Combine called with something that is not a transaction
    #[error("Can only add another Transaction.")]
    TypeKind,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FinanceError {
    /// Errors the console reports and recovers from; anything else ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Validation(_) | Self::TypeKind)
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
