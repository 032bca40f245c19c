//! Unified error type for the budget tracker.
//!
//! Every fallible operation in `core`, `config` and `api` returns [`Result`].
//! The HTTP status each variant maps to lives in `api::response`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A query parameter is missing or malformed.
    #[error("{message}")]
    Validation { message: String },

    /// A create request referenced a contributor that is not stored.
    #[error("Contributor {name} does not exist")]
    UnknownContributor { name: String },

    /// The contributor targeted by a delete does not exist.
    #[error("Contributor {name} does not exist")]
    ContributorNotFound { name: String },

    #[error("Contribution {unique_id} does not exist")]
    ContributionNotFound { unique_id: String },

    #[error("Expense {unique_id} does not exist")]
    ExpenseNotFound { unique_id: String },

    /// The supplied `unique_id` is not a well-formed UUID.
    #[error("Invalid unique_id: {value}")]
    InvalidUniqueId { value: String },

    /// No caller identity was supplied and no default is configured.
    #[error("Unable to determine who is adding this expense")]
    MissingIdentity,

    /// Percentages were requested against a zero total.
    #[error("Cannot compute shares of a zero total")]
    ZeroTotal,

    /// Summing stored amounts exceeded the representable range.
    #[error("Total of stored amounts is out of range")]
    TotalOverflow,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid bind address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
