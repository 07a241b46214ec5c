//! Error types for herbs-store

use herbs_core::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Category of a [`StoreError`], for callers that branch on the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database unreachable or connection settings unusable
    Connectivity,
    /// Record rejected before touching storage
    Validation,
    /// Targeted id matched zero rows
    NotFound,
    /// Any other database failure
    Storage,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid herb: {0}")]
    Validation(#[from] ValidationError),

    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Wrap a query error, classifying transport failures as connectivity.
    pub fn database(context: &'static str, source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Connection(source),
            source => Self::Database { context, source },
        }
    }

    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) | Self::InvalidConfig(_) => ErrorKind::Connectivity,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
