//! Error types for fluent MongoDB operations.

use thiserror::Error;

/// Result type for fluent MongoDB operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Errors that can occur while building or executing an operation.
///
/// Only two kinds originate in this crate: argument preconditions
/// ([`MongoError::InvalidArgument`]), raised before anything reaches the
/// engine, and the non-unique result check ([`MongoError::NotUnique`]).
/// Driver and BSON failures convert structurally and surface unchanged.
#[derive(Error, Debug)]
pub enum MongoError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("bson serialization error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// BSON deserialization error.
    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// A caller-supplied argument violated a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Query execution error.
    #[error("query error: {0}")]
    Query(String),

    /// A single-result query matched more than one document.
    #[error("query returned a non-unique result, expected at most {expected}")]
    NotUnique {
        /// The number of results the caller expected at most.
        expected: u64,
    },

    /// Invalid ObjectId.
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a precondition violation error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a non-unique result error.
    pub fn not_unique(expected: u64) -> Self {
        Self::NotUnique { expected }
    }

    /// Check if this is a precondition violation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a non-unique result error.
    pub fn is_not_unique(&self) -> bool {
        matches!(self, Self::NotUnique { .. })
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<bson::oid::Error> for MongoError {
    fn from(err: bson::oid::Error) -> Self {
        MongoError::InvalidObjectId(err.to_string())
    }
}
