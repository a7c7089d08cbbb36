//! Shared value types: operation outcomes and engine options.

use bson::{Bson, Document};

/// Summary of an update operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    /// Number of documents the filter matched.
    pub matched_count: u64,
    /// Number of documents actually modified.
    pub modified_count: u64,
    /// Identifier generated for an upserted document, if one was inserted.
    pub upserted_id: Option<Bson>,
}

impl UpdateOutcome {
    /// Whether the operation inserted a new document.
    pub fn did_upsert(&self) -> bool {
        self.upserted_id.is_some()
    }
}

/// Summary of a remove operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Number of documents deleted.
    pub deleted_count: u64,
}

/// Cursor concerns carried from a [`Query`](crate::Query) into the engine.
///
/// Result-arity bounded finds override `limit` regardless of what the query
/// asked for.
#[derive(Debug, Clone, Default)]
pub struct CursorOptions {
    /// Maximum number of documents to return.
    pub limit: Option<i64>,
    /// Number of matching documents to skip.
    pub skip: Option<u64>,
    /// Sort order document.
    pub sort: Option<Document>,
}

/// Behavior options for find-and-modify operations.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_mongo::FindAndModifyOptions;
///
/// let options = FindAndModifyOptions::default().return_new(true);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindAndModifyOptions {
    /// Return the post-update document instead of the pre-update image.
    pub return_new: bool,
    /// Insert a new document when the filter matches nothing.
    pub upsert: bool,
}

impl FindAndModifyOptions {
    /// Create options with the default behavior (pre-update image, no upsert).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the document as it is after the update was applied.
    pub fn return_new(mut self, return_new: bool) -> Self {
        self.return_new = return_new;
        self
    }

    /// Insert a new document when the filter matches nothing.
    pub fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }
}
