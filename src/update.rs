//! Update document construction.

use bson::{Bson, Document};

/// Builder for MongoDB update-operator documents.
///
/// Chained calls accumulate fields under their operator key, so
/// `Update::new().set("a", 1).set("b", 2)` produces
/// `{ "$set": { "a": 1, "b": 2 } }`.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_mongo::Update;
///
/// let update = Update::new().set("firstname", "Han").inc("edits", 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Update {
    doc: Document,
}

impl Update {
    /// Create a new empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a new value (`$set`).
    pub fn set(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.operator("$set", field.into(), value.into())
    }

    /// Set a field only when the update inserts a document (`$setOnInsert`).
    pub fn set_on_insert(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.operator("$setOnInsert", field.into(), value.into())
    }

    /// Remove a field (`$unset`).
    pub fn unset(self, field: impl Into<String>) -> Self {
        self.operator("$unset", field.into(), Bson::String(String::new()))
    }

    /// Increment a numeric field (`$inc`).
    pub fn inc(self, field: impl Into<String>, by: impl Into<Bson>) -> Self {
        self.operator("$inc", field.into(), by.into())
    }

    /// Multiply a numeric field (`$mul`).
    pub fn mul(self, field: impl Into<String>, by: impl Into<Bson>) -> Self {
        self.operator("$mul", field.into(), by.into())
    }

    /// Rename a field (`$rename`).
    pub fn rename(self, field: impl Into<String>, to: impl Into<String>) -> Self {
        self.operator("$rename", field.into(), Bson::String(to.into()))
    }

    /// Append a value to an array field (`$push`).
    pub fn push(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.operator("$push", field.into(), value.into())
    }

    /// Remove matching values from an array field (`$pull`).
    pub fn pull(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.operator("$pull", field.into(), value.into())
    }

    /// Add a value to an array field unless already present (`$addToSet`).
    pub fn add_to_set(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.operator("$addToSet", field.into(), value.into())
    }

    fn operator(mut self, op: &str, field: String, value: Bson) -> Self {
        match self.doc.get_document_mut(op) {
            Ok(existing) => {
                existing.insert(field, value);
            }
            Err(_) => {
                let mut fields = Document::new();
                fields.insert(field, value);
                self.doc.insert(op, fields);
            }
        }
        self
    }

    /// Check if no modifications have been specified.
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// Consume the builder, returning the update document.
    pub fn into_document(self) -> Document {
        self.doc
    }
}

impl From<Document> for Update {
    fn from(doc: Document) -> Self {
        Self { doc }
    }
}
