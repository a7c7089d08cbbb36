//! Filter document construction.

use bson::{Bson, Document, doc, oid::ObjectId};

use crate::error::{MongoError, MongoResult};

/// Builder for MongoDB filter documents.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_mongo::FilterBuilder;
///
/// let filter = FilterBuilder::new()
///     .eq("status", "active")
///     .gte("age", 18)
///     .build();
/// // { "status": "active", "age": { "$gte": 18 } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    doc: Document,
}

impl FilterBuilder {
    /// Create a new empty filter builder. An empty filter matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter builder from an existing document.
    pub fn from_doc(doc: Document) -> Self {
        Self { doc }
    }

    /// Parse a filter from its JSON representation.
    pub fn from_json(json: &str) -> MongoResult<Self> {
        let doc: Document = serde_json::from_str(json)
            .map_err(|e| MongoError::query(format!("invalid filter JSON: {}", e)))?;
        Ok(Self { doc })
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, value.into());
        self
    }

    /// Add a not-equal condition.
    pub fn ne(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, doc! { "$ne": value.into() });
        self
    }

    /// Add a greater-than condition.
    pub fn gt(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, doc! { "$gt": value.into() });
        self
    }

    /// Add a greater-than-or-equal condition.
    pub fn gte(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, doc! { "$gte": value.into() });
        self
    }

    /// Add a less-than condition.
    pub fn lt(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, doc! { "$lt": value.into() });
        self
    }

    /// Add a less-than-or-equal condition.
    pub fn lte(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, doc! { "$lte": value.into() });
        self
    }

    /// Add an "in" condition (field value is one of the given values).
    pub fn in_array(mut self, field: &str, values: Vec<impl Into<Bson>>) -> Self {
        let bson_values: Vec<Bson> = values.into_iter().map(Into::into).collect();
        self.doc.insert(field, doc! { "$in": bson_values });
        self
    }

    /// Add a "not in" condition.
    pub fn not_in(mut self, field: &str, values: Vec<impl Into<Bson>>) -> Self {
        let bson_values: Vec<Bson> = values.into_iter().map(Into::into).collect();
        self.doc.insert(field, doc! { "$nin": bson_values });
        self
    }

    /// Add an exists condition.
    pub fn exists(mut self, field: &str, exists: bool) -> Self {
        self.doc.insert(field, doc! { "$exists": exists });
        self
    }

    /// Add a regex condition.
    pub fn regex(mut self, field: &str, pattern: &str) -> Self {
        self.doc.insert(field, doc! { "$regex": pattern });
        self
    }

    /// Combine the given conditions with `$and`.
    pub fn and(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$and", conditions);
        self
    }

    /// Combine the given conditions with `$or`.
    pub fn or(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$or", conditions);
        self
    }

    /// Filter on the `_id` field.
    pub fn by_id(mut self, id: impl Into<Bson>) -> Self {
        self.doc.insert("_id", id.into());
        self
    }

    /// Filter on the `_id` field, parsing an ObjectId from a string.
    pub fn by_object_id(self, id: &str) -> MongoResult<Self> {
        let oid = ObjectId::parse_str(id)?;
        Ok(self.by_id(oid))
    }

    /// Merge another filter document into this one.
    pub fn merge(mut self, other: Document) -> Self {
        for (k, v) in other {
            self.doc.insert(k, v);
        }
        self
    }

    /// Build the filter document.
    pub fn build(self) -> Document {
        self.doc
    }

    /// Check if the filter is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }
}

impl From<FilterBuilder> for Document {
    fn from(builder: FilterBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterBuilder::new();
        assert!(filter.is_empty());
        assert!(filter.build().is_empty());
    }

    #[test]
    fn test_eq() {
        let filter = FilterBuilder::new()
            .eq("firstname", "luke")
            .eq("age", 19)
            .build();

        assert_eq!(filter.get_str("firstname").unwrap(), "luke");
        assert_eq!(filter.get_i32("age").unwrap(), 19);
    }

    #[test]
    fn test_comparison_operators() {
        let filter = FilterBuilder::new().gte("age", 18).build();
        let age = filter.get_document("age").unwrap();
        assert!(age.contains_key("$gte"));
    }

    #[test]
    fn test_in_array() {
        let filter = FilterBuilder::new()
            .in_array("firstname", vec!["han", "luke"])
            .build();

        let cond = filter.get_document("firstname").unwrap();
        assert_eq!(cond.get_array("$in").unwrap().len(), 2);
    }

    #[test]
    fn test_or() {
        let filter = FilterBuilder::new()
            .or(vec![doc! { "firstname": "han" }, doc! { "firstname": "luke" }])
            .build();

        assert!(filter.contains_key("$or"));
    }

    #[test]
    fn test_by_id_accepts_any_id_representation() {
        let filter = FilterBuilder::new().by_id("id-1").build();
        assert_eq!(filter.get_str("_id").unwrap(), "id-1");

        let oid = ObjectId::new();
        let filter = FilterBuilder::new().by_id(oid).build();
        assert_eq!(filter.get_object_id("_id").unwrap(), oid);
    }

    #[test]
    fn test_by_object_id_rejects_malformed_input() {
        assert!(FilterBuilder::new().by_object_id("nope").is_err());
    }

    #[test]
    fn test_from_json() {
        let filter = FilterBuilder::from_json(r#"{"firstname": "han"}"#)
            .unwrap()
            .build();
        assert_eq!(filter.get_str("firstname").unwrap(), "han");

        assert!(FilterBuilder::from_json("{not json").is_err());
    }

    #[test]
    fn test_merge() {
        let filter = FilterBuilder::new()
            .eq("firstname", "han")
            .merge(doc! { "lastname": "solo" })
            .build();

        assert_eq!(filter.get_str("firstname").unwrap(), "han");
        assert_eq!(filter.get_str("lastname").unwrap(), "solo");
    }
}
