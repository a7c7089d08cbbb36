//! Query descriptor combining a filter with cursor concerns.

use bson::Document;

use crate::filter::FilterBuilder;
use crate::types::CursorOptions;

/// An immutable query descriptor.
///
/// Bundles the filter document with the cursor concerns of a find: projection
/// fields, sort order, limit, and skip. Write operations only consume the
/// filter half. An empty query matches every document.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_mongo::{FilterBuilder, Query};
///
/// let query = Query::new()
///     .filter(FilterBuilder::new().eq("firstname", "luke"))
///     .limit(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    filter: Document,
    fields: Document,
    sort: Option<Document>,
    limit: Option<i64>,
    skip: Option<u64>,
}

impl Query {
    /// Create an empty query matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter document.
    pub fn filter(mut self, filter: impl Into<Document>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Restrict the fields returned for each matching document.
    pub fn project(mut self, fields: Document) -> Self {
        self.fields = fields;
        self
    }

    /// Set the sort order.
    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Limit the number of returned documents.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `skip` matching documents.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// The filter document.
    pub fn filter_doc(&self) -> &Document {
        &self.filter
    }

    /// The projection fields document.
    pub fn fields_doc(&self) -> &Document {
        &self.fields
    }

    /// Consume the query, returning only its filter document.
    pub fn into_filter(self) -> Document {
        self.filter
    }

    /// Split the query into filter, fields, and cursor options.
    pub fn into_parts(self) -> (Document, Document, CursorOptions) {
        let options = CursorOptions {
            limit: self.limit,
            skip: self.skip,
            sort: self.sort,
        };
        (self.filter, self.fields, options)
    }
}

impl From<Document> for Query {
    fn from(filter: Document) -> Self {
        Query::new().filter(filter)
    }
}

impl From<FilterBuilder> for Query {
    fn from(builder: FilterBuilder) -> Self {
        Query::new().filter(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_empty_query() {
        let (filter, fields, options) = Query::new().into_parts();
        assert!(filter.is_empty());
        assert!(fields.is_empty());
        assert!(options.limit.is_none());
        assert!(options.sort.is_none());
    }

    #[test]
    fn test_query_carries_cursor_options() {
        let query = Query::new()
            .filter(doc! { "firstname": "luke" })
            .sort(doc! { "firstname": 1 })
            .limit(5)
            .skip(2);

        let (filter, _, options) = query.into_parts();
        assert_eq!(filter.get_str("firstname").unwrap(), "luke");
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.skip, Some(2));
        assert!(options.sort.is_some());
    }

    #[test]
    fn test_from_filter_builder() {
        let query: Query = FilterBuilder::new().eq("firstname", "han").into();
        assert_eq!(query.filter_doc().get_str("firstname").unwrap(), "han");
    }

    #[test]
    fn test_from_document() {
        let query: Query = doc! { "firstname": "han" }.into();
        assert_eq!(query.filter_doc().get_str("firstname").unwrap(), "han");
    }

    #[test]
    fn test_into_filter_discards_cursor_concerns() {
        let filter = Query::new()
            .filter(doc! { "firstname": "han" })
            .limit(3)
            .into_filter();
        assert_eq!(filter, doc! { "firstname": "han" });
    }
}
