//! Fluent remove operations.

use std::marker::PhantomData;

use crate::engine::DocumentEngine;
use crate::error::{MongoError, MongoResult};
use crate::model::Model;
use crate::query::Query;
use crate::types::RemoveOutcome;

/// A fluent remove operation for model `M`.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = engine
///     .remove::<Person>()
///     .all_matching(FilterBuilder::new().eq("firstname", "han").into())
///     .await?;
/// ```
pub struct RemoveOperation<E: DocumentEngine, M: Model> {
    engine: E,
    collection: Option<String>,
    _model: PhantomData<M>,
}

impl<E: DocumentEngine, M: Model> std::fmt::Debug for RemoveOperation<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveOperation")
            .field("collection", &self.collection)
            .finish()
    }
}

impl<E: DocumentEngine, M: Model> RemoveOperation<E, M> {
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            collection: None,
            _model: PhantomData,
        }
    }

    /// Explicitly set the collection to remove from instead of the model
    /// default.
    ///
    /// Fails with [`MongoError::InvalidArgument`] when the name is empty.
    pub fn in_collection(mut self, collection: impl Into<String>) -> MongoResult<Self> {
        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(MongoError::invalid_argument(
                "collection name must not be empty",
            ));
        }
        self.collection = Some(collection);
        Ok(self)
    }

    /// Remove every document from the collection without dropping it.
    pub async fn all(self) -> MongoResult<RemoveOutcome> {
        self.all_matching(Query::new()).await
    }

    /// Remove all documents matching the filter.
    pub async fn all_matching(self, query: Query) -> MongoResult<RemoveOutcome> {
        let collection = self.resolved_collection().to_owned();
        self.engine
            .remove_docs(&collection, query.into_filter())
            .await
    }

    /// Remove and return all documents matching the filter.
    ///
    /// The entire list of matching documents is fetched before any delete
    /// command is sent, and each document is then deleted individually (see
    /// [`DocumentEngine::find_and_remove`]); this is not a bulk delete.
    pub async fn and_return_all_matching(self, query: Query) -> MongoResult<Vec<M>> {
        let collection = self.resolved_collection().to_owned();
        self.engine
            .find_and_remove(&collection, query.into_filter())
            .await
    }

    fn resolved_collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(M::COLLECTION)
    }
}
