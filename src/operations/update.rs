//! Fluent update operations.

use std::marker::PhantomData;

use crate::engine::DocumentEngine;
use crate::error::{MongoError, MongoResult};
use crate::model::Model;
use crate::query::Query;
use crate::types::{FindAndModifyOptions, UpdateOutcome};
use crate::update::Update;

/// Start of an update chain; the update to apply is a mandatory step.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = engine
///     .update::<Person>()
///     .apply(Update::new().set("firstname", "Han"))
///     .all_matching(FilterBuilder::new().eq("firstname", "han").into())
///     .await?;
/// ```
pub struct UpdateOperation<E: DocumentEngine, M: Model> {
    engine: E,
    _model: PhantomData<M>,
}

impl<E: DocumentEngine, M: Model> UpdateOperation<E, M> {
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            _model: PhantomData,
        }
    }

    /// Set the update to be applied.
    pub fn apply(self, update: Update) -> PreparedUpdate<E, M> {
        PreparedUpdate {
            engine: self.engine,
            update,
            collection: None,
            _model: PhantomData,
        }
    }
}

/// An update chain with its update set, ready for a terminal call.
pub struct PreparedUpdate<E: DocumentEngine, M: Model> {
    engine: E,
    update: Update,
    collection: Option<String>,
    _model: PhantomData<M>,
}

impl<E: DocumentEngine, M: Model> std::fmt::Debug for PreparedUpdate<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedUpdate")
            .field("update", &self.update)
            .field("collection", &self.collection)
            .finish()
    }
}

impl<E: DocumentEngine, M: Model> PreparedUpdate<E, M> {
    /// Explicitly set the collection to update instead of the model default.
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

    /// Attach find-and-modify behavior options.
    ///
    /// Narrows the chain to the find-and-modify terminal; the bulk-update
    /// terminals do not consume these options.
    pub fn with_options(self, options: FindAndModifyOptions) -> FindAndModifyOperation<E, M> {
        FindAndModifyOperation {
            engine: self.engine,
            update: self.update,
            collection: self.collection,
            options,
            _model: PhantomData,
        }
    }

    /// Update the first document in the collection.
    pub async fn first(self) -> MongoResult<UpdateOutcome> {
        self.do_update(Query::new(), false, false).await
    }

    /// Update the first document matching the filter.
    pub async fn first_matching(self, query: Query) -> MongoResult<UpdateOutcome> {
        self.do_update(query, false, false).await
    }

    /// Update all documents in the collection.
    pub async fn all(self) -> MongoResult<UpdateOutcome> {
        self.do_update(Query::new(), false, true).await
    }

    /// Update all documents matching the filter.
    pub async fn all_matching(self, query: Query) -> MongoResult<UpdateOutcome> {
        self.do_update(query, false, true).await
    }

    /// Update matching documents, inserting a new one when nothing matches.
    ///
    /// The outcome carries the generated identifier when an insert happened.
    pub async fn upsert_if_none_matching(self, query: Query) -> MongoResult<UpdateOutcome> {
        self.do_update(query, true, true).await
    }

    /// Atomically find the first match, apply the update, and return the
    /// pre-update image (use [`with_options`](Self::with_options) for the
    /// post-update image).
    pub async fn find_and_modify_matching(self, query: Query) -> MongoResult<Option<M>> {
        self.with_options(FindAndModifyOptions::default())
            .find_and_modify_matching(query)
            .await
    }

    async fn do_update(
        self,
        query: Query,
        upsert: bool,
        multi: bool,
    ) -> MongoResult<UpdateOutcome> {
        let collection = self
            .collection
            .as_deref()
            .unwrap_or(M::COLLECTION)
            .to_owned();
        self.engine
            .update_docs(
                &collection,
                query.into_filter(),
                self.update.into_document(),
                upsert,
                multi,
            )
            .await
    }
}

/// An update chain narrowed to the find-and-modify terminal.
pub struct FindAndModifyOperation<E: DocumentEngine, M: Model> {
    engine: E,
    update: Update,
    collection: Option<String>,
    options: FindAndModifyOptions,
    _model: PhantomData<M>,
}

impl<E: DocumentEngine, M: Model> FindAndModifyOperation<E, M> {
    /// Atomically find the first match, apply the update, and return the
    /// document image selected by the attached options.
    pub async fn find_and_modify_matching(self, query: Query) -> MongoResult<Option<M>> {
        let collection = self
            .collection
            .as_deref()
            .unwrap_or(M::COLLECTION)
            .to_owned();
        self.engine
            .find_and_modify(
                &collection,
                query.into_filter(),
                self.update.into_document(),
                self.options,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BoxFuture;
    use crate::operations::FluentOperations;
    use crate::types::{CursorOptions, RemoveOutcome};
    use bson::{Document, doc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Person {
        #[serde(rename = "_id")]
        id: String,
        firstname: String,
    }

    impl Model for Person {
        const COLLECTION: &'static str = "star-wars";
    }

    #[derive(Debug, Clone, Default)]
    struct RecordedUpdate {
        collection: String,
        update: Document,
        upsert: bool,
        multi: bool,
    }

    /// Engine recording the last update call it received.
    #[derive(Clone, Default)]
    struct RecordingEngine {
        last: Arc<Mutex<Option<RecordedUpdate>>>,
    }

    impl RecordingEngine {
        fn recorded(&self) -> RecordedUpdate {
            self.last.lock().unwrap().clone().expect("no update recorded")
        }
    }

    impl DocumentEngine for RecordingEngine {
        fn find_docs<T>(
            &self,
            _collection: &str,
            _filter: Document,
            _fields: Document,
            _options: CursorOptions,
        ) -> BoxFuture<'_, MongoResult<Vec<T>>>
        where
            T: DeserializeOwned + Send + 'static,
        {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn update_docs(
            &self,
            collection: &str,
            _filter: Document,
            update: Document,
            upsert: bool,
            multi: bool,
        ) -> BoxFuture<'_, MongoResult<UpdateOutcome>> {
            *self.last.lock().unwrap() = Some(RecordedUpdate {
                collection: collection.to_owned(),
                update,
                upsert,
                multi,
            });
            Box::pin(async { Ok(UpdateOutcome::default()) })
        }

        fn remove_docs(
            &self,
            _collection: &str,
            _filter: Document,
        ) -> BoxFuture<'_, MongoResult<RemoveOutcome>> {
            Box::pin(async { Ok(RemoveOutcome::default()) })
        }

        fn find_and_modify<T>(
            &self,
            _collection: &str,
            _filter: Document,
            _update: Document,
            _options: FindAndModifyOptions,
        ) -> BoxFuture<'_, MongoResult<Option<T>>>
        where
            T: DeserializeOwned + Send + 'static,
        {
            Box::pin(async { Ok(None) })
        }
    }

    #[tokio::test]
    async fn test_first_updates_one_without_upsert() {
        let engine = RecordingEngine::default();
        engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Han"))
            .first()
            .await
            .unwrap();

        let recorded = engine.recorded();
        assert_eq!(recorded.collection, "star-wars");
        assert!(!recorded.multi);
        assert!(!recorded.upsert);
    }

    #[tokio::test]
    async fn test_all_updates_many() {
        let engine = RecordingEngine::default();
        engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Han"))
            .all()
            .await
            .unwrap();

        let recorded = engine.recorded();
        assert!(recorded.multi);
        assert!(!recorded.upsert);
    }

    #[tokio::test]
    async fn test_upsert_if_none_matching_sets_upsert_flag() {
        let engine = RecordingEngine::default();
        engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Chewbacca"))
            .upsert_if_none_matching(doc! { "_id": "id-3" }.into())
            .await
            .unwrap();

        let recorded = engine.recorded();
        assert!(recorded.multi);
        assert!(recorded.upsert);
    }

    #[tokio::test]
    async fn test_update_document_reaches_engine() {
        let engine = RecordingEngine::default();
        engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Han"))
            .all_matching(doc! { "firstname": "han" }.into())
            .await
            .unwrap();

        let set = engine.recorded().update.get_document("$set").unwrap().clone();
        assert_eq!(set.get_str("firstname").unwrap(), "Han");
    }

    #[tokio::test]
    async fn test_in_collection_override() {
        let engine = RecordingEngine::default();
        engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Han"))
            .in_collection("rebels")
            .unwrap()
            .all()
            .await
            .unwrap();

        assert_eq!(engine.recorded().collection, "rebels");
    }

    #[test]
    fn test_in_collection_rejects_empty_name() {
        let err = RecordingEngine::default()
            .update::<Person>()
            .apply(Update::new())
            .in_collection("")
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_find_and_modify_returns_engine_result() {
        let engine = RecordingEngine::default();
        let result = engine
            .update::<Person>()
            .apply(Update::new().set("firstname", "Han"))
            .with_options(FindAndModifyOptions::new().return_new(true))
            .find_and_modify_matching(doc! { "_id": "id-1" }.into())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
