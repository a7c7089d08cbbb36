//! Fluent find operations.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::engine::DocumentEngine;
use crate::error::{MongoError, MongoResult};
use crate::model::Model;
use crate::query::Query;

/// A fluent find operation for model `M`, returning results as `R`.
///
/// The target collection is resolved from the model unless overridden with
/// [`in_collection`](Self::in_collection); the result type defaults to the
/// model and can be switched with
/// [`return_results_as`](Self::return_results_as).
///
/// # Example
///
/// ```rust,ignore
/// let jedi = engine
///     .query::<Person>()
///     .return_results_as::<Jedi>()
///     .find_all_by(FilterBuilder::new().eq("firstname", "luke").into())
///     .await?;
/// ```
pub struct FindOperation<E: DocumentEngine, M: Model, R = M> {
    engine: E,
    collection: Option<String>,
    _model: PhantomData<M>,
    _result: PhantomData<R>,
}

impl<E: DocumentEngine, M: Model, R> std::fmt::Debug for FindOperation<E, M, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindOperation")
            .field("collection", &self.collection)
            .finish()
    }
}

impl<E: DocumentEngine, M: Model> FindOperation<E, M, M> {
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            collection: None,
            _model: PhantomData,
            _result: PhantomData,
        }
    }
}

impl<E, M, R> FindOperation<E, M, R>
where
    E: DocumentEngine,
    M: Model,
    R: DeserializeOwned + Send + 'static,
{
    /// Explicitly set the collection to query instead of the model default.
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

    /// Map fetched documents into `R2` instead of the model type.
    ///
    /// Collection resolution still follows the model.
    pub fn return_results_as<R2>(self) -> FindOperation<E, M, R2>
    where
        R2: DeserializeOwned + Send + 'static,
    {
        FindOperation {
            engine: self.engine,
            collection: self.collection,
            _model: PhantomData,
            _result: PhantomData,
        }
    }

    /// Find all documents.
    pub async fn find_all(self) -> MongoResult<Vec<R>> {
        self.find_all_by(Query::new()).await
    }

    /// Find all documents matching the query. Returns an empty vec when
    /// nothing matches.
    pub async fn find_all_by(self, query: Query) -> MongoResult<Vec<R>> {
        self.do_find(query, None).await
    }

    /// Find exactly one document matching the query.
    ///
    /// Probes for up to two documents regardless of the query's own limit;
    /// more than one match fails with [`MongoError::NotUnique`].
    pub async fn find_by(self, query: Query) -> MongoResult<Option<R>> {
        let mut results = self.do_find(query, Some(2)).await?;
        if results.len() > 1 {
            return Err(MongoError::not_unique(1));
        }
        Ok(results.pop())
    }

    /// Find the first document matching the query.
    ///
    /// Unlike [`find_by`](Self::find_by) this makes no assumption about the
    /// result size and simply returns the first match, if any.
    pub async fn find_first_by(self, query: Query) -> MongoResult<Option<R>> {
        let mut results = self.do_find(query, Some(1)).await?;
        Ok(results.pop())
    }

    async fn do_find(self, query: Query, limit_override: Option<i64>) -> MongoResult<Vec<R>> {
        let collection = self
            .collection
            .as_deref()
            .unwrap_or(M::COLLECTION)
            .to_owned();
        let (filter, fields, mut options) = query.into_parts();
        if limit_override.is_some() {
            options.limit = limit_override;
        }
        self.engine
            .find_docs(&collection, filter, fields, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BoxFuture;
    use crate::operations::FluentOperations;
    use crate::types::{CursorOptions, FindAndModifyOptions, RemoveOutcome, UpdateOutcome};
    use bson::{Document, doc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Person {
        #[serde(rename = "_id")]
        id: String,
        firstname: String,
    }

    impl Model for Person {
        const COLLECTION: &'static str = "star-wars";
    }

    #[derive(Debug, Deserialize)]
    struct Jedi {
        firstname: String,
    }

    /// Engine returning a fixed document list, honoring only the limit.
    #[derive(Clone, Default)]
    struct FixedEngine {
        docs: Vec<Document>,
    }

    impl DocumentEngine for FixedEngine {
        fn find_docs<T>(
            &self,
            _collection: &str,
            _filter: Document,
            _fields: Document,
            options: CursorOptions,
        ) -> BoxFuture<'_, MongoResult<Vec<T>>>
        where
            T: DeserializeOwned + Send + 'static,
        {
            let mut docs = self.docs.clone();
            if let Some(limit) = options.limit {
                docs.truncate(limit as usize);
            }
            Box::pin(async move {
                docs.into_iter()
                    .map(crate::document::from_document)
                    .collect()
            })
        }

        fn update_docs(
            &self,
            _collection: &str,
            _filter: Document,
            _update: Document,
            _upsert: bool,
            _multi: bool,
        ) -> BoxFuture<'_, MongoResult<UpdateOutcome>> {
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

    fn star_wars() -> FixedEngine {
        FixedEngine {
            docs: vec![
                doc! { "_id": "id-1", "firstname": "han" },
                doc! { "_id": "id-2", "firstname": "luke" },
            ],
        }
    }

    #[tokio::test]
    async fn test_find_all() {
        let people = star_wars().query::<Person>().find_all().await.unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].firstname, "han");
    }

    #[tokio::test]
    async fn test_find_by_single_match() {
        let engine = FixedEngine {
            docs: vec![doc! { "_id": "id-2", "firstname": "luke" }],
        };
        let luke = engine.query::<Person>().find_by(Query::new()).await.unwrap();
        assert_eq!(luke.unwrap().firstname, "luke");
    }

    #[tokio::test]
    async fn test_find_by_no_match() {
        let engine = FixedEngine::default();
        let result = engine.query::<Person>().find_by(Query::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_too_many_results() {
        let err = star_wars()
            .query::<Person>()
            .find_by(Query::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MongoError::NotUnique { expected: 1 }));
    }

    #[tokio::test]
    async fn test_find_first_by_ignores_additional_matches() {
        let first = star_wars()
            .query::<Person>()
            .find_first_by(Query::new())
            .await
            .unwrap();
        assert_eq!(first.unwrap().firstname, "han");
    }

    #[tokio::test]
    async fn test_return_results_as() {
        let jedi = star_wars()
            .query::<Person>()
            .return_results_as::<Jedi>()
            .find_all()
            .await
            .unwrap();
        assert_eq!(jedi.len(), 2);
        assert_eq!(jedi[1].firstname, "luke");
    }

    #[test]
    fn test_in_collection_rejects_empty_name() {
        let err = FixedEngine::default()
            .query::<Person>()
            .in_collection("")
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = FixedEngine::default()
            .query::<Person>()
            .in_collection("   ")
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
