//! The document engine seam and its MongoDB implementation.
//!
//! Fluent operation chains assemble a request and hand it to a
//! [`DocumentEngine`]. The production engine ([`MongoEngine`]) maps the
//! delegate calls onto driver collection operations; tests substitute their
//! own engine behind the same trait.

use std::future::Future;
use std::pin::Pin;

use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::options::{
    FindOneAndUpdateOptions, FindOptions, ReplaceOptions, ReturnDocument, UpdateOptions,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::MongoClient;
use crate::document::{self, DocumentExt};
use crate::error::MongoResult;
use crate::model::Model;
use crate::types::{CursorOptions, FindAndModifyOptions, RemoveOutcome, UpdateOutcome};

/// Boxed future returned by engine methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executor of assembled document operations.
///
/// Implementations receive the already-resolved collection name and opaque
/// filter/update documents; they own document mapping and nothing else. The
/// fluent chains in [`operations`](crate::operations) are generic over this
/// trait.
pub trait DocumentEngine: Send + Sync {
    /// Find documents matching `filter`, mapped into `T`.
    fn find_docs<T>(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        options: CursorOptions,
    ) -> BoxFuture<'_, MongoResult<Vec<T>>>
    where
        T: DeserializeOwned + Send + 'static;

    /// Apply `update` to documents matching `filter`.
    fn update_docs(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
        multi: bool,
    ) -> BoxFuture<'_, MongoResult<UpdateOutcome>>;

    /// Delete documents matching `filter`.
    fn remove_docs(
        &self,
        collection: &str,
        filter: Document,
    ) -> BoxFuture<'_, MongoResult<RemoveOutcome>>;

    /// Atomically find one document matching `filter`, apply `update`, and
    /// return the pre- or post-update image per `options`.
    fn find_and_modify<T>(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        options: FindAndModifyOptions,
    ) -> BoxFuture<'_, MongoResult<Option<T>>>
    where
        T: DeserializeOwned + Send + 'static;

    /// Fetch all documents matching `filter`, then delete them one by one,
    /// returning the fetched list.
    ///
    /// This is deliberately NOT a single bulk delete: the full list is read
    /// first, then one delete command is issued per fetched document, with one
    /// debug event emitted per removed document. Callers needing atomicity or
    /// bulk efficiency should use `remove_docs` instead.
    fn find_and_remove<T>(
        &self,
        collection: &str,
        filter: Document,
    ) -> BoxFuture<'_, MongoResult<Vec<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let collection = collection.to_owned();
        Box::pin(async move {
            let found: Vec<Document> = self
                .find_docs(&collection, filter, Document::new(), CursorOptions::default())
                .await?;

            let mapped = found
                .iter()
                .cloned()
                .map(document::from_document)
                .collect::<MongoResult<Vec<T>>>()?;

            for doc in &found {
                let id = doc.id()?.clone();
                self.remove_docs(&collection, doc! { "_id": id.clone() })
                    .await?;
                debug!(collection = %collection, id = %id, "removed matched document");
            }

            Ok(mapped)
        })
    }
}

/// MongoDB implementation of [`DocumentEngine`] on the official driver.
#[derive(Clone)]
pub struct MongoEngine {
    client: MongoClient,
}

impl MongoEngine {
    /// Create a new engine with the given client.
    pub fn new(client: MongoClient) -> Self {
        Self { client }
    }

    /// Get a reference to the client.
    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    /// Insert one entity into its model collection, returning the stored id.
    pub async fn insert<M: Model>(&self, entity: &M) -> MongoResult<Bson> {
        let doc = document::to_document(entity)?;
        debug!(collection = M::COLLECTION, "executing insert");
        let result = self
            .client
            .collection_doc(M::COLLECTION)
            .insert_one(doc, None)
            .await?;
        Ok(result.inserted_id)
    }

    /// Insert or fully replace one entity, keyed by its `_id`.
    ///
    /// Entities serializing without an `_id` are plainly inserted.
    pub async fn save<M: Model>(&self, entity: &M) -> MongoResult<()> {
        let doc = document::to_document(entity)?;
        let collection = self.client.collection_doc(M::COLLECTION);
        let id = doc.get("_id").filter(|id| **id != Bson::Null).cloned();

        match id {
            Some(id) => {
                debug!(collection = M::COLLECTION, id = %id, "executing save");
                let options = ReplaceOptions::builder().upsert(true).build();
                collection
                    .replace_one(doc! { "_id": id }, doc, options)
                    .await?;
            }
            None => {
                debug!(collection = M::COLLECTION, "executing save as insert");
                collection.insert_one(doc, None).await?;
            }
        }
        Ok(())
    }

    /// Drop a collection.
    pub async fn drop_collection(&self, name: &str) -> MongoResult<()> {
        self.client.drop_collection(name).await
    }
}

impl DocumentEngine for MongoEngine {
    fn find_docs<T>(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        options: CursorOptions,
    ) -> BoxFuture<'_, MongoResult<Vec<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let collection = collection.to_owned();
        Box::pin(async move {
            debug!(collection = %collection, filter = %filter, "executing find");

            let projection = if fields.is_empty() { None } else { Some(fields) };
            let find_options = FindOptions::builder()
                .projection(projection)
                .sort(options.sort)
                .limit(options.limit)
                .skip(options.skip)
                .build();

            let cursor = self
                .client
                .collection_doc(&collection)
                .find(filter, find_options)
                .await?;

            let docs: Vec<Document> = cursor.try_collect().await?;
            docs.into_iter().map(document::from_document).collect()
        })
    }

    fn update_docs(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
        multi: bool,
    ) -> BoxFuture<'_, MongoResult<UpdateOutcome>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            debug!(
                collection = %collection,
                filter = %filter,
                upsert,
                multi,
                "executing update"
            );

            let options = UpdateOptions::builder().upsert(upsert).build();
            let target = self.client.collection_doc(&collection);
            let result = if multi {
                target.update_many(filter, update, options).await?
            } else {
                target.update_one(filter, update, options).await?
            };

            Ok(UpdateOutcome {
                matched_count: result.matched_count,
                modified_count: result.modified_count,
                upserted_id: result.upserted_id,
            })
        })
    }

    fn remove_docs(
        &self,
        collection: &str,
        filter: Document,
    ) -> BoxFuture<'_, MongoResult<RemoveOutcome>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            debug!(collection = %collection, filter = %filter, "executing remove");

            let result = self
                .client
                .collection_doc(&collection)
                .delete_many(filter, None)
                .await?;

            Ok(RemoveOutcome {
                deleted_count: result.deleted_count,
            })
        })
    }

    fn find_and_modify<T>(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        options: FindAndModifyOptions,
    ) -> BoxFuture<'_, MongoResult<Option<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let collection = collection.to_owned();
        Box::pin(async move {
            debug!(
                collection = %collection,
                filter = %filter,
                return_new = options.return_new,
                "executing find and modify"
            );

            let return_document = if options.return_new {
                ReturnDocument::After
            } else {
                ReturnDocument::Before
            };
            let driver_options = FindOneAndUpdateOptions::builder()
                .upsert(options.upsert)
                .return_document(return_document)
                .build();

            let doc = self
                .client
                .collection_doc(&collection)
                .find_one_and_update(filter, update, driver_options)
                .await?;

            doc.map(document::from_document).transpose()
        })
    }
}
