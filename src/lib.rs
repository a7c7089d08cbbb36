//! # fluent-mongo
//!
//! Fluent, type-safe find/update/remove operations for MongoDB.
//!
//! This crate provides:
//! - Fluent operation chains (`query`/`update`/`remove`) with immutable steps
//! - A pluggable execution seam (`DocumentEngine`) with a production
//!   implementation on the official MongoDB driver
//! - Query, filter, and update document builders
//! - Connection configuration and client wrapping
//!
//! ## Example
//!
//! ```rust,ignore
//! use fluent_mongo::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Person {
//!     #[serde(rename = "_id")]
//!     id: String,
//!     firstname: String,
//! }
//!
//! impl Model for Person {
//!     const COLLECTION: &'static str = "star-wars";
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fluent_mongo::MongoError> {
//!     let client = MongoClient::builder()
//!         .uri("mongodb://localhost:27017")
//!         .database("mydb")
//!         .build()
//!         .await?;
//!     let engine = MongoEngine::new(client);
//!
//!     // Find exactly one person, failing on a non-unique result.
//!     let luke = engine
//!         .query::<Person>()
//!         .find_by(FilterBuilder::new().eq("firstname", "luke").into())
//!         .await?;
//!
//!     // Update all matching documents.
//!     let outcome = engine
//!         .update::<Person>()
//!         .apply(Update::new().set("firstname", "Luke"))
//!         .all_matching(FilterBuilder::new().eq("firstname", "luke").into())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! The chains reject bad arguments (an empty collection name) before anything
//! reaches the engine, and `find_by` fails with a distinguished error when a
//! query expected to match at most one document matches more. Every other
//! failure surfaces unchanged from the driver.

pub mod client;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod filter;
pub mod model;
pub mod operations;
pub mod query;
pub mod types;
pub mod update;

pub use bson::{Bson, Document, doc, oid::ObjectId};
pub use client::{MongoClient, MongoClientBuilder};
pub use config::{MongoConfig, MongoConfigBuilder};
pub use engine::{BoxFuture, DocumentEngine, MongoEngine};
pub use error::{MongoError, MongoResult};
pub use filter::FilterBuilder;
pub use model::Model;
pub use operations::{
    FindAndModifyOperation, FindOperation, FluentOperations, PreparedUpdate, RemoveOperation,
    UpdateOperation,
};
pub use query::Query;
pub use types::{CursorOptions, FindAndModifyOptions, RemoveOutcome, UpdateOutcome};
pub use update::Update;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{MongoClient, MongoClientBuilder};
    pub use crate::config::{MongoConfig, MongoConfigBuilder};
    pub use crate::document::DocumentExt;
    pub use crate::engine::{DocumentEngine, MongoEngine};
    pub use crate::error::{MongoError, MongoResult};
    pub use crate::filter::FilterBuilder;
    pub use crate::model::Model;
    pub use crate::operations::FluentOperations;
    pub use crate::query::Query;
    pub use crate::types::{FindAndModifyOptions, RemoveOutcome, UpdateOutcome};
    pub use crate::update::Update;
    pub use bson::{Bson, Document, doc, oid::ObjectId};
}
