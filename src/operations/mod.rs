//! Fluent operation chains.
//!
//! Each chain is a sequence of immutable steps consuming `self` and funneling
//! into a single terminal call on the engine:
//! - [`FindOperation`] — find documents, optionally projected into another
//!   result type
//! - [`UpdateOperation`] — apply an update to matching documents, upsert, or
//!   find-and-modify
//! - [`RemoveOperation`] — delete matching documents
//!
//! Chains start from the [`FluentOperations`] entry points, available on every
//! [`DocumentEngine`].

mod find;
mod remove;
mod update;

pub use find::FindOperation;
pub use remove::RemoveOperation;
pub use update::{FindAndModifyOperation, PreparedUpdate, UpdateOperation};

use crate::engine::DocumentEngine;
use crate::model::Model;

/// Entry points for starting fluent operation chains.
///
/// Blanket-implemented for every cloneable [`DocumentEngine`], so the same
/// chains run against the production engine and test doubles alike.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_mongo::prelude::*;
///
/// let lukes = engine
///     .query::<Person>()
///     .find_all_by(FilterBuilder::new().eq("firstname", "luke").into())
///     .await?;
/// ```
pub trait FluentOperations: DocumentEngine + Clone + Sized {
    /// Start a find operation for the given model.
    fn query<M: Model>(&self) -> FindOperation<Self, M> {
        FindOperation::new(self.clone())
    }

    /// Start an update operation for the given model.
    fn update<M: Model>(&self) -> UpdateOperation<Self, M> {
        UpdateOperation::new(self.clone())
    }

    /// Start a remove operation for the given model.
    fn remove<M: Model>(&self) -> RemoveOperation<Self, M> {
        RemoveOperation::new(self.clone())
    }
}

impl<E: DocumentEngine + Clone> FluentOperations for E {}
