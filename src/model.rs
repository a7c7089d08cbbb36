//! Domain model mapping.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A domain type stored in a MongoDB collection.
///
/// The associated collection name is the default target of every operation
/// started for the model; an explicit `in_collection` step on the operation
/// overrides it.
///
/// # Example
///
/// ```rust,ignore
/// use serde::{Deserialize, Serialize};
/// use fluent_mongo::Model;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     #[serde(rename = "_id")]
///     id: String,
///     email: String,
/// }
///
/// impl Model for User {
///     const COLLECTION: &'static str = "users";
/// }
/// ```
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the collection documents of this type live in.
    const COLLECTION: &'static str;

    /// The collection name derived from the model.
    fn collection_name() -> &'static str {
        Self::COLLECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize)]
    struct Starship {
        name: String,
    }

    impl Model for Starship {
        const COLLECTION: &'static str = "starships";
    }

    #[test]
    fn test_collection_name() {
        assert_eq!(Starship::collection_name(), "starships");
    }
}
