//! Serde/BSON document bridging.

use bson::{Bson, Document, oid::ObjectId};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{MongoError, MongoResult};

/// Convert a value to a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> MongoResult<Document> {
    Ok(bson::to_document(value)?)
}

/// Convert a BSON document to a typed value.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> MongoResult<T> {
    Ok(bson::from_document(doc)?)
}

/// Parse an ObjectId from its hex string form.
pub fn parse_object_id(s: &str) -> MongoResult<ObjectId> {
    Ok(ObjectId::parse_str(s)?)
}

/// Extension trait for BSON documents.
pub trait DocumentExt {
    /// The `_id` field, whatever its BSON representation.
    fn id(&self) -> MongoResult<&Bson>;

    /// The `_id` field as an ObjectId.
    fn object_id(&self) -> MongoResult<ObjectId>;

    /// Convert the document into a typed value.
    fn to_struct<T: DeserializeOwned>(&self) -> MongoResult<T>;
}

impl DocumentExt for Document {
    fn id(&self) -> MongoResult<&Bson> {
        self.get("_id")
            .ok_or_else(|| MongoError::query("document has no _id field"))
    }

    fn object_id(&self) -> MongoResult<ObjectId> {
        self.get_object_id("_id")
            .map_err(|_| MongoError::query("field '_id' is not an ObjectId"))
    }

    fn to_struct<T: DeserializeOwned>(&self) -> MongoResult<T> {
        from_document(self.clone())
    }
}

/// Conversions between BSON and common Rust value types.
pub mod convert {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Convert a UUID to BSON binary.
    pub fn uuid_to_bson(uuid: Uuid) -> Bson {
        Bson::Binary(bson::Binary {
            subtype: bson::spec::BinarySubtype::Uuid,
            bytes: uuid.as_bytes().to_vec(),
        })
    }

    /// Read a UUID back from BSON binary or string form.
    pub fn uuid_from_bson(bson: &Bson) -> MongoResult<Uuid> {
        match bson {
            Bson::Binary(binary) => {
                let bytes: [u8; 16] = binary
                    .bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| MongoError::query("invalid UUID bytes"))?;
                Ok(Uuid::from_bytes(bytes))
            }
            Bson::String(s) => Uuid::parse_str(s)
                .map_err(|e| MongoError::query(format!("invalid UUID string: {}", e))),
            _ => Err(MongoError::query("expected Binary or String for UUID")),
        }
    }

    /// Convert a chrono timestamp to BSON datetime.
    pub fn datetime_to_bson(dt: DateTime<Utc>) -> Bson {
        Bson::DateTime(bson::DateTime::from_chrono(dt))
    }

    /// Read a chrono timestamp back from BSON datetime.
    pub fn datetime_from_bson(bson: &Bson) -> MongoResult<DateTime<Utc>> {
        match bson {
            Bson::DateTime(dt) => Ok(dt.to_chrono()),
            _ => Err(MongoError::query("expected DateTime")),
        }
    }
}
