pub mod application;
pub mod company;
pub mod consultant;
pub mod user;

pub use application::*;
pub use company::*;
pub use consultant::*;
pub use user::*;

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

/// Hex form of a document id, empty when the document was never stored.
pub(crate) fn hex_id(id: &Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

/// RFC 3339 rendering used for every timestamp in API responses.
pub(crate) fn format_datetime(dt: BsonDateTime) -> String {
    dt.try_to_rfc3339_string().unwrap_or_default()
}
