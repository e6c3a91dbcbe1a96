//! UUID encoding shared by stored documents and query filters.

use mongodb::bson::{Binary, Bson, spec::BinarySubtype};
use uuid::Uuid;

/// The BSON value a `uuid::Uuid` field holds once the driver has written it.
///
/// Documents are serialized in non-human-readable mode, so a `Uuid` lands as
/// generic binary. `bson::to_bson` is human-readable and yields a string,
/// which never matches a stored id; build id filters with this instead.
pub fn uuid_to_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}
