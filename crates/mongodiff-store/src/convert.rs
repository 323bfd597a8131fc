//! BSON ↔ core model conversion

use bson::oid::ObjectId;
use bson::{Bson, Document};
use mongodiff_core::errors::{DiffError, Result};
use mongodiff_core::Identifier;
use serde_json::Value;

/// Human name of a BSON value's type, as used in error messages
pub fn bson_type_name(value: &Bson) -> String {
    let name = format!("{:?}", value.element_type());
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => name,
    }
}

/// Model an `_id` value
///
/// # Errors
///
/// `UnsupportedIdentifier` for anything but an ObjectId or a string.
pub fn identifier_from_bson(collection: &str, value: &Bson) -> Result<Identifier> {
    match value {
        Bson::ObjectId(oid) => Ok(Identifier::ObjectId(oid.bytes())),
        Bson::String(s) => Ok(Identifier::String(s.clone())),
        other => Err(DiffError::UnsupportedIdentifier {
            collection: collection.to_string(),
            type_name: bson_type_name(other),
        }
        .into()),
    }
}

/// Extract and model the `_id` of a (projected) document
///
/// # Errors
///
/// `MissingIdentifier` when the document has no `_id`, otherwise as
/// [`identifier_from_bson`].
pub fn identifier_from_document(collection: &str, document: &Document) -> Result<Identifier> {
    let value = document
        .get("_id")
        .ok_or_else(|| DiffError::MissingIdentifier {
            collection: collection.to_string(),
        })?;
    identifier_from_bson(collection, value)
}

/// BSON value used to look an identifier up again
pub fn identifier_to_bson(id: &Identifier) -> Bson {
    match id {
        Identifier::ObjectId(bytes) => Bson::ObjectId(ObjectId::from_bytes(*bytes)),
        Identifier::String(s) => Bson::String(s.clone()),
    }
}

/// Relaxed extended JSON, the format `mongoimport` reads
pub fn document_to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use mongodiff_core::ExErrorKind;

    const HEX: &str = "501ca04b668d67b3d6489f3a";

    #[test]
    fn test_object_id_and_string_are_supported() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        let id = identifier_from_bson("users", &Bson::ObjectId(oid)).unwrap();
        assert_eq!(id, Identifier::object_id_from_hex(HEX).unwrap());
        assert_eq!(identifier_to_bson(&id), Bson::ObjectId(oid));

        let id = identifier_from_bson("users", &Bson::String("abc".into())).unwrap();
        assert_eq!(id, Identifier::from("abc"));
        assert_eq!(identifier_to_bson(&id), Bson::String("abc".into()));
    }

    #[test]
    fn test_other_types_are_unsupported() {
        for value in [Bson::Int32(7), Bson::Double(1.5), Bson::Document(doc! {"a": 1})] {
            let err = identifier_from_bson("users", &value).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::UnsupportedIdentifier);
            assert_eq!(err.collection(), Some("users"));
        }
        let err = identifier_from_bson("users", &Bson::Int64(1)).unwrap_err();
        assert!(err.message().contains("int64"), "{}", err.message());
    }

    #[test]
    fn test_missing_id() {
        let err = identifier_from_document("users", &doc! {"name": "x"}).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MissingIdentifier);
    }

    #[test]
    fn test_document_to_json_is_relaxed_extended_json() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        let json = document_to_json(doc! {"_id": oid, "n": 5_i32, "big": 5_i64});
        assert_eq!(json["_id"], serde_json::json!({"$oid": HEX}));
        assert_eq!(json["n"], 5);
        assert_eq!(json["big"], 5);
    }
}
