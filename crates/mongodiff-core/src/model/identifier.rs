use crate::errors::DiffError;
use serde_json::{json, Value};
use std::fmt;

/// Length in bytes of a database-native object id
pub const OBJECT_ID_LEN: usize = 12;

/// A document's `_id`
///
/// Closed over the two shapes the tool can replay. Equality is the variant's
/// native equality: an object id never equals a string, even one spelling
/// the same hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    /// 12-byte database-native object id
    ObjectId([u8; OBJECT_ID_LEN]),
    /// Arbitrary string key
    String(String),
}

impl Identifier {
    /// Parse the 24 character hex rendering of an object id
    ///
    /// # Errors
    ///
    /// `InvalidObjectIdHex` when the input is not exactly 12 hex-encoded bytes.
    pub fn object_id_from_hex(hex_str: &str) -> Result<Self, DiffError> {
        let invalid = || DiffError::InvalidObjectIdHex {
            value: hex_str.to_string(),
        };
        let bytes = hex::decode(hex_str).map_err(|_| invalid())?;
        let bytes: [u8; OBJECT_ID_LEN] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Identifier::ObjectId(bytes))
    }

    /// Canonical string form: lowercase hex for object ids, the raw string otherwise
    pub fn canonical(&self) -> String {
        match self {
            Identifier::ObjectId(bytes) => hex::encode(bytes),
            Identifier::String(s) => s.clone(),
        }
    }

    /// Shell-literal form used inside generated scripts
    ///
    /// `ObjectId("<hex>")` for object ids, a JSON-quoted string otherwise.
    pub fn literal(&self) -> String {
        match self {
            Identifier::ObjectId(bytes) => format!("ObjectId(\"{}\")", hex::encode(bytes)),
            Identifier::String(s) => Value::String(s.clone()).to_string(),
        }
    }

    /// Extended JSON form as written into import files
    pub fn to_extended_json(&self) -> Value {
        match self {
            Identifier::ObjectId(bytes) => json!({ "$oid": hex::encode(bytes) }),
            Identifier::String(s) => Value::String(s.clone()),
        }
    }

    /// Short type name for reports
    pub fn type_name(&self) -> &'static str {
        match self {
            Identifier::ObjectId(_) => "objectId",
            Identifier::String(_) => "string",
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::String(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::String(value)
    }
}

impl From<[u8; OBJECT_ID_LEN]> for Identifier {
    fn from(value: [u8; OBJECT_ID_LEN]) -> Self {
        Identifier::ObjectId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "501ca04b668d67b3d6489f3a";

    #[test]
    fn test_object_id_hex_round_trip() {
        let id = Identifier::object_id_from_hex(HEX).unwrap();
        assert_eq!(id.canonical(), HEX);
        assert_eq!(Identifier::object_id_from_hex(&id.canonical()).unwrap(), id);
    }

    #[test]
    fn test_uppercase_hex_parses_to_same_bytes() {
        let lower = Identifier::object_id_from_hex(HEX).unwrap();
        let upper = Identifier::object_id_from_hex(&HEX.to_uppercase()).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.canonical(), HEX);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let too_long = format!("{HEX}00");
        for bad in ["", "zz1ca04b668d67b3d6489f3a", "501ca04b", too_long.as_str()] {
            assert_eq!(
                Identifier::object_id_from_hex(bad),
                Err(DiffError::InvalidObjectIdHex {
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_string_renders_unquoted_canonically_and_quoted_as_literal() {
        let id = Identifier::from("foo");
        assert_eq!(id.canonical(), "foo");
        assert_eq!(id.to_string(), "foo");
        assert_eq!(id.literal(), "\"foo\"");
    }

    #[test]
    fn test_string_literal_escapes_quotes() {
        let id = Identifier::from(r#"a"b\c"#);
        assert_eq!(id.literal(), r#""a\"b\\c""#);
    }

    #[test]
    fn test_object_id_literal_and_extended_json() {
        let id = Identifier::object_id_from_hex(HEX).unwrap();
        assert_eq!(id.literal(), format!("ObjectId(\"{HEX}\")"));
        assert_eq!(id.to_extended_json(), json!({ "$oid": HEX }));
        assert_eq!(Identifier::from("x").to_extended_json(), json!("x"));
    }

    #[test]
    fn test_object_id_never_equals_string_with_same_rendering() {
        let oid = Identifier::object_id_from_hex(HEX).unwrap();
        let s = Identifier::from(HEX);
        assert_eq!(oid.canonical(), s.canonical());
        assert_ne!(oid, s);
    }
}
