use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::error::AppError;

/// One managed user record. The four core attributes are always present;
/// anything else configured in the form table lands in `extra`, so new
/// fields survive the persistence round-trip without a struct change.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String, // PRIMARY IDENTIFIER - immutable once assigned
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Builds a record from submitted form values under a freshly assigned id.
    /// An "id" key in the values is ignored: the id is never caller-supplied.
    pub fn from_attributes(
        id: String,
        attributes: &BTreeMap<String, String>,
    ) -> Result<User, AppError> {
        let mut object = Map::new();
        for (name, value) in attributes {
            if name != "id" {
                object.insert(name.clone(), Value::String(value.clone()));
            }
        }
        object.insert("id".to_string(), Value::String(id));

        serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::Unexpected(format!("failed to build user record: {}", e)))
    }

    /// Shallow merge: keys present in `attributes` overwrite, keys absent are
    /// preserved (including unknown extra attributes). The id never changes.
    pub fn merged_with(&self, attributes: &BTreeMap<String, String>) -> Result<User, AppError> {
        let mut object = match self.to_attributes() {
            Value::Object(object) => object,
            _ => return Err(AppError::Unexpected("user record is not an object".to_string())),
        };
        for (name, value) in attributes {
            if name != "id" {
                object.insert(name.clone(), Value::String(value.clone()));
            }
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::Unexpected(format!("failed to merge user record: {}", e)))
    }

    /// The record as a flat attribute object, core fields and extras alike
    pub fn to_attributes(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("firstName".to_string(), "Ana".to_string()),
            ("lastName".to_string(), "Lee".to_string()),
            ("email".to_string(), "ana@x.com".to_string()),
            ("phone".to_string(), "5551234567".to_string()),
        ])
    }

    #[test]
    fn test_from_attributes_maps_core_fields() {
        let user = User::from_attributes("u1".to_string(), &attributes()).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.last_name, "Lee");
        assert_eq!(user.email, "ana@x.com");
        assert_eq!(user.phone, "5551234567");
        assert!(user.extra.is_empty());
    }

    #[test]
    fn test_from_attributes_ignores_caller_supplied_id() {
        let mut values = attributes();
        values.insert("id".to_string(), "forged".to_string());
        let user = User::from_attributes("u1".to_string(), &values).unwrap();
        assert_eq!(user.id, "u1");
        assert!(!user.extra.contains_key("id"));
    }

    #[test]
    fn test_unknown_attributes_land_in_extra() {
        let mut values = attributes();
        values.insert("department".to_string(), "Support".to_string());
        let user = User::from_attributes("u1".to_string(), &values).unwrap();
        assert_eq!(user.extra["department"], Value::String("Support".to_string()));
    }

    #[test]
    fn test_merge_overwrites_present_and_preserves_absent() {
        let mut values = attributes();
        values.insert("department".to_string(), "Support".to_string());
        let user = User::from_attributes("u1".to_string(), &values).unwrap();

        let patch = BTreeMap::from([("lastName".to_string(), "X".to_string())]);
        let merged = user.merged_with(&patch).unwrap();

        assert_eq!(merged.id, "u1");
        assert_eq!(merged.first_name, "Ana");
        assert_eq!(merged.last_name, "X");
        assert_eq!(merged.extra["department"], Value::String("Support".to_string()));
    }

    #[test]
    fn test_wire_format_round_trip_is_camel_case() {
        let user = User::from_attributes("u1".to_string(), &attributes()).unwrap();
        let raw = serde_json::to_string(&user).unwrap();
        assert!(raw.contains("\"firstName\":\"Ana\""));

        let back: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, user);
    }
}
