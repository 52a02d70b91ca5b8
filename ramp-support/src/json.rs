//! Conversion between support trees and their nested-object JSON form.
//!
//! The persisted shape is
//!
//! ```text
//! { [direction]: true | { [region]: true | { [fiat]: true | { [payment]: true | { [crypto]: true } } } } }
//! ```
//!
//! A leaf node serializes to `true`; a node with children serializes to an
//! object of its children. The object-level functions trust their input; the
//! string-level path in [`ProviderSupportStore`](crate::ProviderSupportStore)
//! runs [`validate_support_object`] first.

use serde_json::{Map, Value};

use crate::error::SupportTreeError;
use crate::key::{DirectionKey, Level, PaymentKey};
use crate::tree::SupportNode;

/// The JSON object form of a support tree.
pub type ProviderSupportObject = Map<String, Value>;

/// Serializes `tree` into its nested-object form.
#[must_use]
pub fn tree_to_object(tree: &SupportNode) -> ProviderSupportObject {
    tree.children()
        .map(|(key, node)| {
            let value = if node.is_leaf() {
                Value::Bool(true)
            } else {
                Value::Object(tree_to_object(node))
            };
            (key.to_owned(), value)
        })
        .collect()
}

/// Merges a nested object into `tree`.
///
/// Every key creates a child; object values recurse and any other value
/// leaves the child as a leaf. Keys are not checked against their level.
pub fn tree_from_object(tree: &mut SupportNode, obj: &ProviderSupportObject) {
    for (key, value) in obj {
        let node = tree.child_mut(key);
        if let Value::Object(nested) = value {
            tree_from_object(node, nested);
        }
    }
}

/// Checks that `value` is a well-formed support object.
///
/// Direction keys must be `buy`, `sell` or a qualifier; payment keys must be a
/// known [`PaymentMethod`](crate::PaymentMethod) or a qualifier. Region, fiat
/// and crypto keys are free-form. Values must be `true` or a nested object,
/// except at the crypto level where only `true` is accepted.
///
/// # Errors
///
/// Returns the first [`SupportTreeError`] found, in document order.
pub fn validate_support_object(value: &Value) -> Result<&ProviderSupportObject, SupportTreeError> {
    let Value::Object(obj) = value else {
        return Err(SupportTreeError::NotAnObject {
            found: json_type(value),
        });
    };
    validate_level(obj, Level::Direction, "")?;
    Ok(obj)
}

fn validate_level(
    obj: &ProviderSupportObject,
    level: Level,
    path: &str,
) -> Result<(), SupportTreeError> {
    for (key, value) in obj {
        validate_key(level, key, path)?;
        let child_path = if path.is_empty() && level == Level::Direction {
            key.clone()
        } else {
            format!("{path}/{key}")
        };

        match (value, level.next()) {
            (Value::Bool(true), _) => {}
            (Value::Object(nested), Some(next)) => validate_level(nested, next, &child_path)?,
            (other, next) => {
                return Err(SupportTreeError::InvalidValue {
                    level,
                    path: child_path,
                    expected: if next.is_some() {
                        "true or an object"
                    } else {
                        "true"
                    },
                    found: json_type(other),
                });
            }
        }
    }
    Ok(())
}

fn validate_key(level: Level, key: &str, path: &str) -> Result<(), SupportTreeError> {
    let valid = match level {
        Level::Direction => key.parse::<DirectionKey>().is_ok(),
        Level::Payment => key.parse::<PaymentKey>().is_ok(),
        Level::Region | Level::Fiat | Level::Crypto => true,
    };
    if valid {
        Ok(())
    } else {
        Err(SupportTreeError::InvalidKey {
            level,
            key: key.to_owned(),
            path: path.to_owned(),
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_roundtrip_keeps_order() {
        let value = json!({
            "sell": { "*": { "iso:CHF": { "sepa": true }, "iso:EUR": { "sepa": true } } },
            "buy": true
        });
        let Value::Object(obj) = &value else {
            unreachable!()
        };

        let mut tree = SupportNode::new();
        tree_from_object(&mut tree, obj);
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, ["sell", "buy"]);
        assert_eq!(Value::Object(tree_to_object(&tree)), value);
    }

    #[test]
    fn test_raw_import_accepts_arbitrary_keys() {
        let value = json!({ "swap": { "*": { "*": { "cash": 7 } } } });
        let Value::Object(obj) = &value else {
            unreachable!()
        };

        let mut tree = SupportNode::new();
        tree_from_object(&mut tree, obj);
        assert_eq!(
            Value::Object(tree_to_object(&tree)),
            json!({ "swap": { "*": { "*": { "cash": true } } } })
        );
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let value = json!({
            "buy": true,
            "*": { "US:CA": { "iso:USD": { "ach": { "ethereum:null": true }, "": true } } }
        });
        assert!(validate_support_object(&value).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_direction() {
        let err = validate_support_object(&json!({ "swap": true })).unwrap_err();
        assert!(matches!(
            err,
            SupportTreeError::InvalidKey { level: Level::Direction, ref key, .. } if key == "swap"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_payment_with_path() {
        let err = validate_support_object(&json!({
            "sell": { "IT": { "iso:EUR": { "cash": true } } }
        }))
        .unwrap_err();
        match err {
            SupportTreeError::InvalidKey { level, key, path } => {
                assert_eq!(level, Level::Payment);
                assert_eq!(key, "cash");
                assert_eq!(path, "sell/IT/iso:EUR");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            validate_support_object(&json!({ "buy": false })),
            Err(SupportTreeError::InvalidValue { level: Level::Direction, .. })
        ));
        assert!(matches!(
            validate_support_object(&json!({ "buy": { "US": [] } })),
            Err(SupportTreeError::InvalidValue { level: Level::Region, .. })
        ));
        // Nothing may nest below the crypto level.
        assert!(matches!(
            validate_support_object(&json!({
                "buy": { "US": { "iso:USD": { "ach": { "bitcoin:null": { "x": true } } } } }
            })),
            Err(SupportTreeError::InvalidValue { level: Level::Crypto, .. })
        ));
        assert!(matches!(
            validate_support_object(&json!([1, 2])),
            Err(SupportTreeError::NotAnObject { found: "an array" })
        ));
    }
}
