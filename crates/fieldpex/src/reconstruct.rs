//! Rebuilding typed values from filtered ones.
//!
//! Reconstruction decodes the output of [`Extract::clean_json`]: the value's
//! JSON form with every field the role may not access replaced by its type's
//! zero value. That JSON is laid over the JSON form of `T::default()` and
//! decoded into a fresh `T`. Zeroing happens inside the walk, so a denied
//! field in a record held by an `Option`, a `Vec`, or a map decodes the same
//! way as one at the top level, with no `#[serde(default)]` needed. The
//! default only supplies keys the field table does not list.
//!
//! Keys are matched through serde, so a record's field table and its serde
//! attributes must agree: a field tagged `rename("label")` should carry
//! `#[serde(rename = "label")]`, and an embedded field `#[serde(flatten)]`.
//!
//! [`Extract::clean_json`]: crate::Extract::clean_json

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Decodes `cleaned` into a new `T`, defaulting every key it lacks.
pub fn rebuild<T>(cleaned: serde_json::Value) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut base = serde_json::to_value(T::default()).map_err(Error::rebuild::<T>)?;
    merge_json(&mut base, cleaned);
    serde_json::from_value(base).map_err(Error::rebuild::<T>)
}

/// Deep-merges `overlay` into `base`. Objects merge per key; anything else
/// replaces.
fn merge_json(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::extract::{Context, Extract};
    use crate::field::{Field, FieldSpec, Record};
    use fieldpex_core::{Action, ExportConfig, Role};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Address {
        street: String,
        zip: String,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
        address: Address,
    }

    #[test]
    fn test_merge_objects_per_key() {
        let mut base = json!({"a": 1, "nested": {"x": 1, "y": 2}});
        merge_json(&mut base, json!({"nested": {"y": 3}, "b": 2}));
        assert_eq!(base, json!({"a": 1, "b": 2, "nested": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_merge_replaces_non_objects() {
        let mut base = json!({"list": [1, 2, 3]});
        merge_json(&mut base, json!({"list": [9]}));
        assert_eq!(base, json!({"list": [9]}));
    }

    #[test]
    fn test_rebuild_defaults_missing_fields() {
        let person: Person = rebuild(json!({"name": "Ada", "address": {"street": "Main St"}})).unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".to_string(),
                age: 0,
                address: Address {
                    street: "Main St".to_string(),
                    zip: String::new(),
                },
            }
        );
    }

    #[test]
    fn test_rebuild_empty_object_is_default() {
        let person: Person = rebuild(json!({})).unwrap();
        assert_eq!(person, Person::default());
    }

    #[test]
    fn test_rebuild_null_fails() {
        let err = rebuild::<Person>(serde_json::Value::Null).unwrap_err();
        assert!(matches!(err, Error::Rebuild { .. }));
    }

    #[test]
    fn test_rebuild_type_mismatch_fails() {
        assert!(rebuild::<Person>(json!({"age": "forty"})).is_err());
    }

    // A child type with no serde defaults: every key must be present
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Line {
        sku: String,
        cost: u32,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: u32,
        lines: Vec<Line>,
        gift: Option<Line>,
    }

    impl Record for Line {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new(FieldSpec::new("sku"), &self.sku),
                Field::new(FieldSpec::new("cost").permission("03"), &self.cost),
            ]
        }
    }

    impl Record for Order {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new(FieldSpec::new("id"), &self.id),
                Field::new(FieldSpec::new("lines"), &self.lines),
                Field::new(FieldSpec::new("gift"), &self.gift),
            ]
        }
    }

    crate::impl_record_extract!(Line, Order);

    fn line(sku: &str, cost: u32) -> Line {
        Line {
            sku: sku.to_string(),
            cost,
        }
    }

    #[test]
    fn test_clean_json_zeroes_denied_fields_in_nested_records() {
        let order = Order {
            id: 3,
            lines: vec![line("a", 10), line("b", 20)],
            gift: Some(line("c", 5)),
        };
        let role = Role::new(0);
        let export = ExportConfig::default();
        let cleaned = order.clean_json(&Context::new(&role, Action::Read, &export));
        assert_eq!(
            cleaned,
            json!({
                "id": 3,
                "lines": [{"sku": "a", "cost": 0}, {"sku": "b", "cost": 0}],
                "gift": {"sku": "c", "cost": 0},
            })
        );

        let rebuilt: Order = rebuild(cleaned).unwrap();
        assert_eq!(
            rebuilt,
            Order {
                id: 3,
                lines: vec![line("a", 0), line("b", 0)],
                gift: Some(line("c", 0)),
            }
        );
    }

    #[test]
    fn test_zero_json_of_record() {
        let order = Order {
            id: 3,
            lines: vec![line("a", 10)],
            gift: Some(line("c", 5)),
        };
        assert_eq!(order.zero_json(), json!({"id": 0, "lines": [], "gift": null}));
        assert_eq!(line("a", 1).zero_json(), json!({"sku": "", "cost": 0}));
    }
}
