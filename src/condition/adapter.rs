//! Loose JSON shape adapter
//!
//! Callers describe conditions as plain JSON:
//!
//! ```json
//! {"logic": "OR", "conditions": [
//!     {"name": "user2", "like": true},
//!     {"id": "5", "type": "number", "required": true}
//! ]}
//! ```
//!
//! A leaf is an object with exactly one key that is not a modifier
//! (`type`, `required`, `like`). A branch is an object carrying a
//! `conditions` array. A bare array is an AND branch.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::errors::{ConditionError, ConditionResult};
use super::types::{Condition, ConditionItem, ConditionNode, FieldType, Logic, MODIFIER_KEYS};

impl Condition {
    /// Converts the loose JSON shape into a condition tree
    pub fn from_json(value: &Value) -> ConditionResult<Self> {
        match value {
            Value::Array(items) => Ok(Condition::Branch(ConditionNode {
                logic: Logic::And,
                conditions: parse_children(items)?,
            })),
            Value::Object(map) if map.contains_key("conditions") => parse_branch(map),
            Value::Object(map) => parse_leaf(map).map(Condition::Leaf),
            other => Err(ConditionError::invalid_shape(format!(
                "expected object or array, found {other}"
            ))),
        }
    }

    /// Renders the tree back into the loose JSON shape
    pub fn to_json(&self) -> Value {
        match self {
            Condition::Leaf(item) => {
                let mut map = Map::new();
                map.insert(
                    item.field.clone(),
                    item.value.clone().unwrap_or_else(|| Value::String(String::new())),
                );
                if let Some(ty) = item.field_type {
                    map.insert("type".into(), Value::String(ty.type_name().into()));
                }
                if item.required {
                    map.insert("required".into(), Value::Bool(true));
                }
                if item.like {
                    map.insert("like".into(), Value::Bool(true));
                }
                Value::Object(map)
            }
            Condition::Branch(node) => {
                let mut map = Map::new();
                map.insert("logic".into(), Value::String(node.logic.as_str().into()));
                map.insert(
                    "conditions".into(),
                    Value::Array(node.conditions.iter().map(Condition::to_json).collect()),
                );
                Value::Object(map)
            }
        }
    }
}

impl TryFrom<&Value> for Condition {
    type Error = ConditionError;

    fn try_from(value: &Value) -> ConditionResult<Self> {
        Condition::from_json(value)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Condition::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn parse_children(items: &[Value]) -> ConditionResult<Vec<Condition>> {
    items.iter().map(Condition::from_json).collect()
}

fn parse_branch(map: &Map<String, Value>) -> ConditionResult<Condition> {
    let logic = match map.get("logic") {
        None | Some(Value::Null) => Logic::And,
        Some(Value::String(s)) if s.eq_ignore_ascii_case("and") => Logic::And,
        Some(Value::String(s)) if s.eq_ignore_ascii_case("or") => Logic::Or,
        Some(other) => {
            return Err(ConditionError::invalid_shape(format!(
                "unknown logic {other}"
            )))
        }
    };

    let children = match map.get("conditions") {
        Some(Value::Array(items)) => parse_children(items)?,
        _ => {
            return Err(ConditionError::invalid_shape(
                "'conditions' must be an array",
            ))
        }
    };

    Ok(Condition::Branch(ConditionNode {
        logic,
        conditions: children,
    }))
}

fn parse_leaf(map: &Map<String, Value>) -> ConditionResult<ConditionItem> {
    let mut fields = map
        .iter()
        .filter(|(k, _)| !MODIFIER_KEYS.contains(&k.as_str()));

    let (field, value) = fields
        .next()
        .ok_or_else(|| ConditionError::invalid_shape("leaf has no field key"))?;

    if let Some((extra, _)) = fields.next() {
        return Err(ConditionError::invalid_shape(format!(
            "leaf has more than one field key ('{field}', '{extra}')"
        )));
    }

    let field_type = match map.get("type") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(FieldType::from_name(name).ok_or_else(|| {
            ConditionError::invalid_shape(format!("unknown type '{name}'"))
        })?),
        Some(other) => {
            return Err(ConditionError::invalid_shape(format!(
                "'type' must be a string, found {other}"
            )))
        }
    };

    Ok(ConditionItem {
        field: field.clone(),
        value: Some(value.clone()),
        field_type,
        required: parse_flag(map, "required")?,
        like: parse_flag(map, "like")?,
    })
}

fn parse_flag(map: &Map<String, Value>, key: &str) -> ConditionResult<bool> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ConditionError::invalid_shape(format!(
            "'{key}' must be a boolean, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_leaf_with_modifiers() {
        let cond = Condition::from_json(&json!({"id": "5", "type": "number", "required": true}))
            .unwrap();
        assert_eq!(
            cond,
            Condition::Leaf(
                ConditionItem::eq("id", json!("5"))
                    .typed(FieldType::Number)
                    .required()
            )
        );
    }

    #[test]
    fn test_parse_branch() {
        let cond = Condition::from_json(&json!({
            "logic": "or",
            "conditions": [{"name": "a"}, {"conditions": []}]
        }))
        .unwrap();

        match cond {
            Condition::Branch(node) => {
                assert_eq!(node.logic, Logic::Or);
                assert_eq!(node.conditions.len(), 2);
                assert_eq!(
                    node.conditions[1],
                    Condition::Branch(ConditionNode::default())
                );
            }
            Condition::Leaf(_) => panic!("expected branch"),
        }
    }

    #[test]
    fn test_array_is_and_branch() {
        let cond = Condition::from_json(&json!([{"a": 1}, {"b": 2}])).unwrap();
        assert_eq!(
            cond,
            Condition::and(vec![
                ConditionItem::eq("a", json!(1)),
                ConditionItem::eq("b", json!(2)),
            ])
        );
    }

    #[test]
    fn test_leaf_without_field_rejected() {
        let err = Condition::from_json(&json!({"like": true})).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidConditionShape(_)));

        let err = Condition::from_json(&json!({})).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidConditionShape(_)));
    }

    #[test]
    fn test_leaf_with_two_fields_rejected() {
        let err = Condition::from_json(&json!({"a": 1, "b": 2})).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidConditionShape(_)));
    }

    #[test]
    fn test_bad_modifiers_rejected() {
        for bad in [
            json!({"a": 1, "type": "date"}),
            json!({"a": 1, "like": "yes"}),
            json!({"logic": "XOR", "conditions": []}),
            json!({"conditions": {"a": 1}}),
            json!("a"),
        ] {
            assert!(Condition::from_json(&bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_to_json_renders_loose_shape() {
        let source = json!({
            "logic": "OR",
            "conditions": [{"name": "user", "like": true}, {"id": 5, "type": "number"}]
        });
        let cond = Condition::from_json(&source).unwrap();
        assert_eq!(cond.to_json(), source);
    }

    #[test]
    fn test_serde_deserialize() {
        let cond: Condition = serde_json::from_str(r#"{"status": "active"}"#).unwrap();
        assert_eq!(cond, Condition::Leaf(ConditionItem::eq("status", json!("active"))));

        assert!(serde_json::from_str::<Condition>(r#"{"type": "string"}"#).is_err());
    }
}
