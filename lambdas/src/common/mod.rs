use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod errors;
pub mod utils;

use crate::common::errors::ValidationError;

pub const TABLE_NAME_ENV: &str = "TABLE_NAME";
pub const TABLE_NAME_DEFAULT: &str = "";

pub const ID_ATTRIBUTE: &str = "id";
pub const TASK_ATTRIBUTE: &str = "task";
pub const IS_COMPLETED_ATTRIBUTE: &str = "isCompleted";

/// Name of the backing table, read once per cold start.
pub fn table_name_from_env() -> String {
    std::env::var(TABLE_NAME_ENV).unwrap_or(TABLE_NAME_DEFAULT.into())
}

/// Raw create payload. Fields are captured untyped so that a wrong type is
/// reported as a validation failure instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, rename = "isCompleted")]
    pub is_completed: Option<Value>,
}

/// A validated todo, in the shape it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub task: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl TryFrom<CreateTodoRequest> for TodoItem {
    type Error = ValidationError;

    fn try_from(request: CreateTodoRequest) -> Result<Self, Self::Error> {
        let id = non_empty_string(request.id);
        let task = non_empty_string(request.description);
        let is_completed = match request.is_completed {
            Some(Value::Bool(val)) => Some(val),
            _ => None,
        };

        match (id, task, is_completed) {
            (Some(id), Some(task), Some(is_completed)) => Ok(TodoItem {
                id,
                task,
                is_completed,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(val)) if !val.is_empty() => Some(val),
        _ => None,
    }
}

impl From<TodoItem> for HashMap<String, AttributeValue> {
    fn from(item: TodoItem) -> Self {
        HashMap::from([
            (ID_ATTRIBUTE.to_string(), AttributeValue::S(item.id)),
            (TASK_ATTRIBUTE.to_string(), AttributeValue::S(item.task)),
            (
                IS_COMPLETED_ATTRIBUTE.to_string(),
                AttributeValue::Bool(item.is_completed),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateTodoRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn valid_request_maps_description_to_task() {
        let item = TodoItem::try_from(request(json!({
            "id": "1",
            "description": "buy milk",
            "isCompleted": false
        })))
        .unwrap();

        assert_eq!(
            item,
            TodoItem {
                id: "1".into(),
                task: "buy milk".into(),
                is_completed: false,
            }
        );
    }

    #[test]
    fn empty_request_is_rejected() {
        assert!(TodoItem::try_from(CreateTodoRequest::default()).is_err());
    }

    #[test]
    fn string_boolean_is_rejected() {
        let result = TodoItem::try_from(request(json!({
            "id": "1",
            "description": "buy milk",
            "isCompleted": "true"
        })));

        assert!(matches!(result, Err(ValidationError::MissingFields)));
    }

    #[test]
    fn empty_strings_and_nulls_count_as_missing() {
        for body in [
            json!({"id": "", "description": "a", "isCompleted": true}),
            json!({"id": "1", "description": "", "isCompleted": true}),
            json!({"id": null, "description": "a", "isCompleted": true}),
            json!({"id": 7, "description": "a", "isCompleted": true}),
            json!({"id": "1", "description": "a", "isCompleted": null}),
        ] {
            assert!(TodoItem::try_from(request(body)).is_err());
        }
    }

    #[test]
    fn item_converts_to_attribute_map() {
        let attributes: HashMap<String, AttributeValue> = TodoItem {
            id: "42".into(),
            task: "write tests".into(),
            is_completed: true,
        }
        .into();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes["id"], AttributeValue::S("42".into()));
        assert_eq!(attributes["task"], AttributeValue::S("write tests".into()));
        assert_eq!(attributes["isCompleted"], AttributeValue::Bool(true));
    }
}
