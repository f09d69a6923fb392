use schemars::{JsonSchema as DeriveJsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::LlmError;

/// Structured-output envelope:
/// `{"type": "json_schema", "json_schema": {"name": ..., "schema": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: FormatType,
    pub json_schema: JsonSchema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    JsonSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    pub name: String,
    /// Passed through untouched; the provider validates it.
    pub schema: Value,
}

/// Wrap a named schema tree into the structured-output envelope.
pub fn wrap_schema(name: impl Into<String>, schema: Value) -> ResponseFormat {
    ResponseFormat {
        r#type: FormatType::JsonSchema,
        json_schema: JsonSchema {
            name: name.into(),
            schema,
        },
    }
}

impl ResponseFormat {
    /// Derive the envelope for `T`, named after its schema title.
    pub fn for_type<T: DeriveJsonSchema>() -> Result<Self, LlmError> {
        let schema = schema_for!(T);
        let schema_value = serde_json::to_value(&schema).map_err(|e| {
            LlmError::InvalidArgument(format!("Failed to build JSON Schema: {e}"))
        })?;

        let schema_name = schema_value
            .get("title")
            .ok_or_else(|| {
                LlmError::InvalidArgument(
                    "Failed to build JSON Schema: Missing schema name".to_string(),
                )
            })?
            .as_str()
            .ok_or_else(|| {
                LlmError::InvalidArgument(
                    "Failed to build JSON Schema: title is not a string".to_string(),
                )
            })?
            .to_owned();

        Ok(wrap_schema(schema_name, schema_value))
    }
}
