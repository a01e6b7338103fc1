use crate::agents::AgentRunner;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Tool definition sent to the AI API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON schema for a tool's input (object with typed properties)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: vec![],
        }
    }
}

/// Schema for a single property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    /// Plain string property with a description
    pub fn string(description: impl Into<String>) -> Self {
        PropertySchema {
            schema_type: "string".to_string(),
            description: description.into(),
            default: None,
            items: None,
            enum_values: None,
        }
    }

    /// Check a single argument value against this property's declared type
    fn check(&self, key: &str, value: &Value) -> Result<(), ValidationError> {
        let type_ok = match self.schema_type.as_str() {
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            // Unknown schema types are not enforced
            _ => true,
        };
        if !type_ok {
            return Err(ValidationError(format!(
                "field '{}' must be of type {}",
                key, self.schema_type
            )));
        }

        if let (Some(allowed), Some(s)) = (&self.enum_values, value.as_str()) {
            if !allowed.iter().any(|a| a == s) {
                return Err(ValidationError(format!(
                    "field '{}' must be one of: {}",
                    key,
                    allowed.join(", ")
                )));
            }
        }

        if let (Some(items), Some(arr)) = (&self.items, value.as_array()) {
            for (i, item) in arr.iter().enumerate() {
                items.check(&format!("{}[{}]", key, i), item)?;
            }
        }

        Ok(())
    }
}

/// Tool arguments did not conform to the tool's input schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ToolInputSchema {
    /// Object schema from (name, property) pairs and the list of required names
    pub fn object(properties: Vec<(&str, PropertySchema)>, required: &[&str]) -> Self {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Validate tool arguments against this schema.
    ///
    /// `null` is accepted as an empty object (models often send no arguments
    /// for parameterless tools). Every required key must be present and every
    /// declared property that is present must match its type. Extra keys are
    /// ignored.
    pub fn validate(&self, args: &Value) -> Result<(), ValidationError> {
        let empty = serde_json::Map::new();
        let obj = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => return Err(ValidationError("arguments must be an object".to_string())),
        };

        for key in &self.required {
            match obj.get(key) {
                None | Some(Value::Null) => {
                    return Err(ValidationError(format!("missing required field: {}", key)));
                }
                Some(_) => {}
            }
        }

        for (key, value) in obj {
            if value.is_null() {
                continue;
            }
            if let Some(prop) = self.properties.get(key) {
                prop.check(key, value)?;
            }
        }

        Ok(())
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    /// Text handed back to the model
    pub content: String,
    /// Structured form of the result, when the tool has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        ToolResult {
            success: true,
            content: content.into(),
            metadata: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult {
            success: false,
            content: message.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Per-run context passed to every tool execution
#[derive(Clone, Default)]
pub struct ToolContext {
    /// Runner used by delegating tools to run nested agents
    pub runner: Option<AgentRunner>,
    /// How many agent runs enclose this tool call (0 = top-level agent)
    pub delegation_depth: usize,
}

impl ToolContext {
    pub fn new(runner: AgentRunner, delegation_depth: usize) -> Self {
        ToolContext {
            runner: Some(runner),
            delegation_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_schema() -> ToolInputSchema {
        ToolInputSchema::object(
            vec![("city", PropertySchema::string("The name of the city."))],
            &["city"],
        )
    }

    #[test]
    fn test_validate_accepts_conforming_args() {
        assert!(weather_schema().validate(&json!({"city": "Paris"})).is_ok());
    }

    #[test]
    fn test_validate_missing_required() {
        let err = weather_schema().validate(&json!({})).unwrap_err();
        assert!(err.0.contains("city"));
    }

    #[test]
    fn test_validate_wrong_type() {
        let err = weather_schema().validate(&json!({"city": 42})).unwrap_err();
        assert_eq!(err.to_string(), "field 'city' must be of type string");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let err = weather_schema().validate(&json!(["Paris"])).unwrap_err();
        assert!(err.0.contains("object"));
    }

    #[test]
    fn test_validate_null_is_empty_object() {
        let schema = ToolInputSchema::default();
        assert!(schema.validate(&Value::Null).is_ok());
        assert!(weather_schema().validate(&Value::Null).is_err());
    }

    #[test]
    fn test_validate_ignores_extra_keys() {
        let args = json!({"city": "Oslo", "units": "metric"});
        assert!(weather_schema().validate(&args).is_ok());
    }

    #[test]
    fn test_validate_enum_values() {
        let mut unit = PropertySchema::string("Unit system");
        unit.enum_values = Some(vec!["metric".to_string(), "imperial".to_string()]);
        let schema = ToolInputSchema::object(vec![("unit", unit)], &[]);

        assert!(schema.validate(&json!({"unit": "metric"})).is_ok());
        assert!(schema.validate(&json!({"unit": "kelvin"})).is_err());
    }

    #[test]
    fn test_schema_serializes_as_json_schema() {
        let value = serde_json::to_value(weather_schema()).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["city"]["type"], "string");
        assert_eq!(value["required"], json!(["city"]));
        assert!(value["properties"]["city"].get("enum").is_none());
    }
}
