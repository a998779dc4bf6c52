//! Capability input schemas
//!
//! Each capability declares its expected input as a list of named primitive
//! parameters. The same declaration produces the JSON Schema advertised to
//! clients and validates inbound arguments before dispatch, naming the
//! offending field on failure.

use serde_json::{json, Map, Value};

use crate::error::ValidationError;
use crate::mcp::types::PromptArgument;

/// Primitive parameter types accepted by capability inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

impl ParamType {
    /// JSON Schema type name
    pub fn type_name(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

/// A single declared parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Wire-level parameter name
    pub name: &'static str,

    /// Expected primitive type
    pub kind: ParamType,

    /// Human-readable description
    pub description: &'static str,

    /// Whether the parameter must be present
    pub required: bool,
}

/// Declared input shape of a capability
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
}

impl InputSchema {
    /// Schema accepting an empty argument object
    pub fn empty() -> Self {
        Self { params: Vec::new() }
    }

    /// Schema with the given parameters
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// JSON Schema advertised in tool listings
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.type_name(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(Value::from(param.name));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    /// Argument descriptors advertised in prompt listings
    pub fn prompt_arguments(&self) -> Vec<PromptArgument> {
        self.params
            .iter()
            .map(|param| PromptArgument {
                name: param.name.to_string(),
                description: Some(param.description.to_string()),
                required: param.required,
            })
            .collect()
    }

    /// Validate inbound arguments against the declared parameters
    ///
    /// Absent arguments are treated as an empty object. Unknown fields are
    /// ignored, matching the upstream protocol's lenient object handling.
    pub fn validate(&self, args: &Value) -> std::result::Result<(), ValidationError> {
        let object = match args {
            Value::Null => None,
            Value::Object(map) => Some(map),
            _ => return Err(ValidationError::NotAnObject),
        };

        for param in &self.params {
            match object.and_then(|map| map.get(param.name)) {
                None | Some(Value::Null) => {
                    if param.required {
                        return Err(ValidationError::MissingField {
                            field: param.name.to_string(),
                        });
                    }
                }
                Some(value) => {
                    if !param.kind.matches(value) {
                        return Err(ValidationError::TypeMismatch {
                            field: param.name.to_string(),
                            expected: param.kind.type_name(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn country_name_schema() -> InputSchema {
        InputSchema::new(vec![ParamSpec {
            name: "countryName",
            kind: ParamType::String,
            description: "The name of the country to get",
            required: true,
        }])
    }

    #[test]
    fn test_empty_schema_accepts_null_and_empty_object() {
        let schema = InputSchema::empty();
        assert!(schema.validate(&Value::Null).is_ok());
        assert!(schema.validate(&json!({})).is_ok());
    }

    #[test]
    fn test_missing_required_field_named() {
        let err = country_name_schema().validate(&json!({})).unwrap_err();
        assert!(err.to_string().contains("countryName"));
    }

    #[test]
    fn test_explicit_null_counts_as_missing() {
        let err = country_name_schema()
            .validate(&json!({"countryName": null}))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ValidationError::MissingField { .. }
        ));
    }

    #[test]
    fn test_type_mismatch_named() {
        let err = country_name_schema()
            .validate(&json!({"countryName": 42}))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("countryName"));
        assert!(message.contains("string"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = country_name_schema().validate(&json!("france")).unwrap_err();
        assert!(matches!(err, crate::error::ValidationError::NotAnObject));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let result = country_name_schema()
            .validate(&json!({"countryName": "france", "extra": true}));
        assert!(result.is_ok());
    }

    #[test]
    fn test_optional_param_may_be_absent() {
        let schema = InputSchema::new(vec![ParamSpec {
            name: "limit",
            kind: ParamType::Number,
            description: "Maximum number of results",
            required: false,
        }]);
        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({"limit": "ten"})).is_err());
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = country_name_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["countryName"]["type"], "string");
        assert_eq!(schema["required"][0], "countryName");
    }

    #[test]
    fn test_empty_schema_has_no_required_list() {
        let schema = InputSchema::empty().to_json_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["type"], "object");
    }
}
