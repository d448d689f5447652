//! Declarative input schemas for tools.
//!
//! A [`RequestSchema`] is defined once when a tool is constructed and is
//! used on every call to turn loosely-typed JSON arguments into
//! [`ValidatedArguments`] before any provider request is issued.
//!
//! Validation runs in fixed stages:
//! 1. the arguments must form a JSON object
//! 2. every required field must be present and non-null
//! 3. every present field must match its declared type
//! 4. absent optional fields receive their defaults
//!
//! Range and enum checks are left to the tool itself.

use std::collections::HashSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Semantic type of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Checks `value` against this type, returning the normalized value.
    ///
    /// Integers accept integral floats and numeric strings, saturating at
    /// the `i64` bounds. Numbers accept numeric strings, and booleans accept
    /// `"true"`/`"false"`. Strings are never coerced.
    fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::String, Value::String(_)) => Some(value.clone()),
            (Self::Integer, Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::from(i))
                } else if n.is_u64() {
                    Some(Value::from(i64::MAX))
                } else {
                    n.as_f64().and_then(integral_f64)
                }
            }
            (Self::Integer, Value::String(s)) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(i) => Some(Value::from(i)),
                    Err(_) => s.parse::<u64>().ok().map(|_| Value::from(i64::MAX)),
                }
            }
            (Self::Number, Value::Number(_)) => Some(value.clone()),
            (Self::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(|f| serde_json::Number::from_f64(f).map(Value::Number)),
            (Self::Boolean, Value::Bool(_)) => Some(value.clone()),
            (Self::Boolean, Value::String(s)) => match s.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `as` saturates, so 1e19 becomes i64::MAX.
fn integral_f64(value: f64) -> Option<Value> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(Value::from(value as i64))
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: String,
}

/// Errors raised while defining a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("parameter name cannot be empty")]
    EmptyName,
    #[error("duplicate parameter '{0}'")]
    DuplicateParam(String),
    #[error("default for '{name}' is not a valid {expected}")]
    DefaultTypeMismatch { name: String, expected: ParamType },
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldProblem {
    #[error("arguments must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("missing required field")]
    Missing,
    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: ParamType,
        found: &'static str,
    },
    #[error("{0}")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub problem: FieldProblem,
}

/// Structured rejection of a call's arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid arguments: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("`{}`: {}", issue.field, issue.problem))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, problem: FieldProblem) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                problem,
            }],
        }
    }

    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::single(field, FieldProblem::OutOfRange(reason.into()))
    }

    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }
}

/// The declared parameters of a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSchema {
    params: Vec<ParamSpec>,
}

impl RequestSchema {
    pub fn builder() -> RequestSchemaBuilder {
        RequestSchemaBuilder::default()
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Validates raw call arguments. `null` is treated as an empty object.
    pub fn validate(&self, input: &Value) -> Result<ValidatedArguments, ValidationError> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ValidationError::single(
                    "$",
                    FieldProblem::NotAnObject {
                        found: json_kind(other),
                    },
                ))
            }
        };

        let present = |name: &str| object.get(name).filter(|v| !v.is_null());

        let missing: Vec<FieldIssue> = self
            .params
            .iter()
            .filter(|p| p.required && present(&p.name).is_none())
            .map(|p| FieldIssue {
                field: p.name.clone(),
                problem: FieldProblem::Missing,
            })
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError { issues: missing });
        }

        let mut values = Map::new();
        let mut wrong_type = Vec::new();
        for param in &self.params {
            let Some(raw) = present(&param.name) else {
                continue;
            };
            match param.kind.coerce(raw) {
                Some(value) => {
                    values.insert(param.name.clone(), value);
                }
                None => wrong_type.push(FieldIssue {
                    field: param.name.clone(),
                    problem: FieldProblem::WrongType {
                        expected: param.kind,
                        found: json_kind(raw),
                    },
                }),
            }
        }
        if !wrong_type.is_empty() {
            return Err(ValidationError { issues: wrong_type });
        }

        for param in &self.params {
            if values.contains_key(&param.name) {
                continue;
            }
            if let Some(default) = &param.default {
                values.insert(param.name.clone(), default.clone());
            }
        }

        for key in object.keys() {
            if self.param(key).is_none() {
                tracing::debug!(field = %key, "ignoring undeclared argument");
            }
        }

        Ok(ValidatedArguments { values })
    }

    /// Renders the schema as a JSON-schema object.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".into(), Value::from(param.kind.as_str()));
            prop.insert("description".into(), Value::from(param.description.clone()));
            if let Some(default) = &param.default {
                prop.insert("default".into(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));
        }
        let required: Vec<Value> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| Value::from(p.name.clone()))
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[derive(Debug, Default)]
pub struct RequestSchemaBuilder {
    params: Vec<ParamSpec>,
}

impl RequestSchemaBuilder {
    pub fn required(mut self, name: &str, kind: ParamType, description: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            description: description.to_string(),
        });
        self
    }

    pub fn optional(
        mut self,
        name: &str,
        kind: ParamType,
        default: impl Into<Value>,
        description: &str,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            kind,
            required: false,
            default: Some(default.into()),
            description: description.to_string(),
        });
        self
    }

    pub fn build(self) -> Result<RequestSchema, SchemaError> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if param.name.trim().is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !seen.insert(param.name.as_str()) {
                return Err(SchemaError::DuplicateParam(param.name.clone()));
            }
            if let Some(default) = &param.default {
                // Defaults must already be in normalized form, no coercion.
                let exact = param.kind.coerce(default).as_ref() == Some(default);
                if !exact {
                    return Err(SchemaError::DefaultTypeMismatch {
                        name: param.name.clone(),
                        expected: param.kind,
                    });
                }
            }
        }
        Ok(RequestSchema {
            params: self.params,
        })
    }
}

/// Arguments that passed schema validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArguments {
    values: Map<String, Value>,
}

impl ValidatedArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    /// Deserializes into a tool's own argument struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.values.clone()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn search_like() -> RequestSchema {
        RequestSchema::builder()
            .required("query", ParamType::String, "what to look for")
            .optional("count", ParamType::Integer, 10, "how many")
            .build()
            .expect("valid schema")
    }

    #[test]
    fn defaults_are_applied_to_absent_optional_fields() {
        let args = search_like().validate(&json!({"query": "rust"})).unwrap();
        assert_eq!(args.str("query"), Some("rust"));
        assert_eq!(args.integer("count"), Some(10));
    }

    #[test]
    fn null_optional_field_falls_back_to_default() {
        let args = search_like()
            .validate(&json!({"query": "rust", "count": null}))
            .unwrap();
        assert_eq!(args.integer("count"), Some(10));
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let err = search_like().validate(&json!({"count": 3})).unwrap_err();
        assert_eq!(err.fields(), vec!["query"]);
        assert_eq!(err.issues[0].problem, FieldProblem::Missing);
        assert_eq!(
            err.to_string(),
            "invalid arguments: `query`: missing required field"
        );
    }

    #[test]
    fn presence_is_checked_before_types() {
        // `count` is mistyped too, but only the missing field is reported.
        let err = search_like()
            .validate(&json!({"count": "many"}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["query"]);
    }

    #[test]
    fn wrong_types_are_collected() {
        let schema = RequestSchema::builder()
            .required("a", ParamType::String, "")
            .required("b", ParamType::Boolean, "")
            .build()
            .unwrap();
        let err = schema.validate(&json!({"a": 1, "b": [true]})).unwrap_err();
        assert_eq!(err.fields(), vec!["a", "b"]);
        assert_eq!(
            err.issues[0].problem,
            FieldProblem::WrongType {
                expected: ParamType::String,
                found: "integer"
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid arguments: `a`: expected string, got integer; `b`: expected boolean, got array"
        );
    }

    #[test]
    fn integer_accepts_numeric_strings_and_integral_floats() {
        let schema = search_like();
        let from_str = schema.validate(&json!({"query": "q", "count": " 7 "})).unwrap();
        assert_eq!(from_str.integer("count"), Some(7));
        let from_float = schema.validate(&json!({"query": "q", "count": 5.0})).unwrap();
        assert_eq!(from_float.integer("count"), Some(5));
        let err = schema
            .validate(&json!({"query": "q", "count": 2.5}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["count"]);
    }

    #[test]
    fn oversized_integers_saturate_instead_of_failing() {
        let schema = search_like();
        for count in [
            json!(9_223_372_036_854_775_808u64),
            json!(u64::MAX),
            json!(1e19),
            json!("18446744073709551615"),
        ] {
            let args = schema
                .validate(&json!({"query": "q", "count": count}))
                .unwrap();
            assert_eq!(args.integer("count"), Some(i64::MAX), "{count}");
        }
        let negative = schema
            .validate(&json!({"query": "q", "count": -1e30}))
            .unwrap();
        assert_eq!(negative.integer("count"), Some(i64::MIN));
    }

    #[test]
    fn string_is_never_coerced() {
        let err = search_like().validate(&json!({"query": 42})).unwrap_err();
        assert_eq!(err.fields(), vec!["query"]);
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = search_like().validate(&json!("rust")).unwrap_err();
        assert_eq!(err.fields(), vec!["$"]);
        assert_eq!(
            err.issues[0].problem,
            FieldProblem::NotAnObject { found: "string" }
        );
    }

    #[test]
    fn null_input_counts_as_empty_object() {
        let err = search_like().validate(&Value::Null).unwrap_err();
        assert_eq!(err.fields(), vec!["query"]);

        let no_required = RequestSchema::builder()
            .optional("language", ParamType::String, "en", "")
            .build()
            .unwrap();
        let args = no_required.validate(&Value::Null).unwrap();
        assert_eq!(args.str("language"), Some("en"));
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let args = search_like()
            .validate(&json!({"query": "q", "extra": true}))
            .unwrap();
        assert!(args.get("extra").is_none());
    }

    #[test]
    fn build_rejects_duplicate_names() {
        let err = RequestSchema::builder()
            .required("query", ParamType::String, "")
            .optional("query", ParamType::String, "x", "")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateParam("query".into()));
    }

    #[test]
    fn build_rejects_default_of_wrong_type() {
        let err = RequestSchema::builder()
            .optional("count", ParamType::Integer, "ten", "")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DefaultTypeMismatch {
                name: "count".into(),
                expected: ParamType::Integer
            }
        );
    }

    #[test]
    fn build_rejects_empty_name() {
        let err = RequestSchema::builder()
            .required(" ", ParamType::String, "")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyName);
    }

    #[test]
    fn json_schema_lists_properties_and_required() {
        let schema = search_like().to_json_schema();
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "what to look for"},
                    "count": {"type": "integer", "description": "how many", "default": 10}
                },
                "required": ["query"]
            })
        );
    }

    #[test]
    fn deserialize_into_typed_args() {
        #[derive(serde::Deserialize)]
        struct Args {
            query: String,
            count: i64,
        }
        let args: Args = search_like()
            .validate(&json!({"query": "q", "count": "3"}))
            .unwrap()
            .deserialize()
            .unwrap();
        assert_eq!(args.query, "q");
        assert_eq!(args.count, 3);
    }
}
