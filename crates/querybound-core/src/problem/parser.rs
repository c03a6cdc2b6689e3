//! Problem parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_problem_schema;
use crate::message::{placeholders, RESERVED_PLACEHOLDERS};

/// Query budget of the guessing game this checker was first written for.
pub const DEFAULT_MAX_QUERIES: u64 = 25;

const DEFAULT_ACCEPT_MESSAGE: &str = "n = {n}, guessed in {queries} queries, range [1, {m}]";

/// Errors that can occur when loading a problem.
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("Failed to read problem file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Problem does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Problem validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// An integer read from the input stream on the accept path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputField {
    /// Name used in reports and message placeholders
    pub name: String,

    /// Smallest value the generator may produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    /// Largest value the generator may produce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl InputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
        }
    }

    pub fn with_bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether `value` lies within the declared bounds.
    pub fn admits(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

fn default_max_queries() -> u64 {
    DEFAULT_MAX_QUERIES
}

fn default_input_fields() -> Vec<InputField> {
    vec![InputField::new("n"), InputField::new("m")]
}

fn default_accept_message() -> String {
    DEFAULT_ACCEPT_MESSAGE.to_string()
}

/// A bounded-query interactive problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemConfig {
    /// Human-readable name
    pub name: String,

    /// Inclusive query budget for both the contestant and the reference
    #[serde(default = "default_max_queries")]
    pub max_queries: u64,

    /// Input parameters, in stream order
    #[serde(default = "default_input_fields")]
    pub input_fields: Vec<InputField>,

    /// Template for the OK explanation
    #[serde(default = "default_accept_message")]
    pub accept_message: String,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            name: "guess-the-number".to_string(),
            max_queries: DEFAULT_MAX_QUERIES,
            input_fields: default_input_fields(),
            accept_message: default_accept_message(),
        }
    }
}

impl ProblemConfig {
    /// Parse a problem from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProblemError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a problem from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ProblemError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Load a problem file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProblemError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ProblemError> {
        validate_problem_schema(&value).map_err(ProblemError::SchemaError)?;
        let problem: ProblemConfig = serde_json::from_value(value)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Override the query budget.
    pub fn with_max_queries(mut self, max_queries: u64) -> Self {
        self.max_queries = max_queries;
        self
    }

    /// Validate the problem beyond what the schema can express.
    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.name.trim().is_empty() {
            return Err(ProblemError::MissingField("name".to_string()));
        }

        self.validate_fields()?;
        self.validate_accept_message()?;

        Ok(())
    }

    fn validate_fields(&self) -> Result<(), ProblemError> {
        let mut seen = HashSet::new();

        for field in &self.input_fields {
            if RESERVED_PLACEHOLDERS.contains(&field.name.as_str()) {
                return Err(ProblemError::ValidationError(format!(
                    "Input field name is reserved: {}",
                    field.name
                )));
            }

            if !seen.insert(field.name.as_str()) {
                return Err(ProblemError::ValidationError(format!(
                    "Duplicate input field: {}",
                    field.name
                )));
            }

            if let (Some(min), Some(max)) = (field.min, field.max) {
                if min > max {
                    return Err(ProblemError::ValidationError(format!(
                        "Input field {} has min {} greater than max {}",
                        field.name, min, max
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_accept_message(&self) -> Result<(), ProblemError> {
        for name in placeholders(&self.accept_message) {
            let known = RESERVED_PLACEHOLDERS.contains(&name)
                || self.input_fields.iter().any(|f| f.name == name);
            if !known {
                return Err(ProblemError::ValidationError(format!(
                    "accept_message references unknown placeholder: {{{}}}",
                    name
                )));
            }
        }

        Ok(())
    }
}
