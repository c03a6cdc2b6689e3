//! JSON Schema validation for problem documents.
//!
//! The schema ships inside the binary so a checker never depends on files
//! beyond the three streams and its problem document.

use std::sync::OnceLock;

/// Embedded problem schema (loaded at compile time).
const PROBLEM_SCHEMA_JSON: &str = include_str!("../../../../schema/problem.schema.json");

/// The compiled schema, or the reason it could not be compiled.
static VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn compile() -> Result<jsonschema::Validator, String> {
    let schema: serde_json::Value = serde_json::from_str(PROBLEM_SCHEMA_JSON)
        .map_err(|e| format!("embedded problem schema is not JSON: {}", e))?;
    jsonschema::options()
        .build(&schema)
        .map_err(|e| format!("embedded problem schema does not compile: {}", e))
}

/// Validate a problem document against the schema.
///
/// Returns every violation found, each suffixed with its instance path.
pub fn validate_problem_schema(problem_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = VALIDATOR
        .get_or_init(compile)
        .as_ref()
        .map_err(|e| vec![e.clone()])?;

    let errors: Vec<String> = validator
        .iter_errors(problem_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
