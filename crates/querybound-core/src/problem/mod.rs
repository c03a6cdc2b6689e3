//! Problem configuration.
//!
//! A problem describes the query budget, the input fields echoed on the
//! accept path and the accept message. Documents are YAML or JSON and are
//! validated against `schema/problem.schema.json` before use.

mod parser;
mod schema;

pub use parser::{InputField, ProblemConfig, ProblemError, DEFAULT_MAX_QUERIES};
pub use schema::validate_problem_schema;
