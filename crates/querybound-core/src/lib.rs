//! # querybound-core
//!
//! Verdict engine for bounded-query interactive problems.
//!
//! A judging harness runs the contestant and a reference solution against an
//! interactor, captures both traces, and hands them to this crate together
//! with the generated input. The checker answers one question: did the
//! contestant solve the instance within the query budget?
//!
//! ## Key Guarantees
//!
//! 1. **Single verdict**: every run ends in exactly one of OK, WRONG_ANSWER or FAIL
//! 2. **Attribution**: WRONG_ANSWER is only ever caused by the contestant's stream
//! 3. **Reference first**: a reference over budget is FAIL, even if the contestant is over budget too
//! 4. **Lazy reads**: the input stream is only touched on the accept path
//!
//! ## Example
//!
//! ```rust,ignore
//! use querybound_core::{check, ProblemConfig, VerdictCode};
//!
//! let problem = ProblemConfig::from_file("problem.yaml")?;
//! let report = check(&problem, input, contestant, reference)?;
//!
//! match report.code {
//!     VerdictCode::Ok => println!("accepted: {}", report.verdict.message()),
//!     VerdictCode::WrongAnswer => println!("rejected: {}", report.verdict.message()),
//!     VerdictCode::Fail => println!("setup broken: {}", report.verdict.message()),
//! }
//! ```

pub mod checker;
pub mod message;
pub mod problem;
pub mod stream;
pub mod types;

// Re-export main types at crate root
pub use checker::{Checker, Streams};
pub use problem::{InputField, ProblemConfig, ProblemError, DEFAULT_MAX_QUERIES};
pub use stream::{StreamError, TokenStream};
pub use types::{Party, Report, StreamSource, Verdict, VerdictCode};

use std::io::BufRead;
use thiserror::Error;

/// Errors that prevent a checker run from starting.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Problem error: {0}")]
    Problem(#[from] ProblemError),
}

/// Judge one run of `problem`.
///
/// This is the main entry point. The problem is validated first; the three
/// readers are then consumed front to back, as far as the verdict requires.
///
/// # Arguments
///
/// * `problem` - Query budget, input layout and accept message
/// * `input` - Instance data produced by the grading system
/// * `contestant` - Trace of the contestant's run
/// * `reference` - Trace of the reference solution's run
pub fn check<I, O, A>(
    problem: &ProblemConfig,
    input: I,
    contestant: O,
    reference: A,
) -> Result<Report, CheckError>
where
    I: BufRead,
    O: BufRead,
    A: BufRead,
{
    problem.validate()?;

    let checker = Checker::new(problem.clone());
    Ok(checker.check(Streams::new(input, contestant, reference)))
}
