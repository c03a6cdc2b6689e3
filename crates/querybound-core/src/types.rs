//! Core types shared by the checker, the problem configuration and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Who a verdict (or a stream) is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The submission being judged.
    Contestant,

    /// The known-correct model solution.
    Reference,

    /// The grading system itself (generator, harness, checker setup).
    Grader,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Contestant => write!(f, "contestant"),
            Party::Reference => write!(f, "reference solution"),
            Party::Grader => write!(f, "grader"),
        }
    }
}

/// The three streams a checker run consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSource {
    /// Problem instance data produced by the grading system.
    Input,

    /// Trace captured from the contestant's run.
    ContestantOutput,

    /// Trace captured from the reference solution's run.
    ReferenceOutput,
}

impl StreamSource {
    /// The party responsible for the contents of this stream.
    pub fn owner(&self) -> Party {
        match self {
            StreamSource::Input => Party::Grader,
            StreamSource::ContestantOutput => Party::Contestant,
            StreamSource::ReferenceOutput => Party::Reference,
        }
    }
}

impl fmt::Display for StreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSource::Input => write!(f, "input"),
            StreamSource::ContestantOutput => write!(f, "contestant output"),
            StreamSource::ReferenceOutput => write!(f, "reference output"),
        }
    }
}

/// Machine-readable verdict category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictCode {
    Ok,
    WrongAnswer,
    Fail,
}

impl VerdictCode {
    /// Process exit status understood by judging harnesses.
    ///
    /// `2` (presentation error) is never produced.
    pub fn exit_code(&self) -> i32 {
        match self {
            VerdictCode::Ok => 0,
            VerdictCode::WrongAnswer => 1,
            VerdictCode::Fail => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictCode::Ok => "OK",
            VerdictCode::WrongAnswer => "WRONG_ANSWER",
            VerdictCode::Fail => "FAIL",
        }
    }
}

impl fmt::Display for VerdictCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The terminal outcome of a checker run.
///
/// Exactly one is produced per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Instance solved within budget.
    Ok { message: String },

    /// The contestant violated a constraint.
    WrongAnswer { message: String },

    /// The grading setup is inconsistent (reference or input at fault).
    Fail { message: String },
}

impl Verdict {
    pub fn code(&self) -> VerdictCode {
        match self {
            Verdict::Ok { .. } => VerdictCode::Ok,
            Verdict::WrongAnswer { .. } => VerdictCode::WrongAnswer,
            Verdict::Fail { .. } => VerdictCode::Fail,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Verdict::Ok { message }
            | Verdict::WrongAnswer { message }
            | Verdict::Fail { message } => message,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Verdict::Ok { .. })
    }

    /// Verdict for a violation attributed to `party`.
    ///
    /// Only a contestant can earn `WrongAnswer`; everything else is a grading fault.
    pub fn against(party: Party, message: impl Into<String>) -> Self {
        let message = message.into();
        match party {
            Party::Contestant => Verdict::WrongAnswer { message },
            Party::Reference | Party::Grader => Verdict::Fail { message },
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

/// Full result of a checker run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Problem name from the configuration
    pub problem: String,

    /// The final verdict
    pub verdict: Verdict,

    /// Verdict category, duplicated for consumers that only need the code
    pub code: VerdictCode,

    /// Party the verdict is attributed to
    pub party: Party,

    /// Query budget in effect
    pub limit: u64,

    /// Reference query count, if it was read successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_queries: Option<i64>,

    /// Contestant query count, if it was read successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contestant_queries: Option<i64>,

    /// Input parameters read on the accept path
    #[serde(default)]
    pub parameters: BTreeMap<String, i64>,

    /// When the verdict was reached
    pub checked_at: DateTime<Utc>,
}

impl Report {
    /// A FAIL report for a run that could not start, e.g. an unreadable file.
    pub fn grader_fault(problem: impl Into<String>, limit: u64, message: impl Into<String>) -> Self {
        let verdict = Verdict::Fail {
            message: message.into(),
        };
        Self {
            problem: problem.into(),
            code: verdict.code(),
            verdict,
            party: Party::Grader,
            limit,
            reference_queries: None,
            contestant_queries: None,
            parameters: BTreeMap::new(),
            checked_at: Utc::now(),
        }
    }

    /// The harness-facing verdict line, e.g. `OK n = 1, ...`.
    pub fn summary_line(&self) -> String {
        self.verdict.to_string()
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}
