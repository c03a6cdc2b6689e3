//! Checker: turns three token streams into exactly one verdict.
//!
//! Both query counts are read (reference first) before either is checked.
//! The decision order is then fixed:
//! 1. Reference query count over budget → FAIL
//! 2. Contestant query count over budget → WRONG_ANSWER
//! 3. Otherwise read the input parameters → OK
//!
//! A stream that cannot be read is blamed on the party that owns it.
//! Reader failures are always FAIL.

use chrono::Utc;
use std::collections::BTreeMap;
use std::io::BufRead;

use crate::message::render;
use crate::problem::{InputField, ProblemConfig};
use crate::stream::{StreamError, TokenStream};
use crate::types::{Party, Report, StreamSource, Verdict};

/// The three streams of one checker run, already positioned at their start.
pub struct Streams<I, O, A> {
    pub input: TokenStream<I>,
    pub contestant: TokenStream<O>,
    pub reference: TokenStream<A>,
}

impl<I: BufRead, O: BufRead, A: BufRead> Streams<I, O, A> {
    pub fn new(input: I, contestant: O, reference: A) -> Self {
        Self {
            input: TokenStream::new(StreamSource::Input, input),
            contestant: TokenStream::new(StreamSource::ContestantOutput, contestant),
            reference: TokenStream::new(StreamSource::ReferenceOutput, reference),
        }
    }
}

/// Values read so far; carried into the report whatever the verdict.
#[derive(Default)]
struct Observed {
    reference_queries: Option<i64>,
    contestant_queries: Option<i64>,
    parameters: BTreeMap<String, i64>,
}

/// A verdict together with the party it is attributed to.
type Decision = (Verdict, Party);

/// Decides bounded-query interactive runs for one problem.
pub struct Checker {
    problem: ProblemConfig,
}

impl Checker {
    /// Create a checker. The problem is assumed valid; see [`ProblemConfig::validate`].
    pub fn new(problem: ProblemConfig) -> Self {
        Self { problem }
    }

    /// Run the decision procedure over `streams`.
    pub fn check<I, O, A>(&self, mut streams: Streams<I, O, A>) -> Report
    where
        I: BufRead,
        O: BufRead,
        A: BufRead,
    {
        let mut observed = Observed::default();
        let (verdict, party) = self.decide(&mut streams, &mut observed);

        match &verdict {
            Verdict::Fail { message } => {
                tracing::warn!(problem = %self.problem.name, party = %party, "FAIL: {}", message)
            }
            other => {
                tracing::debug!(problem = %self.problem.name, verdict = %other.code(), "verdict reached")
            }
        }

        Report {
            problem: self.problem.name.clone(),
            code: verdict.code(),
            verdict,
            party,
            limit: self.problem.max_queries,
            reference_queries: observed.reference_queries,
            contestant_queries: observed.contestant_queries,
            parameters: observed.parameters,
            checked_at: Utc::now(),
        }
    }

    fn decide<I, O, A>(&self, streams: &mut Streams<I, O, A>, observed: &mut Observed) -> Decision
    where
        I: BufRead,
        O: BufRead,
        A: BufRead,
    {
        let limit = self.problem.max_queries;

        let reference_queries = match streams.reference.read_int("reference query count") {
            Ok(count) => count,
            Err(e) => return stream_failure(e),
        };
        observed.reference_queries = Some(reference_queries);
        tracing::debug!(reference_queries, limit, "read reference query count");

        let contestant_queries = match streams.contestant.read_int("query count") {
            Ok(count) => count,
            Err(e) => return stream_failure(e),
        };
        observed.contestant_queries = Some(contestant_queries);
        tracing::debug!(contestant_queries, limit, "read contestant query count");

        // A reference over budget means the problem setup is broken; that
        // outranks a contestant over budget.
        if over_budget(reference_queries, limit) {
            return (
                Verdict::Fail {
                    message: format!(
                        "reference solution used {} queries, limit is {}",
                        reference_queries, limit
                    ),
                },
                Party::Reference,
            );
        }

        if over_budget(contestant_queries, limit) {
            return (
                Verdict::WrongAnswer {
                    message: format!(
                        "contestant used {} queries, limit is {}",
                        contestant_queries, limit
                    ),
                },
                Party::Contestant,
            );
        }

        for field in &self.problem.input_fields {
            let value = match streams.input.read_int(&field.name) {
                Ok(value) => value,
                Err(e) => return stream_failure(e),
            };
            if !field.admits(value) {
                return (
                    Verdict::Fail {
                        message: format!(
                            "input field {} = {} is outside {}",
                            field.name,
                            value,
                            describe_bounds(field)
                        ),
                    },
                    Party::Grader,
                );
            }
            observed.parameters.insert(field.name.clone(), value);
        }

        let mut values: BTreeMap<String, String> = observed
            .parameters
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        values.insert("queries".to_string(), contestant_queries.to_string());
        values.insert("limit".to_string(), limit.to_string());

        (
            Verdict::Ok {
                message: render(&self.problem.accept_message, &values),
            },
            Party::Contestant,
        )
    }
}

/// Attribute a stream error to whoever owns the stream.
fn stream_failure(error: StreamError) -> Decision {
    let stream = error.stream();
    if error.is_io() {
        let message = format!("unreadable {} stream: {}", stream, error);
        return (Verdict::Fail { message }, Party::Grader);
    }

    let party = stream.owner();
    let message = format!("{} stream ({}): {}", party, stream, error);
    (Verdict::against(party, message), party)
}

/// Counts are compared as signed values; anything below zero is within budget.
fn over_budget(count: i64, limit: u64) -> bool {
    u64::try_from(count).is_ok_and(|count| count > limit)
}

fn describe_bounds(field: &InputField) -> String {
    let min = field.min.map_or_else(|| "-inf".to_string(), |v| v.to_string());
    let max = field.max.map_or_else(|| "+inf".to_string(), |v| v.to_string());
    format!("[{}, {}]", min, max)
}
