use proptest::prelude::*;
use querybound_core::{check, Party, ProblemConfig, VerdictCode};

fn judge(limit: u64, reference: i64, contestant: i64, n: i64, m: i64) -> querybound_core::Report {
    let problem = ProblemConfig::default().with_max_queries(limit);
    let input = format!("{} {}\n", n, m);
    let contestant = format!("{}\n", contestant);
    let reference = format!("{}\n", reference);
    check(
        &problem,
        input.as_bytes(),
        contestant.as_bytes(),
        reference.as_bytes(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn within_budget_is_accepted(
        limit in 0u64..1_000,
        ref_frac in 0.0f64..=1.0,
        out_frac in 0.0f64..=1.0,
        n in 1i64..1_000_000,
        m in 1i64..1_000_000,
    ) {
        let reference = (limit as f64 * ref_frac) as i64;
        let contestant = (limit as f64 * out_frac) as i64;
        let report = judge(limit, reference, contestant, n, m);

        prop_assert_eq!(report.code, VerdictCode::Ok);
        let message = report.verdict.message();
        let queries = format!("{} queries", contestant);
        let range = format!("[1, {}]", m);
        prop_assert!(message.contains(&queries), "{} lacks {}", message, queries);
        prop_assert!(message.contains(&range), "{} lacks {}", message, range);
    }

    #[test]
    fn reference_over_budget_always_fails(
        limit in 0u64..1_000,
        excess in 1i64..1_000,
        contestant in -10_000i64..10_000,
    ) {
        let report = judge(limit, limit as i64 + excess, contestant, 1, 1000);

        prop_assert_eq!(report.code, VerdictCode::Fail);
        prop_assert_eq!(report.party, Party::Reference);
        let expected = format!("limit is {}", limit);
        prop_assert!(report.verdict.message().ends_with(&expected));
    }

    #[test]
    fn contestant_over_budget_is_wrong_answer(
        limit in 0u64..1_000,
        reference_frac in 0.0f64..=1.0,
        excess in 1i64..1_000,
    ) {
        let reference = (limit as f64 * reference_frac) as i64;
        let contestant = limit as i64 + excess;
        let report = judge(limit, reference, contestant, 1, 1000);

        prop_assert_eq!(report.code, VerdictCode::WrongAnswer);
        let expected = format!("contestant used {} queries, limit is {}", contestant, limit);
        prop_assert_eq!(report.verdict.message(), expected.as_str());
    }

    #[test]
    fn garbage_contestant_trace_is_never_accepted(token in "[a-z?!.]{1,12}") {
        let problem = ProblemConfig::default();
        let report = check(
            &problem,
            "1 1000".as_bytes(),
            token.as_bytes(),
            "20".as_bytes(),
        )
        .unwrap();

        prop_assert_eq!(report.code, VerdictCode::WrongAnswer);
    }

    #[test]
    fn garbage_reference_trace_is_a_setup_fault(token in "[a-z?!.]{1,12}") {
        let problem = ProblemConfig::default();
        let report = check(
            &problem,
            "1 1000".as_bytes(),
            "18".as_bytes(),
            token.as_bytes(),
        )
        .unwrap();

        prop_assert_eq!(report.code, VerdictCode::Fail);
        prop_assert_eq!(report.party, Party::Reference);
    }
}

proptest! {
    #[test]
    fn negative_counts_are_within_budget(
        limit in 0u64..1_000,
        reference in -1_000i64..0,
        contestant in -1_000i64..0,
    ) {
        let report = judge(limit, reference, contestant, 1, 1000);
        prop_assert_eq!(report.code, VerdictCode::Ok);
    }
}

#[test]
fn both_at_limit_are_accepted() {
    let report = judge(25, 25, 25, 1, 1000);
    assert_eq!(report.code, VerdictCode::Ok);
}
