use bunner_cors_policy::{CorsDecision, HeaderCollection, PreflightResponse, RequestState};

use super::headers::{header_value, vary_values};

pub fn assert_continue(decision: CorsDecision) -> RequestState {
    match decision {
        CorsDecision::Continue(state) => state,
        other => panic!("expected continue decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (PreflightResponse, RequestState) {
    match decision {
        CorsDecision::Preflight { response, state } => (response, state),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_header_eq(headers: &HeaderCollection, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_header_absent(headers: &HeaderCollection, name: &str) {
    assert!(
        header_value(headers, name).is_none(),
        "expected {name} to be absent, got {:?}",
        header_value(headers, name)
    );
}

pub fn assert_vary_eq<I, S>(headers: &HeaderCollection, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
}
