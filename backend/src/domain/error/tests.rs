//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn validation_errors_serialise_field_list() {
    let error = Error::validation(vec![
        FieldError::new("title", "A title is required."),
        FieldError::new("steps", "At least one step is required."),
    ]);
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "validation_failed",
            "message": "Validation failed",
            "errors": [
                {"field": "title", "message": "A title is required."},
                {"field": "steps", "message": "At least one step is required."}
            ]
        })
    );
}

#[rstest]
fn allow_list_is_not_serialised() {
    let error = Error::method_not_allowed("Use PUT to edit a course.", &["GET", "PUT"]);
    assert_eq!(error.allow(), ["GET", "PUT"]);
    let value = serde_json::to_value(&error).expect("serialise error");
    assert!(value.get("allow").is_none());
    assert_eq!(value["code"], json!("method_not_allowed"));
}
