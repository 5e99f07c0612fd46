//! Regression coverage for this module.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::Error;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("pool exhausted while crediting player")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no identity"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, header, payload) = response_payload(internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::unauthorized("player identity required")
        .with_details(json!({"redirect": "/setup"}));

    let (status, header, payload) = response_payload(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(header.is_none());
    assert_eq!(payload.message(), "player identity required");
    assert_eq!(payload.details(), Some(&json!({"redirect": "/setup"})));
}

#[rstest]
#[actix_web::test]
async fn outages_keep_their_message() {
    let error = Error::service_unavailable("player store unreachable").with_trace_id(TRACE_ID);

    let (status, header, payload) = response_payload(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "player store unreachable");
}
