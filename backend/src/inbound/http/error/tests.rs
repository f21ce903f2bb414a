//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("response body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_message() {
    let err = Error::not_found("User not found").with_trace_id(TRACE_ID);

    let response = err.error_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body_json(response).await,
        json!({ "status": 404, "message": "User not found" })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let err = Error::internal("connection refused at 10.0.0.7")
        .with_details(json!({ "secret": "x" }));

    let response = err.error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "status": 500, "message": "Internal Server Error" })
    );
}

#[rstest]
#[actix_web::test]
async fn validation_details_stay_out_of_the_body() {
    let err = Error::invalid_request("\"userId\" is required")
        .with_details(json!({ "fields": [{ "field": "userId" }] }));

    let body = body_json(err.error_response()).await;

    assert_eq!(
        body,
        json!({ "status": 400, "message": "\"userId\" is required" })
    );
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_err = actix_web::error::ErrorBadGateway("upstream");
    let err = Error::from(actix_err);
    assert_eq!(err.code(), ErrorCode::InternalError);
}
