#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert that a response is a gate failure in the documented wire shape:
/// the expected status, a body of exactly `{ "success": false, "message" }`,
/// a message containing `fragment` (case-insensitive), and an `x-trace-id`
/// header.
pub async fn assert_gate_failure<B>(resp: ServiceResponse<B>, expected_status: u16, fragment: &str)
where
    B: MessageBody,
{
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    assert!(
        headers.get("x-trace-id").is_some(),
        "x-trace-id header missing"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], Value::Bool(false));

    let message = body["message"].as_str().expect("message should be a string");
    assert!(
        message.to_lowercase().contains(&fragment.to_lowercase()),
        "message {message:?} should contain {fragment:?}"
    );

    // Nothing beyond the documented envelope leaks.
    assert_eq!(body.as_object().expect("body should be an object").len(), 2);
}
