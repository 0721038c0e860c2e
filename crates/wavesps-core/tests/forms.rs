mod common;

use common::TestServer;
use std::time::Duration;

use wavesps_core::forms::{
    ContactRequest, FormClient, FormError, FormOutcome, LoginRequest, SignupRequest,
};

fn client(server: &TestServer) -> FormClient {
    FormClient::new(
        reqwest::Client::new(),
        server.base_url.clone(),
        Duration::from_secs(2),
    )
}

#[tokio::test]
async fn test_login_success_carries_redirect() {
    let server = TestServer::start(
        200,
        r#"{"message": "Login Successful!", "status": "success", "redirect": "/indexing"}"#,
    )
    .await;

    let outcome = client(&server)
        .login(&LoginRequest {
            email: "ops@city.gov".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        FormOutcome::Accepted {
            message: "Login Successful!".to_string(),
            redirect: Some("/indexing".to_string()),
        }
    );

    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/login");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["email"], "ops@city.gov");
    assert_eq!(body["password"], "hunter2");
}

#[tokio::test]
async fn test_signup_rejection_is_not_an_error() {
    let server = TestServer::start(
        200,
        r#"{"message": "Email already exists!", "status": "error"}"#,
    )
    .await;

    let outcome = client(&server)
        .signup(&SignupRequest {
            name: "Ravi".to_string(),
            email: "ravi@city.gov".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        FormOutcome::Rejected {
            message: "Email already exists!".to_string()
        }
    );
    assert_eq!(server.requests()[0].path, "/api/signup");
}

#[tokio::test]
async fn test_contact_server_error_is_surfaced() {
    let server = TestServer::start(500, "").await;

    let result = client(&server)
        .contact(&ContactRequest {
            name: "Ravi".to_string(),
            email: "ravi@city.gov".to_string(),
            message: "Signal stuck on red".to_string(),
        })
        .await;

    assert!(matches!(result, Err(FormError::Status(500))));
}

#[tokio::test]
async fn test_contact_garbage_reply_is_decode_error() {
    let server = TestServer::start(200, "<html>ok</html>").await;

    let result = client(&server)
        .contact(&ContactRequest {
            name: "Ravi".to_string(),
            email: "ravi@city.gov".to_string(),
            message: "hello".to_string(),
        })
        .await;

    assert!(matches!(result, Err(FormError::Decode(_))));
}
