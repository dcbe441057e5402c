use mockito::Matcher;
use prepdeck_desktop_app::api_client::{ApiClient, ApiError};

fn authed_client(base_url: String) -> ApiClient {
    let mut client = ApiClient::new(base_url);
    client.set_access_token(Some("token-123".to_string()));
    client
}

#[tokio::test]
async fn start_session_sends_bearer_and_parses_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/session/start")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("role".into(), "SWE Intern".into()),
            Matcher::UrlEncoded("company".into(), "Google".into()),
        ]))
        .match_header("authorization", "Bearer token-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"session_id":"sess-1","questions":["q1","q2","q3"]}"#)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let response = client.start_session("SWE Intern", "Google").await.unwrap();

    assert_eq!(response.session_id, "sess-1");
    assert_eq!(response.questions.len(), 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn login_needs_no_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("email".into(), "dev@example.com".into()),
            Matcher::UrlEncoded("password".into(), "hunter2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"fresh-token"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let response = client.login("dev@example.com", "hunter2").await.unwrap();

    assert_eq!(response.token, "fresh-token");
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_fails_before_sending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/session/sess-1/next")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let result = client.next_question("sess-1").await;

    assert!(matches!(result, Err(ApiError::MissingToken)));
    mock.assert_async().await;
}

#[tokio::test]
async fn backend_error_detail_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/session/gone/next")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Session not found"}"#)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let error = client.next_question("gone").await.unwrap_err();

    match &error {
        ApiError::HttpStatus { status, detail } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(detail.as_deref(), Some("Session not found"));
        }
        other => panic!("unexpected error variant: {:?}", other),
    }
    assert!(error.to_string().contains("Session not found"));
}

#[tokio::test]
async fn unauthorized_is_classified_as_auth_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/session/sess-1/feedback")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Invalid token"}"#)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let error = client.feedback("sess-1").await.unwrap_err();

    assert!(error.is_unauthorized());
    assert!(error.is_auth_error());
}

#[tokio::test]
async fn submit_answer_encodes_query_values() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/session/sess-1/answer")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("question_number".into(), "2".into()),
            Matcher::UrlEncoded(
                "answer".into(),
                "I shipped a project & learned a lot".into(),
            ),
        ]))
        .match_header("authorization", "Bearer token-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Answer saved"}"#)
        .create_async()
        .await;

    let client = authed_client(server.url());
    client
        .submit_answer("sess-1", 2, "I shipped a project & learned a lot")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn verify_returns_the_current_user() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/verify")
        .match_header("authorization", "Bearer token-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Token valid","user":{"id":"user-1","email":"dev@example.com"}}"#)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let response = client.verify().await.unwrap();

    assert_eq!(response.user.email, "dev@example.com");
}
