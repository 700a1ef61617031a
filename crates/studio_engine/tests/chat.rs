use std::time::Duration;

use serde_json::json;
use studio_core::{ChatMessage, ChatReply, GREETING, NO_RESPONSE};
use studio_engine::{chat_reply, ApiError, ApiSettings, ChatClient, ReqwestChatClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> ReqwestChatClient {
    ReqwestChatClient::new(ApiSettings {
        base_url: base.to_string(),
        request_timeout: Duration::from_secs(2),
    })
    .expect("client")
}

fn conversation() -> Vec<ChatMessage> {
    vec![ChatMessage::assistant(GREETING), ChatMessage::user("hello")]
}

#[tokio::test]
async fn posts_session_and_messages_and_reads_output() {
    studio_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "sessionId": "default",
            "messages": [
                {"role": "assistant", "text": GREETING},
                {"role": "user", "text": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output": "hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server.uri())
        .send("default", &conversation())
        .await
        .expect("reply");
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn nested_raw_text_and_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"raw": {"text": "nested"}})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    assert_eq!(client.send("s", &conversation()).await.unwrap(), "nested");
    assert_eq!(client.send("s", &conversation()).await.unwrap(), NO_RESPONSE);
}

#[tokio::test]
async fn non_ok_status_becomes_server_error_reply() {
    studio_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client_for(&server.uri()).send("default", &conversation()).await;
    assert_eq!(
        result.clone().unwrap_err(),
        ApiError::Status {
            code: 502,
            message: Some("bad gateway".into())
        }
    );
    assert_eq!(chat_reply(result), ChatReply::ServerError);
}

#[tokio::test]
async fn unreachable_server_becomes_unreachable_reply() {
    let result = client_for("http://127.0.0.1:9").send("default", &conversation()).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
    assert_eq!(chat_reply(result), ChatReply::Unreachable);
}
