use wiremock::matchers::{body_partial_json, header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plane_notify::matrix::{MatrixClient, MessageSender};

#[tokio::test]
async fn sends_text_message_to_room() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(
            r"^/_matrix/client/v3/rooms/!room:example.org/send/m.room.message/[0-9a-f-]+$",
        ))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "msgtype": "m.text",
            "body": "hello room",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "event_id": "$evt:example.org"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MatrixClient::new(mock_server.uri(), "test-token".to_string());
    let result = client
        .send_text_message("!room:example.org", "hello room")
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn non_success_status_is_a_delivery_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errcode": "M_FORBIDDEN"
        })))
        .mount(&mock_server)
        .await;

    let client = MatrixClient::new(mock_server.uri(), "bad-token".to_string());
    let result = client
        .send_text_message("!room:example.org", "hello room")
        .await;

    let err = result.expect_err("send should fail");
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn unreachable_homeserver_is_a_delivery_error() {
    // Nothing listens on this port.
    let client = MatrixClient::new("http://127.0.0.1:9".to_string(), "token".to_string());
    let result = client.send_text_message("!room:example.org", "hello").await;
    assert!(result.is_err());
}
