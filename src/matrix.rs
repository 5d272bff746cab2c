//! Chat delivery to a Matrix room.
//!
//! The dispatcher only needs "send text message to room", so delivery sits
//! behind the [`MessageSender`] trait; the production implementation talks to
//! the Matrix client-server API over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use uuid::Uuid;

use crate::error::NotifyError;

/// Posts a text message into a room. Called at most once per request.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text_message(&self, room_id: &str, body: &str) -> Result<(), NotifyError>;
}

pub struct MatrixClient {
    homeserver_url: String,
    access_token: String,
    http_client: Client,
}

impl MatrixClient {
    pub fn new(homeserver_url: String, access_token: String) -> Self {
        let homeserver_url = homeserver_url.trim_end_matches('/').to_string();
        Self {
            homeserver_url,
            access_token,
            http_client: Client::new(),
        }
    }
}

#[async_trait]
impl MessageSender for MatrixClient {
    async fn send_text_message(&self, room_id: &str, body: &str) -> Result<(), NotifyError> {
        // Transaction id makes the send idempotent on the homeserver side.
        let txn_id = Uuid::new_v4();
        let url = format!(
            "{}/_matrix/client/v3/rooms/{}/send/m.room.message/{}",
            self.homeserver_url, room_id, txn_id
        );

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "msgtype": "m.text",
                "body": body,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::DeliveryError(format!(
                "Matrix send to {} returned {}",
                room_id,
                response.status()
            )));
        }

        debug!(room_id = %room_id, "Message delivered");
        Ok(())
    }
}
