//! Per-request flow: verify the signature, parse the body, ask the decision
//! engine for a message, and deliver it once.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::matrix::MessageSender;
use crate::notify;
use crate::signature::verify_signature;

/// Terminal outcome of one webhook request. None of these crash the process;
/// the HTTP layer maps each to a status code.
#[derive(Debug)]
pub enum Outcome {
    /// Signature absent or mismatched; the body was never parsed.
    Unauthorized,
    /// Body was not valid JSON.
    BadPayload,
    /// Valid request that the decision engine chose not to announce.
    NoMessage,
    Delivered,
    /// The chat collaborator rejected the send; not retried.
    DeliveryFailed(String),
}

pub async fn handle_webhook(
    config: &AppConfig,
    sender: &dyn MessageSender,
    raw_body: &[u8],
    signature_header: Option<&str>,
) -> Outcome {
    if !verify_signature(&config.webhook_secret, raw_body, signature_header) {
        warn!("Rejected webhook with missing or invalid signature");
        return Outcome::Unauthorized;
    }

    let payload: Value = match serde_json::from_slice(raw_body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Invalid JSON from Plane: {}", e);
            return Outcome::BadPayload;
        }
    };
    debug!(payload = %payload, "Accepted Plane webhook");

    let event_type = payload.get("event").and_then(Value::as_str);
    let action_type = payload.get("action").and_then(Value::as_str);

    let Some(message) = notify::decide(event_type, action_type, &payload, config) else {
        info!("No message to send");
        return Outcome::NoMessage;
    };

    info!(room_id = %config.room_id, "Sending notification");
    match sender.send_text_message(&config.room_id, &message).await {
        Ok(()) => Outcome::Delivered,
        Err(e) => {
            error!("Failed to send message to room {}: {}", config.room_id, e);
            Outcome::DeliveryFailed(e.to_string())
        }
    }
}
