use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

use crate::error::NotifyError;

/// Immutable configuration snapshot, loaded once at startup and shared
/// read-only across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub homeserver_url: String,
    pub access_token: String,
    pub room_id: String,
    pub webhook_secret: String,
    pub workspace_url: String,
    pub send_notification_with_no_assignees: bool,
    pub send_notification_when_actor_is_sole_assignee: bool,
    /// Lower-cased field names eligible for issue-updated notifications.
    /// When empty, every update is suppressed by the field filter.
    pub issue_updated_notification_fields: HashSet<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn load() -> Result<Self, NotifyError> {
        let homeserver_url = env::var("MATRIX_HOMESERVER_URL")
            .unwrap_or_else(|_| "https://matrix.example.org".to_string());

        let access_token = env::var("MATRIX_ACCESS_TOKEN").unwrap_or_default();

        let room_id = env::var("MATRIX_ROOM_ID")
            .unwrap_or_else(|_| "!room:example.org".to_string());

        let webhook_secret = env::var("PLANE_WEBHOOK_SECRET").unwrap_or_default();

        let workspace_url = env::var("PLANE_WORKSPACE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://plane.example.org".to_string());

        let send_notification_with_no_assignees =
            parse_bool_var("SEND_NOTIFICATION_WITH_NO_ASSIGNEES")?;

        let send_notification_when_actor_is_sole_assignee =
            parse_bool_var("SEND_NOTIFICATION_WHEN_ACTOR_IS_SOLE_ASSIGNEE")?;

        let issue_updated_notification_fields = parse_field_list(
            &env::var("ISSUE_UPDATED_NOTIFICATION_FIELDS").unwrap_or_default(),
        );

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| NotifyError::ConfigError(format!("Invalid SERVER_PORT: {}", e)))?;

        Ok(AppConfig {
            homeserver_url,
            access_token,
            room_id,
            webhook_secret,
            workspace_url,
            send_notification_with_no_assignees,
            send_notification_when_actor_is_sole_assignee,
            issue_updated_notification_fields,
            server_host,
            server_port,
        })
    }
}

fn parse_bool_var(name: &str) -> Result<bool, NotifyError> {
    match env::var(name) {
        Err(_) => Ok(false),
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(NotifyError::ConfigError(format!(
                "Invalid boolean for {}: {}",
                name, other
            ))),
        },
    }
}

/// Parses a comma-separated field list into a lower-cased set.
fn parse_field_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|field| field.trim().to_lowercase())
        .filter(|field| !field.is_empty())
        .collect()
}
