//! Routes verified payloads by event/action and applies the suppression
//! rules for issue updates.

use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::notify::messages;
use crate::payload::{
    activity_str, assignee_ids, is_actor_sole_assignee, was_non_actor_sole_assignee_removed,
};

type Handler = fn(&Value, &AppConfig) -> Option<String>;

/// (event, action) pairs with a handler; anything else is logged and dropped.
const HANDLERS: &[(&str, &str, Handler)] = &[
    ("issue", "created", handle_issue_created),
    ("issue", "updated", handle_issue_updated),
    ("issue_comment", "created", handle_issue_comment),
];

/// Decides whether a payload warrants a notification.
///
/// Returns the composed Markdown message, or `None` to suppress. Pure in
/// (payload, config); the payload is never mutated.
pub fn decide(
    event_type: Option<&str>,
    action_type: Option<&str>,
    payload: &Value,
    config: &AppConfig,
) -> Option<String> {
    let handler = HANDLERS
        .iter()
        .find(|(event, action, _)| Some(*event) == event_type && Some(*action) == action_type);

    match handler {
        Some((event, action, handle)) => {
            debug!(event = *event, action = *action, "Dispatching Plane event");
            handle(payload, config)
        }
        None => {
            info!(
                event = event_type.unwrap_or("unknown"),
                action = action_type.unwrap_or("unknown"),
                "Unhandled Plane event"
            );
            None
        }
    }
}

fn handle_issue_created(payload: &Value, config: &AppConfig) -> Option<String> {
    Some(messages::issue_created(payload, config))
}

fn handle_issue_comment(payload: &Value, config: &AppConfig) -> Option<String> {
    Some(messages::issue_comment(payload, config))
}

/// Suppression gates run in order; the first match wins.
fn handle_issue_updated(payload: &Value, config: &AppConfig) -> Option<String> {
    let assignees_empty = assignee_ids(payload).is_empty();

    // 1) Empty assignee list follows the config flag, unless this update
    //    just cleared a non-actor sole assignee, which always notifies.
    if assignees_empty
        && !was_non_actor_sole_assignee_removed(payload)
        && !config.send_notification_with_no_assignees
    {
        info!("Assignee list is empty and no non-actor sole assignee was removed; skipping");
        return None;
    }

    // 2) The actor already knows what they did to their own issue.
    if is_actor_sole_assignee(payload) && !config.send_notification_when_actor_is_sole_assignee {
        info!("Actor is the sole assignee; skipping");
        return None;
    }

    // 3) Field filter.
    let field_changed = activity_str(payload, "field")
        .unwrap_or("")
        .trim()
        .to_lowercase();
    if !config.issue_updated_notification_fields.contains(&field_changed) {
        info!(
            field = %field_changed,
            "Updated field is not in issue_updated_notification_fields; skipping"
        );
        return None;
    }

    Some(messages::issue_updated(payload, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn config_with_fields(fields: &[&str]) -> AppConfig {
        AppConfig {
            homeserver_url: "https://matrix.example.org".to_string(),
            access_token: String::new(),
            room_id: "!room:example.org".to_string(),
            webhook_secret: "secret".to_string(),
            workspace_url: "https://plane.example.org".to_string(),
            send_notification_with_no_assignees: false,
            send_notification_when_actor_is_sole_assignee: false,
            issue_updated_notification_fields: fields
                .iter()
                .map(|f| f.to_string())
                .collect::<HashSet<_>>(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
        }
    }

    fn update_payload() -> Value {
        json!({
            "event": "issue",
            "action": "updated",
            "data": {
                "name": "Fix bug",
                "project": "P1",
                "id": "I1",
                "assignees": [{"id": "user-9", "display_name": "Carol"}]
            },
            "activity": {
                "field": "target_date",
                "old_value": "2024-01-01",
                "new_value": "2024-02-01",
                "actor": {"id": "user-7", "display_name": "Bob"}
            }
        })
    }

    #[test]
    fn unknown_event_is_suppressed() {
        let config = config_with_fields(&["target_date"]);
        assert!(decide(Some("cycle"), Some("created"), &json!({}), &config).is_none());
        assert!(decide(None, None, &json!({}), &config).is_none());
        assert!(decide(Some("issue"), Some("deleted"), &json!({}), &config).is_none());
    }

    #[test]
    fn issue_created_always_notifies() {
        let config = config_with_fields(&[]);
        let payload = json!({"event": "issue", "action": "created", "data": {"assignees": []}});
        assert!(decide(Some("issue"), Some("created"), &payload, &config).is_some());
    }

    #[test]
    fn update_with_matching_field_notifies() {
        let config = config_with_fields(&["target_date"]);
        let message = decide(Some("issue"), Some("updated"), &update_payload(), &config);
        assert!(message.expect("message").contains("**due date** updated by"));
    }

    #[test]
    fn update_with_non_matching_field_is_suppressed() {
        let config = config_with_fields(&["priority"]);
        assert!(decide(Some("issue"), Some("updated"), &update_payload(), &config).is_none());
    }

    #[test]
    fn field_filter_trims_and_lowercases() {
        let config = config_with_fields(&["target_date"]);
        let mut payload = update_payload();
        payload["activity"]["field"] = json!("  Target_Date ");
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_some());
    }

    #[test]
    fn empty_field_set_suppresses_all_updates() {
        let config = config_with_fields(&[]);
        assert!(decide(Some("issue"), Some("updated"), &update_payload(), &config).is_none());
    }

    #[test]
    fn empty_assignees_suppressed_by_default() {
        let config = config_with_fields(&["target_date"]);
        let mut payload = update_payload();
        payload["data"]["assignees"] = json!([]);
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_none());
    }

    #[test]
    fn empty_assignees_allowed_when_configured() {
        let mut config = config_with_fields(&["target_date"]);
        config.send_notification_with_no_assignees = true;
        let mut payload = update_payload();
        payload["data"]["assignees"] = json!([]);
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_some());
    }

    #[test]
    fn sole_assignee_removal_overrides_empty_suppression() {
        // Empty assignees plus the suppression flag off would normally drop
        // the notification; clearing someone else's sole assignment must
        // still get through.
        let config = config_with_fields(&["assignee_ids"]);
        let payload = json!({
            "event": "issue",
            "action": "updated",
            "data": {"name": "Fix bug", "project": "P1", "id": "I1", "assignees": []},
            "activity": {
                "field": "assignee_ids",
                "old_value": "user-42",
                "new_value": "",
                "actor": {"id": "user-7", "display_name": "Bob"}
            }
        });
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_some());
    }

    #[test]
    fn actor_sole_assignee_suppressed_by_default() {
        let config = config_with_fields(&["target_date"]);
        let mut payload = update_payload();
        payload["data"]["assignees"] = json!([{"id": "user-7", "display_name": "Bob"}]);
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_none());
    }

    #[test]
    fn actor_sole_assignee_allowed_when_configured() {
        let mut config = config_with_fields(&["target_date"]);
        config.send_notification_when_actor_is_sole_assignee = true;
        let mut payload = update_payload();
        payload["data"]["assignees"] = json!([{"id": "user-7", "display_name": "Bob"}]);
        assert!(decide(Some("issue"), Some("updated"), &payload, &config).is_some());
    }

    #[test]
    fn issue_comment_created_notifies() {
        let config = config_with_fields(&[]);
        let payload = json!({
            "event": "issue_comment",
            "action": "created",
            "data": {"project": "P1", "issue": "I2", "id": "C3"}
        });
        let message = decide(Some("issue_comment"), Some("created"), &payload, &config);
        assert_eq!(
            message.expect("message"),
            "[Comment event](https://plane.example.org/projects/P1/issues/I2/#comment-C3)"
        );
    }
}
