//! Markdown message templates for the supported Plane events.

use serde_json::Value;

use crate::config::AppConfig;
use crate::notify::links;
use crate::payload::{activity_str, actor_str, assignee_names, data_str};

/// Raw field names renamed for display in update notifications; unmapped
/// fields pass through unchanged.
const FIELD_RENAMES: &[(&str, &str)] = &[("target_date", "due date"), ("name", "title")];

pub fn display_field_name(raw: &str) -> &str {
    FIELD_RENAMES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

pub fn issue_created(payload: &Value, config: &AppConfig) -> String {
    let issue_title = data_str(payload, "name").unwrap_or("Untitled");
    let actor_name = actor_str(payload, "display_name").unwrap_or("Unknown user");
    let priority = data_str(payload, "priority").unwrap_or("None");
    let target_date = data_str(payload, "target_date").unwrap_or("None");

    let names = assignee_names(payload);
    let assignee_display = if names.is_empty() {
        "Unassigned".to_string()
    } else {
        names.join(", ")
    };

    let issue_url = links::issue_url(payload, &config.workspace_url);

    format!(
        "**New task created** by **{actor_name}**\n\n\
         - **Title & Link:** [{issue_title}]({issue_url})\n\
         - **Priority:** {priority}\n\
         - **Due date:** {target_date}\n\
         - **Assignees:** {assignee_display}\n"
    )
}

pub fn issue_updated(payload: &Value, config: &AppConfig) -> String {
    let issue_title = data_str(payload, "name").unwrap_or("Untitled");
    let actor_name = actor_str(payload, "display_name").unwrap_or("Unknown user");

    let raw_field = activity_str(payload, "field").unwrap_or("Unknown field");
    let field_display = display_field_name(raw_field);

    // Old and new values are rendered exactly as given, never reformatted.
    let old_value = activity_str(payload, "old_value").unwrap_or("None");
    let new_value = activity_str(payload, "new_value").unwrap_or("None");

    let issue_url = links::issue_url(payload, &config.workspace_url);

    format!(
        "Task: **[{issue_title}]({issue_url})** — **{field_display}** updated by **{actor_name}**\n\n\
         - **New:** `{new_value}`\n\
         - **Old:** `{old_value}`\n"
    )
}

pub fn issue_comment(payload: &Value, config: &AppConfig) -> String {
    let comment_url = links::comment_url(payload, &config.workspace_url);
    format!("[Comment event]({comment_url})")
}
