//! Deep links into the Plane workspace, embedded verbatim in messages.

use serde_json::Value;

use crate::payload::data_str;

/// `{workspace_url}/projects/{project}/issues/{id}` for issue events.
pub fn issue_url(payload: &Value, workspace_url: &str) -> String {
    let project_id = data_str(payload, "project").unwrap_or("unknown");
    let issue_id = data_str(payload, "id").unwrap_or("unknown");
    format!("{workspace_url}/projects/{project_id}/issues/{issue_id}")
}

/// `{workspace_url}/projects/{project}/issues/{issue}/#comment-{id}` for
/// comment events, where `data.id` is the comment id.
pub fn comment_url(payload: &Value, workspace_url: &str) -> String {
    let project_id = data_str(payload, "project").unwrap_or("unknown");
    let issue_id = data_str(payload, "issue").unwrap_or("unknown");
    let comment_id = data_str(payload, "id").unwrap_or("unknown");
    format!("{workspace_url}/projects/{project_id}/issues/{issue_id}/#comment-{comment_id}")
}
