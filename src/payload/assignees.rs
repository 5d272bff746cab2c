use serde_json::Value;

use super::accessor::{activity_str, actor_str, get_nested, Kind};

/// Display names of all well-formed entries under `data.assignees`.
///
/// Entries without a `display_name` key, or that are not objects, are
/// silently skipped. A missing or non-list root yields an empty list.
pub fn assignee_names(payload: &Value) -> Vec<String> {
    collect_assignee_field(payload, "display_name")
}

/// Ids of all well-formed entries under `data.assignees`.
pub fn assignee_ids(payload: &Value) -> Vec<String> {
    collect_assignee_field(payload, "id")
}

fn collect_assignee_field(payload: &Value, key: &str) -> Vec<String> {
    let entries = match get_nested(payload, &["data", "assignees"], Some(Kind::List)) {
        Some(Value::Array(entries)) => entries,
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| entry.as_object()?.get(key))
        .map(stringify)
        .collect()
}

/// Stringifies a JSON leaf the way it should read in a chat message:
/// strings without quotes, everything else in its JSON form.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True iff the actor id is present and the assignee list contains exactly
/// that one id.
pub fn is_actor_sole_assignee(payload: &Value) -> bool {
    let Some(actor_id) = actor_str(payload, "id") else {
        return false;
    };
    let ids = assignee_ids(payload);
    ids.len() == 1 && ids[0] == actor_id
}

/// True iff this update cleared the assignee list and the previous sole
/// assignee was someone other than the actor.
///
/// Clearing someone else's sole assignment matters to the team, so this
/// predicate forces a notification through even when the "no assignees"
/// suppression is configured.
pub fn was_non_actor_sole_assignee_removed(payload: &Value) -> bool {
    if activity_str(payload, "field") != Some("assignee_ids") {
        return false;
    }

    if !assignee_ids(payload).is_empty() {
        // There are still assignees; nothing was fully cleared.
        return false;
    }

    let previous = match previous_assignee_ids(payload) {
        Some(ids) => ids,
        None => return false,
    };
    if previous.len() != 1 {
        return false;
    }
    let previous_id = &previous[0];

    match actor_str(payload, "id") {
        Some(actor_id) if !actor_id.is_empty() => {
            !previous_id.is_empty() && previous_id != actor_id
        }
        _ => false,
    }
}

/// Parses `activity.old_value` into a list of assignee ids.
///
/// The previous assignee list arrives either as a comma-separated string or
/// as a JSON list; elements are trimmed and empties dropped. Any other shape
/// is treated as unparseable.
fn previous_assignee_ids(payload: &Value) -> Option<Vec<String>> {
    match get_nested(payload, &["activity", "old_value"], None)? {
        Value::String(raw) => Some(split_ids(raw)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(stringify)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
