//! Tolerant access to the untyped Plane webhook payload.
//!
//! Plane's payload shape is not contractually stable field-by-field, so every
//! lookup degrades to "absent" instead of failing the request.

pub mod accessor;
pub mod assignees;

pub use accessor::{activity_str, actor_str, data_str, get_nested, Kind};
pub use assignees::{
    assignee_ids, assignee_names, is_actor_sole_assignee, was_non_actor_sole_assignee_removed,
};
