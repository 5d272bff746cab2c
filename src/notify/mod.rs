//! Notification decision engine: classifies verified Plane events and
//! composes the Markdown messages worth posting.

pub mod engine;
pub mod links;
pub mod messages;

pub use engine::decide;
