pub mod config;
pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod notify;
pub mod payload;
pub mod server;
pub mod signature;

pub use error::NotifyError;
