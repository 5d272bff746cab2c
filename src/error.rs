use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Delivery error: {0}")]
    DeliveryError(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::DeliveryError(err.to_string())
    }
}
