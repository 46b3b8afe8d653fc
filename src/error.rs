use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    /// The HTTP call failed or returned a non-success status.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The response was JSON but not the shape we expect.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Sending or deleting a chat message failed.
    #[error("transport error: {0}")]
    Transport(#[from] teloxide::RequestError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Malformed(err.to_string())
    }
}
