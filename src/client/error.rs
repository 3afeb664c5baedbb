use std::error::Error as _;
use thiserror::Error;

/// Failures of one activation, from input validation through decoding.
///
/// `Validation` is recovered locally with a prompt; every other variant is
/// rendered as `Error: <message>` and logged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("city name required")]
    Validation,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display stops at the outermost layer ("error sending
        // request for url ..."); walk the source chain so the cause shows.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport(message)
    }
}
