use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "AI credits exhausted. Please add credits to continue.";

#[derive(Debug, Error)]
pub enum IdeaForgeError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("Missing authorization header")]
    MissingCredential,
    #[error("Rate limit exceeded. Please try again in a moment.")]
    UpstreamRateLimited,
    #[error("AI credits exhausted. Please add credits to continue.")]
    UpstreamQuotaExhausted,
    #[error("AI gateway error: {status}")]
    Upstream { status: u16, message: String },
    #[error("No structured response from AI: {0}")]
    MalformedResponse(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl IdeaForgeError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredential => 401,
            Self::UpstreamRateLimited => 429,
            Self::UpstreamQuotaExhausted => 402,
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }

    /// Message placed in the `error` field of an HTTP error body.
    pub fn public_message(&self) -> String {
        self.to_string()
    }

    /// Rebuilds an error from a service endpoint's status code and `error` field.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::MissingCredential,
            429 => Self::UpstreamRateLimited,
            402 => Self::UpstreamQuotaExhausted,
            400 => Self::InvalidInput(message),
            _ => Self::Upstream { status, message },
        }
    }
}

pub use crate::Result;
