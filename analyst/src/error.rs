use thiserror::Error;

/// Failure of the model service call itself.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("request to the model service failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status (auth, quota, bad request).
    #[error("model service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// A success status whose body could not be decoded.
    #[error("model service sent an unreadable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Every way an analysis request can fail.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please enter a coin name or symbol to analyze.")]
    EmptyInput,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("The model service returned no text.")]
    EmptyResponse,

    /// The reply could not be reduced to a valid analysis.
    #[error("Failed to parse the model's analysis: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

impl AnalysisError {
    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    /// The unmodified model reply, when the failure happened after one was received.
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
