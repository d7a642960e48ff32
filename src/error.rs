use thiserror::Error;

pub type Result<T> = std::result::Result<T, RequestError>;

/// Everything that stops a request from producing an HTTP response.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    Transport(String),

    #[error("Request timeout after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported protocol: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Transport(transport_message(&err))
    }
}

/// Flatten the source chain so the socket-level cause ends up in the message.
fn transport_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message = format!("{message}: {cause}");
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_duration() {
        let err = RequestError::Timeout { millis: 100 };
        assert_eq!(err.to_string(), "Request timeout after 100ms");
    }

    #[test]
    fn transport_message_is_verbatim() {
        let err = RequestError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }
}
