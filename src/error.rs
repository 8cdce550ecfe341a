use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the remote call itself, or of an answer that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("no message to send")]
    EmptyMessages,

    #[error("no response")]
    NoResponse,

    #[error("no JSON response")]
    NoJsonResponse
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Timeout, refused connection, DNS and other network level failures.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body does not match the expected shape.
    #[error("decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String
    },

    #[error("invalid configuration: {0}")]
    Config(String)
}

impl Error {

    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// HTTP status attached to the failure, when there is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(ApiError::Status { status, .. }) => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None
        }
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_status_error_message() {

        let err = Error::from(ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "invalid api key".to_string()
        });

        let message = err.to_string();

        assert!(message.contains("401"), "message should carry the status: {}", message);
        assert!(message.contains("invalid api key"), "message should carry the body: {}", message);
        assert!(err.is_api());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    }

    #[test]
    fn test_decode_error_is_not_api() {

        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = Error::Decode { source, body: "\"x\"".to_string() };

        assert!(!err.is_api());
        assert_eq!(err.status(), None);

    }

}
