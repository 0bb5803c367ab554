use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds delivered by every `UserService` operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    System(#[source] TransportError),

    #[error("response is not an HTTP response")]
    NonHttpResponse,

    #[error("unexpected HTTP status {0}")]
    StatusCode(u16),

    #[error("response has no body")]
    NoData,

    /// `body` is the raw payload, lossily decoded as UTF-8.
    #[error("failed to decode response body: {source}")]
    Parsing {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("could not build request URL")]
    UrlCreation,
}

/// Errors raised by a `Transport` before any response is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// The result of one API operation.
pub type Outcome<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ReqresError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("User service was shut down before the request completed")]
    ServiceGone,

    #[error("Failed to write avatar to {path}: {source}")]
    AvatarWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReqresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_message_includes_code() {
        assert_eq!(
            ServiceError::StatusCode(404).to_string(),
            "unexpected HTTP status 404"
        );
    }

    #[test]
    fn service_error_is_transparent_in_app_error() {
        let err = ReqresError::from(ServiceError::NoData);
        assert_eq!(err.to_string(), "response has no body");
    }

    #[test]
    fn system_error_exposes_transport_source() {
        let err = ServiceError::System(TransportError::Timeout);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("request timed out"));
    }
}
