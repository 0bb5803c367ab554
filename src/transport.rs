//! HTTP transport seam for the user service.
//!
//! The service builds an `HttpRequest` as plain data and hands it to a
//! `Transport`, which performs the round-trip and returns the raw status and
//! body. Classification and decoding stay in the service, so a fake transport
//! can stand in for the network in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

use crate::error::TransportError;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back from the wire, before any interpretation.
///
/// `status` is `None` when the peer answered with something that is not an
/// HTTP response head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: Option<u16>,
    pub body: Option<Vec<u8>>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status: Some(status),
            body: Some(body.to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse("https://reqres.in/api/users").unwrap(),
            headers: vec![("Content-Type".to_string(), "text/json".to_string())],
            timeout: Duration::from_secs(15),
        };
        assert_eq!(request.header("content-type"), Some("text/json"));
        assert_eq!(request.header("accept"), None);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse("http://127.0.0.1:1/users").unwrap(),
            headers: Vec::new(),
            timeout: Duration::from_secs(5),
        };
        let result = ReqwestTransport::new().get(&request).await;
        assert!(result.is_err());
    }
}
