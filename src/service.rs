//! Typed client for the reqres user endpoints.
//!
//! Every operation follows the same pipeline: build an `HttpRequest`, run it
//! through the injected `Transport`, classify the raw response and decode the
//! body. Each operation exists as an `async fn` returning the `Outcome`
//! directly and as a `*_with` variant that delivers the `Outcome` to a
//! completion through the service's `ResponseQueue`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

use crate::config::EndpointConfig;
use crate::error::{Outcome, ServiceError};
use crate::queue::ResponseQueue;
use crate::responses::{UserResponse, UsersResponse};
use crate::transport::{HttpRequest, RawResponse, Transport};
use crate::types::User;

pub struct UserService {
    transport: Arc<dyn Transport>,
    endpoint: EndpointConfig,
    response_queue: ResponseQueue,
    runtime: Handle,
}

impl UserService {
    /// `runtime` runs the requests issued by the `*_with` operations, so
    /// those may be called from threads outside any Tokio runtime.
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: EndpointConfig,
        response_queue: ResponseQueue,
        runtime: Handle,
    ) -> Self {
        Self {
            transport,
            endpoint,
            response_queue,
            runtime,
        }
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Applies to requests built after the call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.endpoint.timeout = timeout;
    }

    /// `GET <base>/users`, with `page` only when it is greater than 1.
    pub fn build_users_request(&self, page: i64) -> Outcome<HttpRequest> {
        let mut url = self.endpoint_url(&["users"])?;
        if page > 1 {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }
        Ok(self.get_request(url))
    }

    /// `GET <base>/users/<id>`. The id is not validated locally.
    pub fn build_user_request(&self, user_id: i64) -> Outcome<HttpRequest> {
        let url = self.endpoint_url(&["users", &user_id.to_string()])?;
        Ok(self.get_request(url))
    }

    pub fn build_avatar_request(&self, user: &User) -> HttpRequest {
        self.get_request(user.avatar.clone())
    }

    pub async fn load_users(&self, page: i64) -> Outcome<UsersResponse> {
        fetch_json(self.transport.clone(), self.build_users_request(page)).await
    }

    pub async fn load_user(&self, user_id: i64) -> Outcome<UserResponse> {
        fetch_json(self.transport.clone(), self.build_user_request(user_id)).await
    }

    pub async fn load_avatar(&self, user: &User) -> Outcome<Vec<u8>> {
        fetch_bytes(self.transport.clone(), self.build_avatar_request(user)).await
    }

    /// Spawns the request on the service's runtime; `completion` runs once,
    /// on the response loop.
    pub fn load_users_with<F>(&self, page: i64, completion: F)
    where
        F: FnOnce(Outcome<UsersResponse>) + Send + 'static,
    {
        let work = fetch_json(self.transport.clone(), self.build_users_request(page));
        self.deliver(work, completion);
    }

    pub fn load_user_with<F>(&self, user_id: i64, completion: F)
    where
        F: FnOnce(Outcome<UserResponse>) + Send + 'static,
    {
        let work = fetch_json(self.transport.clone(), self.build_user_request(user_id));
        self.deliver(work, completion);
    }

    pub fn load_avatar_with<F>(&self, user: &User, completion: F)
    where
        F: FnOnce(Outcome<Vec<u8>>) + Send + 'static,
    {
        let work = fetch_bytes(self.transport.clone(), self.build_avatar_request(user));
        self.deliver(work, completion);
    }

    fn deliver<T, W, F>(&self, work: W, completion: F)
    where
        T: Send + 'static,
        W: Future<Output = Outcome<T>> + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let queue = self.response_queue.clone();
        self.runtime.spawn(async move {
            let outcome = work.await;
            queue.dispatch(move || completion(outcome));
        });
    }

    fn endpoint_url(&self, segments: &[&str]) -> Outcome<Url> {
        let mut url = self.endpoint.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ServiceError::UrlCreation)?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn get_request(&self, url: Url) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url,
            headers: vec![(
                "Content-Type".to_string(),
                self.endpoint.content_type.clone(),
            )],
            timeout: self.endpoint.timeout,
        }
    }
}

async fn fetch_json<T: DeserializeOwned>(
    transport: Arc<dyn Transport>,
    request: Outcome<HttpRequest>,
) -> Outcome<T> {
    let body = fetch_bytes(transport, request?).await?;
    decode(&body)
}

async fn fetch_bytes(transport: Arc<dyn Transport>, request: HttpRequest) -> Outcome<Vec<u8>> {
    debug!(method = %request.method, url = %request.url, "sending request");
    let response = transport.get(&request).await.map_err(|e| {
        debug!(url = %request.url, error = %e, "transport failure");
        ServiceError::System(e)
    })?;
    classify(response).inspect_err(|e| debug!(url = %request.url, error = %e, "request failed"))
}

/// Checks run in order; the first failing one decides the outcome.
fn classify(response: RawResponse) -> Outcome<Vec<u8>> {
    let status = match response.status {
        Some(status) if (100..=599).contains(&status) => status,
        _ => return Err(ServiceError::NonHttpResponse),
    };
    if !(200..300).contains(&status) {
        return Err(ServiceError::StatusCode(status));
    }
    match response.body {
        Some(body) if !body.is_empty() => Ok(body),
        _ => Err(ServiceError::NoData),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Outcome<T> {
    serde_json::from_slice(body).map_err(|source| {
        let body = String::from_utf8_lossy(body).into_owned();
        warn!(error = %source, %body, "response did not match the expected schema");
        ServiceError::Parsing { source, body }
    })
}
