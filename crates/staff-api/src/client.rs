//! Authenticated request primitive.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use staff_auth::TokenStore;
use staff_config::ApiConfig;

use crate::endpoints::Endpoints;
use crate::error::ClientError;
use crate::http::read_json;
use crate::refresh::RefreshGate;

/// HTTP client bound to a [`TokenStore`].
///
/// Cheap to clone; clones share the connection pool, the token store, and the
/// refresh gate, so concurrent requests from any clone coalesce onto a single
/// token refresh.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    endpoints: Endpoints,
    tokens: TokenStore,
    refresh: RefreshGate,
}

impl AuthenticatedClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, tokens: TokenStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                endpoints: Endpoints::new(base_url),
                tokens,
                refresh: RefreshGate::default(),
            }),
        }
    }

    /// Build the underlying HTTP client from `[api]` settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the TLS backend fails to initialize.
    pub fn from_config(config: &ApiConfig, tokens: TokenStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(http, config.base_url(), tokens))
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// The raw HTTP client, for the unauthenticated login and signup calls.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub async fn get(&self, url: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, url, None).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, url, Some(body)).await
    }

    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.request_with_headers(method, url, body, &HeaderMap::new())
            .await
    }

    /// Send an authenticated request and return the parsed JSON body.
    ///
    /// `url` is either a path under the API base or an absolute URL (such as a
    /// pagination cursor), which is used verbatim. `headers` are merged over the
    /// JSON content type; they can never replace the bearer token.
    ///
    /// On a 401 the token is refreshed (once, shared with any concurrent
    /// callers) and the request is replayed a single time.
    ///
    /// # Errors
    ///
    /// - `ClientError::Unauthenticated` if no session is stored; nothing is sent
    /// - `ClientError::SessionExpired` if the refresh exchange fails
    /// - `ClientError::Http` for any other non-success status, including a 401
    ///   on the replay
    /// - `ClientError::Decode` if a success body is not JSON
    pub async fn request_with_headers(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<Value, ClientError> {
        let session = self.inner.tokens.get().ok_or(ClientError::Unauthenticated)?;
        let url = self.inner.endpoints.resolve(url);

        let resp = self
            .send(&method, &url, body, headers, &session.access_token)
            .await?;
        tracing::debug!(%method, url = %url, status = resp.status().as_u16(), "request");
        if resp.status() != reqwest::StatusCode::UNAUTHORIZED {
            return read_json(resp).await;
        }

        let fresh = self
            .inner
            .refresh
            .refresh_after(
                &session.access_token,
                &self.inner.http,
                &self.inner.endpoints,
                &self.inner.tokens,
            )
            .await?;
        let retry = self.send(&method, &url, body, headers, &fresh).await?;
        tracing::debug!(%method, url = %url, status = retry.status().as_u16(), "request retried");
        read_json(retry).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
        token: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            merged.insert(name.clone(), value.clone());
        }
        merged.remove(AUTHORIZATION);

        let mut builder = self
            .inner
            .http
            .request(method.clone(), url)
            .headers(merged)
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }
}
