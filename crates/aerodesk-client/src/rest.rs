//! Async REST gateway for the AeroDesk API.
//!
//! Every endpoint wrapper funnels through [`RestClient::request`], which stamps the
//! stored token, dispatches, and hands the outcome to the [`ResponseGuard`].

use aerodesk_common::config::ClientConfig;
use aerodesk_common::models::Envelope;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::interceptor::{stamp_headers, ResponseGuard};
use crate::session::Session;

/// Async AeroDesk REST client.
///
/// ```rust,no_run
/// use aerodesk_client::{RestClient, Session};
///
/// #[tokio::main]
/// async fn main() -> aerodesk_client::Result<()> {
///     let rest = RestClient::new(Session::in_memory(), None)?;
///     rest.login("alice", "secret").await?;
///     let flights = rest.list_flights().await?;
///     println!("{flights:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    guard: ResponseGuard,
}

impl RestClient {
    /// Client with default settings, optionally pointed at another base URL.
    pub fn new(session: Session, base_url: Option<&str>) -> Result<Self> {
        let mut config = ClientConfig::default();
        if let Some(url) = base_url {
            config.api.base_url = url.to_owned();
        }
        Self::from_config(&config, session)
    }

    pub fn from_config(config: &ClientConfig, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.api.timeout())
            .user_agent(concat!("aerodesk-client/", env!("CARGO_PKG_VERSION")))
            .default_headers({
                let mut h = HeaderMap::new();
                h.insert(ACCEPT, HeaderValue::from_static("application/json"));
                h
            })
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        let guard = ResponseGuard::new(session)
            .with_password_mismatch_message(config.auth.password_mismatch_message.clone());

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_owned(),
            guard,
        })
    }

    pub fn session(&self) -> &Session {
        self.guard.session()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    /// The single HTTP primitive: stamp, dispatch, classify transport outcome.
    ///
    /// Returns the response only for 2xx statuses.
    async fn request(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<reqwest::Response> {
        let mut headers = HeaderMap::new();
        stamp_headers(&mut headers, self.session())?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Dispatching request");
        let req = build(self.client.request(method, &url).headers(headers));

        let resp = req.send().await.map_err(|e| self.guard.on_network(e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(self.guard.on_http_status(status, &body));
        }
        Ok(resp)
    }

    async fn envelope(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Envelope> {
        let resp = self.request(method, path, build).await?;
        let body = resp.bytes().await.map_err(|e| self.guard.on_network(e))?;
        self.guard.on_body(&body)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T> {
        let envelope = self.envelope(method, path, build).await?;
        into_data(envelope)
    }

    // ── Verbs ─────────────────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::GET, path, |req| req).await
    }

    pub(crate) async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.call(Method::GET, path, |req| req.query(query)).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, |req| req.json(body)).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, |req| req.json(body)).await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::PUT, path, |req| req).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(Method::DELETE, path, |req| req).await
    }

    pub(crate) async fn delete_with<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::DELETE, path, |req| req.json(body)).await
    }

    /// GET returning raw bytes, for binary exports. A JSON body is still
    /// checked as an envelope so a failure inside a 2xx is not mistaken for data.
    pub(crate) async fn get_bytes<Q>(&self, path: &str, query: &Q) -> Result<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        let resp = self.request(Method::GET, path, |req| req.query(query)).await?;
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let body = resp.bytes().await.map_err(|e| self.guard.on_network(e))?;
        if is_json {
            if let Ok(envelope) = serde_json::from_slice::<Envelope>(&body) {
                self.guard.on_envelope(envelope)?;
            }
        }
        Ok(body.to_vec())
    }
}

/// Deserialize the envelope's `data`; a missing `data` reads as JSON `null`.
fn into_data<T: DeserializeOwned>(envelope: Envelope) -> Result<T> {
    serde_json::from_value(envelope.data.unwrap_or(Value::Null)).map_err(|source| {
        tracing::error!("Unexpected response payload: {source}");
        ClientError::Payload { message: "unexpected response payload".to_owned(), source }
    })
}

/// Percent-encode one caller-supplied path segment.
///
/// `byte_serialize` writes spaces as `+`, which a path treats literally.
/// A literal `+` in the input is already `%2B`, so every `+` left is a space.
pub(crate) fn segment(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_is_deserialized() {
        let env: Envelope = serde_json::from_value(json!({ "code": 200, "data": [1, 2] })).unwrap();
        let data: Vec<i64> = into_data(env).unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn missing_data_is_null() {
        let env: Envelope = serde_json::from_value(json!({ "code": 200, "msg": "ok" })).unwrap();
        let () = into_data(env.clone()).unwrap();
        let opt: Option<i64> = into_data(env).unwrap();
        assert_eq!(opt, None);
    }

    #[test]
    fn shape_mismatch_is_payload_error() {
        let env: Envelope = serde_json::from_value(json!({ "code": 200, "data": "x" })).unwrap();
        let err = into_data::<Vec<i64>>(env).unwrap_err();
        assert!(matches!(err, ClientError::Payload { .. }));
    }

    #[test]
    fn segments_are_encoded() {
        assert_eq!(segment("CA1234"), "CA1234");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(segment("CA 12+3"), "CA%2012%2B3");
    }

    #[test]
    fn base_url_is_normalized() {
        let rest = RestClient::new(Session::in_memory(), Some("http://example.test/api/")).unwrap();
        assert_eq!(rest.base_url(), "http://example.test/api");
    }
}
