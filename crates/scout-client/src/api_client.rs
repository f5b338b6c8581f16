use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::blocking::{Client, Request, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use scout_common::api::ErrorResponse;

use crate::error::{Result, ScoutError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Hook run on every outgoing request after it is built and before it is sent.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut Request) -> Result<()>;
}

/// Hook run on every response, successful or not, before the body is read.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, status: StatusCode, url: &Url);
}

/// Access token slot shared between the auth state owner and the HTTP client.
pub type SharedToken = Arc<RwLock<Option<String>>>;

/// Adds `Authorization: Bearer <token>` while a token is present.
pub struct BearerAuth {
    token: SharedToken,
}

impl BearerAuth {
    pub fn new(token: SharedToken) -> Self {
        Self { token }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, request: &mut Request) -> Result<()> {
        let guard = self
            .token
            .read()
            .map_err(|_| ScoutError::Auth("token lock poisoned".to_string()))?;
        if let Some(ref token) = *guard {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ScoutError::Auth(format!("invalid token: {e}")))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// HTTP client for the Scout API.
///
/// Cloning is cheap; clones share the connection pool and interceptors so
/// calls can be handed to worker threads.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        })
    }

    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` resolved against the server origin instead of the API prefix.
    fn root_url(&self, path: &str) -> Result<Url> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| ScoutError::Config(format!("invalid api url '{}': {e}", self.base_url)))
    }

    /// GET outside the versioned prefix, e.g. the server's `/health`.
    pub fn get_root<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.execute(self.client.get(self.root_url(path)?))?;
        Ok(resp.json()?)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.execute(self.client.get(self.url(path)))?;
        Ok(resp.json()?)
    }

    pub fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.execute(self.client.get(self.url(path)).query(query))?;
        Ok(resp.json()?)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.execute(self.client.post(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    pub fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.execute(self.client.put(self.url(path)))?;
        Ok(resp.json()?)
    }

    pub fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.execute(self.client.put(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.client.delete(self.url(path)))?;
        Ok(())
    }

    fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let mut request = builder.build()?;
        for interceptor in &self.request_interceptors {
            interceptor.on_request(&mut request)?;
        }

        let method = request.method().clone();
        tracing::debug!(%method, url = %request.url(), "sending request");

        let resp = self.client.execute(request).map_err(|e| {
            tracing::warn!(%method, error = %e, "request failed");
            ScoutError::from(e)
        })?;

        let status = resp.status();
        for interceptor in &self.response_interceptors {
            interceptor.on_response(status, resp.url());
        }

        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            // No refresh-and-retry; the caller decides what to do.
            tracing::warn!(url = %resp.url(), "server rejected credentials");
            return Err(ScoutError::Unauthorized);
        }

        let message = resp
            .json::<ErrorResponse>()
            .map(|e| e.message())
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        Err(ScoutError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::testing::StubServer;

    #[derive(serde::Deserialize, Debug)]
    struct Health {
        status: String,
    }

    #[test]
    fn sends_json_content_type_by_default() {
        let server = StubServer::respond(200, r#"{"status":"healthy"}"#);
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap();

        let health: Health = client.get("/health").unwrap();
        assert_eq!(health.status, "healthy");

        let req = server.captured();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/v1/health");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn bearer_interceptor_follows_shared_token() {
        let token: SharedToken = Arc::new(RwLock::new(Some("abc123".to_string())));
        let server = StubServer::respond(200, r#"{"status":"ok"}"#);
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT)
            .unwrap()
            .with_request_interceptor(BearerAuth::new(token.clone()));

        let _: Health = client.get("/health").unwrap();
        assert_eq!(server.captured().header("authorization"), Some("Bearer abc123"));

        *token.write().unwrap() = None;
        let server = StubServer::respond(200, r#"{"status":"ok"}"#);
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT)
            .unwrap()
            .with_request_interceptor(BearerAuth::new(token));
        let _: Health = client.get("/health").unwrap();
        assert_eq!(server.captured().header("authorization"), None);
    }

    #[test]
    fn unauthorized_is_detected_and_not_retried() {
        struct Recorder(Arc<Mutex<Vec<u16>>>);
        impl ResponseInterceptor for Recorder {
            fn on_response(&self, status: StatusCode, _url: &Url) {
                self.0.lock().unwrap().push(status.as_u16());
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let server = StubServer::respond(401, r#"{"detail":"Not authenticated"}"#);
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT)
            .unwrap()
            .with_response_interceptor(Recorder(seen.clone()));

        let err = client.get::<Health>("/users/me").unwrap_err();
        assert!(matches!(err, ScoutError::Unauthorized));
        assert_eq!(*seen.lock().unwrap(), vec![401]);
    }

    #[test]
    fn error_detail_is_surfaced() {
        let server = StubServer::respond(
            501,
            r#"{"detail":"Get reports endpoint not yet implemented"}"#,
        );
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap();

        match client.get::<Health>("/reports").unwrap_err() {
            ScoutError::Http { status, message } => {
                assert_eq!(status, 501);
                assert_eq!(message, "Get reports endpoint not yet implemented");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn connection_failure_is_a_network_error() {
        // Port 9 (discard) on loopback is closed on any sane test host.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.get::<Health>("/health").unwrap_err();
        assert!(matches!(err, ScoutError::Network(_)));
    }

    #[test]
    fn root_get_skips_api_prefix() {
        let server = StubServer::respond(200, r#"{"status":"healthy"}"#);
        let client = ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap();

        let health: Health = client.get_root("/health").unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(server.captured().path, "/health");
    }

    #[test]
    fn root_get_rejects_unparseable_base() {
        let client = ApiClient::new("not a url", DEFAULT_TIMEOUT).unwrap();
        let err = client.get_root::<Health>("/health").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/reports"), "http://localhost:8000/api/v1/reports");
    }
}
