//! Blocking HTTP GET on top of a shared async client.
//!
//! Uses async reqwest internally, driven by a shared tokio runtime, but
//! presents a sync interface: one request is outstanding at a time and the
//! caller blocks until the full body has arrived.

use std::sync::{LazyLock, OnceLock};
use std::time::Duration;

/// Default connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("genetable/", env!("CARGO_PKG_VERSION"));

/// Process-wide HTTP settings, installed once at startup.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` keeps the library default (no limit).
    pub request_timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: None,
        }
    }
}

static HTTP_CONFIG: OnceLock<HttpConfig> = OnceLock::new();

/// Install HTTP settings. Must run before the first request; later calls are ignored.
pub fn set_http_config(config: HttpConfig) {
    if HTTP_CONFIG.set(config).is_err() {
        log::warn!("HTTP config already initialized, ignoring override");
    }
}

/// Current HTTP settings (defaults if never set).
pub fn http_config() -> &'static HttpConfig {
    HTTP_CONFIG.get_or_init(HttpConfig::default)
}

/// Error for requests that never produced an HTTP response
#[derive(Debug)]
pub enum HttpError {
    /// Connection, DNS, TLS, timeout or body read failure
    Transport { message: String, timed_out: bool },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport {
                message,
                timed_out: true,
            } => write!(f, "request timed out: {message}"),
            Self::Transport { message, .. } => write!(f, "transport error: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create transport error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Transport {
            message: e.to_string(),
            timed_out: e.is_timeout(),
        }
    }
}

/// Status and body of a completed request. Non-2xx statuses are not errors here;
/// callers decide what each status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    let config = http_config();
    let mut builder = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(2);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET with optional query parameters, returning status + body text.
///
/// Must not be called from inside an async context.
pub fn get_text(url: &str, query: &[(&str, String)]) -> Result<HttpResponse, HttpError> {
    log::debug!("GET {url} {query:?}");
    SHARED_RUNTIME.handle().block_on(async {
        let mut request = http_client().get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(&e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::from_reqwest(&e))?;
        Ok(HttpResponse { status, body })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn display_transport() {
        let err = HttpError::Transport {
            message: "connection refused".to_string(),
            timed_out: false,
        };
        assert_eq!(format!("{err}"), "transport error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = HttpError::Transport {
            message: "deadline".to_string(),
            timed_out: true,
        };
        assert!(format!("{err}").starts_with("request timed out"));
    }

    #[test]
    fn default_config_has_no_request_timeout() {
        let config = HttpConfig::default();
        assert!(config.request_timeout.is_none());
        assert_eq!(config.connect_timeout, CONNECT_TIMEOUT);
    }

    #[test]
    fn get_text_returns_status_and_body() {
        let rt = test_runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/hello"))
                .and(query_param("name", "yeast"))
                .respond_with(ResponseTemplate::new(200).set_body_string("hi yeast"))
                .mount(&server),
        );

        let url = format!("{}/hello", server.uri());
        let resp = get_text(&url, &[("name", "yeast".to_string())]).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "hi yeast");
    }

    #[test]
    fn get_text_passes_error_status_through() {
        let rt = test_runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(503).set_body_string("down"))
                .mount(&server),
        );

        let resp = get_text(&server.uri(), &[]).unwrap();
        assert_eq!(resp.status, 503);
        assert_eq!(resp.body, "down");
    }

    #[test]
    fn get_text_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let err = get_text("http://127.0.0.1:9/", &[]).unwrap_err();
        assert!(matches!(err, HttpError::Transport { .. }));
    }
}
