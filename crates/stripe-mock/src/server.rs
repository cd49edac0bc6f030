//! HTTP mock server backed by wiremock.

use crate::stub::{Matcher, Responder, StubRequest, StubResponse, StubSet};
use std::net::TcpListener;
use stripe_mock_core::{Error, Result};
use tracing::{debug, info};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Priority of exact-path stubs. wiremock tries lower values first.
const EXACT_PRIORITY: u8 = 1;
/// Priority of pattern fallbacks (wiremock's default).
const PATTERN_PRIORITY: u8 = 5;

fn template(response: &StubResponse) -> ResponseTemplate {
    response
        .headers
        .iter()
        .fold(ResponseTemplate::new(response.status), |template, (name, value)| {
            template.insert_header(name.as_str(), value.as_str())
        })
        .set_body_json(&response.body)
}

/// Adapts a stub responder to wiremock's [`Respond`].
struct StubResponder(Responder);

impl Respond for StubResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let url = match request.url.query() {
            Some(query) => format!("{}?{}", request.url.path(), query),
            None => request.url.path().to_string(),
        };
        let request = StubRequest::parse(request.method.as_str(), &url);
        template(&self.0.respond(&request))
    }
}

/// Mock payment API server.
pub struct MockApiServer {
    server: MockServer,
}

impl MockApiServer {
    /// Start on a random local port.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        info!(url = %server.uri(), "Mock API server started");
        Self { server }
    }

    /// Start on a fixed address such as `127.0.0.1:12111`.
    pub async fn start_on(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| Error::server(format!("cannot bind {}: {}", addr, e)))?;
        let server = MockServer::builder().listener(listener).start().await;
        info!(url = %server.uri(), "Mock API server started");
        Ok(Self { server })
    }

    /// Base URL of the server.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Full URL for `path`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Access the underlying MockServer.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Replace every mounted stub with `stubs`.
    ///
    /// Exact paths are mounted at a higher priority than patterns, so a
    /// known id never reaches a 404 fallback.
    pub async fn install(&self, stubs: &StubSet) {
        self.server.reset().await;

        for stub in stubs.ordered() {
            let builder = Mock::given(method(stub.method.as_str()));
            let (builder, priority) = match &stub.matcher {
                Matcher::Exact(exact) => (builder.and(path(exact.as_str())), EXACT_PRIORITY),
                Matcher::Pattern(re) => (builder.and(path_regex(re.as_str())), PATTERN_PRIORITY),
            };
            let mock = match &stub.responder {
                Responder::Static(response) => builder.respond_with(template(response)),
                Responder::Callback(_) => {
                    builder.respond_with(StubResponder(stub.responder.clone()))
                }
            };
            mock.with_priority(priority)
                .named(stub.matcher.to_string())
                .mount(&self.server)
                .await;
        }

        debug!(stubs = stubs.len(), "Installed stubs");
    }

    /// Number of requests received for `endpoint`.
    pub async fn request_count(&self, endpoint: &str) -> usize {
        self.received_requests()
            .await
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }

    /// Assert that `endpoint` was requested exactly `times` times.
    ///
    /// # Panics
    ///
    /// When the count differs.
    pub async fn verify_received(&self, endpoint: &str, times: usize) {
        let count = self.request_count(endpoint).await;
        assert_eq!(
            count, times,
            "Expected {} requests to {}, got {}",
            times, endpoint, count
        );
    }

    /// All requests received since the last reset.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Remove every stub and recorded request.
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
