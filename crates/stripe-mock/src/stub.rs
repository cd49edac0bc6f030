//! Stubs: `(method, URL matcher) -> response` rules.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use stripe_mock_core::{ErrorEnvelope, Result};

/// A response produced by a stub. Bodies are always served as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl StubResponse {
    /// A JSON response with the given status.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Result<Self> {
        Ok(Self {
            status,
            headers: Vec::new(),
            body: serde_json::to_value(body)?,
        })
    }

    /// A 200 response with the given body.
    pub fn ok<T: Serialize>(body: &T) -> Result<Self> {
        Self::json(200, body)
    }

    /// The 404 `invalid_request_error` response for a missing object.
    pub fn not_found(object_name: &str, id: &str) -> Self {
        // An envelope of strings always serializes.
        let body = serde_json::to_value(ErrorEnvelope::not_found(object_name, id))
            .unwrap_or(Value::Null);
        Self {
            status: 404,
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// The parts of an intercepted request a callback can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    pub method: String,
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl StubRequest {
    /// Build a request from a path with an optional `?query` suffix.
    pub fn parse(method: &str, path_and_query: &str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path_and_query, ""),
        };
        Self {
            method: method.to_uppercase(),
            path: path.to_string(),
            query: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Resolves a request to a response at the time it is intercepted.
pub type Callback = Arc<dyn Fn(&StubRequest) -> StubResponse + Send + Sync>;

/// How a stub selects requests.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// The request path equals this path.
    Exact(String),
    /// The request path matches this (anchored) regex.
    Pattern(Regex),
}

impl Matcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == path,
            Self::Pattern(re) => re.is_match(path),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => f.write_str(path),
            Self::Pattern(re) => write!(f, "~{}", re.as_str()),
        }
    }
}

/// What a stub answers with.
#[derive(Clone)]
pub enum Responder {
    Static(StubResponse),
    Callback(Callback),
}

impl Responder {
    pub fn respond(&self, request: &StubRequest) -> StubResponse {
        match self {
            Self::Static(response) => response.clone(),
            Self::Callback(callback) => callback(request),
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(response) => f.debug_tuple("Static").field(&response.status).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A registered `(method, matcher) -> responder` rule.
#[derive(Debug, Clone)]
pub struct Stub {
    pub method: String,
    pub matcher: Matcher,
    pub responder: Responder,
}

impl Stub {
    /// `GET` on an exact path, answered with a fixed response.
    pub fn get(path: impl Into<String>, response: StubResponse) -> Self {
        Self {
            method: "GET".to_string(),
            matcher: Matcher::Exact(path.into()),
            responder: Responder::Static(response),
        }
    }

    /// `GET` on any path matching `pattern`, answered by `callback`.
    pub fn get_pattern(pattern: &Regex, callback: Callback) -> Self {
        Self {
            method: "GET".to_string(),
            matcher: Matcher::Pattern(pattern.clone()),
            responder: Responder::Callback(callback),
        }
    }

    pub fn matches(&self, request: &StubRequest) -> bool {
        self.method.eq_ignore_ascii_case(&request.method) && self.matcher.matches(&request.path)
    }
}

/// The complete set of stubs produced by one synchronization.
#[derive(Debug, Clone, Default)]
pub struct StubSet {
    stubs: Vec<Stub>,
}

impl StubSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stub: Stub) {
        self.stubs.push(stub);
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stub> {
        self.stubs.iter()
    }

    /// Stubs in resolution order: exact matchers first, then patterns, each
    /// group in registration order.
    pub fn ordered(&self) -> impl Iterator<Item = &Stub> {
        let exact = self.stubs.iter().filter(|s| s.matcher.is_exact());
        let patterns = self.stubs.iter().filter(|s| !s.matcher.is_exact());
        exact.chain(patterns)
    }

    pub fn exact_count(&self) -> usize {
        self.stubs.iter().filter(|s| s.matcher.is_exact()).count()
    }

    pub fn pattern_count(&self) -> usize {
        self.len() - self.exact_count()
    }
}

impl IntoIterator for StubSet {
    type Item = Stub;
    type IntoIter = std::vec::IntoIter<Stub>;

    fn into_iter(self) -> Self::IntoIter {
        self.stubs.into_iter()
    }
}

impl<'a> IntoIterator for &'a StubSet {
    type Item = &'a Stub;
    type IntoIter = std::slice::Iter<'a, Stub>;

    fn into_iter(self) -> Self::IntoIter {
        self.stubs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_request_query() {
        let request = StubRequest::parse("get", "/v1/customers/cus_1/sources?object=card&limit=3");
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/v1/customers/cus_1/sources");
        assert_eq!(request.query_param("object"), Some("card"));
        assert_eq!(request.query_param("limit"), Some("3"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_not_found_response() {
        let response = StubResponse::not_found("plan", "nope");
        assert_eq!(response.status, 404);
        assert_eq!(
            response.body,
            json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "No such plan: nope",
                    "param": "id",
                }
            })
        );
    }

    #[test]
    fn test_with_header() {
        let response = StubResponse::ok(&json!({"id": "gold"}))
            .unwrap()
            .with_header("request-id", "req_1");
        assert_eq!(response.headers, vec![("request-id".to_string(), "req_1".to_string())]);
    }

    #[test]
    fn test_exact_and_pattern_matchers() {
        let exact = Matcher::Exact("/v1/plans/gold".into());
        let pattern = Matcher::Pattern(Regex::new(r"^/v1/plans/([a-z]+)$").unwrap());

        assert!(exact.matches("/v1/plans/gold"));
        assert!(!exact.matches("/v1/plans/silver"));
        assert!(pattern.matches("/v1/plans/silver"));
        assert_eq!(pattern.to_string(), "~^/v1/plans/([a-z]+)$");
    }

    #[test]
    fn test_method_must_match() {
        let stub = Stub::get("/v1/plans", StubResponse::ok(&json!([])).unwrap());
        assert!(stub.matches(&StubRequest::parse("GET", "/v1/plans")));
        assert!(!stub.matches(&StubRequest::parse("POST", "/v1/plans")));
    }

    #[test]
    fn test_ordered_puts_exact_first() {
        let mut set = StubSet::new();
        let callback: Callback = Arc::new(|_: &StubRequest| StubResponse::not_found("plan", "x"));
        set.push(Stub::get_pattern(&Regex::new("^/a$").unwrap(), callback));
        set.push(Stub::get("/b", StubResponse::ok(&json!({})).unwrap()));

        let order: Vec<bool> = set.ordered().map(|s| s.matcher.is_exact()).collect();
        assert_eq!(order, vec![true, false]);
        assert_eq!(set.exact_count(), 1);
        assert_eq!(set.pattern_count(), 1);
    }
}
