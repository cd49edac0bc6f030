//! In-process stub table.
//!
//! Resolves requests synchronously without a socket. Useful for code that
//! takes a request handler instead of a base URL, and for checking a stub set
//! before serving it.

use crate::stub::{Stub, StubRequest, StubResponse, StubSet};
use tracing::trace;

/// Installed stubs in resolution order.
#[derive(Debug, Default)]
pub struct StubTable {
    stubs: Vec<Stub>,
}

impl StubTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every installed stub with `stubs`.
    pub fn install(&mut self, stubs: StubSet) {
        let (exact, patterns): (Vec<Stub>, Vec<Stub>) =
            stubs.into_iter().partition(|stub| stub.matcher.is_exact());
        self.stubs = exact;
        self.stubs.extend(patterns);
    }

    /// Resolve `url` (a path with optional query) to the first matching stub.
    pub fn handle(&self, method: &str, url: &str) -> Option<StubResponse> {
        let request = StubRequest::parse(method, url);
        let stub = self.stubs.iter().find(|stub| stub.matches(&request))?;
        trace!(method, url, matcher = %stub.matcher, "Matched stub");
        Some(stub.responder.respond(&request))
    }

    pub fn get(&self, url: &str) -> Option<StubResponse> {
        self.handle("GET", url)
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    pub fn reset(&mut self) {
        self.stubs.clear();
    }
}
