//! Mock payment API for tests.
//!
//! Register fake customers, plans, coupons, subscriptions and sources in a
//! [`MockStore`], then synchronize them into HTTP stubs served by a wiremock
//! [`MockApiServer`] (or resolved in-process by a [`StubTable`]):
//!
//! - exact `200` stubs for every known id,
//! - `{data, has_more, object: "list", total_count, url}` listings,
//! - `404` fallbacks with an `invalid_request_error` body for unknown ids.
//!
//! Cards are only reachable through `/v1/customers/:customer/sources/:id`,
//! never through the global `/v1/sources/:id`.

pub mod callbacks;
pub mod mock;
pub mod patterns;
pub mod server;
pub mod store;
pub mod stub;
pub mod sync;
pub mod table;

pub use mock::StripeMock;
pub use server::MockApiServer;
pub use store::MockStore;
pub use stub::{Callback, Matcher, Responder, Stub, StubRequest, StubResponse, StubSet};
pub use sync::Synchronizer;
pub use table::StubTable;
