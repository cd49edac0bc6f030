//! URL templates and request-path patterns of the mocked API.
//!
//! Patterns are anchored and match the request path only; query strings are
//! handled by the responders that care about them.

use once_cell::sync::Lazy;
use regex::Regex;

pub const CUSTOMER_URL_BASE: &str = "/v1/customers";
pub const PLAN_URL_BASE: &str = "/v1/plans";
pub const COUPON_URL_BASE: &str = "/v1/coupons";
pub const SUBSCRIPTION_URL_BASE: &str = "/v1/subscriptions";
pub const SOURCE_URL_BASE: &str = "/v1/sources";

/// Characters accepted in an id path segment.
const ID: &str = r"([A-Za-z0-9_\-]+)";

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("URL patterns are valid regexes")
}

/// `/v1/customers/:id`
pub static CUSTOMER_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}$", CUSTOMER_URL_BASE, ID)));

/// `/v1/plans/:id`
pub static PLAN_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}$", PLAN_URL_BASE, ID)));

/// `/v1/coupons/:id`
pub static COUPON_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}$", COUPON_URL_BASE, ID)));

/// `/v1/subscriptions/:id`
pub static SUBSCRIPTION_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}$", SUBSCRIPTION_URL_BASE, ID)));

/// `/v1/sources/:id`
pub static SOURCE_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}$", SOURCE_URL_BASE, ID)));

/// `/v1/customers/:customer/sources/:id`
pub static CUSTOMER_SOURCE_OBJECT_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}/sources/{}$", CUSTOMER_URL_BASE, ID, ID)));

/// `/v1/customers/:customer/sources`
pub static CUSTOMER_SOURCE_LIST_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}/sources$", CUSTOMER_URL_BASE, ID)));

/// `/v1/customers/:customer/subscriptions`
pub static CUSTOMER_SUBSCRIPTION_LIST_URL_RE: Lazy<Regex> =
    Lazy::new(|| compile(format!("^{}/{}/subscriptions$", CUSTOMER_URL_BASE, ID)));

/// `{base}/{id}`
pub fn object_url(base: &str, id: &str) -> String {
    format!("{}/{}", base, id)
}

/// `/v1/customers/:customer/sources`
pub fn customer_sources_url(customer_id: &str) -> String {
    format!("{}/{}/sources", CUSTOMER_URL_BASE, customer_id)
}

/// `/v1/customers/:customer/sources/:id`
pub fn customer_source_url(customer_id: &str, source_id: &str) -> String {
    format!("{}/{}/sources/{}", CUSTOMER_URL_BASE, customer_id, source_id)
}

/// `/v1/customers/:customer/subscriptions`
pub fn customer_subscriptions_url(customer_id: &str) -> String {
    format!("{}/{}/subscriptions", CUSTOMER_URL_BASE, customer_id)
}

/// Capture group `group` of `pattern` applied to `path`, or `""`.
pub fn capture<'p>(pattern: &Regex, path: &'p str, group: usize) -> &'p str {
    pattern
        .captures(path)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str())
        .unwrap_or_default()
}
