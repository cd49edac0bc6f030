//! stripe-mock core types.
//!
//! Typed records for the payment API resources the mock serves, the params
//! used to merge caller-supplied fields into them, and the JSON envelopes the
//! API wraps responses in.

#[macro_use]
mod macros;

pub mod envelope;
pub mod error;
pub mod resources;

pub use envelope::{ErrorBody, ErrorEnvelope, ListEnvelope};
pub use error::{Error, Result};
pub use resources::*;
