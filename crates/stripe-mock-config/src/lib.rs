//! Configuration for stripe-mock.
//!
//! Fixture files describe the objects a mock server should serve, plus where
//! it listens. Values can reference the environment with `${VAR}` or
//! `${VAR:-default}`.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
