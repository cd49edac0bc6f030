//! Command implementations.

mod check;
mod routes;
mod serve;

pub use check::CheckCommand;
pub use routes::RoutesCommand;
pub use serve::ServeCommand;
