//! User and group management service.
//!
//! The domain layer keeps both aggregates consistent: groups only ever
//! reference stored users, and deleting a user strips it from every group in
//! the same unit of work. Storage backends and the HTTP adapter plug in
//! through the ports in [`domain::ports`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;

#[cfg(test)]
mod test_support;
