//! Storage capability and unit of work.
//!
//! [`Repository`] exposes read-only query facets for each aggregate and a
//! single entry point, [`Repository::run_transaction`], that hands a
//! [`Transaction`] to the caller's work. Command facets are only reachable
//! through that handle, so every write happens inside a unit of work that is
//! committed when the work returns `Ok` and rolled back otherwise.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use super::define_port_error;
use super::{GroupCommand, GroupQuery, UserCommand, UserQuery};

define_port_error! {
    /// Opaque storage failure. "Not found" is never reported here; lookups
    /// return `None` or an empty list instead.
    pub enum RepositoryError {
        /// The backend could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}

/// Boxed future returned by unit-of-work closures.
pub type TransactionFuture<'t, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 't>>;

/// Box a unit-of-work future so it matches [`TransactionFuture`].
///
/// # Examples
/// ```
/// use user_groups::domain::ports::{unit_of_work, RepositoryError, TransactionFuture};
///
/// fn noop<'t>() -> TransactionFuture<'t, ()> {
///     unit_of_work(async { Ok::<(), RepositoryError>(()) })
/// }
/// # let _ = noop();
/// ```
pub fn unit_of_work<'t, T, Fut>(work: Fut) -> TransactionFuture<'t, T>
where
    Fut: Future<Output = Result<T, RepositoryError>> + Send + 't,
{
    Box::pin(work)
}

/// Transaction-scoped handle exposing the command facets.
///
/// The handle is only valid for the duration of the closure passed to
/// [`Repository::run_transaction`].
pub trait Transaction: Send {
    fn users(&mut self) -> &mut dyn UserCommand;
    fn groups(&mut self) -> &mut dyn GroupCommand;
}

/// Storage backend for users and groups.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Read-only user facet, usable outside a transaction.
    fn users(&self) -> &dyn UserQuery;

    /// Read-only group facet, usable outside a transaction.
    fn groups(&self) -> &dyn GroupQuery;

    /// Run `work` inside one unit of work.
    ///
    /// Writes issued through the handle are applied in order and become
    /// visible together when `work` returns `Ok`. On `Err` none of them are
    /// kept and the error is returned unchanged.
    async fn run_transaction<T, F>(&self, work: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn Transaction) -> TransactionFuture<'t, T> + Send + 'static;
}
