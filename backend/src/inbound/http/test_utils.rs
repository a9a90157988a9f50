//! Test helpers for the HTTP adapter.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{GroupOperations, IdGenerator, UserOperations, UuidIdGenerator};
use crate::domain::{GroupService, UserService};
use crate::outbound::memory::{MemoryRepository, MemoryStore};

use super::configure;
use super::state::HttpState;

/// State whose services share one fresh in-memory store.
pub(crate) fn memory_state() -> HttpState {
    let repository = Arc::new(MemoryRepository::new(MemoryStore::new()));
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    HttpState::new(
        Arc::new(UserService::new(Arc::clone(&repository), Arc::clone(&ids))),
        Arc::new(GroupService::new(repository, ids)),
    )
}

/// State with explicit port implementations, typically mocks.
pub(crate) fn state_with(
    users: impl UserOperations + 'static,
    groups: impl GroupOperations + 'static,
) -> HttpState {
    HttpState::new(Arc::new(users), Arc::new(groups))
}

pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}
