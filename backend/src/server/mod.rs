//! Server construction: backend selection, app wiring and binding.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_groups::Trace;
use user_groups::domain::ports::{IdGenerator, Repository, UuidIdGenerator};
use user_groups::domain::{GroupService, UserService};
use user_groups::inbound::http::configure;
use user_groups::inbound::http::health::{HealthState, live, ready};
use user_groups::inbound::http::state::HttpState;
use user_groups::outbound::memory::{MemoryRepository, MemoryStore};
use user_groups::outbound::persistence::DieselRepository;

fn services_over<R>(repository: R) -> HttpState
where
    R: Repository + 'static,
{
    let repository = Arc::new(repository);
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    HttpState::new(
        Arc::new(UserService::new(Arc::clone(&repository), Arc::clone(&ids))),
        Arc::new(GroupService::new(repository, ids)),
    )
}

/// Wire the services to PostgreSQL when a pool is configured, otherwise to a
/// fresh in-memory store.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            services_over(DieselRepository::new(pool.clone()))
        }
        None => {
            info!("no database configured; using in-memory storage");
            services_over(MemoryRepository::new(MemoryStore::new()))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
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
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live)
}

/// Bind the listener and mark the service ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    info!(bind_addr = %config.bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
