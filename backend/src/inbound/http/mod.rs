//! HTTP inbound adapter.
//!
//! Handlers bind JSON to the driving-port request types, call the domain
//! services held in [`state::HttpState`] and map failures through
//! [`error`].

pub mod error;
pub mod groups;
pub mod health;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the user and group endpoints and the JSON extractor config.
///
/// Health probes are registered separately because they need their own
/// shared state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(groups::create_group)
        .service(groups::list_groups)
        .service(groups::get_group)
        .service(groups::update_group)
        .service(groups::delete_group);
}
