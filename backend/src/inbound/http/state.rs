//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised with mocks or the in-memory backend.

use std::sync::Arc;

use crate::domain::ports::{GroupOperations, UserOperations};

#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserOperations>,
    pub groups: Arc<dyn GroupOperations>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserOperations>, groups: Arc<dyn GroupOperations>) -> Self {
        Self { users, groups }
    }
}
