//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`Repository`], the query and command facets,
//! [`IdGenerator`]) are implemented by outbound adapters. Driving ports
//! ([`UserOperations`], [`GroupOperations`]) are implemented by the domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod group_operations;
mod group_repository;
mod id_generator;
mod repository;
mod user_operations;
mod user_repository;

#[cfg(test)]
pub use group_operations::MockGroupOperations;
pub use group_operations::{
    CreateGroupRequest, CreateGroupResponse, DeleteGroupRequest, GetGroupRequest,
    GetGroupResponse, GetGroupsResponse, GroupOperations, GroupView, UpdateGroupRequest,
};
#[cfg(test)]
pub use group_repository::MockGroupQuery;
pub use group_repository::{GroupCommand, GroupListFilter, GroupQuery};
#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::{IdGenerator, UuidIdGenerator};
pub use repository::{
    Repository, RepositoryError, Transaction, TransactionFuture, unit_of_work,
};
#[cfg(test)]
pub use user_operations::MockUserOperations;
pub use user_operations::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, GetUserRequest, GetUserResponse,
    GetUsersResponse, UpdateUserRequest, UserOperations,
};
#[cfg(test)]
pub use user_repository::MockUserQuery;
pub use user_repository::{UserCommand, UserListFilter, UserQuery};
