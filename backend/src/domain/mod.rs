//! Domain primitives, aggregates and services.
//!
//! Purpose: keep the User and Group aggregates, the cross-aggregate
//! consistency rules and the ports they depend on free of transport and
//! storage concerns.
//!
//! Public surface:
//! - `User`, `Group` and their validated field types.
//! - `UserService`, `GroupService`: the use cases behind the driving ports.
//! - `UserExistence`, `GroupExistence`: read-only reference checks.
//! - `Error`, `ErrorCode`, `OperationError`: failure types.

pub mod error;
pub mod existence;
pub mod group;
pub mod group_service;
pub mod operation_error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::existence::{
    GroupExistence, GroupExistenceService, UserExistence, UserExistenceService,
};
pub use self::group::{
    GROUP_MEMBERS_MAX, GROUP_NAME_MAX, Group, GroupId, GroupName, GroupValidationError,
};
pub use self::group_service::GroupService;
pub use self::operation_error::OperationError;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EMAIL_MAX, Email, USER_NAME_MAX, User, UserId, UserName, UserValidationError};
pub use self::user_service::UserService;
