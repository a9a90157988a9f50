//! Identifier source for newly created aggregates.

use crate::domain::{GroupId, UserId};

/// Supplies ids for new users and groups.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn user_id(&self) -> UserId;
    fn group_id(&self) -> GroupId;
}

/// Generates random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn user_id(&self) -> UserId {
        UserId::random()
    }

    fn group_id(&self) -> GroupId {
        GroupId::random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn generates_distinct_uuid_text() {
        let ids = UuidIdGenerator;
        let first = ids.user_id();
        let second = ids.user_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_ref()).is_ok());
        assert!(Uuid::parse_str(ids.group_id().as_ref()).is_ok());
    }
}
