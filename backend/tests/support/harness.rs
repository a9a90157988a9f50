//! Services wired over one repository, for integration tests.
//!
//! Integration tests compile as separate crates, so the in-crate fixtures are
//! not visible here. Include with `#[path = "support/harness.rs"]`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use user_groups::domain::ports::{
    CreateGroupRequest, CreateUserRequest, GroupOperations, IdGenerator, Repository,
    UserOperations,
};
use user_groups::domain::{Group, GroupId, GroupService, User, UserId, UserService};

/// Hands out readable sequential ids: `u1`, `u2`, ... and `g1`, `g2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    users: AtomicUsize,
    groups: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn user_id(&self) -> UserId {
        let next = self.users.fetch_add(1, Ordering::Relaxed) + 1;
        UserId::new(format!("u{next}")).expect("sequential user id is valid")
    }

    fn group_id(&self) -> GroupId {
        let next = self.groups.fetch_add(1, Ordering::Relaxed) + 1;
        GroupId::new(format!("g{next}")).expect("sequential group id is valid")
    }
}

/// Both services over one repository, plus the repository for direct checks.
pub struct Harness<R> {
    pub repository: Arc<R>,
    pub users: UserService<R>,
    pub groups: GroupService<R>,
}

impl<R: Repository + 'static> Harness<R> {
    pub fn over(repository: R) -> Self {
        let repository = Arc::new(repository);
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIds::default());
        Self {
            users: UserService::new(Arc::clone(&repository), Arc::clone(&ids)),
            groups: GroupService::new(Arc::clone(&repository), ids),
            repository,
        }
    }

    /// Create a user named `name` and return its generated id.
    pub async fn add_user(&self, name: &str) -> UserId {
        let response = self
            .users
            .create_user(CreateUserRequest {
                name: name.to_owned(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .await
            .expect("user is created");
        response.user.id().clone()
    }

    /// Create a group over existing users and return its generated id.
    pub async fn add_group(&self, name: &str, members: &[&UserId]) -> GroupId {
        let response = self
            .groups
            .create_group(CreateGroupRequest {
                name: name.to_owned(),
                user_ids: members.iter().map(|id| id.to_string()).collect(),
            })
            .await
            .expect("group is created");
        response.group.id
    }

    /// Stored group with its member ids, read without the services.
    pub async fn stored_group(&self, id: &GroupId) -> Option<Group> {
        self.repository
            .groups()
            .find(id)
            .await
            .expect("group lookup succeeds")
    }

    pub async fn stored_user(&self, id: &UserId) -> Option<User> {
        self.repository
            .users()
            .find(id)
            .await
            .expect("user lookup succeeds")
    }
}
