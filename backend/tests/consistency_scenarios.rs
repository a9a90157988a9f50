//! End-to-end consistency scenarios over the in-memory backend.
//!
//! Each test drives the public user and group operations and checks the
//! cross-aggregate guarantees through the existence services.

use std::sync::Arc;

use rstest::rstest;
use user_groups::domain::ports::{
    CreateGroupRequest, DeleteGroupRequest, DeleteUserRequest, GetGroupRequest, GroupOperations,
    Repository, UpdateGroupRequest, UpdateUserRequest, UserOperations,
};
use user_groups::domain::{
    GroupExistence, GroupExistenceService, GroupId, OperationError, UserExistence,
    UserExistenceService, UserId,
};
use user_groups::outbound::memory::{MemoryRepository, MemoryStore};

#[path = "support/harness.rs"]
mod harness;

use harness::Harness;

fn memory_harness() -> Harness<MemoryRepository> {
    Harness::over(MemoryRepository::new(MemoryStore::new()))
}

fn names<'a>(users: impl IntoIterator<Item = &'a user_groups::domain::User>) -> Vec<String> {
    users
        .into_iter()
        .map(|user| user.name().as_ref().to_owned())
        .collect()
}

#[tokio::test]
async fn group_without_members_is_created_empty() {
    let harness = memory_harness();

    let response = harness
        .groups
        .create_group(CreateGroupRequest {
            name: "Eng".into(),
            user_ids: Vec::new(),
        })
        .await
        .expect("group is created");

    assert_eq!(response.group.name.as_ref(), "Eng");
    assert!(response.group.users.is_empty());
    let stored = harness
        .stored_group(&response.group.id)
        .await
        .expect("group row stored");
    assert!(stored.member_ids().is_empty());
}

#[tokio::test]
async fn group_with_unknown_member_is_rejected_without_writes() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let grace = harness.add_user("Grace").await;

    let error = harness
        .groups
        .create_group(CreateGroupRequest {
            name: "Eng".into(),
            user_ids: vec![ada.to_string(), grace.to_string(), "u-missing".into()],
        })
        .await
        .expect_err("unknown member is rejected");

    assert_eq!(error, OperationError::InvalidUserIds);
    let listed = harness.groups.get_groups().await.expect("groups listed");
    assert!(listed.groups.is_empty());
}

#[tokio::test]
async fn created_group_resolves_stored_member() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;

    let group_id = harness.add_group("Eng", &[&ada]).await;
    let response = harness
        .groups
        .get_group(GetGroupRequest {
            group_id: group_id.clone(),
        })
        .await
        .expect("group is found");

    let [member] = response.group.users.as_slice() else {
        panic!("expected one member, got {:?}", response.group.users);
    };
    assert_eq!(member.id(), &ada);
    assert_eq!(member.name().as_ref(), "Ada");
    assert_eq!(member.email().as_ref(), "ada@example.com");
}

#[tokio::test]
async fn listing_groups_keeps_each_member_order() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let grace = harness.add_user("Grace").await;
    let linus = harness.add_user("Linus").await;

    harness.add_group("Core", &[&grace, &ada]).await;
    harness.add_group("Infra", &[&ada, &linus, &grace]).await;
    harness.add_group("Ops", &[&linus]).await;

    let first = harness.groups.get_groups().await.expect("groups listed");
    let members: Vec<Vec<String>> = first
        .groups
        .iter()
        .map(|group| names(&group.users))
        .collect();

    assert_eq!(
        members,
        vec![
            vec!["Grace".to_owned(), "Ada".to_owned()],
            vec!["Ada".to_owned(), "Linus".to_owned(), "Grace".to_owned()],
            vec!["Linus".to_owned()],
        ]
    );
    let second = harness.groups.get_groups().await.expect("groups listed");
    assert_eq!(first, second);
}

#[tokio::test]
async fn deleting_user_strips_it_from_every_group() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let grace = harness.add_user("Grace").await;
    let core = harness.add_group("Core", &[&ada, &grace]).await;
    let infra = harness.add_group("Infra", &[&grace, &ada]).await;

    harness
        .users
        .delete_user(DeleteUserRequest {
            user_id: ada.clone(),
        })
        .await
        .expect("user is deleted");

    let users = UserExistenceService::new(Arc::clone(&harness.repository));
    let groups = GroupExistenceService::new(Arc::clone(&harness.repository));
    assert!(!users.exists(&ada).await.expect("existence check"));
    assert!(
        !groups
            .has_users_any(std::slice::from_ref(&ada))
            .await
            .expect("reference check")
    );
    for id in [&core, &infra] {
        let stored = harness.stored_group(id).await.expect("group kept");
        assert_eq!(stored.member_ids(), std::slice::from_ref(&grace));
    }
}

#[tokio::test]
async fn renaming_missing_group_changes_nothing() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let core = harness.add_group("Core", &[&ada]).await;

    let error = harness
        .groups
        .update_group(UpdateGroupRequest {
            group_id: GroupId::new("missing-id").expect("valid id"),
            name: "New Name".into(),
        })
        .await
        .expect_err("missing group is reported");

    assert_eq!(error, OperationError::GroupNotFound);
    let stored = harness.stored_group(&core).await.expect("group kept");
    assert_eq!(stored.name().as_ref(), "Core");
    assert_eq!(stored.member_ids(), std::slice::from_ref(&ada));
}

#[tokio::test]
async fn renaming_group_keeps_members() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let core = harness.add_group("Core", &[&ada]).await;

    harness
        .groups
        .update_group(UpdateGroupRequest {
            group_id: core.clone(),
            name: "Platform".into(),
        })
        .await
        .expect("group is renamed");

    let stored = harness.stored_group(&core).await.expect("group kept");
    assert_eq!(stored.name().as_ref(), "Platform");
    assert_eq!(stored.member_ids(), std::slice::from_ref(&ada));
}

#[tokio::test]
async fn deleting_group_leaves_users_in_place() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let core = harness.add_group("Core", &[&ada]).await;

    harness
        .groups
        .delete_group(DeleteGroupRequest {
            group_id: core.clone(),
        })
        .await
        .expect("group is deleted");

    assert!(harness.stored_group(&core).await.is_none());
    assert!(harness.stored_user(&ada).await.is_some());
    let groups = GroupExistenceService::new(Arc::clone(&harness.repository));
    assert!(
        !groups
            .has_users_any(std::slice::from_ref(&ada))
            .await
            .expect("reference check")
    );
}

#[tokio::test]
async fn group_reads_skip_members_without_user_rows() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let grace = harness.add_user("Grace").await;
    let core = harness.add_group("Core", &[&ada, &grace]).await;

    // Drop the user row directly so the association is left dangling.
    let dangling = ada.clone();
    harness
        .repository
        .run_transaction(move |tx| {
            user_groups::domain::ports::unit_of_work(async move {
                tx.users().delete(&dangling).await
            })
        })
        .await
        .expect("user row removed");

    let single = harness
        .groups
        .get_group(GetGroupRequest {
            group_id: core.clone(),
        })
        .await
        .expect("group is found");
    assert_eq!(names(&single.group.users), vec!["Grace".to_owned()]);

    let listed = harness.groups.get_groups().await.expect("groups listed");
    assert_eq!(names(&listed.groups[0].users), vec!["Grace".to_owned()]);
}

#[rstest]
#[case::valid_fields("Ada", "ada@example.com")]
#[case::invalid_email("Ada", "")]
#[tokio::test]
async fn updating_missing_user_is_rejected(#[case] name: &str, #[case] email: &str) {
    let harness = memory_harness();

    let error = harness
        .users
        .update_user(UpdateUserRequest {
            user_id: UserId::new("u-missing").expect("valid id"),
            name: name.into(),
            email: email.into(),
        })
        .await
        .expect_err("update is rejected");

    if email.is_empty() {
        assert!(matches!(error, OperationError::InvalidUserInput(_)));
    } else {
        assert_eq!(error, OperationError::UserNotFound);
    }
}

#[tokio::test]
async fn deleting_user_twice_reports_not_found() {
    let harness = memory_harness();
    let ada = harness.add_user("Ada").await;
    let request = DeleteUserRequest { user_id: ada };

    harness
        .users
        .delete_user(request.clone())
        .await
        .expect("first delete succeeds");
    let error = harness
        .users
        .delete_user(request)
        .await
        .expect_err("second delete fails");

    assert_eq!(error, OperationError::UserNotFound);
}
