//! Group aggregate.
//!
//! A group owns an ordered list of member ids. The entity only checks the
//! shape of that list (at most [`GROUP_MEMBERS_MAX`] entries, kept in
//! insertion order, duplicates preserved); whether the ids point at stored
//! users is checked by the group service before anything is written.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum length of a group name, in characters.
pub const GROUP_NAME_MAX: usize = 30;
/// Maximum number of member ids a group may hold.
pub const GROUP_MEMBERS_MAX: usize = 5;

/// Validation errors returned by the [`Group`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    #[error("group id must not be empty")]
    EmptyId,
    #[error("group name must not be empty")]
    EmptyName,
    #[error("group name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("group may have at most {max} members")]
    TooManyMembers { max: usize },
    #[error("member ids must not be empty")]
    InvalidMemberId,
}

/// Opaque group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Validate and construct a [`GroupId`].
    pub fn new(id: impl Into<String>) -> Result<Self, GroupValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GroupValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`GroupId`] holding UUID v4 text.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<GroupId> for String {
    fn from(value: GroupId) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Group name, 1 to [`GROUP_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    /// Validate and construct a [`GroupName`].
    pub fn new(name: impl Into<String>) -> Result<Self, GroupValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }
        if name.chars().count() > GROUP_NAME_MAX {
            return Err(GroupValidationError::NameTooLong {
                max: GROUP_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<GroupName> for String {
    fn from(value: GroupName) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A named set of member user ids.
///
/// ## Invariants
/// - `name` holds 1 to [`GROUP_NAME_MAX`] characters.
/// - `member_ids` holds at most [`GROUP_MEMBERS_MAX`] ids, in insertion order.
///
/// # Examples
/// ```
/// use user_groups::domain::Group;
///
/// let group = Group::try_from_strings("g1", "Eng", ["u1", "u2"]).expect("valid group");
/// assert_eq!(group.member_ids().len(), 2);
///
/// let crowded = Group::try_from_strings("g2", "Ops", ["a", "b", "c", "d", "e", "f"]);
/// assert!(crowded.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "GroupDto", into = "GroupDto")]
pub struct Group {
    id: GroupId,
    name: GroupName,
    member_ids: Vec<UserId>,
}

impl Group {
    /// Build a group from validated components, checking the member count.
    pub fn new(
        id: GroupId,
        name: GroupName,
        member_ids: Vec<UserId>,
    ) -> Result<Self, GroupValidationError> {
        if member_ids.len() > GROUP_MEMBERS_MAX {
            return Err(GroupValidationError::TooManyMembers {
                max: GROUP_MEMBERS_MAX,
            });
        }
        Ok(Self {
            id,
            name,
            member_ids,
        })
    }

    /// Fallible constructor validating every field.
    pub fn try_from_strings<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        member_ids: I,
    ) -> Result<Self, GroupValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = GroupId::new(id)?;
        let name = GroupName::new(name)?;
        let member_ids = member_ids
            .into_iter()
            .map(|member| UserId::new(member).map_err(|_| GroupValidationError::InvalidMemberId))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, name, member_ids)
    }

    /// Name-only candidate used when renaming; carries no members.
    pub fn with_name(id: GroupId, name: GroupName) -> Self {
        Self {
            id,
            name,
            member_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    /// Member ids in insertion order.
    pub fn member_ids(&self) -> &[UserId] {
        &self.member_ids
    }

    pub fn has_members(&self) -> bool {
        !self.member_ids.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupDto {
    id: String,
    name: String,
    #[serde(default)]
    member_ids: Vec<String>,
}

impl From<Group> for GroupDto {
    fn from(value: Group) -> Self {
        let Group {
            id,
            name,
            member_ids,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            member_ids: member_ids.into_iter().map(String::from).collect(),
        }
    }
}

impl TryFrom<GroupDto> for Group {
    type Error = GroupValidationError;

    fn try_from(value: GroupDto) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.id, value.name, value.member_ids)
    }
}
