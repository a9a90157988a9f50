//! Group endpoints.
//!
//! ```text
//! POST   /groups         {"name":"Eng","userIds":["..."]}
//! GET    /groups
//! GET    /groups/{id}
//! PUT    /groups/{id}    {"name":"Platform"}
//! DELETE /groups/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{
    CreateGroupRequest, DeleteGroupRequest, GetGroupRequest, GroupView, UpdateGroupRequest,
};
use crate::domain::{Error, GroupId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserBody;

/// JSON representation of a group with its member users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBody {
    pub group_id: String,
    pub name: String,
    pub users: Vec<UserBody>,
}

impl From<GroupView> for GroupBody {
    fn from(view: GroupView) -> Self {
        Self {
            group_id: view.id.to_string(),
            name: view.name.as_ref().to_owned(),
            users: view.users.into_iter().map(UserBody::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupEnvelope {
    pub group: GroupBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupsEnvelope {
    pub groups: Vec<GroupBody>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupPayload {
    pub name: String,
    #[serde(default)]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenameGroupPayload {
    pub name: String,
}

fn parse_group_id(raw: String) -> Result<GroupId, Error> {
    GroupId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "groupId" }))
    })
}

#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGroupPayload>,
) -> ApiResult<HttpResponse> {
    let CreateGroupPayload { name, user_ids } = payload.into_inner();
    let created = state
        .groups
        .create_group(CreateGroupRequest { name, user_ids })
        .await?;
    Ok(HttpResponse::Created().json(GroupEnvelope {
        group: created.group.into(),
    }))
}

#[get("/groups/{id}")]
pub async fn get_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupEnvelope>> {
    let group_id = parse_group_id(path.into_inner())?;
    let found = state.groups.get_group(GetGroupRequest { group_id }).await?;
    Ok(web::Json(GroupEnvelope {
        group: found.group.into(),
    }))
}

#[get("/groups")]
pub async fn list_groups(state: web::Data<HttpState>) -> ApiResult<web::Json<GroupsEnvelope>> {
    let listed = state.groups.get_groups().await?;
    Ok(web::Json(GroupsEnvelope {
        groups: listed.groups.into_iter().map(GroupBody::from).collect(),
    }))
}

#[put("/groups/{id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RenameGroupPayload>,
) -> ApiResult<HttpResponse> {
    let group_id = parse_group_id(path.into_inner())?;
    state
        .groups
        .update_group(UpdateGroupRequest {
            group_id,
            name: payload.into_inner().name,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/groups/{id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let group_id = parse_group_id(path.into_inner())?;
    state
        .groups
        .delete_group(DeleteGroupRequest { group_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
