//! User endpoints.
//!
//! ```text
//! POST   /users          {"name":"Ada","email":"ada@example.com"}
//! GET    /users
//! GET    /users/{id}
//! PUT    /users/{id}     {"name":"Ada","email":"ada@example.com"}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, UpdateUserRequest,
};
use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// JSON representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<UserBody>,
}

/// Body for creating or replacing a user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

pub(crate) fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "userId" }))
    })
}

#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let UserPayload { name, email } = payload.into_inner();
    let created = state
        .users
        .create_user(CreateUserRequest { name, email })
        .await?;
    Ok(HttpResponse::Created().json(UserEnvelope {
        user: created.user.into(),
    }))
}

#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let user_id = parse_user_id(path.into_inner())?;
    let found = state.users.get_user(GetUserRequest { user_id }).await?;
    Ok(web::Json(UserEnvelope {
        user: found.user.into(),
    }))
}

#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersEnvelope>> {
    let listed = state.users.get_users().await?;
    Ok(web::Json(UsersEnvelope {
        users: listed.users.into_iter().map(UserBody::from).collect(),
    }))
}

#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(path.into_inner())?;
    let UserPayload { name, email } = payload.into_inner();
    state
        .users
        .update_user(UpdateUserRequest {
            user_id,
            name,
            email,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(path.into_inner())?;
    state.users.delete_user(DeleteUserRequest { user_id }).await?;
    Ok(HttpResponse::NoContent().finish())
}
