//! Team member list

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use shared::{ProcessId, UserSummary, process_info};

use crate::core::NewAccount;
use crate::error::{WebServerError, WebServerResult};
use crate::services::{SessionClaims, hash_password};
use crate::traits::{OrderStore, UserStore};
use crate::types::NewMemberRequest;
use crate::web::extract::JsonBody;
use crate::webserver_impl::WebServer;

/// `GET /api/members`: newest first
pub async fn list_members<O, U>(State(webserver): State<WebServer<O, U>>) -> WebServerResult<Json<Vec<UserSummary>>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let mut members: Vec<UserSummary> = webserver.users().list().await?.iter().map(UserSummary::from).collect();
    members.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(members))
}

/// `POST /api/members`: admins only
pub async fn add_member<O, U>(
    State(webserver): State<WebServer<O, U>>,
    Extension(claims): Extension<SessionClaims>,
    JsonBody(request): JsonBody<NewMemberRequest>,
) -> WebServerResult<(StatusCode, Json<UserSummary>)>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    if !claims.is_admin() {
        return Err(WebServerError::forbidden("Admin access required"));
    }

    let account = NewAccount::from_member(&request)?;
    let digest = hash_password(webserver.hasher().clone(), account.password().to_string()).await?;
    let user = webserver.users().insert(account.into_user(digest, Utc::now())).await?;

    process_info!(ProcessId::current(), "👥 {} added member {} ({})", claims.email, user.username, user.role);
    Ok((StatusCode::CREATED, Json(UserSummary::from(&user))))
}
