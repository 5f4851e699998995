//! Login, registration and logout

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use shared::{ProcessId, UserSummary, process_info, process_warn};

use crate::core::NewAccount;
use crate::error::{WebServerError, WebServerResult};
use crate::services::{hash_password, verify_password};
use crate::traits::{OrderStore, UserStore};
use crate::types::{LoginRequest, RegisterRequest, SessionResponse, SuccessResponse};
use crate::web::extract::JsonBody;
use crate::webserver_impl::WebServer;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// `POST /api/auth/login`: sets the session cookie
pub async fn login<O, U>(
    State(webserver): State<WebServer<O, U>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> WebServerResult<Response>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let email = request.email.as_deref().map(str::trim).filter(|email| !email.is_empty());
    let password = request.password.as_deref().filter(|password| !password.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(WebServerError::validation("Email and password are required"));
    };

    let user = webserver
        .users()
        .find_by_email(email)
        .await?
        .ok_or_else(|| WebServerError::unauthorized(INVALID_CREDENTIALS))?;

    let verified = verify_password(webserver.hasher().clone(), password.to_string(), user.password_digest.clone())
        .await
        .unwrap_or_else(|e| {
            process_warn!(ProcessId::current(), "⚠️ Unreadable password digest for {}: {}", user.id, e);
            false
        });
    if !verified {
        return Err(WebServerError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = webserver.sessions().issue(&user, Utc::now())?;
    let cookie = webserver.sessions().session_cookie(token);

    process_info!(ProcessId::current(), "🔑 {} signed in", user.username);
    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(SessionResponse {
            success: true,
            user: UserSummary::from(&user),
        }),
    )
        .into_response())
}

/// `POST /api/auth/register`: creates a regular user; the caller logs in separately
pub async fn register<O, U>(
    State(webserver): State<WebServer<O, U>>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> WebServerResult<(StatusCode, Json<SessionResponse>)>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let account = NewAccount::from_register(&request)?;
    let digest = hash_password(webserver.hasher().clone(), account.password().to_string()).await?;
    let user = webserver.users().insert(account.into_user(digest, Utc::now())).await?;

    process_info!(ProcessId::current(), "👤 Registered {}", user.username);
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            user: UserSummary::from(&user),
        }),
    ))
}

/// `POST /api/auth/logout`: clears the session cookie
pub async fn logout<O, U>(State(webserver): State<WebServer<O, U>>) -> Response
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let cookie = webserver.sessions().clear_cookie();
    ([(header::SET_COOKIE, cookie.to_string())], Json(SuccessResponse::ok())).into_response()
}
