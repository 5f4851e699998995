//! Session guard for protected routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::WebServerError;
use crate::services::token_from_headers;
use crate::traits::{OrderStore, UserStore};
use crate::webserver_impl::WebServer;

/// Reject requests without a valid session; on success the
/// [`SessionClaims`](crate::services::SessionClaims) are stored in the request extensions
pub async fn require_session<O, U>(
    State(webserver): State<WebServer<O, U>>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebServerError>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let token = token_from_headers(request.headers())
        .ok_or_else(|| WebServerError::unauthorized("Authentication required"))?;

    let claims = webserver
        .sessions()
        .verify(&token)
        .map_err(|_| WebServerError::unauthorized("Session expired or invalid"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
