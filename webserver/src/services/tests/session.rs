//! Tests for SessionManager and cookie parsing

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{Duration, Utc};
use cookie::SameSite;
use shared::Role;

use super::fixtures::{create_test_session_config, create_test_user};
use crate::config::SessionConfig;
use crate::error::WebServerError;
use crate::services::{SESSION_COOKIE, SessionManager, token_from_headers};

#[test]
fn test_issue_and_verify() {
    let manager = SessionManager::new(&create_test_session_config());
    let user = create_test_user("admin@example.com", "admin", Role::Admin);
    let now = Utc::now();

    let token = manager.issue(&user, now).unwrap();
    let claims = manager.verify(&token).unwrap();

    assert_eq!(claims.user_id(), user.id);
    assert_eq!(claims.email, "admin@example.com");
    assert!(claims.is_admin());
    assert_eq!(claims.exp - claims.iat, Duration::hours(24).num_seconds());
}

#[test]
fn test_expired_token_is_rejected() {
    let manager = SessionManager::new(&create_test_session_config());
    let user = create_test_user("user@example.com", "user", Role::User);

    let token = manager.issue(&user, Utc::now() - Duration::days(2)).unwrap();
    assert!(matches!(manager.verify(&token), Err(WebServerError::TokenError(_))));
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let manager = SessionManager::new(&create_test_session_config());
    let other = SessionManager::new(&SessionConfig {
        secret: b"a-completely-different-secret".to_vec(),
        ..create_test_session_config()
    });
    let user = create_test_user("user@example.com", "user", Role::User);

    let token = other.issue(&user, Utc::now()).unwrap();
    assert!(manager.verify(&token).is_err());
    assert!(manager.verify("garbage").is_err());
}

#[test]
fn test_session_cookie_attributes() {
    let manager = SessionManager::new(&SessionConfig {
        secure_cookies: true,
        ..create_test_session_config()
    });
    let cookie = manager.session_cookie("token-value".to_string());

    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "token-value");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(cookie::time::Duration::seconds(86_400)));
}

#[test]
fn test_clear_cookie_expires_immediately() {
    let manager = SessionManager::new(&create_test_session_config());
    let cookie = manager.clear_cookie();

    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(cookie::time::Duration::ZERO));
    assert!(cookie.to_string().contains("Max-Age=0"));
}

#[test]
fn test_token_from_headers() {
    let mut headers = HeaderMap::new();
    assert_eq!(token_from_headers(&headers), None);

    headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc.def.ghi"));
    assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));

    headers.insert(header::COOKIE, HeaderValue::from_static("session="));
    assert_eq!(token_from_headers(&headers), None);
}
