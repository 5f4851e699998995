//! Account validation for registration and admin-created members

use chrono::{DateTime, Utc};
use shared::{Role, User, UserId};

use crate::error::{WebServerError, WebServerResult};
use crate::types::{NewMemberRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validated account details with the plaintext password still attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub role: Role,
    password: String,
}

impl NewAccount {
    /// Self-registration always creates a regular user
    pub fn from_register(request: &RegisterRequest) -> WebServerResult<Self> {
        Self::validate(
            request.email.as_deref(),
            request.username.as_deref(),
            request.password.as_deref(),
            Role::User,
        )
    }

    pub fn from_member(request: &NewMemberRequest) -> WebServerResult<Self> {
        let role = match request.role.as_deref().map(str::trim) {
            Some(role) if !role.is_empty() => role.parse()?,
            _ => Role::User,
        };
        Self::validate(
            request.email.as_deref(),
            request.username.as_deref(),
            request.password.as_deref(),
            role,
        )
    }

    fn validate(email: Option<&str>, username: Option<&str>, password: Option<&str>, role: Role) -> WebServerResult<Self> {
        let email = email.map(str::trim).filter(|value| !value.is_empty());
        let username = username.map(str::trim).filter(|value| !value.is_empty());
        let password = password.filter(|value| !value.is_empty());

        let (Some(email), Some(username), Some(password)) = (email, username, password) else {
            return Err(WebServerError::validation("Email, username and password are required"));
        };

        if !looks_like_email(email) {
            return Err(WebServerError::validation("Invalid email address"));
        }
        if username.contains('@') {
            return Err(WebServerError::validation("Username cannot contain '@'"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(WebServerError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(Self {
            email: email.to_lowercase(),
            username: username.to_string(),
            role,
            password: password.to_string(),
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Build the stored user once the password has been hashed
    pub fn into_user(self, password_digest: String, now: DateTime<Utc>) -> User {
        User {
            id: UserId::new(),
            email: self.email,
            username: self.username,
            role: self.role,
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `local@domain.tld` with no whitespace
fn looks_like_email(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
