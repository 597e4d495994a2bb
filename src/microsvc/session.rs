//! Identity forwarded by the authentication gateway.

use std::collections::HashMap;

use crate::review::UserId;
use crate::vote::{Actor, ADMIN_ROLE};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLE_HEADER: &str = "x-user-role";

/// Request-scoped variables, usually lowercased HTTP headers:
///
/// ```json
/// { "x-user-id": "42", "x-user-role": "admin" }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// A session for `user_id` with an optional role.
    pub fn for_user(user_id: UserId, role: Option<&str>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_HEADER, user_id.to_string());
        if let Some(role) = role {
            session.set(ROLE_HEADER, role);
        }
        session
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_HEADER)
    }

    pub fn role(&self) -> Option<&str> {
        self.get(ROLE_HEADER)
    }

    /// The acting user, if the session carries a numeric user id.
    pub fn actor(&self) -> Option<Actor> {
        let user_id: UserId = self.user_id()?.trim().parse().ok()?;
        Some(Actor {
            user_id,
            admin: self.role() == Some(ADMIN_ROLE),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}
