//! Signed-in session, roles, and role-based routing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staff_core::EntityId;
use staff_core::normalize::probe::{Probe, first_text};

/// Credentials and identity of the signed-in user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<EntityId>,
    pub role: Role,
    /// Raw user object from the login response, when the backend sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

const PROFILE_EMAIL: &[Probe] = &[
    Probe::Field("email"),
    Probe::Field("user.email"),
    Probe::Field("username"),
];

impl Session {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>, role: Role) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            user_id: None,
            role,
            profile: None,
        }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: EntityId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Value) -> Self {
        self.profile = Some(profile);
        self
    }

    /// The user's email, from the profile blob or else the access token claims.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.profile
            .as_ref()
            .and_then(|p| first_text(p, PROFILE_EMAIL))
            .or_else(|| crate::claims::email(&self.access_token))
            .map(|e| e.to_lowercase())
    }
}

/// Application role as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Hr,
    Employee,
    Unknown,
}

impl Role {
    /// Read a role sent as an integer code (`1`-`4`) or a name.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(1) => Self::Admin,
                Some(2) => Self::Manager,
                Some(3) => Self::Hr,
                Some(4) => Self::Employee,
                _ => Self::Unknown,
            },
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "admin" | "administrator" => Self::Admin,
                "2" | "manager" | "project_manager" => Self::Manager,
                "3" | "hr" => Self::Hr,
                "4" | "employee" => Self::Employee,
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Hr => "hr",
            Self::Employee => "employee",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dashboard a signed-in user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardRoute {
    Admin,
    Manager,
    Hr,
    Employee,
}

impl DashboardRoute {
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Manager => Self::Manager,
            Role::Hr => Self::Hr,
            Role::Employee | Role::Unknown => Self::Employee,
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Manager => "/manager",
            Self::Hr => "/hr",
            Self::Employee => "/employees",
        }
    }
}
