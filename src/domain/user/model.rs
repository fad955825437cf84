//! User domain entity

use chrono::{DateTime, Utc};

/// User role — a closed enumeration; authorization decisions only ever
/// compare against these variants, never against free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Parse a role string. Unknown values are rejected rather than
    /// defaulted, so a tampered token cannot smuggle in a new role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account allowed to log in.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("staff"), Some(UserRole::Staff));
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(UserRole::parse("superuser"), None);
        assert_eq!(UserRole::parse("Admin"), None);
        assert_eq!(UserRole::parse(""), None);
    }
}
