//! Canonical account roles.
//!
//! Role strings arrive from two places: API request bodies and stored account
//! rows. Both go through [`Role::parse`] (or the serde aliases, which accept
//! the same spellings), so the legacy names only exist at the boundary and
//! the rest of the code deals in the closed enum.

use serde::{Deserialize, Serialize};

/// Account role, one of a closed set.
///
/// The legacy spellings "manager" and "user" are accepted as input for
/// backward compatibility and normalize to `ClubManager` and
/// `RegisteredUser`; they are never written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "clubManager", alias = "manager")]
    ClubManager,
    #[serde(rename = "coach")]
    Coach,
    #[serde(rename = "registeredUser", alias = "user")]
    RegisteredUser,
}

impl Role {
    /// Parse a role string, accepting canonical names and legacy aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "clubManager" | "manager" => Some(Role::ClubManager),
            "coach" => Some(Role::Coach),
            "registeredUser" | "user" => Some(Role::RegisteredUser),
            _ => None,
        }
    }

    /// Canonical name, as stored and as rendered in responses and messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ClubManager => "clubManager",
            Role::Coach => "coach",
            Role::RegisteredUser => "registeredUser",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("clubManager"), Some(Role::ClubManager));
        assert_eq!(Role::parse("coach"), Some(Role::Coach));
        assert_eq!(Role::parse("registeredUser"), Some(Role::RegisteredUser));
    }

    #[test]
    fn parses_legacy_aliases_to_canonical() {
        assert_eq!(Role::parse("manager"), Some(Role::ClubManager));
        assert_eq!(Role::parse("user"), Some(Role::RegisteredUser));
    }

    #[test]
    fn rejects_unknown_and_wrong_case() {
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serde_accepts_aliases_and_emits_canonical() {
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::ClubManager);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"clubManager\"");

        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::RegisteredUser);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"registeredUser\"");
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Role::ClubManager.to_string(), "clubManager");
        assert_eq!(Role::RegisteredUser.to_string(), "registeredUser");
    }
}
