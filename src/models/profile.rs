//! Authenticated user and token types

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::api::SecretString;

/// The logged-in user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.username)
        } else {
            write!(f, "{} <{}>", self.username, self.email)
        }
    }
}

/// Access/refresh pair issued by the token endpoint
#[derive(Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Payload for account registration
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialize() {
        let json = r#"{"id": 1, "username": "asha", "email": "asha@example.com", "profile_pic": null}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, UserId::new(1));
        assert_eq!(profile.to_string(), "asha <asha@example.com>");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"access": "abc.def", "refresh": "ghi.jkl"}"#).unwrap();
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("abc.def"));
        assert!(debug.contains("REDACTED"));
    }
}
