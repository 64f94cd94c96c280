//! User entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Regular,
    Pro,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => "regular",
            UserType::Pro => "pro",
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(UserType::Regular),
            "pro" => Ok(UserType::Pro),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
///
/// `password_hash` is the hex-encoded salted hash, never the plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

/// Sign-up data with the plaintext password, before hashing.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

/// Login data.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_round_trip_through_storage_string() {
        for t in [UserType::Regular, UserType::Pro] {
            assert_eq!(t.as_str().parse::<UserType>().unwrap(), t);
        }
    }

    #[test]
    fn test_user_type_rejects_unknown() {
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn test_user_type_defaults_to_regular() {
        assert_eq!(UserType::default(), UserType::Regular);
    }
}
