use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use secrecy::{ExposeSecret, SecretString};

use crate::utils::validation::{validate_email, validate_length};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password_hash: SecretString,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash: SecretString::new(password_hash.into_boxed_str()),
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Public view of a user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_length("name", self.name.trim(), 2, 255)?;
        validate_email(&self.email)?;
        validate_length("password", self.password.expose_secret(), 6, 72)?;
        Ok(())
    }
}

impl std::fmt::Display for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Email: {}", self.name, self.email)
    }
}

pub fn serialize_secret_string<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

pub fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into_boxed_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::new(password.into()),
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("USER".parse::<UserRole>(), Ok(UserRole::User));
        assert!("owner".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn registration_validation() {
        assert!(registration("Budi", "budi@example.com", "secret1").validate().is_ok());
        assert!(registration("B", "budi@example.com", "secret1").validate().is_err());
        assert!(registration("Budi", "not-an-email", "secret1").validate().is_err());
        assert!(registration("Budi", "budi@example.com", "short").validate().is_err());
        assert!(registration("Budi", "budi@example.com", &"x".repeat(73)).validate().is_err());
    }

    #[test]
    fn serialized_user_redacts_hash() {
        let user = User::new("Budi".into(), "budi@example.com".into(), "$2b$hash".into(), UserRole::User);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["password_hash"], "[REDACTED]");
    }
}
