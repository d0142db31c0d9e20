// src/models/auth.rs
use serde::{Deserialize, Serialize};
use secrecy::{ExposeSecret, SecretString};

use crate::models::user::UserResponse;
use crate::utils::validation::{validate_email, validate_length};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "crate::models::user::serialize_secret_string",
            deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        validate_length("password", self.password.expose_secret(), 6, usize::MAX)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}
