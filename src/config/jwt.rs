use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Signing material and lifetime for session tokens. Loaded once at startup
/// and shared read-only between workers.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// One year.
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

fn default_expiration_hours() -> i64 {
    24
}

impl JwtSettings {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            expiration_hours,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.expiration_hours
            ));
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }
}
