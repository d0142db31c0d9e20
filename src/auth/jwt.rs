use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::models::user::{User, UserRole};

/// Payload carried inside a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid, // Subject (user id)
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64, // Expiration time (as UTC timestamp)
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed or its signature is invalid")]
    Malformed,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

pub fn issue_token(user: &User, settings: &JwtSettings) -> Result<String, TokenError> {
    issue_token_at(user.id, &user.email, user.role, Utc::now(), settings)
}

/// Issue a token as if it were `now`. Expiry is `now + ttl`.
pub fn issue_token_at(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    now: DateTime<Utc>,
    settings: &JwtSettings,
) -> Result<String, TokenError> {
    let expires_at = now + settings.token_ttl();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &settings.encoding_key())
        .map_err(TokenError::Signing)
}

pub fn validate_token(token: &str, settings: &JwtSettings) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(token, &settings.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn settings(hours: i64) -> JwtSettings {
        JwtSettings::new("test-secret".to_string(), hours)
    }

    #[test]
    fn freshly_issued_token_validates_with_matching_claims() {
        let settings = settings(1);
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let token = issue_token_at(user_id, "admin@league.local", UserRole::Admin, now, &settings).unwrap();

        let claims = validate_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "admin@league.local");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_past_its_ttl_is_expired() {
        let settings = settings(1);
        let issued = Utc::now() - Duration::hours(2);
        let token = issue_token_at(Uuid::new_v4(), "user@league.local", UserRole::User, issued, &settings).unwrap();

        assert!(matches!(validate_token(&token, &settings), Err(TokenError::Expired)));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let token = issue_token_at(Uuid::new_v4(), "user@league.local", UserRole::User, Utc::now(), &settings(1)).unwrap();
        let other = JwtSettings::new("another-secret".to_string(), 1);

        assert!(matches!(validate_token(&token, &other), Err(TokenError::Malformed)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(validate_token("not.a.jwt", &settings(1)), Err(TokenError::Malformed)));
        assert!(matches!(validate_token("", &settings(1)), Err(TokenError::Malformed)));
    }

    #[test]
    fn default_ttl_is_a_day() {
        let user = User::new("Budi".into(), "budi@example.com".into(), "hash".into(), UserRole::User);
        let settings = settings(24);
        let claims = validate_token(&issue_token(&user, &settings).unwrap(), &settings).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.is_admin());
    }
}
