//! Session token issuance and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::SessionClaims,
};

/// A freshly signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues HS256-signed, time-limited session tokens.
///
/// Tokens are self-contained: nothing is stored server side, so a token
/// stays valid until its expiry.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_hours: u64,
}

impl SessionIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime_hours: config.jwt_expiration_hours,
        }
    }

    /// Issue a token for a verified user
    pub fn issue(&self, user_id: i32, email: &str) -> AppResult<IssuedSession> {
        self.issue_at(user_id, email, Utc::now())
    }

    fn issue_at(&self, user_id: i32, email: &str, now: DateTime<Utc>) -> AppResult<IssuedSession> {
        let expires_at = i64::try_from(self.lifetime_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::Internal("Token lifetime out of range".to_string()))?;
        let claims = SessionClaims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))
    }
}
