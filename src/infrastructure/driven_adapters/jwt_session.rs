//! JWT Session Verifier
//!
//! Validates HS256 session tokens issued by the identity provider.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::gateways::SessionVerifier;
use crate::domain::models::session::{AccessToken, Session};
use crate::infrastructure::driven_adapters::config::SessionConfig;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Credential for the upstream service
    pub access_token: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session::new(
            claims.sub,
            claims.name,
            claims.email,
            AccessToken::new(claims.access_token),
        )
    }
}

/// [`SessionVerifier`] backed by `jsonwebtoken`
pub struct JwtSessionVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtSessionVerifier {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        // Explicit algorithm to prevent algorithm confusion attacks
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_secs;

        let key = if config.secret.is_empty() {
            tracing::warn!("No session secret configured; all session tokens will be rejected");
            None
        } else {
            Some(DecodingKey::from_secret(config.secret.expose().as_bytes()))
        };

        Self { key, validation }
    }
}

impl SessionVerifier for JwtSessionVerifier {
    fn verify(&self, token: &str) -> Option<Session> {
        let key = self.key.as_ref()?;
        match decode::<SessionClaims>(token, key, &self.validation) {
            Ok(data) if !data.claims.access_token.is_empty() => Some(data.claims.into()),
            Ok(_) => {
                tracing::debug!("Session token carries no access token");
                None
            }
            Err(err) => {
                // Don't log the token itself
                tracing::debug!(error = %err, "Rejected session token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::driven_adapters::config::SessionSecret;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-session-secret";

    fn session_config(secret: &str) -> SessionConfig {
        SessionConfig {
            secret: SessionSecret::new(secret),
            cookie_name: "session-token".to_string(),
            leeway_secs: 0,
        }
    }

    fn token(secret: &str, access_token: &str, exp_offset: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            name: Some("Ada".to_string()),
            email: None,
            access_token: access_token.to_string(),
            iat: now,
            exp: now + exp_offset,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_valid_token_yields_session() {
        let verifier = JwtSessionVerifier::new(&session_config(SECRET));
        let session = verifier.verify(&token(SECRET, "upstream-token", 3600)).unwrap();
        assert_eq!(session.user_id(), "user-1");
        assert_eq!(session.name(), Some("Ada"));
        assert_eq!(session.access_token().as_str(), "upstream-token");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = JwtSessionVerifier::new(&session_config(SECRET));
        assert!(verifier.verify(&token(SECRET, "upstream-token", -3600)).is_none());
    }

    #[test]
    fn test_wrong_signature_is_rejected() {
        let verifier = JwtSessionVerifier::new(&session_config(SECRET));
        assert!(verifier.verify(&token("another-secret", "upstream-token", 3600)).is_none());
    }

    #[test]
    fn test_missing_secret_rejects_everything() {
        let verifier = JwtSessionVerifier::new(&session_config(""));
        assert!(verifier.verify(&token("", "upstream-token", 3600)).is_none());
    }

    #[test]
    fn test_empty_access_token_is_rejected() {
        let verifier = JwtSessionVerifier::new(&session_config(SECRET));
        assert!(verifier.verify(&token(SECRET, "", 3600)).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let verifier = JwtSessionVerifier::new(&session_config(SECRET));
        assert!(verifier.verify("not-a-jwt").is_none());
    }
}
