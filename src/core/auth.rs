use crate::utils::error::{IntakeError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const MSG_INVALID_TOKEN: &str = "Could not authenticate token";

#[derive(Debug, Serialize, Deserialize)]
struct IntakeClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Time claims checked after signature verification. A non-numeric value
/// fails to deserialize and rejects the token.
#[derive(Debug, Deserialize)]
struct TimeClaims {
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    nbf: Option<i64>,
}

/// Verifies HMAC-signed JWTs against the shared key.
///
/// Only signature, expiry and not-before are checked. `exp` and `nbf` are
/// optional but enforced when present.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<()> {
        let data = decode::<TimeClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::info!("Token rejected: {}", e);
            IntakeError::auth(MSG_INVALID_TOKEN)
        })?;

        // jsonwebtoken 只解析非負的 u64 時間欄位，負值在此補檢查
        let now = chrono::Utc::now().timestamp();
        if data.claims.exp.is_some_and(|exp| exp <= now) {
            tracing::info!("Token rejected: expired");
            return Err(IntakeError::auth(MSG_INVALID_TOKEN));
        }
        if data.claims.nbf.is_some_and(|nbf| nbf > now) {
            tracing::info!("Token rejected: not yet valid");
            return Err(IntakeError::auth(MSG_INVALID_TOKEN));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

/// Signs an HS256 token for local testing of the intake endpoint.
pub fn issue_token(secret: &str, subject: &str, ttl_seconds: i64) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = IntakeClaims {
        sub: subject.to_string(),
        iat: now,
        exp: now.saturating_add(ttl_seconds),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| IntakeError::ConfigError {
        message: format!("Failed to sign token: {}", e),
    })
}
