use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::VerifiedIdentity;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access token lifetime.
const TOKEN_TTL_SECS: i64 = 15 * 60;

/// Mint an access token for an externally verified login.
pub fn mint_access_token(
    sub: &str,
    email: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("failed to read current time"))?
        .as_secs() as i64;

    let claims = VerifiedIdentity {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        iat,
        exp: iat + TOKEN_TTL_SECS,
        extra: serde_json::Map::new(),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("failed to encode access token: {e}")))
}

/// Verify an access token and return the identity it proves.
///
/// Failure modes are deliberately coarse for callers:
/// - past expiry → [`AppError::ExpiredToken`] (caller should re-authenticate)
/// - everything else (bad signature, malformed, wrong algorithm) →
///   [`AppError::InvalidToken`]
///
/// Verification is stateless and never retried.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<VerifiedIdentity, AppError> {
    // Default Validation already checks exp; pin the algorithm to the
    // configured one so tokens can't downgrade it.
    let validation = Validation::new(security.algorithm);

    decode::<VerifiedIdentity>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::expired_token(),
        _ => {
            tracing::debug!(error = %e, "token verification failed");
            AppError::invalid_token()
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_access_token, verify_access_token, TOKEN_TTL_SECS};
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = security();
        let now = SystemTime::now();

        let token =
            mint_access_token("sub-roundtrip-123", Some("coach@lions.test"), now, &security)
                .unwrap();
        let identity = verify_access_token(&token, &security).unwrap();

        assert_eq!(identity.sub, "sub-roundtrip-123");
        assert_eq!(identity.email.as_deref(), Some("coach@lions.test"));
        assert_eq!(
            identity.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(identity.exp, identity.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_distinct_from_invalid() {
        let security = security();
        // Minted long enough ago that the TTL has passed.
        let then = SystemTime::now() - Duration::from_secs(20 * 60);
        let token = mint_access_token("sub-expired-456", None, then, &security).unwrap();

        match verify_access_token(&token, &security) {
            Err(AppError::ExpiredToken) => {}
            other => panic!("expected ExpiredToken, got {other:?}"),
        }
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let token =
            mint_access_token("sub-bad-sig-789", None, SystemTime::now(), &security_a).unwrap();

        let security_b = SecurityConfig::new("secret-B".as_bytes());
        match verify_access_token(&token, &security_b) {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_invalid() {
        match verify_access_token("not-a-jwt-at-all", &security()) {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }
}
