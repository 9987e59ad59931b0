/// Token issuance and validation
///
/// Identity assertions are JWTs signed with HS256 (HMAC-SHA256) using a
/// process-wide secret. Validity is stateless: a token is good if and only if
/// its signature verifies and it has not expired. There is no server-side
/// session table and no revocation list; a token "dies" only by expiry.
///
/// # Security
///
/// - **Algorithm**: HS256, secret should be at least 32 bytes
/// - **Expiration**: fixed at issuance, 24 hours, checked with zero leeway
/// - **Failure collapsing**: every validation failure (parse, signature,
///   expiry) is reported as the single [`TokenError::Invalid`] so callers
///   cannot probe *why* a token was rejected
///
/// # Example
///
/// ```
/// use planit_shared::auth::token::{issue_token, validate_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let token = issue_token(42, "alice", secret)?;
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, 42);
/// assert_eq!(claims.username, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed token lifetime: 24 hours from issuance
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token operations
///
/// Validation failures deliberately carry no detail: distinguishing a bad
/// signature from an expired token would hand an attacker an oracle.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token failed validation for any reason
    #[error("Invalid or expired token")]
    Invalid,
}

/// Claims embedded in an identity assertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account identifier
    pub sub: i64,

    /// Account username
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an account with the fixed 24h expiration
    pub fn new(user_id: i64, username: &str) -> Self {
        Self::with_expiration(user_id, username, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Creates claims with a custom expiration (tests use this to build
    /// already-expired tokens)
    pub fn with_expiration(user_id: i64, username: &str, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the token has expired (strict: `now >= exp` is expired)
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed identity assertion for an authenticated account
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails
pub fn issue_token(user_id: i64, username: &str, secret: &str) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, username);
    sign_claims(&claims, secret)
}

/// Signs pre-built claims
///
/// Exposed separately so tests can issue tokens with custom expirations.
pub fn sign_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature first, then expiry with zero leeway. Any failure,
/// whatever the cause, is collapsed to [`TokenError::Invalid`].
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|_| TokenError::Invalid)?;

    Ok(token_data.claims)
}
