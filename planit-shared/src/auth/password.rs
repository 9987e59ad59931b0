/// Password hashing using Argon2id
///
/// Passwords are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
/// with a fresh random salt per hash, so hashing the same password twice never
/// produces the same stored secret.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// # Example
///
/// ```
/// use planit_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
///
/// assert!(verify_password("super_secret_password_123", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Hashes a password using Argon2id with a fresh random salt
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash):
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    // m_cost: 64 MB, t_cost: 3 iterations, p_cost: 4 lanes
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Recomputes the hash using the salt embedded in the PHC string and performs
/// a constant-time comparison. Fails closed: a malformed or unparseable stored
/// hash verifies as `false` rather than surfacing an error the caller could
/// mistake for success.
///
/// # Example
///
/// ```
/// use planit_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct_password")?;
///
/// assert!(verify_password("correct_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// assert!(!verify_password("correct_password", "not-a-phc-string"));
/// # Ok(())
/// # }
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    // Parameters are embedded in the hash; comparison is constant-time
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
