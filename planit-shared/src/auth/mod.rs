/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: stateless signed identity assertions (issue/validate)
/// - [`middleware`]: the request-level auth gateway for axum routers
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations, unique
///   salt per hash; verification fails closed on malformed stored secrets
/// - **Tokens**: HS256 signing, fixed 24h expiry, validation failures
///   collapsed to a single opaque outcome
/// - **Gateway**: identity reaches handlers only via request extensions,
///   never from client-supplied fields

pub mod middleware;
pub mod password;
pub mod token;
