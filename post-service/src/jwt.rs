/// Validation-only JWT helpers
///
/// Tokens are minted by the external identity service with its RSA private
/// key; this service holds only the public key and validates with RS256.
/// No symmetric algorithms are accepted, so a forged token signed with the
/// public key itself is rejected outright.
///
/// `initialize_validation_key` must be called during startup before any
/// request is served; the key is immutable afterwards.
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// Claims carried by identity-service access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id, decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Install the RSA public key used to validate tokens
///
/// Can only succeed once; subsequent calls return an error.
pub fn initialize_validation_key(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT key not initialized. Call initialize_validation_key() during startup.")
    })
}

/// Validate a token and return its claims
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

/// Extract the user id from a validated token
pub fn extract_user_id(token: &str) -> Result<i64> {
    let token_data = validate_token(token)?;
    token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| anyhow!("Invalid user id in token subject"))
}
