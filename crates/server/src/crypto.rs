// Password hashing and access tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use plume_core::port::{PasswordHasher, TokenProvider};
use plume_core::{Error, Result};

const SALT_LEN: usize = 16;

/// Salted SHA-256 hashing. The stored form is `hex(salt)$hex(digest)`
/// so verification can recover the salt without a separate column.
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    fn digest(salt: &[u8], password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Ok(format!(
            "{}${}",
            hex::encode(salt),
            Self::digest(&salt, password)
        ))
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool> {
        let (salt_hex, digest_hex) = stored
            .split_once('$')
            .ok_or_else(|| Error::internal("stored password hash is malformed"))?;
        let salt = hex::decode(salt_hex)
            .map_err(|err| Error::internal("stored password salt is not hex").with_source(err))?;
        Ok(Self::digest(&salt, password) == digest_hex)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    iat: i64,
    exp: i64,
}

/// HS256 access tokens carrying the user id as subject.
pub struct JwtTokenProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtTokenProvider {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }
}

impl TokenProvider for JwtTokenProvider {
    fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal("failed to sign access token").with_source(err))
    }

    fn verify(&self, token: &str) -> Result<i64> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|err| Error::validation("invalid access token").with_source(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::ErrorKind;

    #[test]
    fn hash_then_verify_accepts_the_same_password() {
        let hasher = Sha256PasswordHasher;
        let stored = hasher.hash("hunter2-long").unwrap();
        assert!(hasher.verify("hunter2-long", &stored).unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hasher = Sha256PasswordHasher;
        let stored = hasher.hash("correct horse").unwrap();
        assert!(!hasher.verify("battery staple", &stored).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Sha256PasswordHasher;
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        let hasher = Sha256PasswordHasher;
        let err = hasher.verify("anything", "no-separator").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn issue_then_verify_returns_the_subject() {
        let tokens = JwtTokenProvider::new("test-secret", 3600);
        let token = tokens.issue(42).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), 42);
    }

    #[test]
    fn tampered_token_is_a_validation_error() {
        let tokens = JwtTokenProvider::new("test-secret", 3600);
        let mut token = tokens.issue(42).unwrap();
        token.push('x');
        let err = tokens.verify(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = JwtTokenProvider::new("secret-a", 3600);
        let verifier = JwtTokenProvider::new("secret-b", 3600);
        let token = issuer.issue(7).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = JwtTokenProvider::new("test-secret", -120);
        let token = tokens.issue(7).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
