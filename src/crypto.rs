//! Password hashing and random identifiers.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;

use crate::AdminError;

/// Hashes and verifies employee passwords.
///
/// ```rust
/// use backoffice::crypto::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("secret1").unwrap();
/// assert!(hasher.verify("secret1", &hash).unwrap());
/// assert!(!hasher.verify("secret2", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    ///
    /// Returns `AdminError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AdminError>;

    /// # Errors
    ///
    /// Returns `AdminError::PasswordHashError` if the stored hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AdminError>;
}

/// Argon2id hasher with configurable cost parameters.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// 64 MiB memory, 3 iterations, 4 lanes.
    #[must_use]
    pub fn production() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AdminError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| AdminError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AdminError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AdminError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AdminError::PasswordHashError)?;

        // parameters come from the PHC string
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Random alphanumeric string, used for token ids.
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// New 24-character lowercase hex identifier for documents, options,
/// points, roles and employees.
pub fn generate_object_id() -> String {
    let bytes: [u8; 12] = rand::random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::is_object_id;

    #[test]
    fn test_generate_token_length() {
        assert_eq!(generate_token(16).len(), 16);
        assert!(generate_token(32).chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_object_ids_are_valid_and_unique() {
        let a = generate_object_id();
        let b = generate_object_id();
        assert!(is_object_id(&a));
        assert!(is_object_id(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_argon2_roundtrip_with_custom_params() {
        let hasher = Argon2Hasher::new(8192, 1, 1);
        let hash = hasher.hash("employee-pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("employee-pass", &hash).unwrap());
        assert!(!hasher.verify("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = Argon2Hasher::default();
        assert_eq!(
            hasher.verify("whatever", "not-a-phc-string"),
            Err(AdminError::PasswordHashError)
        );
    }
}
