//! Password hashing adapter.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and parameters, so verification never needs extra configuration.

use argon2::{Algorithm, Argon2, Params, Version};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Build a hasher with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hasher with explicit memory (KiB) and iteration costs.
    ///
    /// Hashes already stored keep verifying, since each PHC string records
    /// the parameters it was made with.
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }
}
