//! Password hashing with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`),
//! so the algorithm, cost and salt travel with the digest and verification
//! needs no other state.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, Result};

/// Memory cost in KiB.
pub const HASH_MEMORY_COST_KIB: u32 = 19_456;

/// Number of Argon2 passes.
pub const HASH_TIME_COST: u32 = 2;

/// Degree of parallelism.
pub const HASH_PARALLELISM: u32 = 1;

/// Salted adaptive password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("memory_cost_kib", &HASH_MEMORY_COST_KIB)
            .field("time_cost", &HASH_TIME_COST)
            .field("parallelism", &HASH_PARALLELISM)
            .finish()
    }
}

impl PasswordHasher {
    /// Create a hasher with the fixed cost parameters.
    pub fn new() -> Result<Self> {
        let params = Params::new(HASH_MEMORY_COST_KIB, HASH_TIME_COST, HASH_PARALLELISM, None)
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// Returns `Ok(false)` on mismatch. A digest that cannot be parsed, or
    /// that names an algorithm other than Argon2, is a `HashFormat` error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool> {
        let parsed = PasswordHash::new(digest).map_err(|e| AuthError::HashFormat(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashFormat(e.to_string())),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// Property: a hashed password always verifies, a mutated one never does
        #[test]
        fn prop_hash_verify(password in "[ -~]{1,32}", suffix in "[a-z0-9]{1,4}") {
            let hasher = PasswordHasher::new().unwrap();
            let digest = hasher.hash(&password).unwrap();

            prop_assert!(hasher.verify(&password, &digest).unwrap());

            let mutated = format!("{}{}", password, suffix);
            prop_assert!(!hasher.verify(&mutated, &digest).unwrap());
        }
    }
}
