use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Fixed at construction time and applied to every hash produced by the
/// owning [`PasswordHasher`]. Verification reads the parameters back out of
/// the PHC string, so hashes created under older settings keep verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over the memory
    pub iterations: u32,
    /// Degree of lane parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    /// 64 MiB, single pass, 8 lanes.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 1,
            parallelism: 8,
        }
    }
}

/// Password hashing implementation.
///
/// Uses Argon2id with a fresh random salt per hash. Output is a PHC string
/// carrying the algorithm name, cost parameters, salt, and digest.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the given cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges argon2 accepts
    pub fn new(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A non-matching password is a normal `Ok(false)` result. The comparison
    /// is constant-time with respect to the digest.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored hash string is structurally corrupt
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        // Cheap parameters keep the test suite fast
        PasswordHasher::new(HashingParams {
            memory_kib: 8 * 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_verify_is_deterministic() {
        let hasher = hasher();
        let hash = hasher.hash("password").expect("Failed to hash password");

        for _ in 0..3 {
            assert!(hasher.verify("password", &hash).unwrap());
            assert!(!hasher.verify("Password", &hash).unwrap());
        }
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = hasher();
        let result = hasher.verify("password", "not_a_phc_string");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_salts_are_unique() {
        let hasher = hasher();
        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rejects_zero_parallelism() {
        let result = PasswordHasher::new(HashingParams {
            memory_kib: 8 * 1024,
            iterations: 1,
            parallelism: 0,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }
}
