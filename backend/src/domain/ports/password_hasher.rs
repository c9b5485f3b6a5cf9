//! Port for the one-way credential hashing collaborator.

use super::define_port_error;
use crate::domain::user::PasswordHash;

define_port_error! {
    /// Failures raised while producing a credential digest.
    pub enum PasswordHasherError {
        /// The digest could not be computed or encoded.
        Hashing { message: String } =>
            "credential hashing failed: {message}",
    }
}

/// One-way hash/compare service consumed by the directory and auth gate.
///
/// Implementations must compare in constant time so verification does not
/// leak digest prefixes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest a plaintext password for storage.
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Timing-safe comparison of a plaintext against a stored digest.
    fn verify(&self, plain: &str, hash: &PasswordHash) -> bool;
}
