//! Salted-digest password hasher adapter.
//!
//! Stored form is `v1$<salt-hex>$<digest-hex>` with a per-credential random
//! salt. Verification recomputes the digest and compares in constant time.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::PasswordHash;

const SCHEME: &str = "v1";
const SALT_LEN: usize = 16;

/// SHA-256 based hasher behind the password-hasher port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    fn digest(salt: &[u8], plain: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(plain.as_bytes());
        hasher.finalize().to_vec()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0_u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHasherError> {
        let salt: [u8; SALT_LEN] = rand::thread_rng().r#gen();
        let digest = Self::digest(&salt, plain);
        Ok(PasswordHash::new(format!(
            "{SCHEME}${}${}",
            hex::encode(salt),
            hex::encode(digest)
        )))
    }

    fn verify(&self, plain: &str, hash: &PasswordHash) -> bool {
        let mut parts = hash.as_str().split('$');
        let (Some(scheme), Some(salt), Some(digest), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if scheme != SCHEME {
            return false;
        }
        let (Ok(salt), Ok(digest)) = (hex::decode(salt), hex::decode(digest)) else {
            return false;
        };
        constant_time_eq(&Self::digest(&salt, plain), &digest)
    }
}
