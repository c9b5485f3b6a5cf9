//! Outbound adapters implementing the domain's driven ports.

pub mod clock;
pub mod memory;
pub mod password;

pub use clock::SystemClock;
pub use password::Sha256PasswordHasher;
