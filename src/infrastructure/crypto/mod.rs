pub mod passphrase;

pub use passphrase::{hash_passphrase, verify_passphrase};
