//! Hashing engines
//!
//! Cryptographic digests rendered as hex, fast seeded non-cryptographic
//! hashes, and name-based UUIDv5 generation. Every engine is a closed set
//! of algorithms resolved once when an operation is planned.

pub mod digest;
pub mod fast;
pub mod uuid;

pub use self::digest::{hex_column, DigestAlgorithm, Digester, MAX_XOF_OUTPUT};
pub use self::fast::{FastHashAlgorithm, FastHasher, SeedSlot, SeedWidth, DEFAULT_SEED};
pub use self::uuid::{uuid5_column, UuidNamespace};
