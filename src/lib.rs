//! # colhash - Columnar Hashing and Geospatial Encoding
//!
//! colhash applies one named operation element-wise to a nullable column
//! and returns a column of the same length. Nulls pass through untouched;
//! large columns are split into chunks and spread over rayon workers.
//!
//! ## Operations
//!
//! - **Digests**: SHA-1, MD5, BLAKE3, SHA-2, SHA-3 and SHAKE as lowercase hex
//! - **Fast hashes**: wyhash, MurmurHash3, xxHash and XXH3 with optional seeds
//! - **UUIDv5**: DNS, URL, OID and X.500 namespaces
//! - **Geohash**: encode, decode and eight-direction neighbors
//! - **H3**: cell index of a coordinate at a given resolution
//!
//! ## Quick Start
//!
//! ```no_run
//! use colhash::prelude::*;
//!
//! let registry = OperationRegistry::new(&EngineConfig::default()).unwrap();
//! let plan = registry.plan("xxhash32", &Kwargs::default().with_seed(42)).unwrap();
//!
//! let hashes = plan
//!     .execute(&[Column::utf8([Some("hello_world"), None])])
//!     .unwrap();
//! assert_eq!(hashes.data_type(), DataType::UInt32);
//! assert!(hashes.is_null(1));
//! ```
//!
//! ## Geohash
//!
//! ```no_run
//! use colhash::column::Coord;
//! use colhash::geo::geohash;
//!
//! let hash = geohash::encode(Coord::new(-120.6623, 35.3003), 5).unwrap();
//! assert_eq!(hash, "9q60y");
//!
//! let around = geohash::neighbors(&hash).unwrap();
//! println!("north of {} is {}", hash, around.n);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geo;
pub mod hash;
pub mod input;
pub mod registry;

// Re-export commonly used types
pub use column::{Column, DataType};
pub use config::EngineConfig;
pub use error::{ColHashError, Result};
pub use registry::{Kwargs, Operation, OperationRegistry, Plan};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use colhash::prelude::*;
    //! ```

    pub use crate::column::{Column, Coord, DataType, Neighbors};
    pub use crate::config::EngineConfig;
    pub use crate::dispatch::{Broadcast, Dispatcher};
    pub use crate::error::{ColHashError, Result};
    pub use crate::hash::{DigestAlgorithm, FastHashAlgorithm, UuidNamespace};
    pub use crate::registry::{Kwargs, Operation, OperationRegistry, Plan};
}
