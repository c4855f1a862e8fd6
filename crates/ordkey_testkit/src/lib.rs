//! # ordkey testkit
//!
//! Test utilities for ordkey.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - Helpers to build keys from owned values
//! - Cross-language key encoding vectors
//!
//! ## Usage
//!
//! ```rust
//! use ordkey_testkit::prelude::*;
//!
//! let schema = ordkey_core::Schema::parse("id:uint32", None).unwrap();
//! let values = vec![ordkey_codec::OwnedCell::UInt32(5)];
//! let key = build_key(&schema, &values);
//! assert_eq!(ordkey_codec::to_hex(key.as_bytes()), "00000005");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
