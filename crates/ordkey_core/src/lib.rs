//! # ordkey core
//!
//! Composite primary-key encoding for a sorted key-value store.
//!
//! This crate provides:
//! - [`EncodedKeyBuilder`] to encode a tuple of key column values into one
//!   byte string whose byte-wise order matches the tuple order
//! - [`EncodedKey`], the immutable result, which can also be decoded back
//!   from bytes with [`EncodedKey::decode_from`]
//! - Successor computation ([`EncodedKey::successor`]) for turning an
//!   exclusive scan bound into an inclusive one
//! - [`Schema`], the column catalog keys are encoded against
//!
//! ## Example
//!
//! ```
//! use ordkey_codec::{Arena, Cell};
//! use ordkey_core::{EncodedKey, EncodedKeyBuilder, Schema};
//!
//! let schema = Schema::parse("tenant:string,id:int64", None).unwrap();
//!
//! let mut builder = EncodedKeyBuilder::new(&schema);
//! builder.add_column_key(Cell::String("acme"));
//! builder.add_column_key(Cell::Int64(42));
//! let key = builder.build_encoded_key().unwrap();
//! assert_eq!(key.stringify(&schema), "(\"acme\",42)");
//!
//! let arena = Arena::new();
//! let decoded = EncodedKey::decode_from(&schema, &arena, key.as_bytes()).unwrap();
//! assert_eq!(decoded.column_values(), key.column_values());
//!
//! let next = key.successor(&schema).unwrap();
//! assert!(next > key);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod error;
mod key;
mod schema;
mod successor;

pub use builder::EncodedKeyBuilder;
pub use error::{CoreError, CoreResult};
pub use key::{EncodedKey, INVALID_RANGE};
pub use schema::{ColumnSchema, Schema};
pub use successor::{advance_to_successor, successor_bytes};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
