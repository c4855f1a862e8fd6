//! Bump arena backing decoded key values.

use crate::cell::Cell;
use crate::config::ArenaConfig;
use crate::error::AllocError;
use bumpalo::Bump;
use std::mem;

/// A bump allocator that owns the storage behind decoded [`Cell`]s.
///
/// Every allocation lives as long as the arena, and the borrow checker ties
/// decoded cells (and keys built over them) to that lifetime. Allocation
/// failure is reported as [`AllocError`] rather than aborting, so an arena
/// with an [`allocation_limit`](ArenaConfig::allocation_limit) can be used
/// to bound decode memory.
///
/// # Example
///
/// ```rust
/// use ordkey_codec::{Arena, ArenaConfig};
///
/// let arena = Arena::with_config(&ArenaConfig::new().initial_capacity(0).allocation_limit(0));
/// assert!(arena.try_alloc_bytes(b"abc").is_err());
/// ```
#[derive(Debug)]
pub struct Arena {
    bump: Bump,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Creates an arena with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// Creates an arena with the given configuration.
    #[must_use]
    pub fn with_config(config: &ArenaConfig) -> Self {
        let bump = Bump::with_capacity(config.initial_capacity);
        bump.set_allocation_limit(config.allocation_limit);
        Self { bump }
    }

    /// Allocates a row of `len` null cells.
    ///
    /// This is the scratch region a schema decodes a key row into.
    pub fn try_alloc_row<'a>(&'a self, len: usize) -> Result<&'a mut [Cell<'a>], AllocError> {
        self.bump
            .try_alloc_slice_fill_copy(len, Cell::Null)
            .map_err(|_| AllocError::new(len * mem::size_of::<Cell<'_>>()))
    }

    /// Copies `bytes` into the arena.
    pub fn try_alloc_bytes(&self, bytes: &[u8]) -> Result<&[u8], AllocError> {
        match self.bump.try_alloc_slice_copy(bytes) {
            Ok(copy) => Ok(copy),
            Err(_) => Err(AllocError::new(bytes.len())),
        }
    }

    /// Copies `text` into the arena.
    pub fn try_alloc_str(&self, text: &str) -> Result<&str, AllocError> {
        match self.bump.try_alloc_str(text) {
            Ok(copy) => Ok(copy),
            Err(_) => Err(AllocError::new(text.len())),
        }
    }

    /// Total bytes held by the arena's chunks.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Releases every allocation, keeping the largest chunk for reuse.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}
