//! Arena configuration.

/// Configuration for a decode [`Arena`](crate::Arena).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Bytes reserved up front for the first chunk.
    pub initial_capacity: usize,

    /// Upper bound on the bytes the arena may hold in chunks
    /// (`None` = unbounded). Allocations past the limit fail instead of
    /// growing the arena.
    pub allocation_limit: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4 * 1024, // 4 KB
            allocation_limit: None,
        }
    }
}

impl ArenaConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial chunk capacity.
    #[must_use]
    pub const fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Caps the total bytes the arena may allocate.
    #[must_use]
    pub const fn allocation_limit(mut self, bytes: usize) -> Self {
        self.allocation_limit = Some(bytes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ArenaConfig::default();
        assert_eq!(config.initial_capacity, 4096);
        assert_eq!(config.allocation_limit, None);
    }

    #[test]
    fn builder_pattern() {
        let config = ArenaConfig::new().initial_capacity(0).allocation_limit(128);
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.allocation_limit, Some(128));
    }
}
