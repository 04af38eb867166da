//! Tuning defaults.

/// Capacity floor a new vector starts with when no other value is configured.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Growth factor of the default capacity policy.
pub const GROWTH_FACTOR: usize = 2;
