//! Domain-level constants.
//!
//! Identity strategy names and defaults for the entity factories.

// =============================================================================
// Identity
// =============================================================================

/// Identifier strategy name for random UUIDs
pub const ID_STRATEGY_UUID: &str = "uuid";

/// Identifier strategy name for sequential numeric ids
pub const ID_STRATEGY_SEQUENTIAL: &str = "sequential";

/// First id handed out by the sequential strategy
pub const SEQUENTIAL_ID_START: u64 = 1;
