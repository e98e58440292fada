//! Constants that are part of the external contract.
//!
//! Ring capacity, pool size, and retry budgets are fixed at compile time and
//! part of the ABI the caller sees, so these are `pub const`s rather than a
//! runtime `Config` struct or constructor argument.

/// Slots per ring. Fixed; not configurable.
pub const RING_CAPACITY: usize = 32;

/// Rings per pool. Fixed; not configurable.
pub const POOL_SIZE: usize = 128;

/// Enqueue retry budget: `capacity / 4`.
pub const ENQ_RETRIES: usize = RING_CAPACITY / 4;

/// Dequeue retry budget: `capacity / 8`.
pub const DEQ_RETRIES: usize = RING_CAPACITY / 8;

/// Minimum payload alignment in bytes. A payload's low bit must be zero.
pub const PAYLOAD_ALIGN_MIN: usize = 2;
