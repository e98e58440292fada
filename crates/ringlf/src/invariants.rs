//! Debug assertion macros for ring/pool invariants.
//!
//! These are runtime checks for invariants the core algorithm depends on but
//! never enforces on the hot path. They're only active in debug builds
//! (`debug_assert!` itself is a no-op in release builds) — catching caller
//! misuse is a nice-to-have here, not a correctness requirement the release
//! build owes anyone.

/// INV-ALIGN-01: payloads must have their low bit clear. A set low bit is
/// caller misuse, not a normal outcome.
macro_rules! debug_assert_payload_aligned {
    ($payload:expr) => {
        debug_assert!(
            crate::node::payload_is_aligned($payload),
            "payload {:#x} has low bit set; payloads must be at least 2-byte aligned",
            $payload
        )
    };
}

/// INV-POOL-01: `ring_acquire` must never hand out a slot another caller
/// already holds.
macro_rules! debug_assert_slot_claimed {
    ($claimed:expr) => {
        debug_assert!($claimed, "ring_acquire claimed a slot without winning the CAS on in_use")
    };
}

/// INV-SEQ-01: among nodes sampled as marked during one scan, counts must be
/// pairwise distinct.
macro_rules! debug_assert_unique_count {
    ($seen:expr, $count:expr) => {
        debug_assert!(
            !$seen.contains(&$count),
            "duplicate count {} observed among marked nodes in the same scan",
            $count
        )
    };
}

pub(crate) use debug_assert_payload_aligned;
pub(crate) use debug_assert_slot_claimed;
pub(crate) use debug_assert_unique_count;
