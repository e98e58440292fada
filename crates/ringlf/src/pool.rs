//! The global ring pool: a process-wide table of 128 preallocated rings
//! handed out to callers on request.
//!
//! Ported from `queue_lf_init_global`/`queue_lf_create`/`queue_lf_destroy` in
//! `odp_queue_lf.c`. That source treats ring creation as externally
//! serialized (a plain `used == 0` read-then-write, no CAS) because queue
//! creation/destruction happens off the ODP scheduler's hot path under its
//! own locking. We hold ourselves to a stronger bar: the slot search in
//! `ring_acquire` can race with other `ring_acquire` calls here, so we use
//! atomic test-and-set on `in_use` — [`Ring::try_claim`] — which also means we
//! must *reinit after claiming*, not before, inverting the source's order (see
//! DESIGN.md).
//!
//! Real shared-memory reservation and naming is someone else's problem: all
//! this pool needs is a contiguously allocated, cache-line-aligned region with
//! a stable address for the lifetime of the process. A `static` table backing
//! an [`OnceLock`] is exactly that: one allocation, made at most once, address
//! stable for the process's lifetime, requiring no `unsafe` shared-memory
//! mapping.

use crate::config::{POOL_SIZE, RING_CAPACITY};
use crate::dwcas::DwSlot;
use crate::kind::QueueKind;
use crate::ring::Ring;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Result of [`pool_init`]: whether the lock-free ring subsystem can be used
/// in this process at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolCapability {
    /// The platform has a lock-free double-word CAS; the pool is ready.
    Available {
        /// Slots per ring (fixed at 32).
        capacity: usize,
        /// Rings in the pool (fixed at 128).
        num_rings: usize,
    },
    /// No lock-free 16-byte CAS on this platform/target. The caller must fall
    /// back to a different queue implementation.
    Unavailable,
}

struct PoolInner {
    rings: [Ring; POOL_SIZE],
}

impl PoolInner {
    fn new() -> Self {
        Self { rings: std::array::from_fn(|_| Ring::blank()) }
    }
}

#[repr(align(64))]
struct AlignedPool(PoolInner);

static POOL: OnceLock<AlignedPool> = OnceLock::new();
static CAPABLE: OnceLock<bool> = OnceLock::new();
static AVAILABLE: AtomicBool = AtomicBool::new(false);

/// Checks platform support for lock-free 16-byte CAS and, if present,
/// prepares the pool. Idempotent: calling this more than once just reports
/// the (unchanging) capability again and re-arms the pool after a prior
/// [`pool_teardown`] without reallocating it.
///
/// Must be called before any [`ring_acquire`].
pub fn pool_init() -> PoolCapability {
    let capable = *CAPABLE.get_or_init(DwSlot::is_lock_free);
    if !capable {
        tracing::warn!("ringlf: platform lacks a lock-free 128-bit CAS; disabling lock-free ring pool");
        return PoolCapability::Unavailable;
    }

    POOL.get_or_init(|| AlignedPool(PoolInner::new()));
    AVAILABLE.store(true, Ordering::Release);
    tracing::info!(
        capacity = RING_CAPACITY,
        num_rings = POOL_SIZE,
        "ringlf pool initialized"
    );

    PoolCapability::Available { capacity: RING_CAPACITY, num_rings: POOL_SIZE }
}

/// `?`-friendly variant of [`pool_init`] for callers that want to fail fast at
/// startup instead of branching on [`PoolCapability`].
pub fn pool_init_or_err() -> Result<(usize, usize), crate::error::PoolInitError> {
    match pool_init() {
        PoolCapability::Available { capacity, num_rings } => Ok((capacity, num_rings)),
        PoolCapability::Unavailable => Err(crate::error::PoolInitError::NoDoubleWordCas),
    }
}

/// Releases the pool. Safe no-op if the pool was never initialized or is
/// already torn down. After this call no ring reference remains valid —
/// using one is undefined behavior this pool makes no attempt to detect.
pub fn pool_teardown() {
    AVAILABLE.store(false, Ordering::Release);
    tracing::info!("ringlf pool torn down");
}

/// Claims a free ring for a "plain" queue. Returns `None` if `kind` is not
/// [`QueueKind::Plain`], the pool was never initialized (or was torn down),
/// or every slot is currently in use.
///
/// The returned ring is fully reinitialized (sequence counter reset, all
/// nodes cleared) before being handed back.
pub fn ring_acquire(kind: QueueKind) -> Option<&'static Ring> {
    let QueueKind::Plain = kind;

    if !AVAILABLE.load(Ordering::Acquire) {
        return None;
    }

    let pool = POOL.get()?;
    for ring in &pool.0.rings {
        if ring.try_claim() {
            crate::invariants::debug_assert_slot_claimed!(true);
            ring.reinit();
            return Some(ring);
        }
    }

    None
}

/// Releases a ring back to the pool. The caller guarantees no
/// enqueue/dequeue on `ring` is concurrent with or subsequent to this call.
pub fn ring_release(ring: &'static Ring) {
    ring.release_slot();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // All tests in this module share the one process-wide pool singleton, so
    // they must not run concurrently with each other even though `cargo
    // test` runs tests in the same binary on multiple threads by default.
    static POOL_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn pool_exhaustion_then_release_then_recycling() {
        let _guard = POOL_TEST_LOCK.lock().unwrap();
        let capability = pool_init();
        let PoolCapability::Available { capacity, num_rings } = capability else {
            // This platform genuinely lacks a lock-free u128 CAS: nothing
            // else to exercise.
            return;
        };
        assert_eq!(capacity, RING_CAPACITY);
        assert_eq!(num_rings, POOL_SIZE);

        let mut handles = Vec::with_capacity(POOL_SIZE);
        for _ in 0..POOL_SIZE {
            handles.push(ring_acquire(QueueKind::Plain).expect("slot available"));
        }
        assert!(ring_acquire(QueueKind::Plain).is_none(), "129th acquire must fail");

        let released = handles.pop().unwrap();
        ring_release(released);

        let reacquired = ring_acquire(QueueKind::Plain).expect("slot freed by release");
        assert_eq!(reacquired.dequeue_one(), crate::ring::DequeueOutcome::Empty);
        assert_eq!(
            reacquired.enqueue_one(0x10),
            crate::ring::EnqueueOutcome::Ok,
            "reacquired ring must accept enqueues"
        );
        assert_eq!(reacquired.dequeue_one(), crate::ring::DequeueOutcome::Item(0x10));

        for ring in handles.drain(..) {
            ring_release(ring);
        }
        ring_release(reacquired);

        pool_teardown();
    }

    #[test]
    fn ring_recycling_resets_prior_contents() {
        let _guard = POOL_TEST_LOCK.lock().unwrap();
        if pool_init() == PoolCapability::Unavailable {
            return;
        }
        let ring = ring_acquire(QueueKind::Plain).expect("slot available");
        ring.enqueue_one(0x10);
        ring.enqueue_one(0x20);
        ring_release(ring);

        let ring = ring_acquire(QueueKind::Plain).expect("slot should be free again");
        assert_eq!(ring.dequeue_one(), crate::ring::DequeueOutcome::Empty);
        ring_release(ring);
        pool_teardown();
    }
}
