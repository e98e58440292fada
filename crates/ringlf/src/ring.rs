//! The lock-free ring: a fixed 32-slot bounded MPMC FIFO.
//!
//! Ported from `odp_queue_lf_enq`/`odp_queue_lf_deq` in
//! `platform/linux-generic/odp_queue_lf.c`. The scan-and-CAS shape, the
//! rolling (non-reset-across-retries) scan index, and the exact retry budgets
//! are carried over unchanged; see the "Clarified from odp_queue_lf.c" notes
//! in SPEC_FULL.md and DESIGN.md for the parts left ambiguous by distillation.

use crate::config::{DEQ_RETRIES, ENQ_RETRIES, RING_CAPACITY};
use crate::dwcas::DwSlot;
use crate::invariants::debug_assert_unique_count;
use crate::node::Node;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Outcome of [`Ring::enqueue_one`]/[`Ring::enqueue_many`]. Not an error type:
/// `Full` is a normal, expected outcome under contention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The payload is now visible to dequeuers.
    Ok,
    /// No empty slot was claimed within the retry budget.
    Full,
}

/// Outcome of [`Ring::dequeue_one`]/[`Ring::dequeue_many`]. Not an error type:
/// `Empty` is a normal, expected outcome, including a spurious empty under
/// contention when a marked slot exists but every claim attempt loses the
/// race within the retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeueOutcome {
    /// The oldest currently-visible payload.
    Item(u64),
    /// No marked slot was observed within the retry budget.
    Empty,
}

/// Advances a rolling scan index, wrapping at [`RING_CAPACITY`].
///
/// Matches `next_idx` in the C source exactly: pre-incremented, so the first
/// slot visited from a freshly-seeded index of 0 is index 1, not 0.
#[inline]
fn next_idx(idx: usize) -> usize {
    let next = idx + 1;
    if next == RING_CAPACITY {
        0
    } else {
        next
    }
}

/// A fixed-capacity (32-slot) lock-free bounded MPMC ring.
///
/// Cache-line aligned. Holds no internal lock: every enqueue/dequeue is a
/// bounded sequence of relaxed loads and double-word CAS attempts.
#[repr(align(64))]
pub struct Ring {
    nodes: [DwSlot; RING_CAPACITY],
    enq_counter: AtomicU64,
    /// Written only by the pool; ring operations never read or write this
    /// field themselves.
    in_use: AtomicBool,
}

impl Ring {
    /// Builds a fresh, empty, unclaimed ring. Used only by the pool at
    /// process-wide table construction time.
    pub(crate) fn blank() -> Self {
        Self {
            nodes: std::array::from_fn(|_| DwSlot::new(0)),
            enq_counter: AtomicU64::new(0),
            in_use: AtomicBool::new(false),
        }
    }

    /// Ring capacity. Fixed at compile time; part of the caller-visible ABI.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        RING_CAPACITY
    }

    // -----------------------------------------------------------------
    // Pool-only lifecycle. Never called from enqueue/dequeue.
    // -----------------------------------------------------------------

    /// Atomically claims this ring if it is currently free. Returns `true` on
    /// success. This is the atomic test-and-set on `in_use` that lets
    /// concurrent `ring_acquire` calls race without ever handing out the same
    /// slot twice.
    pub(crate) fn try_claim(&self) -> bool {
        self.in_use
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    /// Marks this ring free again. The caller guarantees no enqueue/dequeue
    /// is concurrent or subsequent; violating that is undefined behavior this
    /// pool makes no attempt to detect.
    pub(crate) fn release_slot(&self) {
        self.in_use.store(false, Ordering::Release);
    }

    /// Zero-initializes all nodes and resets the sequence counter. Called by
    /// the pool after winning the claim, before handing out the reference.
    pub(crate) fn reinit(&self) {
        for slot in &self.nodes {
            slot.store_zero();
        }
        self.enq_counter.store(0, Ordering::Relaxed);
    }

    // -----------------------------------------------------------------
    // Producer API
    // -----------------------------------------------------------------

    /// Enqueues one payload. `payload`'s low bit must be zero.
    ///
    /// Non-blocking. Increments the sequence counter exactly once regardless
    /// of outcome.
    pub fn enqueue_one(&self, payload: u64) -> EnqueueOutcome {
        let counter = self.enq_counter.fetch_add(1, Ordering::Relaxed);

        let mut i_node = 0usize;
        for _ in 0..ENQ_RETRIES {
            let mut found = None;
            for _ in 0..RING_CAPACITY {
                i_node = next_idx(i_node);
                let sample = self.nodes[i_node].load();
                if !Node::unpack(sample).mark {
                    found = Some((i_node, sample));
                    break;
                }
            }

            let Some((idx, sample)) = found else {
                return EnqueueOutcome::Full;
            };

            let new_val = Node::filled(payload, counter).pack();
            if self.nodes[idx].cas_release(sample, new_val) {
                return EnqueueOutcome::Ok;
            }
            // Another enqueuer won the slot; retry the outer loop.
        }

        EnqueueOutcome::Full
    }

    /// Best-effort batch enqueue. Matches the ODP source's `enq_multi`, which
    /// accepts exactly one item per call regardless of how many were
    /// requested: returns 0 or 1.
    pub fn enqueue_many(&self, payloads: &[u64]) -> usize {
        match payloads.first() {
            Some(&payload) if self.enqueue_one(payload) == EnqueueOutcome::Ok => 1,
            _ => 0,
        }
    }

    // -----------------------------------------------------------------
    // Consumer API
    // -----------------------------------------------------------------

    /// Dequeues the oldest payload currently visible to this scan. Non-blocking.
    pub fn dequeue_one(&self) -> DequeueOutcome {
        let mut i_node = 0usize;
        for _ in 0..DEQ_RETRIES {
            let mut lowest = u64::MAX;
            let mut found: Option<(usize, u128)> = None;

            #[cfg(debug_assertions)]
            let mut seen_counts = [0u64; RING_CAPACITY];
            #[cfg(debug_assertions)]
            let mut seen_len = 0usize;

            for _ in 0..RING_CAPACITY {
                i_node = next_idx(i_node);
                let raw = self.nodes[i_node].load();
                let node = Node::unpack(raw);
                if node.mark {
                    #[cfg(debug_assertions)]
                    {
                        debug_assert_unique_count!(seen_counts[..seen_len], node.count);
                        seen_counts[seen_len] = node.count;
                        seen_len += 1;
                    }
                    if node.count < lowest {
                        lowest = node.count;
                        found = Some((i_node, raw));
                    }
                }
            }

            let Some((idx, raw)) = found else {
                return DequeueOutcome::Empty;
            };

            let old = Node::unpack(raw);
            let new_val = old.drained().pack();
            if self.nodes[idx].cas_acquire(raw, new_val) {
                return DequeueOutcome::Item(old.payload());
            }
            // Another dequeuer won the slot; retry the outer loop.
        }

        DequeueOutcome::Empty
    }

    /// Best-effort batch dequeue. Matches the ODP source's `deq_multi`:
    /// returns 0 or 1 regardless of `out`'s length.
    pub fn dequeue_many(&self, out: &mut [u64]) -> usize {
        if out.is_empty() {
            return 0;
        }
        match self.dequeue_one() {
            DequeueOutcome::Item(payload) => {
                out[0] = payload;
                1
            }
            DequeueOutcome::Empty => 0,
        }
    }

    /// Overrides the enqueue sequence counter. Exists only to let the unit
    /// tests below exercise counter-wraparound behavior without waiting for
    /// 2^64 real enqueues; not part of the hot path and not reachable outside
    /// this crate's own test build.
    #[cfg(test)]
    fn set_enq_counter_for_test(&self, value: u64) {
        self.enq_counter.store(value, Ordering::Relaxed);
    }
}
