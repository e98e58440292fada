//! `ringlf` — a lock-free, bounded, multi-producer multi-consumer FIFO ring.
//!
//! This is the backing structure for "plain" queues in a packet-processing
//! fast path: producers and consumers are threads pinned to separate cores
//! that enqueue/dequeue opaque payload handles with no blocking, no
//! allocation, and no system calls on the hot path.
//!
//! Ported from ODP's lock-free plain-queue backend
//! (`platform/linux-generic/odp_queue_lf.c`): a node-per-slot ring where each
//! slot is one 128-bit word — a 1-bit occupancy mark, a 63-bit (shifted)
//! pointer, and a 64-bit sequence counter — swung atomically by a
//! double-word compare-and-swap. See `SPEC_FULL.md` and `DESIGN.md` in the
//! repository root for the full contract and the grounding behind each part
//! of this port.
//!
//! # Example
//!
//! ```
//! use ringlf_rs::{pool_init, ring_acquire, ring_release, PoolCapability, QueueKind};
//! use ringlf_rs::ring::{DequeueOutcome, EnqueueOutcome};
//!
//! match pool_init() {
//!     PoolCapability::Available { capacity, num_rings } => {
//!         assert_eq!(capacity, 32);
//!         assert_eq!(num_rings, 128);
//!     }
//!     PoolCapability::Unavailable => return,
//! }
//!
//! let ring = ring_acquire(QueueKind::Plain).expect("a free ring");
//! assert_eq!(ring.enqueue_one(0x10), EnqueueOutcome::Ok);
//! assert_eq!(ring.dequeue_one(), DequeueOutcome::Item(0x10));
//! ring_release(ring);
//! ```

mod config;
mod dwcas;
pub mod error;
mod invariants;
mod kind;
mod node;
pub mod pool;
pub mod ring;

pub use config::{DEQ_RETRIES, ENQ_RETRIES, PAYLOAD_ALIGN_MIN, POOL_SIZE, RING_CAPACITY};
pub use error::PoolInitError;
pub use kind::QueueKind;
pub use pool::{pool_init, pool_init_or_err, pool_teardown, ring_acquire, ring_release, PoolCapability};
pub use ring::{DequeueOutcome, EnqueueOutcome, Ring};
