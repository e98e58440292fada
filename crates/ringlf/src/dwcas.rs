//! Double-word (128-bit) atomic primitive.
//!
//! Built on [`portable_atomic::AtomicU128`], the crate the Rust ecosystem
//! reaches for when it needs a true hardware double-word CAS (`cmpxchg16b` on
//! x86_64, `casp`/LSE atomics on aarch64) rather than a library rewrite of
//! one. `portable_atomic` also ships a seqlock-based fallback for targets
//! without native support, but we never lean on it: [`DwSlot::is_lock_free`]
//! is the capability gate `pool_init` checks, and if it returns `false` this
//! subsystem reports itself unavailable rather than silently running the
//! fallback. A lock-based emulation of the CAS would defeat the entire point
//! of this ring, so we never fall back to one even though the dependency
//! technically offers it.

use portable_atomic::AtomicU128;
use std::sync::atomic::Ordering;

/// One double-word slot: a 128-bit word manipulated only as a whole.
///
/// `Send + Sync` fall out for free because `AtomicU128` already provides them;
/// there is no unsafe code anywhere in this primitive.
#[repr(transparent)]
pub(crate) struct DwSlot(AtomicU128);

impl DwSlot {
    /// Creates a slot already holding `value`. Not atomic with respect to
    /// other threads — used only during construction, before any node is
    /// reachable from more than one thread.
    pub(crate) const fn new(value: u128) -> Self {
        Self(AtomicU128::new(value))
    }

    /// Relaxed load. Callers use this to *sample* a slot; the sample is only
    /// ever acted on after being re-validated by a CAS, which is what makes
    /// the relaxed ordering here safe.
    #[inline]
    pub(crate) fn load(&self) -> u128 {
        self.0.load(Ordering::Relaxed)
    }

    /// Relaxed store of all-zero bits. Initialization only: before any other
    /// thread can observe the ring.
    #[inline]
    pub(crate) fn store_zero(&self) {
        self.0.store(0, Ordering::Relaxed);
    }

    /// Strong CAS with release ordering on success, relaxed on failure.
    /// Used by enqueue to publish a payload: the release pairs with a
    /// dequeuer's [`Self::cas_acquire`] to establish happens-before between
    /// writing `(ptr, count)` and a reader using `ptr`.
    #[inline]
    pub(crate) fn cas_release(&self, expected: u128, new: u128) -> bool {
        self.0
            .compare_exchange(expected, new, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    /// Strong CAS with acquire ordering on success, relaxed on failure.
    /// Used by dequeue to claim a payload.
    #[inline]
    pub(crate) fn cas_acquire(&self, expected: u128, new: u128) -> bool {
        self.0
            .compare_exchange(expected, new, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Whether this platform provides a true hardware-lock-free 16-byte CAS.
    /// If this is `false`, the ring must never be constructed or used: the
    /// pool reports itself unavailable instead.
    pub(crate) fn is_lock_free() -> bool {
        AtomicU128::new(0).is_lock_free()
    }
}
