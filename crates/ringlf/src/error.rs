use thiserror::Error;

/// Error surfaced by the `?`-friendly [`crate::pool_init_or_err`] wrapper.
///
/// The core operations never return `Result` for normal occupancy outcomes
/// (`full`/`empty` are values, not errors), but the one place a
/// caller legitimately wants to fail fast with `?` is process startup: if the
/// platform lacks a lock-free double-word CAS, the whole subsystem is
/// unusable and staying on the happy path with `if let Available { .. }`
/// everywhere is needless ceremony for a condition that's fixed for the life
/// of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolInitError {
    /// `AtomicU128::is_lock_free()` returned `false` on this platform/target.
    #[error("platform does not provide a lock-free 128-bit compare-and-swap")]
    NoDoubleWordCas,
}
