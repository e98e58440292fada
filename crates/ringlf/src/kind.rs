/// Queue-kind tag accepted by [`crate::ring_acquire`].
///
/// The ODP source this subsystem was ported from only ever serves
/// `ODP_QUEUE_TYPE_PLAIN` queues from the lock-free pool and rejects (returns
/// `NULL` for) every other queue type. `Plain` is the only variant for the
/// same reason: the lock-free ring is a backing store for plain queues only,
/// never for ordered or scheduled ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// A plain (unordered, unscheduled) queue. The only kind this pool serves.
    Plain,
}
