//! Bookkeeping from (slot, code) to trace position.

use crate::mesh::Slot;

/// Maps each (mesh slot, code) pair to the position of its marker trace.
///
/// Entries are kept in insertion order, which mirrors the order traces were
/// appended to the scene. Positions are unique within one map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceMap {
    slots: [Vec<(i64, usize)>; 2],
}

impl TraceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `code` of `slot` is drawn by the trace at `position`.
    pub fn insert(&mut self, slot: Slot, code: i64, position: usize) {
        let entries = &mut self.slots[slot.index()];
        match entries.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = position,
            None => entries.push((code, position)),
        }
    }

    /// Trace position holding `code` of `slot`.
    pub fn position(&self, slot: Slot, code: i64) -> Option<usize> {
        self.slots[slot.index()]
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(_, p)| p)
    }

    /// The (slot, code) pair drawn by the trace at `curve`.
    ///
    /// Slots are scanned in order, entries within a slot in insertion order.
    pub fn lookup(&self, curve: usize) -> Option<(Slot, i64)> {
        Slot::ALL.into_iter().find_map(|slot| {
            self.slots[slot.index()]
                .iter()
                .find(|&&(_, p)| p == curve)
                .map(|&(code, _)| (slot, code))
        })
    }

    /// (code, position) entries of a slot, in insertion order.
    pub fn entries(&self, slot: Slot) -> &[(i64, usize)] {
        &self.slots[slot.index()]
    }
}
