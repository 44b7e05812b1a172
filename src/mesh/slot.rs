//! Mesh slots.
//!
//! A session holds at most two meshes, one per [`Slot`]. Each slot is either
//! empty or occupied, tracked explicitly by [`SlotState`].

use std::fmt;

use super::model::Mesh;

/// One of the two mesh positions of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Slot 0. Receives the merge result.
    First,
    /// Slot 1. Cleared by a merge.
    Second,
}

impl Slot {
    /// Both slots, in scan order.
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    /// Zero-based slot index.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// One-based number shown to users ("Mesh 1", "Mesh 2").
    #[inline]
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh {}", self.number())
    }
}

/// Occupancy of a mesh slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    /// No mesh loaded.
    #[default]
    Empty,
    /// A mesh is loaded.
    Occupied(Mesh),
}

impl SlotState {
    /// The mesh in this slot, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        match self {
            SlotState::Empty => None,
            SlotState::Occupied(mesh) => Some(mesh),
        }
    }

    pub(crate) fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        match self {
            SlotState::Empty => None,
            SlotState::Occupied(mesh) => Some(mesh),
        }
    }

    /// Whether a mesh is loaded.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, SlotState::Occupied(_))
    }

    /// Replace the slot's mesh.
    pub fn occupy(&mut self, mesh: Mesh) {
        *self = SlotState::Occupied(mesh);
    }

    /// Drop the slot's mesh.
    pub fn clear(&mut self) {
        *self = SlotState::Empty;
    }
}

/// Read-only access to the meshes of a session, by slot.
///
/// Components that only inspect meshes (trace building, selection resolving,
/// polygon hit testing) take this view instead of the owning manager.
pub trait MeshLookup {
    /// The mesh loaded in `slot`, if any.
    fn mesh(&self, slot: Slot) -> Option<&Mesh>;
}

impl MeshLookup for [Option<&Mesh>; 2] {
    fn mesh(&self, slot: Slot) -> Option<&Mesh> {
        self[slot.index()]
    }
}

impl MeshLookup for [SlotState; 2] {
    fn mesh(&self, slot: Slot) -> Option<&Mesh> {
        self[slot.index()].mesh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_and_number() {
        assert_eq!(Slot::ALL.map(Slot::index), [0, 1]);
        assert_eq!(Slot::Second.number(), 2);
        assert_eq!(Slot::First.to_string(), "mesh 1");
    }

    #[test]
    fn test_slot_state_transitions() {
        let mesh = Mesh::new(vec![], vec![], vec![]).unwrap();
        let mut state = SlotState::default();
        assert!(!state.is_occupied());

        state.occupy(mesh.clone());
        assert_eq!(state.mesh(), Some(&mesh));
        assert!(state.is_occupied());

        state.clear();
        assert_eq!(state, SlotState::Empty);
    }

    #[test]
    fn test_lookup_views() {
        let mesh = Mesh::new(vec![], vec![], vec![]).unwrap();
        let borrowed: [Option<&Mesh>; 2] = [None, Some(&mesh)];
        assert!(borrowed.mesh(Slot::First).is_none());
        assert_eq!(borrowed.mesh(Slot::Second), Some(&mesh));

        let owned = [SlotState::Occupied(mesh.clone()), SlotState::Empty];
        assert_eq!(owned.mesh(Slot::First), Some(&mesh));
        assert!(owned.mesh(Slot::Second).is_none());
    }
}
