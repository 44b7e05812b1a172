//! The [`Mesh`] type.

use std::collections::HashSet;

use nalgebra::Point2;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{EditorError, Result};

/// A 2D mesh: node positions, elements over node indices and per-node codes.
///
/// Invariants, checked by [`Mesh::new`]:
/// - there is exactly one code per node
/// - every element references existing nodes only
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    nodes: Vec<Point2<f64>>,
    elems: Vec<Vec<usize>>,
    codes: Vec<i64>,
}

impl Mesh {
    /// Create a mesh, validating its invariants.
    pub fn new(nodes: Vec<Point2<f64>>, elems: Vec<Vec<usize>>, codes: Vec<i64>) -> Result<Self> {
        if codes.len() != nodes.len() {
            return Err(EditorError::CodeCountMismatch {
                nodes: nodes.len(),
                codes: codes.len(),
            });
        }

        for (ei, elem) in elems.iter().enumerate() {
            if let Some(&node) = elem.iter().find(|&&n| n >= nodes.len()) {
                return Err(EditorError::InvalidNodeIndex {
                    elem: ei,
                    node,
                    node_count: nodes.len(),
                });
            }
        }

        Ok(Self {
            nodes,
            elems,
            codes,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    #[inline]
    pub fn num_elems(&self) -> usize {
        self.elems.len()
    }

    /// Node positions, indexed by node.
    #[inline]
    pub fn nodes(&self) -> &[Point2<f64>] {
        &self.nodes
    }

    /// Elements as lists of node indices.
    #[inline]
    pub fn elems(&self) -> &[Vec<usize>] {
        &self.elems
    }

    /// Node codes, indexed by node.
    #[inline]
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Position of a node.
    #[inline]
    pub fn node(&self, index: usize) -> Option<&Point2<f64>> {
        self.nodes.get(index)
    }

    /// Code of a node.
    #[inline]
    pub fn code(&self, index: usize) -> Option<i64> {
        self.codes.get(index).copied()
    }

    /// Indices of the nodes carrying `code`, in ascending order.
    ///
    /// This is the sequence both the marker traces and the selection resolver
    /// are built from: the `k`-th point of a code's marker trace is the `k`-th
    /// index yielded here.
    pub fn nodes_with_code(&self, code: i64) -> impl Iterator<Item = usize> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == code)
            .map(|(i, _)| i)
    }

    /// Distinct non-zero codes, in order of first appearance.
    pub fn distinct_codes(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.codes
            .iter()
            .copied()
            .filter(|&c| c != 0 && seen.insert(c))
            .collect()
    }

    /// Element edges as node index pairs, each element closed back to its first node.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.elems.iter().flat_map(|elem| {
            let n = elem.len();
            (0..n).map(move |i| (elem[i], elem[(i + 1) % n]))
        })
    }

    /// Set the code of a node. Returns `false` if the node does not exist.
    pub(crate) fn set_code(&mut self, index: usize, code: i64) -> bool {
        match self.codes.get_mut(index) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => false,
        }
    }
}

impl Serialize for Mesh {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes: Vec<[f64; 2]> = self.nodes.iter().map(|p| [p.x, p.y]).collect();
        let mut state = serializer.serialize_struct("Mesh", 3)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("elems", &self.elems)?;
        state.serialize_field("codes", &self.codes)?;
        state.end()
    }
}
