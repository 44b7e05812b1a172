//! Mesh normalization.
//!
//! The backend is allowed to send any numeric field as a string. This module
//! accepts that loose shape and coerces it into a validated [`Mesh`].

use nalgebra::Point2;
use serde::Deserialize;
use serde_json::Value;

use super::model::Mesh;
use crate::error::{EditorError, Result};

/// A mesh exactly as received over the wire, before coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMesh {
    /// Node coordinates, `[x, y, ...]` per node.
    #[serde(default)]
    pub nodes: Vec<Vec<Value>>,

    /// Elements as lists of node indices.
    #[serde(default)]
    pub elems: Vec<Vec<Value>>,

    /// One code per node.
    #[serde(default)]
    pub codes: Vec<Value>,
}

impl RawMesh {
    /// Parse a raw mesh from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Coerce every field to its numeric type and validate the result.
    ///
    /// Coordinates accept numbers and numeric strings. Node indices and codes
    /// additionally accept fractional values, truncated toward zero. Nodes
    /// with more than two coordinates keep the first two.
    pub fn normalize(self) -> Result<Mesh> {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                if node.len() < 2 {
                    return Err(EditorError::invalid_mesh(
                        "nodes",
                        i,
                        format!("expected 2 coordinates, got {}", node.len()),
                    ));
                }
                let x = coerce_f64(&node[0]).ok_or_else(|| not_a_number("nodes", i, &node[0]))?;
                let y = coerce_f64(&node[1]).ok_or_else(|| not_a_number("nodes", i, &node[1]))?;
                Ok(Point2::new(x, y))
            })
            .collect::<Result<Vec<_>>>()?;

        let elems = self
            .elems
            .iter()
            .enumerate()
            .map(|(i, elem)| {
                elem.iter()
                    .map(|v| {
                        coerce_i64(v)
                            .and_then(|n| usize::try_from(n).ok())
                            .ok_or_else(|| not_a_number("elems", i, v))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let codes = self
            .codes
            .iter()
            .enumerate()
            .map(|(i, v)| coerce_i64(v).ok_or_else(|| not_a_number("codes", i, v)))
            .collect::<Result<Vec<_>>>()?;

        Mesh::new(nodes, elems, codes)
    }
}

fn not_a_number(field: &'static str, index: usize, value: &Value) -> EditorError {
    EditorError::invalid_mesh(field, index, format!("cannot read {value} as a number"))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    x.is_finite().then_some(x)
}

fn coerce_i64(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    if let Value::String(s) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Some(i);
        }
    }
    let x = coerce_f64(value)?.trunc();
    (x >= i64::MIN as f64 && x <= i64::MAX as f64).then_some(x as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMesh {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_numbers() {
        let mesh = raw(json!({
            "nodes": [[0, 0], [1.5, 0], [1, 1]],
            "elems": [[0, 1, 2]],
            "codes": [1, 1, 2],
        }))
        .normalize()
        .unwrap();

        assert_eq!(mesh.num_nodes(), 3);
        assert_eq!(mesh.node(1), Some(&Point2::new(1.5, 0.0)));
        assert_eq!(mesh.elems(), &[vec![0, 1, 2]]);
        assert_eq!(mesh.codes(), &[1, 1, 2]);
    }

    #[test]
    fn test_normalize_coerces_strings() {
        let mesh = raw(json!({
            "nodes": [["0.25", " 2 "], ["1e1", "-3.5"]],
            "elems": [["0", "1"]],
            "codes": ["4", "-1"],
        }))
        .normalize()
        .unwrap();

        assert_eq!(mesh.node(0), Some(&Point2::new(0.25, 2.0)));
        assert_eq!(mesh.node(1), Some(&Point2::new(10.0, -3.5)));
        assert_eq!(mesh.elems(), &[vec![0, 1]]);
        assert_eq!(mesh.codes(), &[4, -1]);
    }

    #[test]
    fn test_normalize_truncates_fractional_codes() {
        let mesh = raw(json!({
            "nodes": [[0, 0, 9], [1, 0, 9]],
            "elems": [[0.0, 1.9]],
            "codes": [2.7, "-1.5"],
        }))
        .normalize()
        .unwrap();

        assert_eq!(mesh.elems(), &[vec![0, 1]]);
        assert_eq!(mesh.codes(), &[2, -1]);
        assert_eq!(mesh.node(0), Some(&Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let result = raw(json!({
            "nodes": [[0, 0], [1, 0]],
            "elems": [],
            "codes": [1, "boundary"],
        }))
        .normalize();
        assert!(matches!(
            result,
            Err(EditorError::InvalidMesh { field: "codes", index: 1, .. })
        ));

        let result = raw(json!({ "nodes": [[0]], "elems": [], "codes": [0] })).normalize();
        assert!(matches!(
            result,
            Err(EditorError::InvalidMesh { field: "nodes", index: 0, .. })
        ));

        let result = raw(json!({ "nodes": [[0, 0]], "elems": [[-1]], "codes": [0] })).normalize();
        assert!(matches!(
            result,
            Err(EditorError::InvalidMesh { field: "elems", index: 0, .. })
        ));
    }

    #[test]
    fn test_normalize_validates_invariants() {
        let result = raw(json!({
            "nodes": [[0, 0], [1, 0]],
            "elems": [[0, 2]],
            "codes": [0, 0],
        }))
        .normalize();
        assert!(matches!(result, Err(EditorError::InvalidNodeIndex { .. })));

        let result = raw(json!({ "nodes": [[0, 0]], "elems": [], "codes": [] })).normalize();
        assert!(matches!(result, Err(EditorError::CodeCountMismatch { .. })));
    }

    #[test]
    fn test_from_json() {
        let raw = RawMesh::from_json(r#"{"nodes": [["1", "2"]], "elems": [], "codes": ["0"]}"#)
            .unwrap();
        let mesh = raw.normalize().unwrap();
        assert_eq!(mesh.codes(), &[0]);
        assert!(RawMesh::from_json("not json").is_err());
    }
}
