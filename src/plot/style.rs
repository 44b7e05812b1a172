//! Colors and sizes for mesh traces.

use crate::mesh::Slot;

/// Marker colors, indexed by code modulo the palette length.
pub const PALETTE: [&str; 20] = [
    "cornflowerblue",
    "orangered",
    "mediumseagreen",
    "gold",
    "magenta",
    "cyan",
    "darkorange",
    "lime",
    "purple",
    "tomato",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "chartreuse",
    "indigo",
    "salmon",
    "khaki",
    "peru",
    "plum",
    "turquoise",
];

/// Color for codes below zero.
pub const NEGATIVE_CODE_COLOR: &str = "black";

/// Marker color for a code.
pub fn code_to_color(code: i64) -> &'static str {
    if code < 0 {
        return NEGATIVE_CODE_COLOR;
    }
    PALETTE[(code % PALETTE.len() as i64) as usize]
}

/// Marker size for a code. Code 1 is typically the dense outer boundary.
pub fn code_marker_size(code: i64) -> f64 {
    if code == 1 {
        4.0
    } else {
        6.0
    }
}

/// Element edge color for a slot.
pub fn slot_edge_color(slot: Slot) -> &'static str {
    match slot {
        Slot::First => "gray",
        Slot::Second => "lightblue",
    }
}
