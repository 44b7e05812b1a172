//! Native rendering-engine interactions: region selection and clicks.
//!
//! Handlers are pure: they turn an engine event plus the current session into
//! an optional [`CodeRequest`]. Whoever runs the session asks the user for the
//! new code and feeds the answer back through [`CodeRequest::answer`].
//!
//! - A region (lasso/box) selection relabels every resolved node at once.
//! - A click relabels only the first resolved node, slot 0 before slot 1.

use tracing::debug;

use crate::manager::MeshManager;
use crate::select::{PlotEvent, Selection};

/// Prompt shown for multi-node selections.
pub const SELECTION_PROMPT: &str = "Enter new code for selected nodes (integer):";
/// Prompt shown for a clicked node.
pub const CLICK_PROMPT: &str = "Enter new code for selected node (integer):";

/// Parse a code typed at the prompt.
///
/// Accepts optional surrounding whitespace, an optional sign and at least one
/// decimal digit. Anything after the leading digits is ignored, so `"12px"`
/// reads as 12. Returns `None` when no integer can be read.
///
/// ```
/// use meshcode::interaction::parse_code;
///
/// assert_eq!(parse_code(" -3 "), Some(-3));
/// assert_eq!(parse_code("7abc"), Some(7));
/// assert_eq!(parse_code("abc"), None);
/// ```
pub fn parse_code(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let sign_len = match s.as_bytes().first().copied()? {
        b'-' | b'+' => 1,
        _ => 0,
    };
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse::<i64>().ok()
}

/// A pending relabel: the resolved nodes and how to ask for their new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    /// Nodes that receive the new code.
    pub selection: Selection,
    /// Prompt text.
    pub message: &'static str,
    /// Value the prompt is pre-filled with.
    pub default: Option<&'static str>,
}

impl CodeRequest {
    /// Request a code for a multi-node selection.
    pub fn for_selection(selection: Selection) -> Self {
        Self {
            selection,
            message: SELECTION_PROMPT,
            default: Some("1"),
        }
    }

    /// Request a code for a single clicked node.
    pub fn for_click(selection: Selection) -> Self {
        Self {
            selection,
            message: CLICK_PROMPT,
            default: None,
        }
    }

    /// The code to apply for a prompt answer, if any.
    ///
    /// A cancelled prompt (`None`) or unreadable text means "do nothing".
    pub fn answer(&self, reply: Option<&str>) -> Option<i64> {
        reply.and_then(parse_code)
    }
}

/// Whether the controller listens to engine events yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Binding {
    /// Listeners not attached; events are ignored.
    #[default]
    Unbound,
    /// Listeners attached.
    Bound,
}

/// Handles the rendering engine's native selection and click events.
#[derive(Debug, Default)]
pub struct Interaction {
    binding: Binding,
}

impl Interaction {
    /// Create an unbound controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the engine's events. Returns `false` if already bound.
    pub fn bind(&mut self) -> bool {
        let newly = self.binding == Binding::Unbound;
        self.binding = Binding::Bound;
        newly
    }

    /// Current binding state.
    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// Handle a region selection.
    pub fn on_selected(&self, event: &PlotEvent, manager: &MeshManager) -> Option<CodeRequest> {
        let selection = self.resolve(event, manager)?;
        debug!(nodes = selection.len(), "region selection resolved");
        Some(CodeRequest::for_selection(selection))
    }

    /// Handle a click. Only the first resolved node is kept.
    pub fn on_click(&self, event: &PlotEvent, manager: &MeshManager) -> Option<CodeRequest> {
        let selection = self.resolve(event, manager)?.only_first();
        debug!(node = ?selection.first(), "click resolved");
        Some(CodeRequest::for_click(selection))
    }

    fn resolve(&self, event: &PlotEvent, manager: &MeshManager) -> Option<Selection> {
        if self.binding == Binding::Unbound {
            return None;
        }
        let selection = manager.find_nodes_from_event(event, manager.trace_map());
        (!selection.is_empty()).then_some(selection)
    }
}
