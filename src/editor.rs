//! The editing session: meshes, interactions and the UI seam wired together.
//!
//! [`MeshEditor`] glues the [`MeshManager`], the native [`Interaction`]
//! handlers and the [`PolygonSelector`] to a [`MeshService`] backend and a
//! [`Frontend`]. Components produce redraws, code requests and polygon
//! effects; the editor carries them out against the frontend.
//!
//! # Example
//!
//! ```no_run
//! use meshcode::prelude::*;
//! use std::path::Path;
//!
//! struct Console;
//!
//! impl Frontend for Console {
//!     fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
//!         println!("{message} [{}]", default.unwrap_or(""));
//!         default.map(str::to_string)
//!     }
//!     fn notify(&mut self, message: &str) {
//!         eprintln!("{message}");
//!     }
//!     fn render(&mut self, redraw: &Redraw) {
//!         println!("{} traces", redraw.traces.len());
//!     }
//!     fn show_preview(&mut self, _preview: Option<&Trace>) {}
//!     fn set_cursor(&mut self, _cursor: Cursor) {}
//! }
//!
//! let config = EditorConfig::from_env().unwrap();
//! let service = HttpMeshService::new(&config).unwrap();
//! let mut editor = MeshEditor::new(&config, service, Console);
//! editor.load([Some(Path::new("lagoon.mesh")), Some(Path::new("harbour.mesh"))]);
//! editor.merge();
//! ```

use std::path::Path;

use tracing::{debug, info};

use crate::config::{EditorConfig, LineWidth};
use crate::error::EditorError;
use crate::geometry::PlotFrame;
use crate::interaction::{CodeRequest, Interaction};
use crate::io::MeshService;
use crate::manager::{MeshManager, Redraw, RedrawMode};
use crate::plot::Trace;
use crate::polygon::{Cursor, PointerEvent, PolygonEffect, PolygonSelector};
use crate::select::PlotEvent;

/// Notification shown when merging without two loaded meshes.
pub const MISSING_MESHES_NOTICE: &str = "Load two meshes to merge!";

/// The user-facing side of a session.
pub trait Frontend {
    /// Ask the user for a line of text. `None` means the prompt was cancelled.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;

    /// Show a message to the user.
    fn notify(&mut self, message: &str);

    /// Hand traces to the rendering engine.
    fn render(&mut self, redraw: &Redraw);

    /// Show (`Some`) or remove (`None`) the polygon outline overlay.
    fn show_preview(&mut self, preview: Option<&Trace>);

    /// Change the pointer cursor.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// An interactive mesh relabeling session.
#[derive(Debug)]
pub struct MeshEditor<S, F> {
    manager: MeshManager,
    interaction: Interaction,
    polygon: PolygonSelector,
    service: S,
    frontend: F,
}

impl<S: MeshService, F: Frontend> MeshEditor<S, F> {
    /// Start a session with nothing loaded.
    pub fn new(config: &EditorConfig, service: S, frontend: F) -> Self {
        Self {
            manager: MeshManager::new(config.line_width),
            interaction: Interaction::new(),
            polygon: PolygonSelector::new(),
            service,
            frontend,
        }
    }

    /// The session's meshes.
    pub fn manager(&self) -> &MeshManager {
        &self.manager
    }

    /// Native interaction state.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Polygon selection state.
    pub fn polygon(&self) -> &PolygonSelector {
        &self.polygon
    }

    /// The frontend.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Mutable access to the frontend.
    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Load the chosen files into the two slots and redraw.
    ///
    /// Each failed load is reported to the user; other slots still update.
    pub fn load(&mut self, files: [Option<&Path>; 2]) {
        let upload = self.manager.upload_meshes(&self.service, files);
        for (_, err) in &upload.failures {
            self.frontend.notify(&format!("Error loading meshes: {err}"));
        }
        self.present(upload.redraw);
    }

    /// Merge the two loaded meshes and redraw.
    pub fn merge(&mut self) {
        match self.manager.merge(&self.service) {
            Ok(redraw) => self.present(redraw),
            Err(EditorError::MissingMeshes) => self.frontend.notify(MISSING_MESHES_NOTICE),
            Err(err) => self.frontend.notify(&format!("Merge error: {err}")),
        }
    }

    /// Apply a new element line width from the UI control.
    pub fn set_line_width(&mut self, line_width: LineWidth) {
        let redraw = self.manager.set_line_width(line_width);
        self.present(redraw);
    }

    /// Handle a native region selection.
    pub fn on_selected(&mut self, event: &PlotEvent) {
        if let Some(request) = self.interaction.on_selected(event, &self.manager) {
            self.fulfil(request);
        }
    }

    /// Handle a native click.
    pub fn on_click(&mut self, event: &PlotEvent) {
        if let Some(request) = self.interaction.on_click(event, &self.manager) {
            self.fulfil(request);
        }
    }

    /// Switch polygon selection mode on or off.
    pub fn toggle_polygon(&mut self) {
        let effects = self.polygon.toggle();
        self.apply(effects);
    }

    /// Feed pointer input to the polygon selector.
    ///
    /// `frame` describes the rendering surface as currently laid out.
    pub fn on_pointer(&mut self, event: PointerEvent, frame: &PlotFrame) {
        let effects = self.polygon.handle(event, frame, &self.manager);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<PolygonEffect>) {
        for effect in effects {
            match effect {
                PolygonEffect::SetCursor(cursor) => self.frontend.set_cursor(cursor),
                PolygonEffect::ShowPreview(trace) => self.frontend.show_preview(Some(&trace)),
                PolygonEffect::ClearPreview => self.frontend.show_preview(None),
                PolygonEffect::RequestCode(request) => self.fulfil(request),
            }
        }
    }

    fn fulfil(&mut self, request: CodeRequest) {
        let reply = self.frontend.prompt(request.message, request.default);
        let Some(code) = request.answer(reply.as_deref()) else {
            debug!(reply = ?reply, "code prompt dismissed");
            return;
        };
        info!(code, nodes = request.selection.len(), "relabeling nodes");
        let redraw = self.manager.update_codes(&request.selection, code);
        self.present(redraw);
    }

    fn present(&mut self, redraw: Redraw) {
        self.frontend.render(&redraw);
        if redraw.mode == RedrawMode::Initialize && self.interaction.bind() {
            debug!("interaction listeners bound");
        }
    }
}
