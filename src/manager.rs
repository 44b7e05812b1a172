//! Session state: the two mesh slots, the last merge result and the
//! rendering surface.
//!
//! [`MeshManager`] is the only owner of mesh data. Other components read
//! meshes through [`MeshLookup`] and change codes only through
//! [`MeshManager::update_codes`]. Every state change that affects the picture
//! returns a [`Redraw`] describing what to hand to the rendering engine.
//!
//! # Redraw Protocol
//!
//! The first redraw of a session initializes the rendering surface (and is
//! when event listeners get attached); every later redraw updates it in
//! place. The trace map is rebuilt from scratch on every redraw.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::LineWidth;
use crate::error::{EditorError, Result};
use crate::io::MeshService;
use crate::mesh::{Mesh, MeshLookup, Slot, SlotState};
use crate::plot::{build_scene, Scene, Trace, TraceMap};
use crate::select::{PlotEvent, Selection, SelectionResolver};

/// Worker threads used by [`MeshManager::upload_meshes`], one per slot.
pub const UPLOAD_THREADS: usize = 2;

/// State of the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Surface {
    /// Nothing drawn yet; the next redraw initializes the surface.
    #[default]
    Uninitialized,
    /// The surface holds a plot; redraws update it in place.
    Initialized,
}

/// How a redraw reaches the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawMode {
    /// First paint: full initialization, listeners get attached.
    Initialize,
    /// Repaint of an initialized surface.
    Update,
}

/// A redraw to hand to the rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Redraw {
    /// Initialization or in-place update.
    pub mode: RedrawMode,
    /// Traces in drawing order.
    pub traces: Vec<Trace>,
}

/// Outcome of [`MeshManager::upload_meshes`].
#[derive(Debug)]
pub struct Upload {
    /// The redraw that follows every upload.
    pub redraw: Redraw,
    /// Slots whose load failed; those slots keep their previous mesh.
    pub failures: Vec<(Slot, EditorError)>,
}

/// Owner of the session's meshes.
#[derive(Debug, Default)]
pub struct MeshManager {
    slots: [SlotState; 2],
    merged: Option<Mesh>,
    surface: Surface,
    trace_map: TraceMap,
    line_width: LineWidth,
}

impl MeshManager {
    /// Create an empty manager.
    pub fn new(line_width: LineWidth) -> Self {
        Self {
            line_width,
            ..Self::default()
        }
    }

    /// State of a slot.
    pub fn slot(&self, slot: Slot) -> &SlotState {
        &self.slots[slot.index()]
    }

    /// The most recent merge result, as returned by the backend.
    pub fn merged(&self) -> Option<&Mesh> {
        self.merged.as_ref()
    }

    /// State of the rendering surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Trace map of the most recent redraw.
    pub fn trace_map(&self) -> &TraceMap {
        &self.trace_map
    }

    /// Current element line width.
    pub fn line_width(&self) -> LineWidth {
        self.line_width
    }

    /// Store a new line width and redraw with it.
    pub fn set_line_width(&mut self, line_width: LineWidth) -> Redraw {
        self.line_width = line_width;
        self.redraw()
    }

    /// Place a mesh in a slot without going through the backend.
    ///
    /// Does not redraw.
    pub fn insert(&mut self, slot: Slot, mesh: Mesh) {
        self.slots[slot.index()].occupy(mesh);
    }

    /// Load up to two mesh files, one per slot.
    ///
    /// Both loads are in flight at the same time, on a dedicated pool of
    /// [`UPLOAD_THREADS`] threads so blocking I/O never sits on the global
    /// pool and overlap does not depend on the CPU count. Results are applied
    /// once both have completed. A slot without a file is cleared. A failed
    /// load leaves its slot untouched and is reported in [`Upload::failures`].
    /// The surface is redrawn in every case.
    pub fn upload_meshes<S: MeshService>(
        &mut self,
        service: &S,
        files: [Option<&Path>; 2],
    ) -> Upload {
        let [first, second] = files;
        let load_first = || first.map(|file| service.load_mesh(file));
        let load_second = || second.map(|file| service.load_mesh(file));

        let (first, second) = match rayon::ThreadPoolBuilder::new()
            .num_threads(UPLOAD_THREADS)
            .thread_name(|i| format!("meshcode-upload-{i}"))
            .build()
        {
            Ok(pool) => pool.join(load_first, load_second),
            Err(err) => {
                warn!(error = %err, "upload pool unavailable, using global pool");
                rayon::join(load_first, load_second)
            }
        };

        let mut failures = Vec::new();
        for (slot, outcome) in Slot::ALL.into_iter().zip([first, second]) {
            match outcome {
                None => self.slots[slot.index()].clear(),
                Some(Ok(mesh)) => {
                    info!(
                        %slot,
                        nodes = mesh.num_nodes(),
                        elems = mesh.num_elems(),
                        "mesh loaded"
                    );
                    self.slots[slot.index()].occupy(mesh);
                }
                Some(Err(err)) => {
                    warn!(%slot, error = %err, "mesh load failed");
                    failures.push((slot, err));
                }
            }
        }

        Upload {
            redraw: self.redraw(),
            failures,
        }
    }

    /// Merge the two loaded meshes through the backend.
    ///
    /// Requires both slots to be occupied; otherwise no call is made. On
    /// success the result replaces slot 0 and slot 1 is cleared. On failure
    /// the slots are unchanged.
    pub fn merge<S: MeshService>(&mut self, service: &S) -> Result<Redraw> {
        let (Some(first), Some(second)) = (self.mesh(Slot::First), self.mesh(Slot::Second))
        else {
            return Err(EditorError::MissingMeshes);
        };

        let merged = service.merge(first, second).map_err(|err| {
            warn!(error = %err, "merge failed");
            err
        })?;
        info!(
            nodes = merged.num_nodes(),
            elems = merged.num_elems(),
            "meshes merged"
        );

        self.slots[Slot::First.index()].occupy(merged.clone());
        self.slots[Slot::Second.index()].clear();
        self.merged = Some(merged);
        Ok(self.redraw())
    }

    /// Set the code of every selected node to `code`, then redraw.
    ///
    /// Nodes of empty slots and indices past the end of a mesh are ignored.
    pub fn update_codes(&mut self, selection: &Selection, code: i64) -> Redraw {
        for (slot, node) in selection.iter() {
            let applied = self.slots[slot.index()]
                .mesh_mut()
                .is_some_and(|mesh| mesh.set_code(node, code));
            if !applied {
                warn!(%slot, node, "ignoring code update for missing node");
            }
        }
        self.redraw()
    }

    /// Resolve a click event against `trace_map`.
    pub fn find_nodes_from_event(&self, event: &PlotEvent, trace_map: &TraceMap) -> Selection {
        SelectionResolver::new(trace_map, self).resolve(event)
    }

    /// Rebuild all traces and the trace map.
    ///
    /// Initializes the surface on first use and updates it afterwards.
    pub fn redraw(&mut self) -> Redraw {
        let Scene { traces, trace_map } = build_scene(&self.slots, self.line_width);

        let mode = match self.surface {
            Surface::Uninitialized => {
                self.surface = Surface::Initialized;
                RedrawMode::Initialize
            }
            Surface::Initialized => RedrawMode::Update,
        };
        debug!(?mode, traces = traces.len(), "redraw");

        self.trace_map = trace_map;
        Redraw { mode, traces }
    }
}

impl MeshLookup for MeshManager {
    fn mesh(&self, slot: Slot) -> Option<&Mesh> {
        self.slots[slot.index()].mesh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Condvar, Mutex};
    use std::time::Duration;

    fn create_mesh(codes: Vec<i64>) -> Mesh {
        let nodes = (0..codes.len()).map(|i| Point2::new(i as f64, 0.0)).collect();
        Mesh::new(nodes, vec![], codes).unwrap()
    }

    /// Serves meshes by file name and records every call.
    #[derive(Default)]
    struct FakeService {
        calls: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MeshService for FakeService {
        fn load_mesh(&self, file: &Path) -> Result<Mesh> {
            let name = file.to_string_lossy().into_owned();
            self.calls.lock().unwrap().push(format!("load {name}"));
            match name.as_str() {
                "broken" => Err(EditorError::Status {
                    endpoint: "/load_mesh",
                    status: 500,
                }),
                "two" => Ok(create_mesh(vec![2, 2])),
                _ => Ok(create_mesh(vec![1])),
            }
        }

        fn merge(&self, first: &Mesh, second: &Mesh) -> Result<Mesh> {
            self.calls.lock().unwrap().push("merge".to_string());
            let codes = first.codes().iter().chain(second.codes()).copied().collect();
            Ok(create_mesh(codes))
        }
    }

    struct FailingMerge;

    impl MeshService for FailingMerge {
        fn load_mesh(&self, _file: &Path) -> Result<Mesh> {
            Ok(create_mesh(vec![1]))
        }

        fn merge(&self, _first: &Mesh, _second: &Mesh) -> Result<Mesh> {
            Err(EditorError::Status {
                endpoint: "/merge",
                status: 502,
            })
        }
    }

    /// Each load blocks until the other one has started.
    #[derive(Default)]
    struct RendezvousService {
        arrived: Mutex<usize>,
        all_arrived: Condvar,
        stalled: AtomicBool,
    }

    impl MeshService for RendezvousService {
        fn load_mesh(&self, _file: &Path) -> Result<Mesh> {
            let mut arrived = self.arrived.lock().unwrap();
            *arrived += 1;
            self.all_arrived.notify_all();
            let (guard, wait) = self
                .all_arrived
                .wait_timeout_while(arrived, Duration::from_secs(5), |n| *n < 2)
                .unwrap();
            drop(guard);
            if wait.timed_out() {
                self.stalled.store(true, Ordering::SeqCst);
            }
            Ok(create_mesh(vec![1]))
        }

        fn merge(&self, first: &Mesh, _second: &Mesh) -> Result<Mesh> {
            Ok(first.clone())
        }
    }

    #[test]
    fn test_upload_loads_overlap() {
        let service = RendezvousService::default();
        let mut manager = MeshManager::default();
        let files = [Some(Path::new("a")), Some(Path::new("b"))];

        let upload = manager.upload_meshes(&service, files);

        assert!(!service.stalled.load(Ordering::SeqCst));
        assert!(upload.failures.is_empty());
        assert!(manager.slot(Slot::First).is_occupied());
        assert!(manager.slot(Slot::Second).is_occupied());
    }

    #[test]
    fn test_first_redraw_initializes_then_updates() {
        let mut manager = MeshManager::default();
        assert_eq!(manager.surface(), Surface::Uninitialized);
        assert_eq!(manager.redraw().mode, RedrawMode::Initialize);
        assert_eq!(manager.surface(), Surface::Initialized);
        assert_eq!(manager.redraw().mode, RedrawMode::Update);
    }

    #[test]
    fn test_upload_fills_slots_and_redraws() {
        let service = FakeService::default();
        let mut manager = MeshManager::default();
        let files = [Some(Path::new("one")), Some(Path::new("two"))];

        let upload = manager.upload_meshes(&service, files);

        assert!(upload.failures.is_empty());
        assert_eq!(upload.redraw.mode, RedrawMode::Initialize);
        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), &[1]);
        assert_eq!(manager.mesh(Slot::Second).unwrap().codes(), &[2, 2]);
        // elements + code 1, elements + code 2
        assert_eq!(upload.redraw.traces.len(), 4);
        assert_eq!(manager.trace_map().position(Slot::Second, 2), Some(3));

        let mut calls = service.calls();
        calls.sort();
        assert_eq!(calls, vec!["load one", "load two"]);
    }

    #[test]
    fn test_upload_failure_keeps_previous_mesh() {
        let service = FakeService::default();
        let mut manager = MeshManager::default();
        manager.insert(Slot::Second, create_mesh(vec![7]));
        let files = [Some(Path::new("two")), Some(Path::new("broken"))];

        let upload = manager.upload_meshes(&service, files);

        assert_eq!(upload.failures.len(), 1);
        assert_eq!(upload.failures[0].0, Slot::Second);
        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), &[2, 2]);
        assert_eq!(manager.mesh(Slot::Second).unwrap().codes(), &[7]);
        assert_eq!(upload.redraw.traces.len(), 4);
    }

    #[test]
    fn test_upload_without_file_clears_slot() {
        let service = FakeService::default();
        let mut manager = MeshManager::default();
        manager.insert(Slot::Second, create_mesh(vec![7]));
        let upload = manager.upload_meshes(&service, [Some(Path::new("one")), None]);

        assert!(upload.failures.is_empty());
        assert!(!manager.slot(Slot::Second).is_occupied());
        assert_eq!(service.calls(), vec!["load one"]);
    }

    #[test]
    fn test_merge_requires_two_meshes() {
        let service = FakeService::default();
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1, 2]));

        let result = manager.merge(&service);

        assert!(matches!(result, Err(EditorError::MissingMeshes)));
        assert!(service.calls().is_empty());
        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), &[1, 2]);
        assert!(manager.mesh(Slot::Second).is_none());
        assert!(manager.merged().is_none());
    }

    #[test]
    fn test_merge_replaces_first_and_clears_second() {
        let service = FakeService::default();
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1]));
        manager.insert(Slot::Second, create_mesh(vec![3, 4]));

        let redraw = manager.merge(&service).unwrap();

        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), &[1, 3, 4]);
        assert!(manager.mesh(Slot::Second).is_none());
        assert_eq!(manager.merged().unwrap().codes(), &[1, 3, 4]);
        assert_eq!(redraw.traces.len(), 4);
        assert!(manager.trace_map().entries(Slot::Second).is_empty());
    }

    #[test]
    fn test_merge_failure_keeps_state() {
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1]));
        manager.insert(Slot::Second, create_mesh(vec![2]));

        let result = manager.merge(&FailingMerge);

        assert!(matches!(result, Err(EditorError::Status { status: 502, .. })));
        assert!(manager.slot(Slot::First).is_occupied());
        assert!(manager.slot(Slot::Second).is_occupied());
        assert_eq!(manager.surface(), Surface::Uninitialized);
    }

    #[test]
    fn test_update_codes_is_idempotent() {
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1, 2, 2, 0]));
        manager.insert(Slot::Second, create_mesh(vec![5, 5]));
        let selection: Selection = [(Slot::First, 1), (Slot::First, 3), (Slot::Second, 0)]
            .into_iter()
            .collect();

        let once = manager.update_codes(&selection, 9);
        let codes_once = (
            manager.mesh(Slot::First).unwrap().codes().to_vec(),
            manager.mesh(Slot::Second).unwrap().codes().to_vec(),
        );
        let map_once = manager.trace_map().clone();

        let twice = manager.update_codes(&selection, 9);

        assert_eq!(codes_once.0, vec![1, 9, 2, 9]);
        assert_eq!(codes_once.1, vec![9, 5]);
        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), codes_once.0.as_slice());
        assert_eq!(manager.mesh(Slot::Second).unwrap().codes(), codes_once.1.as_slice());
        assert_eq!(manager.trace_map(), &map_once);
        assert_eq!(once.traces, twice.traces);
    }

    #[test]
    fn test_update_codes_ignores_missing_nodes() {
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1]));
        let selection: Selection = [(Slot::First, 4), (Slot::Second, 0)].into_iter().collect();

        manager.update_codes(&selection, 3);
        assert_eq!(manager.mesh(Slot::First).unwrap().codes(), &[1]);
    }

    #[test]
    fn test_line_width_reaches_element_trace() {
        let mut manager = MeshManager::new(LineWidth::new(2.0));
        manager.insert(Slot::First, create_mesh(vec![1]));

        let redraw = manager.redraw();
        assert_eq!(redraw.traces[0].line.unwrap().width, 2.0);

        let redraw = manager.set_line_width(LineWidth::from_control("0.75"));
        assert_eq!(redraw.mode, RedrawMode::Update);
        assert_eq!(redraw.traces[0].line.unwrap().width, 0.75);
    }

    #[test]
    fn test_find_nodes_from_event() {
        let mut manager = MeshManager::default();
        manager.insert(Slot::First, create_mesh(vec![1, 2, 1]));
        manager.redraw();
        let trace_map = manager.trace_map().clone();

        let selection = manager.find_nodes_from_event(&PlotEvent::from_points([(1, 1)]), &trace_map);
        assert_eq!(selection.nodes(Slot::First), &[2]);
    }
}
