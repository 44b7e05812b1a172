//! HTTP implementation of [`MeshService`].

use std::path::Path;

use reqwest::blocking::{multipart, Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use super::MeshService;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::mesh::{Mesh, RawMesh};

/// Path of the mesh loading endpoint.
pub const LOAD_MESH_PATH: &str = "/load_mesh";
/// Path of the merge endpoint.
pub const MERGE_PATH: &str = "/merge";

#[derive(Serialize)]
struct MergeRequest<'a> {
    mesh1: &'a Mesh,
    mesh2: &'a Mesh,
}

/// Blocking HTTP client for the mesh backend.
#[derive(Debug, Clone)]
pub struct HttpMeshService {
    client: Client,
    base_url: String,
}

impl HttpMeshService {
    /// Create a client for the backend configured in `config`.
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read_mesh(endpoint: &'static str, response: Response) -> Result<Mesh> {
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "backend rejected request");
            return Err(EditorError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let raw: RawMesh = response.json()?;
        raw.normalize()
    }
}

impl MeshService for HttpMeshService {
    fn load_mesh(&self, file: &Path) -> Result<Mesh> {
        debug!(file = %file.display(), "uploading mesh file");
        let form = multipart::Form::new().file("file", file)?;
        let response = self
            .client
            .post(self.endpoint_url(LOAD_MESH_PATH))
            .multipart(form)
            .send()?;
        Self::read_mesh(LOAD_MESH_PATH, response)
    }

    fn merge(&self, first: &Mesh, second: &Mesh) -> Result<Mesh> {
        debug!(
            first_nodes = first.num_nodes(),
            second_nodes = second.num_nodes(),
            "requesting merge"
        );
        let response = self
            .client
            .post(self.endpoint_url(MERGE_PATH))
            .json(&MergeRequest {
                mesh1: first,
                mesh2: second,
            })
            .send()?;
        Self::read_mesh(MERGE_PATH, response)
    }
}
