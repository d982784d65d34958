//! Mock implementation of RenderBackend for testing.
//!
//! Every call is recorded in order so tests can assert on draw call counts,
//! vertex counts, uploaded bytes and bind order without a GPU.

use crate::render_backend::{RenderBackend, TextureId};
use parking_lot::Mutex;
use wgpu::BlendState;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetBlendState(BlendState),
    UploadViewMatrix([f32; 16]),
    BindTexture { texture: TextureId },
    UploadVertexData { data: Vec<u8> },
    DrawTriangles { vertex_count: u32 },
    DrawLines { vertex_count: u32 },
    UnbindVertexState,
}

/// Mock implementation of RenderBackend for testing.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tessera_test_utils::{MockRenderBackend, RenderBackend};
///
/// let mock = Arc::new(MockRenderBackend::new());
/// let backend: Arc<dyn RenderBackend> = mock.clone();
///
/// backend.draw_triangles(12);
/// assert_eq!(mock.triangle_vertex_counts(), vec![12]);
/// ```
#[derive(Default)]
pub struct MockRenderBackend {
    calls: Mutex<Vec<BackendCall>>,
}

impl MockRenderBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Count triangle and line draw calls.
    pub fn count_draw_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    BackendCall::DrawTriangles { .. } | BackendCall::DrawLines { .. }
                )
            })
            .count()
    }

    pub fn count_texture_binds(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::BindTexture { .. }))
            .count()
    }

    pub fn count_uploads(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::UploadVertexData { .. }))
            .count()
    }

    /// Vertex count of every triangle draw, in issue order.
    pub fn triangle_vertex_counts(&self) -> Vec<u32> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawTriangles { vertex_count } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }

    /// Vertex count of every line draw, in issue order.
    pub fn line_vertex_counts(&self) -> Vec<u32> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawLines { vertex_count } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }

    /// Textures in the order they were bound.
    pub fn bound_textures(&self) -> Vec<TextureId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::BindTexture { texture } => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// Every vertex upload reinterpreted as `f32`s.
    pub fn uploaded_floats(&self) -> Vec<Vec<f32>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::UploadVertexData { data } => Some(
                    data.chunks_exact(4)
                        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                        .collect(),
                ),
                _ => None,
            })
            .collect()
    }

    pub fn blend_states(&self) -> Vec<BlendState> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetBlendState(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// The most recently uploaded view matrix.
    pub fn last_view_matrix(&self) -> Option<[f32; 16]> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            BackendCall::UploadViewMatrix(m) => Some(*m),
            _ => None,
        })
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().push(call);
    }
}

impl RenderBackend for MockRenderBackend {
    fn set_blend_state(&self, state: BlendState) {
        self.record(BackendCall::SetBlendState(state));
    }

    fn upload_view_matrix(&self, matrix: &[f32; 16]) {
        self.record(BackendCall::UploadViewMatrix(*matrix));
    }

    fn bind_texture(&self, texture: TextureId) {
        self.record(BackendCall::BindTexture { texture });
    }

    fn upload_vertex_data(&self, data: &[u8]) {
        self.record(BackendCall::UploadVertexData {
            data: data.to_vec(),
        });
    }

    fn draw_triangles(&self, vertex_count: u32) {
        self.record(BackendCall::DrawTriangles { vertex_count });
    }

    fn draw_lines(&self, vertex_count: u32) {
        self.record(BackendCall::DrawLines { vertex_count });
    }

    fn unbind_vertex_state(&self) {
        self.record(BackendCall::UnbindVertexState);
    }
}
