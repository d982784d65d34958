//! Trait abstracting the graphics backend a batch submits to.

use wgpu::BlendState;

/// Opaque texture identity as understood by the backend.
pub type TextureId = u64;

/// Operations a batch issues while flushing.
///
/// Vertex data arrives as raw bytes in the layout the calling batch
/// documents; the backend only needs to copy it into its vertex buffer and
/// draw `vertex_count` vertices starting at zero.
pub trait RenderBackend: Send + Sync {
    /// Select the color blend state for subsequent draws.
    fn set_blend_state(&self, state: BlendState);

    /// Upload the view-projection matrix, column-major.
    fn upload_view_matrix(&self, matrix: &[f32; 16]);

    fn bind_texture(&self, texture: TextureId);

    /// Replace the contents of the shared vertex buffer.
    fn upload_vertex_data(&self, data: &[u8]);

    /// Draw `vertex_count` vertices as a triangle list.
    fn draw_triangles(&self, vertex_count: u32);

    /// Draw `vertex_count` vertices as a line list.
    fn draw_lines(&self, vertex_count: u32);

    /// Release vertex buffer and attribute bindings at the end of a session.
    fn unbind_vertex_state(&self);
}

/// Backend that accepts and discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderBackend;

impl RenderBackend for NullRenderBackend {
    fn set_blend_state(&self, _state: BlendState) {}
    fn upload_view_matrix(&self, _matrix: &[f32; 16]) {}
    fn bind_texture(&self, _texture: TextureId) {}
    fn upload_vertex_data(&self, _data: &[u8]) {}
    fn draw_triangles(&self, _vertex_count: u32) {}
    fn draw_lines(&self, _vertex_count: u32) {}
    fn unbind_vertex_state(&self) {}
}
