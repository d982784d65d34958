//! Untextured line batching.

use std::sync::Arc;

use tessera_core::{
    math::{Matrix4, Rectangle, Vector2},
    profiling::profile_function,
};
use tessera_test_utils::RenderBackend;

use super::{
    descriptor::PrimitiveBatchDescriptor,
    traits::{BatchState, BatchStats, DrawBatch},
};
use crate::{
    blend::BlendMode,
    color::Color,
    error::{BatchError, BatchResult},
    vertex::LineVertex,
};

/// Batches colored line segments, drawn as a line list.
///
/// Holds up to `capacity` lines and flushes when full or at [`end`](DrawBatch::end).
pub struct PrimitiveBatch {
    backend: Arc<dyn RenderBackend>,
    label: Option<String>,
    state: BatchState,
    capacity: usize,
    /// Two vertices per line
    vertices: Vec<LineVertex>,
    line_count: usize,
    stats: BatchStats,
}

impl PrimitiveBatch {
    pub fn new(backend: Arc<dyn RenderBackend>, descriptor: &PrimitiveBatchDescriptor) -> BatchResult<Self> {
        let capacity = descriptor.capacity;
        if capacity == 0 {
            tracing::error!(label = ?descriptor.label, "Primitive batch capacity must be at least 1");
            return Err(BatchError::InvalidCapacity { capacity });
        }

        tracing::debug!(label = ?descriptor.label, capacity, "Creating primitive batch");

        Ok(Self {
            backend,
            label: descriptor.label.clone(),
            state: BatchState::Idle,
            capacity,
            vertices: Vec::with_capacity(capacity * 2),
            line_count: 0,
            stats: BatchStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pending(&self) -> usize {
        self.line_count
    }

    pub fn draw_line(&mut self, from: Vector2, to: Vector2, color: Color) -> BatchResult<()> {
        self.draw_line_gradient(from, to, color, color)
    }

    /// Line whose color is interpolated from `from_color` to `to_color`.
    pub fn draw_line_gradient(
        &mut self,
        from: Vector2,
        to: Vector2,
        from_color: Color,
        to_color: Color,
    ) -> BatchResult<()> {
        self.ensure_recording()?;

        self.vertices.push(LineVertex {
            position: [from.x, from.y],
            color: from_color.to_array(),
        });
        self.vertices.push(LineVertex {
            position: [to.x, to.y],
            color: to_color.to_array(),
        });
        self.line_count += 1;
        self.stats.sprites += 1;

        if self.line_count == self.capacity {
            self.flush();
        }
        Ok(())
    }

    /// Four lines tracing the edges of `rect`.
    pub fn draw_rectangle_outline(&mut self, rect: Rectangle, color: Color) -> BatchResult<()> {
        let top_left = Vector2::new(rect.x, rect.y);
        let top_right = Vector2::new(rect.right(), rect.y);
        let bottom_right = Vector2::new(rect.right(), rect.bottom());
        let bottom_left = Vector2::new(rect.x, rect.bottom());

        self.draw_line(top_left, top_right, color)?;
        self.draw_line(top_right, bottom_right, color)?;
        self.draw_line(bottom_right, bottom_left, color)?;
        self.draw_line(bottom_left, top_left, color)
    }

    fn ensure_recording(&self) -> BatchResult<()> {
        match self.state {
            BatchState::Recording => Ok(()),
            BatchState::Idle => {
                tracing::error!(label = ?self.label, "Line drawn outside begin()/end()");
                Err(BatchError::NotRecording)
            }
            BatchState::Disposed => Err(BatchError::Disposed),
        }
    }

    fn flush(&mut self) {
        profile_function!();

        if self.line_count > 0 {
            self.backend.upload_vertex_data(bytemuck::cast_slice(&self.vertices));
            self.backend.draw_lines(self.vertices.len() as u32);
            self.stats.draw_calls += 1;
        }

        tracing::trace!(label = ?self.label, lines = self.line_count, "Primitive batch flushed");
        self.vertices.clear();
        self.line_count = 0;
        self.stats.flushes += 1;
    }
}

impl DrawBatch for PrimitiveBatch {
    fn begin(&mut self, view_matrix: &Matrix4, blend_mode: BlendMode) -> BatchResult<()> {
        match self.state {
            BatchState::Recording => {
                tracing::error!(label = ?self.label, "begin() called twice without end()");
                return Err(BatchError::AlreadyRecording);
            }
            BatchState::Disposed => return Err(BatchError::Disposed),
            BatchState::Idle => {}
        }

        self.vertices.clear();
        self.line_count = 0;
        self.stats = BatchStats::default();

        self.backend.set_blend_state(blend_mode.to_blend_state());
        self.backend.upload_view_matrix(&view_matrix.to_cols_array());
        self.state = BatchState::Recording;
        Ok(())
    }

    fn end(&mut self) -> BatchResult<()> {
        self.ensure_recording()?;

        self.flush();
        self.backend.set_blend_state(BlendMode::Normal.to_blend_state());
        self.backend.unbind_vertex_state();
        self.state = BatchState::Idle;
        Ok(())
    }

    fn dispose(&mut self) {
        self.vertices = Vec::new();
        self.line_count = 0;
        self.state = BatchState::Disposed;
    }

    fn is_recording(&self) -> bool {
        self.state == BatchState::Recording
    }

    fn stats(&self) -> BatchStats {
        self.stats
    }
}
