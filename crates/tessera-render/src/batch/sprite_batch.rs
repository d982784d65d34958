//! Textured quad batching with texture-run partitioning and depth ordering.

use std::sync::Arc;

use tessera_core::{
    math::{Matrix4, Rectangle, Vector2},
    profiling::{profile_function, profile_scope},
};
use tessera_test_utils::RenderBackend;

use super::{
    descriptor::SpriteBatchDescriptor,
    params::SpriteParams,
    traits::{BatchState, BatchStats, DrawBatch},
};
use crate::{
    blend::BlendMode,
    color::Color,
    error::{BatchError, BatchResult},
    text::{FontSource, GlyphLayout},
    texture::{Texture, TextureHandle},
    vertex::{SpriteVertex, VERTICES_PER_SPRITE},
};

/// Corners of the unit quad in y-down order: top-left, top-right, bottom-right, bottom-left.
const UNIT_CORNERS: [Vector2; 4] = [
    Vector2::new(0.0, 0.0),
    Vector2::new(1.0, 0.0),
    Vector2::new(1.0, 1.0),
    Vector2::new(0.0, 1.0),
];

/// One pooled draw request.
#[derive(Debug, Clone, Copy)]
struct SpriteDescriptor {
    active: bool,
    /// Submission order within the session, breaks depth ties
    sequence: u32,
    texture: TextureHandle,
    texture_width: f32,
    texture_height: f32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    anchor: Vector2,
    rotation: f32,
    source: Option<Rectangle>,
    color: Color,
    depth: i32,
}

impl Default for SpriteDescriptor {
    fn default() -> Self {
        Self {
            active: false,
            sequence: 0,
            texture: TextureHandle::new(0),
            texture_width: 1.0,
            texture_height: 1.0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            anchor: Vector2::ZERO,
            rotation: 0.0,
            source: None,
            color: Color::WHITE,
            depth: 0,
        }
    }
}

/// Batches textured quads into as few draw calls as possible.
///
/// Draws are written into a fixed pool of `capacity` descriptors. A flush
/// happens when the pool fills up and at [`end`](DrawBatch::end). Each flush
/// sorts by depth when depths were mixed, then walks the pool and emits one
/// draw call per contiguous run of sprites sharing a texture.
///
/// Sprites with equal depth keep their submission order. Depth ordering only
/// holds within one flush; a session that overflows the capacity is drawn as
/// several independently sorted groups.
///
/// No allocation happens between construction and [`resize`](Self::resize).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tessera_core::math::{Matrix4, Vector2};
/// use tessera_render::{
///     BlendMode, DrawBatch, NullRenderBackend, SpriteBatch, SpriteBatchDescriptor, Texture,
///     TextureHandle,
/// };
///
/// let mut batch = SpriteBatch::new(Arc::new(NullRenderBackend), &SpriteBatchDescriptor::default())?;
/// let texture = Texture::new(TextureHandle::new(1), 32, 32);
///
/// batch.begin(&Matrix4::identity(), BlendMode::Normal)?;
/// batch.draw(&texture, Vector2::new(10.0, 10.0))?;
/// batch.end()?;
///
/// assert_eq!(batch.stats().draw_calls, 1);
/// # Ok::<(), tessera_render::BatchError>(())
/// ```
pub struct SpriteBatch {
    backend: Arc<dyn RenderBackend>,
    label: Option<String>,
    state: BatchState,
    sprites: Vec<SpriteDescriptor>,
    vertices: Vec<SpriteVertex>,
    count: usize,
    next_sequence: u32,
    bound_texture: Option<TextureHandle>,
    last_depth: Option<i32>,
    has_mixed_depths: bool,
    scratch: Matrix4,
    stats: BatchStats,
}

impl SpriteBatch {
    /// Create a batch holding up to `descriptor.capacity` sprites per flush.
    pub fn new(backend: Arc<dyn RenderBackend>, descriptor: &SpriteBatchDescriptor) -> BatchResult<Self> {
        let capacity = descriptor.capacity;
        if capacity == 0 {
            tracing::error!(label = ?descriptor.label, "Sprite batch capacity must be at least 1");
            return Err(BatchError::InvalidCapacity { capacity });
        }

        tracing::debug!(label = ?descriptor.label, capacity, "Creating sprite batch");

        Ok(Self {
            backend,
            label: descriptor.label.clone(),
            state: BatchState::Idle,
            sprites: vec![SpriteDescriptor::default(); capacity],
            vertices: vec![SpriteVertex::default(); capacity * VERTICES_PER_SPRITE],
            count: 0,
            next_sequence: 0,
            bound_texture: None,
            last_depth: None,
            has_mixed_depths: false,
            scratch: Matrix4::IDENTITY,
            stats: BatchStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    /// Sprites waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Reallocate the pool for a new capacity. Only valid between sessions.
    pub fn resize(&mut self, capacity: usize) -> BatchResult<()> {
        match self.state {
            BatchState::Recording => {
                tracing::error!(label = ?self.label, "Cannot resize a sprite batch while recording");
                return Err(BatchError::AlreadyRecording);
            }
            BatchState::Disposed => return Err(BatchError::Disposed),
            BatchState::Idle => {}
        }
        if capacity == 0 {
            return Err(BatchError::InvalidCapacity { capacity });
        }

        tracing::debug!(label = ?self.label, from = self.sprites.len(), to = capacity, "Resizing sprite batch");
        self.sprites = vec![SpriteDescriptor::default(); capacity];
        self.vertices = vec![SpriteVertex::default(); capacity * VERTICES_PER_SPRITE];
        Ok(())
    }

    /// Draw the whole texture with its top-left corner at `position`.
    pub fn draw(&mut self, texture: &Texture, position: Vector2) -> BatchResult<()> {
        self.draw_with(texture, &SpriteParams::at(position))
    }

    /// Draw the whole texture stretched over `area`.
    pub fn draw_area(&mut self, texture: &Texture, area: Rectangle) -> BatchResult<()> {
        self.draw_with(texture, &SpriteParams::area(area))
    }

    /// Queue one sprite, flushing if the pool becomes full.
    pub fn draw_with(&mut self, texture: &Texture, params: &SpriteParams) -> BatchResult<()> {
        self.ensure_recording()?;

        let destination = params.resolve(texture.size());
        self.push(
            texture,
            destination,
            params.source,
            params.color,
            params.anchor,
            params.rotation,
            params.depth,
        );
        Ok(())
    }

    /// Draws `text` at the size the font metrics were generated at.
    pub fn draw_text_native<F: FontSource + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        position: Vector2,
        color: Color,
    ) -> BatchResult<()> {
        self.draw_text(font, text, position, color, font.native_size())
    }

    /// Queue one quad per renderable glyph of `text`.
    ///
    /// See [`draw_text_native`](Self::draw_text_native) to draw at the font's own size.
    pub fn draw_text<F: FontSource + ?Sized>(
        &mut self,
        font: &F,
        text: &str,
        position: Vector2,
        color: Color,
        font_size: f32,
    ) -> BatchResult<()> {
        profile_function!();
        self.ensure_recording()?;

        let texture = *font.texture();
        for quad in GlyphLayout::new(font, text, position, font_size) {
            self.push(
                &texture,
                quad.destination,
                Some(quad.source),
                color,
                Vector2::ZERO,
                0.0,
                0,
            );
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        texture: &Texture,
        destination: Rectangle,
        source: Option<Rectangle>,
        color: Color,
        anchor: Vector2,
        rotation: f32,
        depth: i32,
    ) {
        if self.last_depth.is_some_and(|last| last != depth) {
            self.has_mixed_depths = true;
        }
        self.last_depth = Some(depth);

        let (texture_width, texture_height) = texture.size();
        self.sprites[self.count] = SpriteDescriptor {
            active: true,
            sequence: self.next_sequence,
            texture: texture.handle,
            texture_width,
            texture_height,
            x: destination.x,
            y: destination.y,
            width: destination.width,
            height: destination.height,
            anchor,
            rotation,
            source,
            color,
            depth,
        };
        self.count += 1;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.stats.sprites += 1;

        if self.count == self.sprites.len() {
            self.flush();
        }
    }

    fn ensure_recording(&self) -> BatchResult<()> {
        match self.state {
            BatchState::Recording => Ok(()),
            BatchState::Idle => {
                tracing::error!(label = ?self.label, "Draw issued outside begin()/end()");
                Err(BatchError::NotRecording)
            }
            BatchState::Disposed => {
                tracing::error!(label = ?self.label, "Draw issued on a disposed sprite batch");
                Err(BatchError::Disposed)
            }
        }
    }

    /// Drain pending sprites into backend draw calls.
    fn flush(&mut self) {
        profile_function!();

        let pending = self.count;
        let sorted = self.has_mixed_depths;
        if sorted {
            profile_scope!("depth_sort");
            self.sprites[..pending].sort_unstable_by_key(|s| (!s.active, s.depth, s.sequence));
            self.stats.depth_sorts += 1;
        }

        let mut run = 0usize;
        for sprite in &mut self.sprites[..pending] {
            if !sprite.active {
                continue;
            }

            if self.bound_texture != Some(sprite.texture) {
                if run > 0 {
                    submit_run(self.backend.as_ref(), &self.vertices, run, &mut self.stats);
                    run = 0;
                }
                self.backend.bind_texture(sprite.texture.id());
                self.bound_texture = Some(sprite.texture);
                self.stats.texture_binds += 1;
            }

            let start = run * VERTICES_PER_SPRITE;
            write_quad(
                sprite,
                &mut self.scratch,
                &mut self.vertices[start..start + VERTICES_PER_SPRITE],
            );
            sprite.active = false;
            run += 1;
        }

        if run > 0 {
            submit_run(self.backend.as_ref(), &self.vertices, run, &mut self.stats);
        }

        self.count = 0;
        self.has_mixed_depths = false;
        self.last_depth = None;
        self.stats.flushes += 1;

        tracing::trace!(
            label = ?self.label,
            sprites = pending,
            draw_calls = self.stats.draw_calls,
            sorted,
            "Sprite batch flushed"
        );
    }
}

impl DrawBatch for SpriteBatch {
    fn begin(&mut self, view_matrix: &Matrix4, blend_mode: BlendMode) -> BatchResult<()> {
        match self.state {
            BatchState::Recording => {
                tracing::error!(label = ?self.label, "begin() called twice without end()");
                return Err(BatchError::AlreadyRecording);
            }
            BatchState::Disposed => {
                tracing::error!(label = ?self.label, "begin() called on a disposed sprite batch");
                return Err(BatchError::Disposed);
            }
            BatchState::Idle => {}
        }

        self.count = 0;
        self.next_sequence = 0;
        self.bound_texture = None;
        self.last_depth = None;
        self.has_mixed_depths = false;
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
        if self.state == BatchState::Recording {
            tracing::warn!(
                label = ?self.label,
                pending = self.count,
                "Disposing a recording sprite batch; pending sprites are dropped"
            );
        }
        self.sprites = Vec::new();
        self.vertices = Vec::new();
        self.count = 0;
        self.state = BatchState::Disposed;
    }

    fn is_recording(&self) -> bool {
        self.state == BatchState::Recording
    }

    fn stats(&self) -> BatchStats {
        self.stats
    }
}

fn submit_run(backend: &dyn RenderBackend, vertices: &[SpriteVertex], run: usize, stats: &mut BatchStats) {
    let vertex_count = run * VERTICES_PER_SPRITE;
    backend.upload_vertex_data(bytemuck::cast_slice(&vertices[..vertex_count]));
    backend.draw_triangles(vertex_count as u32);
    stats.draw_calls += 1;
}

/// Write the six vertices of one sprite into `out`.
///
/// The local matrix places the anchor at `(x, y)`, rotates around it and
/// scales the unit quad up to the sprite size.
fn write_quad(sprite: &SpriteDescriptor, scratch: &mut Matrix4, out: &mut [SpriteVertex]) {
    let pivot_x = sprite.width * sprite.anchor.x;
    let pivot_y = sprite.height * sprite.anchor.y;

    scratch.set_identity();
    scratch.translate(sprite.x - pivot_x, sprite.y - pivot_y, 0.0);
    if sprite.rotation != 0.0 {
        scratch.translate(pivot_x, pivot_y, 0.0);
        scratch.rotate_z(sprite.rotation);
        scratch.translate(-pivot_x, -pivot_y, 0.0);
    }
    scratch.scale(sprite.width, sprite.height, 1.0);

    let local: &Matrix4 = scratch;
    let [top_left, top_right, bottom_right, bottom_left] =
        UNIT_CORNERS.map(|corner| corner.transform(local));

    let (u0, v0, u1, v1) = match sprite.source {
        Some(src) => (
            src.x / sprite.texture_width,
            src.y / sprite.texture_height,
            src.right() / sprite.texture_width,
            src.bottom() / sprite.texture_height,
        ),
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let color = sprite.color.to_array();
    let vertex = |p: Vector2, u: f32, v: f32| SpriteVertex {
        position: [p.x, p.y],
        uv: [u, v],
        color,
    };

    let quad = [
        vertex(bottom_left, u0, v1),
        vertex(bottom_right, u1, v1),
        vertex(top_left, u0, v0),
        vertex(top_left, u0, v0),
        vertex(bottom_right, u1, v1),
        vertex(top_right, u1, v0),
    ];
    out.copy_from_slice(&quad);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_test_utils::NullRenderBackend;

    fn batch(capacity: usize) -> SpriteBatch {
        SpriteBatch::new(Arc::new(NullRenderBackend), &SpriteBatchDescriptor::with_capacity(capacity))
            .expect("valid capacity")
    }

    fn sprite(x: f32, y: f32, w: f32, h: f32) -> SpriteDescriptor {
        SpriteDescriptor {
            active: true,
            texture_width: 64.0,
            texture_height: 32.0,
            x,
            y,
            width: w,
            height: h,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SpriteBatch::new(Arc::new(NullRenderBackend), &SpriteBatchDescriptor::with_capacity(0));
        assert!(matches!(result, Err(BatchError::InvalidCapacity { capacity: 0 })));
    }

    #[test]
    fn test_quad_axis_aligned() {
        let mut scratch = Matrix4::IDENTITY;
        let mut out = [SpriteVertex::default(); 6];
        write_quad(&sprite(10.0, 20.0, 30.0, 40.0), &mut scratch, &mut out);

        let positions: Vec<_> = out.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[10.0, 60.0], [40.0, 60.0], [10.0, 20.0], [10.0, 20.0], [40.0, 60.0], [40.0, 20.0]]
        );
        assert_eq!(out[0].uv, [0.0, 1.0]);
        assert_eq!(out[5].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_quad_anchor_offsets_position() {
        let mut scratch = Matrix4::IDENTITY;
        let mut out = [SpriteVertex::default(); 6];
        let mut s = sprite(100.0, 100.0, 20.0, 10.0);
        s.anchor = Vector2::HALF;
        write_quad(&s, &mut scratch, &mut out);

        // top-left
        assert_eq!(out[2].position, [90.0, 95.0]);
        // top-right
        assert_eq!(out[5].position, [110.0, 95.0]);
    }

    #[test]
    fn test_quad_rotation_around_anchor() {
        let mut scratch = Matrix4::IDENTITY;
        let mut out = [SpriteVertex::default(); 6];
        let mut s = sprite(50.0, 50.0, 10.0, 10.0);
        s.anchor = Vector2::HALF;
        s.rotation = std::f32::consts::PI;
        write_quad(&s, &mut scratch, &mut out);

        // A half turn around the center swaps opposite corners.
        let top_left = out[2].position;
        assert!((top_left[0] - 55.0).abs() < 1e-4);
        assert!((top_left[1] - 55.0).abs() < 1e-4);
        let center_x = out.iter().map(|v| v.position[0]).sum::<f32>() / 6.0;
        assert!((center_x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_quad_source_uvs() {
        let mut scratch = Matrix4::IDENTITY;
        let mut out = [SpriteVertex::default(); 6];
        let mut s = sprite(0.0, 0.0, 16.0, 16.0);
        s.source = Some(Rectangle::new(16.0, 8.0, 16.0, 16.0));
        write_quad(&s, &mut scratch, &mut out);

        assert_eq!(out[2].uv, [0.25, 0.25]);
        assert_eq!(out[1].uv, [0.5, 0.75]);
    }

    #[test]
    fn test_resize_only_when_idle() {
        let mut b = batch(4);
        b.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
        assert_eq!(b.resize(8), Err(BatchError::AlreadyRecording));
        b.end().unwrap();
        b.resize(8).unwrap();
        assert_eq!(b.capacity(), 8);
        assert_eq!(b.resize(0), Err(BatchError::InvalidCapacity { capacity: 0 }));
    }

    #[test]
    fn test_state_machine_guards() {
        let mut b = batch(4);
        let texture = Texture::new(TextureHandle::new(1), 8, 8);
        assert_eq!(b.draw(&texture, Vector2::ZERO), Err(BatchError::NotRecording));
        assert_eq!(b.end(), Err(BatchError::NotRecording));

        b.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
        assert!(b.is_recording());
        assert_eq!(
            b.begin(&Matrix4::IDENTITY, BlendMode::Normal),
            Err(BatchError::AlreadyRecording)
        );
        b.end().unwrap();
        assert!(!b.is_recording());

        b.dispose();
        assert_eq!(b.state(), BatchState::Disposed);
        assert_eq!(b.begin(&Matrix4::IDENTITY, BlendMode::Normal), Err(BatchError::Disposed));
        assert_eq!(b.draw(&texture, Vector2::ZERO), Err(BatchError::Disposed));
    }
}
