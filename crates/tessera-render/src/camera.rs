//! 2D camera providing the view matrix for batch sessions.
//!
//! # Example
//!
//! ```
//! use tessera_render::Camera2D;
//!
//! let mut camera = Camera2D::new(100.0, 100.0, 800.0, 600.0).with_zoom(2.0);
//!
//! // y-down orthographic projection centered on (100, 100)
//! let view = *camera.view_matrix();
//!
//! // Screen pixels back to world units
//! let world = camera.screen_to_world(400.0, 300.0);
//! assert!((world.x - 100.0).abs() < 1e-3);
//! # let _ = view;
//! ```

use tessera_core::math::{Matrix4, Vector2};

/// Orthographic 2D camera with a lazily rebuilt view matrix.
///
/// The matrix maps the visible world rectangle to clip space, with world y
/// growing downwards like screen pixels. It is rebuilt on the first
/// [`view_matrix`](Self::view_matrix) call after any setter.
///
/// Zero zoom or a zero-sized viewport is not rejected; the resulting matrix
/// and coordinate conversions contain non-finite values.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// World point the origin pivot is placed on
    position: Vector2,
    /// Pivot as a fraction of the viewport, `(0.5, 0.5)` centers the view
    origin: Vector2,
    zoom: f32,
    width: f32,
    height: f32,
    /// Cached view matrix, valid only while `dirty` is false
    view_matrix: Matrix4,
    dirty: bool,
    revision: u64,
}

impl Camera2D {
    /// Create a camera looking at `(x, y)` with a `width` x `height` viewport.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            origin: Vector2::HALF,
            zoom: 1.0,
            width,
            height,
            view_matrix: Matrix4::IDENTITY,
            dirty: true,
            revision: 0,
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.set_zoom(zoom);
        self
    }

    pub fn with_origin(mut self, origin: Vector2) -> Self {
        self.set_origin(origin);
        self
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether the next [`view_matrix`](Self::view_matrix) call rebuilds the matrix.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times the view matrix has been rebuilt.
    ///
    /// Renderers can compare this against a stored value to skip re-uploading
    /// an unchanged matrix.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.dirty = true;
    }

    /// Move the camera by `(dx, dy)` world units.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position += Vector2::new(dx, dy);
        self.dirty = true;
    }

    pub fn set_origin(&mut self, origin: Vector2) {
        self.origin = origin;
        self.dirty = true;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.dirty = true;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.dirty = true;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.dirty = true;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.dirty = true;
    }

    /// Force a rebuild on the next [`view_matrix`](Self::view_matrix) call.
    pub fn set_dirty(&mut self) {
        self.dirty = true;
    }

    /// World-to-clip orthographic matrix, rebuilt only when dirty.
    pub fn view_matrix(&mut self) -> &Matrix4 {
        if self.dirty {
            self.update_view_matrix();
        }
        &self.view_matrix
    }

    /// Convert a screen pixel position (y-down, origin top-left) to world units.
    ///
    /// Goes through the full inverse of the view matrix, so it keeps working
    /// for any invertible projection.
    pub fn screen_to_world(&mut self, screen_x: f32, screen_y: f32) -> Vector2 {
        let ndc = Vector2::new(
            2.0 * screen_x / self.width - 1.0,
            1.0 - 2.0 * screen_y / self.height,
        );

        let mut inverse = *self.view_matrix();
        inverse.invert();
        ndc.transform(&inverse)
    }

    /// Convert a world position to screen pixels. Inverse of [`screen_to_world`](Self::screen_to_world).
    pub fn world_to_screen(&mut self, world: Vector2) -> Vector2 {
        let ndc = world.transform(self.view_matrix());
        Vector2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }

    /// Visible world rectangle as `(left, top, right, bottom)`.
    pub fn visible_bounds(&self) -> (f32, f32, f32, f32) {
        let view_width = self.width / self.zoom;
        let view_height = self.height / self.zoom;
        let left = self.position.x - view_width * self.origin.x;
        let top = self.position.y - view_height * self.origin.y;
        (left, top, left + view_width, top + view_height)
    }

    fn update_view_matrix(&mut self) {
        let (left, top, right, bottom) = self.visible_bounds();
        self.view_matrix.set_orthographic(left, right, bottom, top, 0.0, 1.0);
        self.dirty = false;
        self.revision += 1;
        tracing::trace!(left, top, right, bottom, "Camera view matrix rebuilt");
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}
