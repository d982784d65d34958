//! Tessera Render
//!
//! Batched 2D rendering: a sprite batch that turns draw requests into a
//! minimal set of backend draw calls, a line batch, glyph expansion for
//! bitmap fonts and the orthographic [`Camera2D`] supplying the view matrix.
//!
//! A frame typically looks like:
//!
//! ```
//! use std::sync::Arc;
//! use tessera_render::*;
//! use tessera_core::math::Vector2;
//!
//! let backend: Arc<dyn RenderBackend> = Arc::new(NullRenderBackend);
//! let mut camera = Camera2D::new(0.0, 0.0, 800.0, 600.0);
//! let mut batch = SpriteBatch::new(backend, &SpriteBatchDescriptor::default())?;
//! let player = Texture::new(TextureHandle::new(1), 32, 32);
//!
//! batch.begin(camera.view_matrix(), BlendMode::Normal)?;
//! batch.draw_with(&player, &SpriteParams::at(Vector2::ZERO).anchor(Vector2::HALF))?;
//! batch.end()?;
//! # Ok::<(), BatchError>(())
//! ```

pub mod batch;
pub mod blend;
pub mod camera;
pub mod color;
pub mod error;
pub mod shader;
pub mod text;
pub mod texture;
pub mod vertex;

pub use batch::*;
pub use blend::BlendMode;
pub use camera::Camera2D;
pub use color::Color;
pub use error::{BatchError, BatchResult};
pub use text::{BitmapFont, FontSource, Glyph, GlyphLayout, GlyphQuad, measure_text_width};
pub use texture::{Texture, TextureHandle};
pub use vertex::{LineVertex, SpriteVertex, VERTICES_PER_SPRITE};

pub use tessera_test_utils::{NullRenderBackend, RenderBackend, TextureId};
