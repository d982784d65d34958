//! Tessera - batched 2D sprite rendering
//!
//! Tessera turns a frame's worth of sprite, text and line draws into a small,
//! correctly ordered set of backend draw calls:
//!
//! - **Math**: column-major [`Matrix4`](math::Matrix4) and [`Vector2`](math::Vector2)
//! - **Camera**: orthographic `Camera2D` with a cached view matrix
//! - **Batching**: `SpriteBatch` with texture-run partitioning and depth ordering
//! - **Text**: bitmap font glyph expansion into the same batch
//! - **Backend contract**: the `RenderBackend` trait a GPU renderer implements
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tessera::prelude::*;
//!
//! tessera::init(&Config::default());
//!
//! let backend: Arc<dyn RenderBackend> = Arc::new(NullRenderBackend);
//! let mut camera = Camera2D::new(0.0, 0.0, 1280.0, 720.0);
//! let mut sprites = SpriteBatch::new(backend, &SpriteBatchDescriptor::default())?;
//! let hero = Texture::new(TextureHandle::new(1), 48, 48);
//!
//! sprites.begin(camera.view_matrix(), BlendMode::Normal)?;
//! sprites.draw(&hero, Vector2::new(-24.0, -24.0))?;
//! sprites.end()?;
//! # Ok::<(), BatchError>(())
//! ```

// Re-export core types
pub use tessera_core as core;
pub use tessera_core::{Config, ProfilingMode, init, math};

#[cfg(feature = "render")]
pub use tessera_render as render;

/// Prelude module for convenient imports
pub mod prelude {
    pub use tessera_core::math::{Matrix4, Rectangle, Vector2};
    pub use tessera_core::{Config, ProfilingMode};

    #[cfg(feature = "render")]
    pub use tessera_render::{
        BatchError, BatchResult, BatchStats, BitmapFont, BlendMode, Camera2D, Color, DrawBatch,
        FontSource, Glyph, NullRenderBackend, PrimitiveBatch, PrimitiveBatchDescriptor,
        RenderBackend, SpriteBatch, SpriteBatchDescriptor, SpriteParams, Texture, TextureHandle,
        measure_text_width,
    };
}
