//! Render backend contract for Tessera batches.
//!
//! Batches never talk to a GPU API directly. Everything they need from a
//! graphics backend goes through the object-safe [`RenderBackend`] trait:
//! set a blend state, upload the view matrix, bind a texture, upload packed
//! vertex bytes and issue a non-indexed draw.
//!
//! - [`RenderBackend`] - the trait a wgpu (or any other) renderer implements
//! - [`NullRenderBackend`] - discards everything, handy for headless runs
//! - `MockRenderBackend` - records every call for assertions (requires `mock` feature)
//!
//! The crate enables `mock` on itself as a dev-dependency, so `cargo test -p
//! tessera-test-utils` runs the mock's unit tests without extra flags.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use tessera_test_utils::{MockRenderBackend, RenderBackend};
//!
//! let mock = MockRenderBackend::new();
//! mock.bind_texture(7);
//! mock.upload_vertex_data(&[0u8; 192]);
//! mock.draw_triangles(6);
//!
//! assert_eq!(mock.count_draw_calls(), 1);
//! assert_eq!(mock.bound_textures(), vec![7]);
//! # }
//! ```
//!
//! Methods take `&self`; the mock uses a `parking_lot::Mutex` for interior
//! mutability, so one `Arc<dyn RenderBackend>` can be shared by every batch.

#[cfg(feature = "mock")]
pub mod mock_backend;
pub mod render_backend;

#[cfg(feature = "mock")]
pub use mock_backend::*;
pub use render_backend::*;
