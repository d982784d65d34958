//! Batches that turn per-frame draw requests into backend draw calls.
//!
//! Every batch follows the same session shape:
//!
//! ```text
//! begin(view_matrix, blend_mode) -> draw ... -> end()
//! ```
//!
//! Draws only fill preallocated CPU-side storage. Geometry reaches the
//! backend when the batch fills up or when the session ends.

mod descriptor;
mod params;
mod primitive_batch;
mod sprite_batch;
mod traits;

pub use descriptor::{PrimitiveBatchDescriptor, SpriteBatchDescriptor};
pub use params::{Destination, SpriteParams};
pub use primitive_batch::PrimitiveBatch;
pub use sprite_batch::SpriteBatch;
pub use traits::{BatchState, BatchStats, DrawBatch};
