//! The `DrawBatch` trait shared by every batch type.

use tessera_core::math::Matrix4;

use crate::{blend::BlendMode, error::BatchResult};

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    /// Between sessions. Only `begin` and `dispose` are valid.
    #[default]
    Idle,
    /// Inside `begin`/`end`.
    Recording,
    /// Storage released. Every further call fails.
    Disposed,
}

/// Counters for the most recent session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Items submitted: sprites and glyphs for a sprite batch, lines for a primitive batch.
    pub sprites: u32,
    /// Number of backend draw calls issued.
    pub draw_calls: u32,
    /// Number of texture binds issued.
    pub texture_binds: u32,
    /// Number of flushes, including capacity-triggered ones.
    pub flushes: u32,
    /// Number of flushes that had to reorder by depth.
    pub depth_sorts: u32,
}

/// Capability shared by all batch types.
///
/// A session must be opened with [`begin`](Self::begin) and closed with
/// exactly one [`end`](Self::end). Batches are single-writer: one session at a
/// time, driven from the thread that owns the backend.
pub trait DrawBatch: Send {
    /// Open a session. Uploads `view_matrix` and selects `blend_mode` on the backend.
    fn begin(&mut self, view_matrix: &Matrix4, blend_mode: BlendMode) -> BatchResult<()>;

    /// Flush pending geometry, restore the default blend state and close the session.
    fn end(&mut self) -> BatchResult<()>;

    /// Release CPU-side storage. The batch cannot be used afterwards.
    fn dispose(&mut self);

    fn is_recording(&self) -> bool;

    /// Statistics for the current or most recent session.
    fn stats(&self) -> BatchStats;
}
