//! Math types used by the sprite pipeline.
//!
//! [`Matrix4`] and [`Vector2`] are plain scalar types with explicit in-place
//! operations. They convert to and from the SIMD-backed [`fast`] types when a
//! caller wants glam's API.

mod matrix4;
mod rectangle;
mod vector2;

pub use matrix4::Matrix4;
pub use rectangle::Rectangle;
pub use vector2::Vector2;

/// Re-export of [`glam`](https://docs.rs/glam) for callers that already work in glam types.
pub mod fast {
    pub use glam::*;
}
