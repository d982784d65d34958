use tessera_core::math::{Rectangle, Vector2};

use crate::color::Color;

/// Where a sprite lands in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// Top-left position; size comes from the source region times scale.
    Position(Vector2),
    /// Explicit world rectangle; scale is ignored.
    Area(Rectangle),
}

/// Everything a single sprite draw can specify.
///
/// ```
/// use tessera_core::math::{Rectangle, Vector2};
/// use tessera_render::{Color, SpriteParams};
///
/// let params = SpriteParams::at(Vector2::new(64.0, 32.0))
///     .source(Rectangle::new(0.0, 0.0, 16.0, 16.0))
///     .anchor(Vector2::HALF)
///     .rotation(0.25)
///     .scale(2.0)
///     .color(Color::RED)
///     .depth(3);
/// assert_eq!(params.depth, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteParams {
    pub destination: Destination,
    /// Texture region in pixels. `None` samples the whole texture.
    pub source: Option<Rectangle>,
    pub color: Color,
    /// Pivot as a fraction of the sprite size, used for placement and rotation.
    pub anchor: Vector2,
    pub scale: Vector2,
    /// Radians around the anchor.
    pub rotation: f32,
    /// Lower depths draw first.
    pub depth: i32,
}

impl SpriteParams {
    pub fn at(position: Vector2) -> Self {
        Self::new(Destination::Position(position))
    }

    pub fn area(area: Rectangle) -> Self {
        Self::new(Destination::Area(area))
    }

    fn new(destination: Destination) -> Self {
        Self {
            destination,
            source: None,
            color: Color::WHITE,
            anchor: Vector2::ZERO,
            scale: Vector2::ONE,
            rotation: 0.0,
            depth: 0,
        }
    }

    pub fn source(mut self, source: Rectangle) -> Self {
        self.source = Some(source);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn anchor(mut self, anchor: Vector2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Vector2::splat(scale);
        self
    }

    pub fn scale_xy(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale = Vector2::new(scale_x, scale_y);
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Destination rectangle for a texture of `texture_size` pixels.
    pub(crate) fn resolve(&self, texture_size: (f32, f32)) -> Rectangle {
        match self.destination {
            Destination::Area(area) => area,
            Destination::Position(position) => {
                let (w, h) = self
                    .source
                    .map(|s| (s.width, s.height))
                    .unwrap_or(texture_size);
                Rectangle::new(position.x, position.y, w * self.scale.x, h * self.scale.y)
            }
        }
    }
}
