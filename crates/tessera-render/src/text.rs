//! Glyph expansion for bitmap fonts.
//!
//! A string is laid out into one textured quad per renderable glyph. The
//! quads are plain [`GlyphQuad`]s, so [`SpriteBatch::draw_text`] feeds them
//! through the same path as any other sprite.
//!
//! [`SpriteBatch::draw_text`]: crate::SpriteBatch::draw_text

use tessera_core::{alloc::HashMap, math::Rectangle, math::Vector2};

use crate::texture::Texture;

/// Metrics of a single glyph in a font atlas, in atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
}

impl Glyph {
    /// Region of the atlas holding this glyph.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}

/// A font the sprite batch can render.
pub trait FontSource {
    /// Atlas texture every glyph samples from.
    fn texture(&self) -> &Texture;

    /// Pixel size the font metrics were generated at.
    fn native_size(&self) -> f32;

    /// Rasterization oversampling of the atlas relative to the metrics.
    fn oversampling(&self) -> f32 {
        1.0
    }

    fn horizontal_spacing(&self) -> f32 {
        0.0
    }

    fn vertical_spacing(&self) -> f32 {
        0.0
    }

    fn glyph(&self, ch: char) -> Option<&Glyph>;
}

/// Bitmap font backed by a prebuilt atlas texture.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    texture: Texture,
    native_size: f32,
    oversampling: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    glyphs: HashMap<char, Glyph>,
}

impl BitmapFont {
    pub fn new(texture: Texture, native_size: f32) -> Self {
        Self {
            texture,
            native_size,
            oversampling: 1.0,
            horizontal_spacing: 0.0,
            vertical_spacing: 0.0,
            glyphs: HashMap::new(),
        }
    }

    pub fn with_oversampling(mut self, oversampling: f32) -> Self {
        self.oversampling = oversampling;
        self
    }

    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn insert_glyph(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.insert_glyph(ch, glyph);
        self
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl FontSource for BitmapFont {
    fn texture(&self) -> &Texture {
        &self.texture
    }

    fn native_size(&self) -> f32 {
        self.native_size
    }

    fn oversampling(&self) -> f32 {
        self.oversampling
    }

    fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }
}

/// One laid-out glyph: where it goes and which atlas region it samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub destination: Rectangle,
    pub source: Rectangle,
}

/// Iterator over the glyph quads of a string.
///
/// The first baseline sits at `position.y + font_size + vertical_spacing`.
/// `'\n'` returns the cursor to `position.x` and moves down one line.
/// Characters without a glyph are skipped and do not advance the cursor.
pub struct GlyphLayout<'a, F: FontSource + ?Sized> {
    font: &'a F,
    chars: std::str::Chars<'a>,
    origin_x: f32,
    cursor: Vector2,
    line_height: f32,
    /// Metrics to world units
    scale: f32,
    /// Atlas pixels to world units
    glyph_scale: f32,
}

impl<'a, F: FontSource + ?Sized> GlyphLayout<'a, F> {
    pub fn new(font: &'a F, text: &'a str, position: Vector2, font_size: f32) -> Self {
        let line_height = font_size + font.vertical_spacing();
        Self {
            font,
            chars: text.chars(),
            origin_x: position.x,
            cursor: Vector2::new(position.x, position.y + line_height),
            line_height,
            scale: font_size / font.native_size(),
            glyph_scale: font_size / (font.native_size() * font.oversampling()),
        }
    }
}

impl<F: FontSource + ?Sized> Iterator for GlyphLayout<'_, F> {
    type Item = GlyphQuad;

    fn next(&mut self) -> Option<GlyphQuad> {
        loop {
            let ch = self.chars.next()?;

            if ch == '\n' {
                self.cursor.x = self.origin_x;
                self.cursor.y += self.line_height;
                continue;
            }

            let Some(glyph) = self.font.glyph(ch) else {
                continue;
            };

            let quad = GlyphQuad {
                destination: Rectangle::new(
                    self.cursor.x + glyph.x_offset * self.scale,
                    self.cursor.y + glyph.y_offset * self.scale,
                    glyph.width * self.glyph_scale,
                    glyph.height * self.glyph_scale,
                ),
                source: glyph.source_rect(),
            };
            self.cursor.x += glyph.x_advance * self.scale + self.font.horizontal_spacing();
            return Some(quad);
        }
    }
}

/// Width of the widest line of `text` at `font_size`, using the same advance
/// rule as [`GlyphLayout`].
pub fn measure_text_width<F: FontSource + ?Sized>(font: &F, text: &str, font_size: f32) -> f32 {
    let scale = font_size / font.native_size();
    text.split('\n')
        .map(|line| {
            line.chars()
                .filter_map(|ch| font.glyph(ch))
                .map(|glyph| glyph.x_advance * scale + font.horizontal_spacing())
                .sum::<f32>()
        })
        .fold(0.0, f32::max)
}
