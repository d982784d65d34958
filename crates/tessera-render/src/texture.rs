use tessera_test_utils::TextureId;

/// Backend identity of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(TextureId);

impl TextureHandle {
    pub const fn new(id: TextureId) -> Self {
        Self(id)
    }

    pub const fn id(self) -> TextureId {
        self.0
    }
}

/// A texture the batch can sample from.
///
/// Loading and uploading happen elsewhere; the batch only needs the handle to
/// bind and the pixel size to turn source rectangles into UVs. The handle must
/// stay valid until the session that references it has ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub const fn new(handle: TextureHandle, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}
