/// Default number of sprites a [`SpriteBatch`](super::SpriteBatch) holds before flushing.
pub const DEFAULT_SPRITE_CAPACITY: usize = 256;

/// Default number of lines a [`PrimitiveBatch`](super::PrimitiveBatch) holds before flushing.
pub const DEFAULT_LINE_CAPACITY: usize = 250;

/// Construction parameters for a [`SpriteBatch`](super::SpriteBatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteBatchDescriptor {
    /// Sprites held before a flush is forced. Must be at least 1.
    pub capacity: usize,
    /// Debug label used in log output.
    pub label: Option<String>,
}

impl Default for SpriteBatchDescriptor {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SPRITE_CAPACITY,
            label: None,
        }
    }
}

impl SpriteBatchDescriptor {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Construction parameters for a [`PrimitiveBatch`](super::PrimitiveBatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveBatchDescriptor {
    /// Lines held before a flush is forced. Must be at least 1.
    pub capacity: usize,
    pub label: Option<String>,
}

impl Default for PrimitiveBatchDescriptor {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LINE_CAPACITY,
            label: None,
        }
    }
}

impl PrimitiveBatchDescriptor {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
