//! Blend modes a sprite batch session can be opened with.

/// How source and destination colors are combined for a batch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Straight alpha blending.
    ///
    /// Formula: `src.rgb * src.a + dst.rgb * (1 - src.a)`
    #[default]
    Normal,

    /// Additive blending for glows and particles.
    ///
    /// Formula: `src.rgb + dst.rgb`
    Additive,

    /// Multiplicative blending for shadows and tinting.
    ///
    /// Formula: `src.rgb * dst.rgb`
    Multiply,

    /// Linear interpolation between source and destination by source alpha.
    ///
    /// Uses the same factors as [`Normal`](Self::Normal).
    ///
    /// Formula: `src.rgb * src.a + dst.rgb * (1 - src.a)`
    Interpolate,
}

impl BlendMode {
    /// Convert to wgpu BlendState.
    pub fn to_blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Normal | BlendMode::Interpolate => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
            BlendMode::Multiply => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Dst,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::DstAlpha,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }

    /// Create a color target state with this blend mode.
    pub fn to_color_target_state(self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: Some(self.to_blend_state()),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }
}

impl From<BlendMode> for wgpu::BlendState {
    fn from(mode: BlendMode) -> Self {
        mode.to_blend_state()
    }
}
