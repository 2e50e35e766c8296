/// Options for opening the device and configuring the window surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// Canvas colors are stored sRGB-encoded; on an sRGB surface the blit
    /// linearizes them first, so both settings show the same colors.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Requested compositor alpha mode. Falls back to the first supported
    /// mode when the surface does not offer it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Device creation fails when the adapter lacks any of these.
    pub required_features: wgpu::Features,

    /// Enabled only when the adapter offers them.
    ///
    /// `INDIRECT_FIRST_INSTANCE` lets a canvas paint run as multi-draws;
    /// without it the renderer falls back to one direct draw per shape.
    pub optional_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Frame latency hint passed to the surface.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Same options with vsync toggled (`Fifo` on, `AutoNoVsync` off).
    pub fn vsync(mut self, on: bool) -> Self {
        self.present_mode = if on {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self
    }

    /// Features to request from an adapter offering `available`.
    pub(super) fn device_features(&self, available: wgpu::Features) -> wgpu::Features {
        self.required_features | (self.optional_features & available)
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            optional_features: wgpu::Features::INDIRECT_FIRST_INSTANCE,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
