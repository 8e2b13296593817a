/// How the swapchain and device should be set up.
///
/// [`GpuInit::default`] gives an opaque window; [`GpuInit::transparent`] asks
/// the compositor to blend the window over the desktop.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported and the overlay only presents once per tick.
    pub present_mode: wgpu::PresentMode,

    /// Alpha modes to try, in order of preference.
    ///
    /// The first one the surface supports wins; with no match (or an empty
    /// list) the surface's first supported mode is used.
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (hint).
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Settings for a window composited over the desktop.
    ///
    /// Renderers emit premultiplied color, so premultiplied compositing is
    /// preferred; post-multiplied and `Inherit` are fallbacks some platforms offer.
    pub fn transparent() -> Self {
        Self {
            alpha_modes: vec![
                wgpu::CompositeAlphaMode::PreMultiplied,
                wgpu::CompositeAlphaMode::PostMultiplied,
                wgpu::CompositeAlphaMode::Inherit,
            ],
            ..Self::default()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_modes: Vec::new(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
