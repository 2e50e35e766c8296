use crate::coords::Pixel;
use crate::scene::Capacity;

/// Pixel zoom policy of a canvas.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Zoom {
    /// Fixed window pixels per canvas pixel (clamped to at least 1).
    Fixed(i16),
    /// Largest integer zoom at which the target resolution fits the window.
    Auto,
}

/// Canvas creation options.
///
/// ```
/// use pixcanvas_engine::canvas::CanvasConfig;
///
/// let cfg = CanvasConfig::default().resolution(320, 180).autozoom();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    pub name: Option<String>,
    /// Target resolution in canvas pixels.
    pub resolution: Pixel,
    pub zoom: Zoom,
    pub capacity: Capacity,
}

impl CanvasConfig {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn resolution(mut self, width: i16, height: i16) -> Self {
        self.resolution = Pixel::new(width, height);
        self
    }

    pub fn zoom(mut self, pixel: i16) -> Self {
        self.zoom = Zoom::Fixed(pixel);
        self
    }

    pub fn autozoom(mut self) -> Self {
        self.zoom = Zoom::Auto;
        self
    }

    pub fn capacity(mut self, commands: u32, params: u32) -> Self {
        self.capacity = Capacity::new(commands, params);
        self
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            name: None,
            resolution: Pixel::new(640, 360),
            zoom: Zoom::Fixed(2),
            capacity: Capacity::default(),
        }
    }
}
