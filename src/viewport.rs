/// Drawable size of the canvas in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio after clamping.
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Computes the backing-store size for a canvas laid out at
    /// `client_width` × `client_height` CSS pixels.
    ///
    /// A missing or nonsensical `device_pixel_ratio` counts as 1; anything above
    /// `max_pixel_ratio` is clamped to it. Fractions of a pixel are dropped.
    pub fn from_layout(
        client_width: i32,
        client_height: i32,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let pixel_ratio = ratio.min(max_pixel_ratio);
        Self {
            width: scale(client_width, pixel_ratio),
            height: scale(client_height, pixel_ratio),
            pixel_ratio,
        }
    }

    /// True when the canvas currently has a different backing-store size.
    pub fn differs_from(&self, width: u32, height: u32) -> bool {
        self.width != width || self.height != height
    }
}

fn scale(css: i32, ratio: f64) -> u32 {
    (css.max(0) as f64 * ratio).floor() as u32
}
