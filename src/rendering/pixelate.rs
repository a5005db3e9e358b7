//! Block pixelation with optional palette quantization.
//!
//! Each `pixel_size` square of the source frame collapses to its average
//! color, brightened or darkened by the exposure factor and, when a palette
//! is active, snapped to the nearest palette entry. The result is then
//! resized by `scale` with nearest-neighbour sampling.

use crate::error::RenderError;
use crate::models::Settings;
use retro_palette::{Quantizer, Rgb};

/// Largest output frame `pixelate` will allocate, in pixels.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 26;

/// An RGB image held row-major in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RgbFrame {
    /// Wrap a pixel buffer, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected || expected == 0 {
            return Err(RenderError::InvalidFrame {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, RenderError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at (x, y). Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }
}

/// Pixelation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelateOptions {
    /// Block edge length in source pixels (at least 1)
    pub pixel_size: u32,
    /// Output scale factor (greater than 0)
    pub scale: f32,
    /// Brightness multiplier (0 or more)
    pub exposure: f32,
}

impl PixelateOptions {
    /// Options taken from saved settings, clamped to usable values.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pixel_size: settings.pixel_size,
            scale: settings.scale,
            exposure: settings.exposure,
        }
        .sanitized()
    }

    /// Clamp out-of-range values instead of failing mid-render.
    pub fn sanitized(self) -> Self {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            tracing::warn!(scale = self.scale, "Invalid scale, using 1.0");
            1.0
        };
        let exposure = if self.exposure.is_finite() {
            self.exposure.max(0.0)
        } else {
            tracing::warn!(exposure = self.exposure, "Invalid exposure, using 1.0");
            1.0
        };
        Self {
            pixel_size: self.pixel_size.max(1),
            scale,
            exposure,
        }
    }
}

impl Default for PixelateOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Pixelate `frame`, optionally quantizing each block to a palette.
///
/// Fails with [`RenderError::OutputTooLarge`] when the scaled frame would
/// exceed [`MAX_OUTPUT_PIXELS`].
pub fn pixelate(
    frame: &RgbFrame,
    quantizer: Option<&Quantizer>,
    options: &PixelateOptions,
) -> Result<RgbFrame, RenderError> {
    let options = options.sanitized();
    let (out_w, out_h) = output_size(frame, options.scale)?;
    let w = frame.width as usize;
    let h = frame.height as usize;
    let block = options.pixel_size as usize;

    let mut pixels = vec![Rgb::default(); w * h];

    for by in (0..h).step_by(block) {
        let y_end = (by + block).min(h);
        for bx in (0..w).step_by(block) {
            let x_end = (bx + block).min(w);

            let average = block_average(&frame.pixels, w, bx..x_end, by..y_end);
            let exposed = apply_exposure(average, options.exposure);
            let color = match quantizer {
                Some(q) => q.map(exposed),
                None => exposed,
            };

            for y in by..y_end {
                pixels[y * w + bx..y * w + x_end].fill(color);
            }
        }
    }

    let pixelated = RgbFrame {
        width: frame.width,
        height: frame.height,
        pixels,
    };

    if (out_w, out_h) == (frame.width, frame.height) {
        Ok(pixelated)
    } else {
        Ok(resize_nearest(&pixelated, out_w, out_h))
    }
}

/// Scaled dimensions, rounded and at least 1, checked against the limit.
fn output_size(frame: &RgbFrame, scale: f32) -> Result<(u32, u32), RenderError> {
    let scaled = |v: u32| ((v as f64 * scale as f64).round() as u64).max(1);
    let (width, height) = (scaled(frame.width), scaled(frame.height));

    if width.saturating_mul(height) > MAX_OUTPUT_PIXELS {
        return Err(RenderError::OutputTooLarge {
            width,
            height,
            limit: MAX_OUTPUT_PIXELS,
        });
    }
    // Both fit in u32 once the product is within the limit
    Ok((width as u32, height as u32))
}

/// Rounded mean of the pixels in a rectangle.
fn block_average(
    pixels: &[Rgb],
    width: usize,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
) -> Rgb {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    let count = (xs.len() * ys.len()) as u64;

    for y in ys {
        for p in &pixels[y * width + xs.start..y * width + xs.end] {
            r += p.r as u64;
            g += p.g as u64;
            b += p.b as u64;
        }
    }

    let mean = |sum: u64| ((sum + count / 2) / count) as u8;
    Rgb::new(mean(r), mean(g), mean(b))
}

#[inline]
fn apply_exposure(color: Rgb, exposure: f32) -> Rgb {
    if exposure == 1.0 {
        return color;
    }
    let channel = |v: u8| (v as f32 * exposure).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

/// Nearest-neighbour resize to `out_w` x `out_h`.
fn resize_nearest(frame: &RgbFrame, out_w: u32, out_h: u32) -> RgbFrame {
    let mut pixels = Vec::with_capacity(out_w as usize * out_h as usize);
    for y in 0..out_h {
        let src_y = ((y as u64 * frame.height as u64) / out_h as u64) as u32;
        for x in 0..out_w {
            let src_x = ((x as u64 * frame.width as u64) / out_w as u64) as u32;
            pixels.push(frame.pixel(src_x, src_y));
        }
    }

    RgbFrame {
        width: out_w,
        height: out_h,
        pixels,
    }
}
