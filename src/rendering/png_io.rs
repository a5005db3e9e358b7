//! PNG decoding and encoding for RGB frames.

use std::io::{Cursor, Read};

use crate::error::RenderError;
use crate::rendering::pixelate::RgbFrame;
use retro_palette::Rgb;

/// Decode a PNG into an RGB frame.
///
/// Palette, low-bit-depth and 16-bit images are expanded to 8-bit channels.
/// Alpha is discarded.
pub fn decode_png<R: Read>(reader: R) -> Result<RgbFrame, RenderError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let stride = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(RenderError::UnsupportedColorType(format!("{other:?}"))),
    };

    let pixels: Vec<Rgb> = bytes
        .chunks_exact(stride)
        .map(|px| match stride {
            1 | 2 => Rgb::new(px[0], px[0], px[0]),
            _ => Rgb::new(px[0], px[1], px[2]),
        })
        .collect();

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    RgbFrame::new(info.width, info.height, pixels)
}

/// Encode an RGB frame as an 8-bit RGB PNG.
pub fn encode_png(frame: &RgbFrame) -> Result<Vec<u8>, RenderError> {
    let data: Vec<u8> = frame.pixels().iter().flat_map(|p| p.to_bytes()).collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
