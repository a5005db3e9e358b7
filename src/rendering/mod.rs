pub mod pixelate;
pub mod png_io;

pub use pixelate::{pixelate, PixelateOptions, RgbFrame, MAX_OUTPUT_PIXELS};
pub use png_io::{decode_png, encode_png};
