use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Settings serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),

    #[error("Invalid frame: expected {expected} pixels for {width}x{height}, got {actual}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Output of {width}x{height} exceeds the limit of {limit} pixels")]
    OutputTooLarge { width: u64, height: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
