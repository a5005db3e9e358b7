//! Test fixtures and helpers.

use pixelcam::rendering::{encode_png, RgbFrame};
use pixelcam::services::JsonFileStore;
use retro_palette::Rgb;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Custom palette definitions shared across tests
pub mod palettes {
    /// Two-tone sunset palette
    pub fn sunset() -> Vec<Vec<i64>> {
        vec![vec![255, 94, 77], vec![40, 20, 60]]
    }

    /// Entry with four components
    pub fn malformed() -> Vec<Vec<i64>> {
        vec![vec![0, 0, 0], vec![1, 2, 3, 4]]
    }
}

/// Scratch directory with a settings store inside it
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join("pixelcam.json")
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.settings_path())
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Horizontal gradient from black to white, identical on every row
pub fn gradient_frame(width: u32, height: u32) -> RgbFrame {
    let pixels = (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| {
                let v = (x * 255 / (width - 1).max(1)) as u8;
                Rgb::new(v, v, v)
            })
        })
        .collect();
    RgbFrame::new(width, height, pixels).expect("Invalid gradient frame")
}

/// Write a frame as PNG to `path`
pub fn write_png(path: &Path, frame: &RgbFrame) {
    let bytes = encode_png(frame).expect("Failed to encode PNG");
    std::fs::write(path, bytes).expect("Failed to write PNG");
}
