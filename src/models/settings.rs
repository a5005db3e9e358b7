use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Palette name meaning "no palette filter".
pub const NO_PALETTE: &str = "none";

/// User settings persisted between sessions.
///
/// Field names are camelCase on disk so files written by earlier versions of
/// the camera front end keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Output scale factor applied after pixelation
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Edge length of a pixelation block, in source pixels
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,

    /// Active palette name, or `"none"` for no palette filter
    #[serde(default = "default_selected_palette")]
    pub selected_palette: String,

    /// User-defined palettes as name -> list of `[r, g, b]` entries.
    ///
    /// Entries are kept loosely typed here and validated when registered.
    #[serde(default)]
    pub custom_palettes: BTreeMap<String, Vec<Vec<i64>>>,

    /// Brightness multiplier applied to each averaged block
    #[serde(default = "default_exposure")]
    pub exposure: f32,
}

fn default_scale() -> f32 {
    1.0
}

fn default_pixel_size() -> u32 {
    10
}

fn default_selected_palette() -> String {
    NO_PALETTE.to_string()
}

fn default_exposure() -> f32 {
    1.0
}

impl Settings {
    /// Active palette name, or `None` when the filter is off.
    pub fn active_palette(&self) -> Option<&str> {
        match self.selected_palette.as_str() {
            "" | NO_PALETTE => None,
            name => Some(name),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            pixel_size: default_pixel_size(),
            selected_palette: default_selected_palette(),
            custom_palettes: BTreeMap::new(),
            exposure: default_exposure(),
        }
    }
}
