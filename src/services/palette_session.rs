//! Glue between persisted settings and the palette registry.
//!
//! The registry knows nothing about persistence. This module pushes the
//! custom palettes from [`Settings`] into a [`PaletteRegistry`] and resolves
//! the active palette for the render loop.

use crate::models::{Settings, NO_PALETTE};
use retro_palette::{Palette, PaletteError, PaletteRegistry, ParseColorError, Rgb};

/// Parse a single color given as hex (`#0f380f`) or decimal `r,g,b`.
pub fn parse_color(input: &str) -> Result<Rgb, PaletteError> {
    let input = input.trim();
    if !input.contains(',') {
        return Ok(input.parse::<Rgb>()?);
    }

    let components = input
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PaletteError::ParseColor(ParseColorError::InvalidDecimal(e)))?;
    Rgb::from_components(&components).map_err(|reason| PaletteError::InvalidEntry { index: 0, reason })
}

/// Parse a comma-separated list of hex colors (e.g. `"#000000,#FFFFFF"`).
///
/// Empty segments are ignored, so an empty string yields an empty list.
pub fn parse_color_list(input: &str) -> Result<Vec<Rgb>, PaletteError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Rgb>().map_err(PaletteError::from))
        .collect()
}

/// Reject names a custom palette cannot use.
///
/// Besides the built-in names, `"none"` is taken: a palette stored under it
/// could never be selected.
pub fn check_custom_name(registry: &PaletteRegistry, name: &str) -> Result<(), PaletteError> {
    if name == NO_PALETTE || registry.is_builtin(name) {
        return Err(PaletteError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Outcome of syncing custom palettes into a registry
#[derive(Debug, Default, PartialEq)]
pub struct SyncReport {
    /// Palettes registered or replaced
    pub registered: Vec<String>,
    /// Registry customs removed because settings no longer define them
    pub removed: Vec<String>,
    /// Palettes skipped because they were rejected
    pub rejected: Vec<(String, PaletteError)>,
}

/// Make the registry's custom palettes match `settings.custom_palettes`.
///
/// Each definition is validated on registration. Invalid definitions and
/// definitions using a built-in name are skipped with a warning and reported
/// back; a previously registered palette of the same name is left as it was.
pub fn sync_custom_palettes(registry: &PaletteRegistry, settings: &Settings) -> SyncReport {
    let mut report = SyncReport::default();

    for name in registry.custom_names() {
        if !settings.custom_palettes.contains_key(&name) {
            match registry.remove(&name) {
                Ok(_) => report.removed.push(name),
                Err(e) => tracing::warn!(palette = %name, %e, "Failed to remove custom palette"),
            }
        }
    }

    for (name, entries) in &settings.custom_palettes {
        let registered = check_custom_name(registry, name)
            .and_then(|()| registry.register_components(name.as_str(), entries));
        match registered {
            Ok(()) => {
                tracing::debug!(palette = %name, colors = entries.len(), "Registered custom palette");
                report.registered.push(name.clone());
            }
            Err(e) => {
                tracing::warn!(palette = %name, %e, "Skipping custom palette");
                report.rejected.push((name.clone(), e));
            }
        }
    }

    report
}

/// Resolve the active palette named in `settings`.
///
/// Returns `None` when no palette is selected or when the selected name is
/// not registered; in the second case a warning is logged and the caller
/// should skip the palette filter.
pub fn resolve_active_palette(registry: &PaletteRegistry, settings: &Settings) -> Option<Palette> {
    let name = settings.active_palette()?;
    match registry.get(name) {
        Ok(palette) => Some(palette),
        Err(e) => {
            tracing::warn!(palette = %name, %e, "Active palette unavailable, filter disabled");
            None
        }
    }
}
