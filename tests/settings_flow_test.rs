//! Tests for settings persistence feeding the palette registry.

mod common;

use common::{palettes, TestEnv};
use pixelcam::models::Settings;
use pixelcam::services::{
    resolve_active_palette, sync_custom_palettes, SettingsEvent, SettingsStore,
};
use pretty_assertions::assert_eq;
use retro_palette::{PaletteError, PaletteRegistry, Rgb};

#[test]
fn test_custom_palette_survives_restart() {
    let env = TestEnv::new();

    env.store()
        .update(|s| {
            s.custom_palettes.insert("sunset".to_string(), palettes::sunset());
            s.selected_palette = "sunset".to_string();
        })
        .unwrap();

    // Fresh store and registry, as on the next launch
    let settings = env.store().load().unwrap();
    let registry = PaletteRegistry::new();
    let report = sync_custom_palettes(&registry, &settings);
    assert_eq!(report.registered, vec!["sunset"]);

    let active = resolve_active_palette(&registry, &settings).unwrap();
    assert_eq!(active.colors(), &[Rgb::new(255, 94, 77), Rgb::new(40, 20, 60)]);
    assert_eq!(active.nearest(Rgb::new(250, 100, 90)), Ok(Rgb::new(255, 94, 77)));
}

#[test]
fn test_malformed_custom_palette_is_skipped() {
    let env = TestEnv::new();
    let mut settings = Settings::default();
    settings
        .custom_palettes
        .insert("broken".to_string(), palettes::malformed());
    settings.selected_palette = "broken".to_string();
    env.store().save(&settings).unwrap();

    let registry = PaletteRegistry::new();
    let report = sync_custom_palettes(&registry, &env.store().load().unwrap());

    assert!(report.registered.is_empty());
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(
        report.rejected[0].1,
        PaletteError::InvalidEntry { index: 1, .. }
    ));
    // Active selection points at nothing: filter is skipped, not defaulted
    assert_eq!(resolve_active_palette(&registry, &settings), None);
}

#[test]
fn test_reserved_custom_name_keeps_builtin() {
    let env = TestEnv::new();
    env.store()
        .update(|s| {
            s.custom_palettes
                .insert("grayscale".to_string(), vec![vec![255, 0, 0]]);
            s.selected_palette = "grayscale".to_string();
        })
        .unwrap();

    let settings = env.store().load().unwrap();
    let registry = PaletteRegistry::new();
    sync_custom_palettes(&registry, &settings);

    let active = resolve_active_palette(&registry, &settings).unwrap();
    assert_eq!(active.len(), 5);
    assert_eq!(active.get(4), Some(Rgb::new(255, 255, 255)));
}

#[test]
fn test_removing_custom_palette_from_settings() {
    let env = TestEnv::new();
    let store = env.store();
    let registry = PaletteRegistry::new();

    store
        .update(|s| {
            s.custom_palettes.insert("sunset".to_string(), palettes::sunset());
        })
        .unwrap();
    sync_custom_palettes(&registry, &store.load().unwrap());
    assert!(registry.contains("sunset"));

    store
        .update(|s| {
            s.custom_palettes.remove("sunset");
        })
        .unwrap();
    let report = sync_custom_palettes(&registry, &store.load().unwrap());

    assert_eq!(report.removed, vec!["sunset"]);
    assert!(!registry.contains("sunset"));
}

#[test]
fn test_subscribers_see_every_save() {
    let env = TestEnv::new();
    let store = env.store();
    let mut rx = store.subscribe();

    store.update(|s| s.pixel_size = 4).unwrap();
    store.update(|s| s.selected_palette = "pastel".to_string()).unwrap();

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    let SettingsEvent::Saved(first) = first;
    let SettingsEvent::Saved(second) = second;

    assert_eq!(first.pixel_size, 4);
    assert_eq!(first.selected_palette, "none");
    assert_eq!(second.pixel_size, 4);
    assert_eq!(second.selected_palette, "pastel");
}

#[test]
fn test_settings_file_is_camel_case_json() {
    let env = TestEnv::new();
    env.store()
        .update(|s| {
            s.selected_palette = "gameboy".to_string();
            s.custom_palettes.insert("sunset".to_string(), palettes::sunset());
        })
        .unwrap();

    let raw = std::fs::read_to_string(env.settings_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["selectedPalette"], "gameboy");
    assert_eq!(json["pixelSize"], 10);
    assert_eq!(json["customPalettes"]["sunset"][0][1], 94);
}
