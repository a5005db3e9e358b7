pub mod palette_session;
pub mod settings_store;

pub use palette_session::{
    check_custom_name, parse_color, parse_color_list, resolve_active_palette, sync_custom_palettes,
    SyncReport,
};
pub use settings_store::{InMemoryStore, JsonFileStore, SettingsEvent, SettingsStore};
