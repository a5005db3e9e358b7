//! Settings persistence and change notification.
//!
//! Stores load and save [`Settings`] explicitly and broadcast a
//! [`SettingsEvent`] after every successful save, so UI and render loops can
//! react without polling.

use crate::error::SettingsError;
use crate::models::Settings;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

/// Event sent when settings change
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    /// Settings were saved; carries the saved value
    Saved(Settings),
}

/// Trait for settings storage
pub trait SettingsStore: Send + Sync {
    /// Load the current settings
    fn load(&self) -> Result<Settings, SettingsError>;

    /// Persist settings and notify subscribers
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Subscribe to settings change events
    fn subscribe(&self) -> broadcast::Receiver<SettingsEvent>;

    /// Load, modify and save in one step, returning the saved settings.
    fn update<F>(&self, f: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings),
        Self: Sized,
    {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

fn notify(sender: &broadcast::Sender<SettingsEvent>, settings: &Settings) {
    // No receivers is fine: nobody is listening yet
    let _ = sender.send(SettingsEvent::Saved(settings.clone()));
}

/// Settings stored as a pretty-printed JSON file
pub struct JsonFileStore {
    path: PathBuf,
    sender: broadcast::Sender<SettingsEvent>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (sender, _) = broadcast::channel(16);
        Self {
            path: path.into(),
            sender,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is unreadable.
    ///
    /// A missing file is the normal first-run case and is not logged.
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), %e, "Failed to load settings, using defaults");
                Settings::default()
            }
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = serde_json::from_str(&content).map_err(SettingsError::Parse)?;
        tracing::debug!(
            path = %self.path.display(),
            palette = %settings.selected_palette,
            custom_palettes = settings.custom_palettes.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(settings).map_err(SettingsError::Serialize)?;
        std::fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), "Saved settings");

        notify(&self.sender, settings);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.sender.subscribe()
    }
}

/// In-memory settings storage
pub struct InMemoryStore {
    settings: RwLock<Settings>,
    sender: broadcast::Sender<SettingsEvent>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let (sender, _) = broadcast::channel(16);
        Self {
            settings: RwLock::new(settings),
            sender,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for InMemoryStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        Ok(settings.clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        notify(&self.sender, settings);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.sender.subscribe()
    }
}
