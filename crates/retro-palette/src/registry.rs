//! Named palette registry.
//!
//! Built-in palettes are fixed for the registry's lifetime. Custom palettes
//! live in a copy-on-write list: every mutation builds a new list and swaps
//! it in under the write lock, so readers holding an older snapshot never
//! see a half-applied change.

use std::sync::{Arc, PoisonError, RwLock};

use crate::palette::{BuiltinPalette, Palette, PaletteError};

type CustomSet = Vec<(String, Palette)>;

/// Registry of built-in and custom palettes, keyed by name.
///
/// Safe to share between threads. Concurrent `register`/`remove` calls
/// follow last-write-wins.
///
/// # Example
///
/// ```
/// use retro_palette::{PaletteRegistry, Rgb};
///
/// let registry = PaletteRegistry::new();
/// registry.register("mono", vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
///
/// let mono = registry.get("mono").unwrap();
/// assert_eq!(mono.nearest(Rgb::new(30, 30, 30)), Ok(Rgb::new(0, 0, 0)));
///
/// let listing = registry.names();
/// let names: Vec<_> = listing.iter().collect();
/// assert_eq!(names.last(), Some(&"mono"));
/// ```
#[derive(Debug)]
pub struct PaletteRegistry {
    builtins: Vec<Palette>,
    custom: RwLock<Arc<CustomSet>>,
}

impl PaletteRegistry {
    /// Create a registry holding only the built-in palettes.
    pub fn new() -> Self {
        Self {
            builtins: BuiltinPalette::ALL.into_iter().map(Palette::builtin).collect(),
            custom: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Look up a palette by name.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::UnknownPalette`] if no built-in or custom
    /// palette has this name.
    pub fn get(&self, name: &str) -> Result<Palette, PaletteError> {
        if let Some(palette) = self.builtin(name) {
            return Ok(palette.clone());
        }
        self.snapshot()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, palette)| palette.clone())
            .ok_or_else(|| PaletteError::UnknownPalette {
                name: name.to_string(),
            })
    }

    /// Insert or replace a custom palette.
    ///
    /// An empty `entries` list is accepted; matching against it later fails
    /// with [`PaletteError::EmptyPalette`]. Replacing a palette keeps its
    /// position in [`names`](Self::names).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ReservedName`] if `name` is a built-in name.
    pub fn register(
        &self,
        name: impl Into<String>,
        entries: impl Into<Palette>,
    ) -> Result<(), PaletteError> {
        let name = name.into();
        self.ensure_not_builtin(&name)?;
        let palette = entries.into();

        self.mutate(|custom| match custom.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = palette,
            None => custom.push((name, palette)),
        });
        Ok(())
    }

    /// Validate loosely typed integer triples and register them.
    ///
    /// This is the entry point for palette data read from settings or user
    /// input. Nothing is registered unless every entry is valid.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ReservedName`] for built-in names and
    /// [`PaletteError::InvalidEntry`] for the first malformed entry.
    pub fn register_components<E: AsRef<[i64]>>(
        &self,
        name: impl Into<String>,
        entries: &[E],
    ) -> Result<(), PaletteError> {
        let name = name.into();
        self.ensure_not_builtin(&name)?;
        let palette = Palette::from_components(entries)?;
        self.register(name, palette)
    }

    /// Remove a custom palette.
    ///
    /// Returns `Ok(true)` if a palette was removed and `Ok(false)` if no
    /// custom palette had this name.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ReservedName`] if `name` is a built-in name.
    pub fn remove(&self, name: &str) -> Result<bool, PaletteError> {
        self.ensure_not_builtin(name)?;

        let mut removed = false;
        self.mutate(|custom| {
            let before = custom.len();
            custom.retain(|(n, _)| n != name);
            removed = custom.len() != before;
        });
        Ok(removed)
    }

    /// Returns true if `name` resolves to a built-in or custom palette.
    pub fn contains(&self, name: &str) -> bool {
        self.is_builtin(name) || self.snapshot().iter().any(|(n, _)| n == name)
    }

    /// Returns true if `name` is reserved by a built-in palette.
    pub fn is_builtin(&self, name: &str) -> bool {
        BuiltinPalette::from_name(name).is_some()
    }

    /// Names of all custom palettes, in insertion order.
    pub fn custom_names(&self) -> Vec<String> {
        self.snapshot().iter().map(|(n, _)| n.clone()).collect()
    }

    /// List every known palette name.
    ///
    /// The listing captures the registry at the time of the call: built-ins
    /// first in declaration order, then custom palettes in insertion order.
    /// It can be iterated any number of times.
    pub fn names(&self) -> PaletteNames {
        PaletteNames {
            custom: self.snapshot(),
        }
    }

    fn builtin(&self, name: &str) -> Option<&Palette> {
        BuiltinPalette::ALL
            .into_iter()
            .position(|b| b.name() == name)
            .map(|idx| &self.builtins[idx])
    }

    fn ensure_not_builtin(&self, name: &str) -> Result<(), PaletteError> {
        if self.is_builtin(name) {
            return Err(PaletteError::ReservedName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn snapshot(&self) -> Arc<CustomSet> {
        // The guarded value is only ever replaced wholesale, so a poisoned
        // lock still holds a consistent set.
        self.custom
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn mutate(&self, f: impl FnOnce(&mut CustomSet)) {
        let mut guard = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = CustomSet::clone(&guard);
        f(&mut next);
        *guard = Arc::new(next);
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of registered palette names.
///
/// Returned by [`PaletteRegistry::names`]. Iteration is lazy and may be
/// restarted by calling [`iter`](Self::iter) again.
#[derive(Debug, Clone)]
pub struct PaletteNames {
    custom: Arc<CustomSet>,
}

impl PaletteNames {
    /// Iterate over the names, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        BuiltinPalette::ALL
            .into_iter()
            .map(|b| b.name())
            .chain(self.custom.iter().map(|(n, _)| n.as_str()))
    }

    /// Total number of names.
    pub fn len(&self) -> usize {
        BuiltinPalette::ALL.len() + self.custom.len()
    }

    /// Always false: the built-ins are always listed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a PaletteNames {
    type Item = &'a str;
    type IntoIter = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::InvalidEntryReason;

    fn two_tone() -> Vec<Rgb> {
        vec![Rgb::new(10, 20, 30), Rgb::new(200, 210, 220)]
    }

    #[test]
    fn test_get_builtin() {
        let registry = PaletteRegistry::new();
        let gameboy = registry.get("gameboy").unwrap();
        assert_eq!(gameboy.colors(), BuiltinPalette::Gameboy.colors());
    }

    #[test]
    fn test_get_unknown() {
        let registry = PaletteRegistry::new();
        assert_eq!(
            registry.get("doesnotexist"),
            Err(PaletteError::UnknownPalette {
                name: "doesnotexist".to_string()
            })
        );
    }

    #[test]
    fn test_register_and_get_custom() {
        let registry = PaletteRegistry::new();
        registry.register("duo", two_tone()).unwrap();
        assert_eq!(registry.get("duo").unwrap().colors(), two_tone().as_slice());
        assert!(registry.contains("duo"));
        assert!(!registry.is_builtin("duo"));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let registry = PaletteRegistry::new();
        registry.register("a", two_tone()).unwrap();
        registry.register("b", two_tone()).unwrap();
        registry.register("a", vec![Rgb::new(1, 1, 1)]).unwrap();

        assert_eq!(registry.get("a").unwrap().colors(), &[Rgb::new(1, 1, 1)]);
        assert_eq!(registry.custom_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_register_reserved_name() {
        let registry = PaletteRegistry::new();
        for builtin in BuiltinPalette::ALL {
            let result = registry.register(builtin.name(), two_tone());
            assert!(matches!(result, Err(PaletteError::ReservedName { .. })));
            assert_eq!(registry.get(builtin.name()).unwrap().colors(), builtin.colors());
        }
        assert!(registry.custom_names().is_empty());
    }

    #[test]
    fn test_register_components_validates() {
        let registry = PaletteRegistry::new();
        let result = registry.register_components("bad", &[vec![0, 0, 0], vec![0, 0, 256]]);
        assert_eq!(
            result,
            Err(PaletteError::InvalidEntry {
                index: 1,
                reason: InvalidEntryReason::OutOfRange(256),
            })
        );
        assert!(!registry.contains("bad"));
    }

    #[test]
    fn test_register_components_invalid_keeps_previous() {
        let registry = PaletteRegistry::new();
        registry.register("keep", two_tone()).unwrap();
        let result = registry.register_components("keep", &[vec![1, 2]]);
        assert!(result.is_err());
        assert_eq!(registry.get("keep").unwrap().colors(), two_tone().as_slice());
    }

    #[test]
    fn test_register_components_reserved_before_validation() {
        let registry = PaletteRegistry::new();
        let result = registry.register_components("pastel", &[vec![999]]);
        assert!(matches!(result, Err(PaletteError::ReservedName { .. })));
    }

    #[test]
    fn test_remove_custom() {
        let registry = PaletteRegistry::new();
        registry.register("gone", two_tone()).unwrap();
        assert_eq!(registry.remove("gone"), Ok(true));
        assert!(matches!(
            registry.get("gone"),
            Err(PaletteError::UnknownPalette { .. })
        ));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let registry = PaletteRegistry::new();
        assert_eq!(registry.remove("never-added"), Ok(false));
    }

    #[test]
    fn test_remove_builtin_rejected() {
        let registry = PaletteRegistry::new();
        assert!(matches!(
            registry.remove("retro"),
            Err(PaletteError::ReservedName { .. })
        ));
        assert!(registry.contains("retro"));
    }

    #[test]
    fn test_names_order() {
        let registry = PaletteRegistry::new();
        registry.register("zeta", two_tone()).unwrap();
        registry.register("alpha", two_tone()).unwrap();

        let names = registry.names();
        let listed: Vec<&str> = names.iter().collect();
        assert_eq!(
            listed,
            ["grayscale", "retro", "gameboy", "cyberpunk", "pastel", "zeta", "alpha"]
        );
        assert_eq!(names.len(), 7);
        assert!(!names.is_empty());
    }

    #[test]
    fn test_names_is_restartable_snapshot() {
        let registry = PaletteRegistry::new();
        registry.register("first", two_tone()).unwrap();
        let names = registry.names();

        registry.register("second", two_tone()).unwrap();
        registry.remove("first").unwrap();

        let once: Vec<&str> = names.iter().collect();
        let twice: Vec<&str> = (&names).into_iter().collect();
        assert_eq!(once, twice);
        assert_eq!(once.last(), Some(&"first"));

        let fresh: Vec<String> = registry.names().iter().map(String::from).collect();
        assert_eq!(fresh.last().map(String::as_str), Some("second"));
    }

    #[test]
    fn test_concurrent_readers_see_whole_palettes() {
        use std::thread;

        let registry = Arc::new(PaletteRegistry::new());
        let small = vec![Rgb::new(1, 1, 1)];
        let large: Vec<Rgb> = (0..32u8).map(|i| Rgb::new(i, i, i)).collect();
        registry.register("flip", small.clone()).unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            let (small, large) = (small.clone(), large.clone());
            thread::spawn(move || {
                for i in 0..500 {
                    let next = if i % 2 == 0 { &large } else { &small };
                    registry.register("flip", next.clone()).unwrap();
                }
            })
        };

        let reader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..500 {
                    let len = registry.get("flip").unwrap().len();
                    assert!(len == 1 || len == 32, "observed partial palette of {len}");
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
    }
}
