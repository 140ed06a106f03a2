//! Theme preference and its persistence.
//!
//! The preference is `light`, `dark`, or `system`; the effective mode resolves
//! `system` against the terminal's reported background. Preferences live in a
//! small JSON key/value file so other client settings can share it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{debug, warn};

pub const PREFERENCE_KEY: &str = "naviq-theme-preference";
pub const LEGACY_KEY: &str = "naviq-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    pub fn resolve(self, system_dark: bool) -> ThemeMode {
        match self {
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
            ThemePreference::System if system_dark => ThemeMode::Dark,
            ThemePreference::System => ThemeMode::Light,
        }
    }

    /// system → light → dark → system
    pub fn cycled(self) -> Self {
        match self {
            ThemePreference::System => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
        }
    }

    /// Explicit preference for the opposite of what is currently shown.
    pub fn toggled(self, system_dark: bool) -> Self {
        match self.resolve(system_dark) {
            ThemeMode::Dark => ThemePreference::Light,
            ThemeMode::Light => ThemePreference::Dark,
        }
    }

    /// "Auto" for system, otherwise the mode name.
    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "Auto",
        }
    }
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" | "auto" => Ok(ThemePreference::System),
            other => Err(format!("unknown theme '{other}': expected light, dark, or system")),
        }
    }
}

/// Guesses whether the terminal background is dark.
///
/// `NAVIQ_SYSTEM_THEME=dark|light` wins; otherwise the background slot of
/// `COLORFGBG` (set by rxvt, Konsole and friends) is consulted. Defaults to
/// light when nothing is known.
pub fn detect_system_dark() -> bool {
    if let Ok(explicit) = std::env::var("NAVIQ_SYSTEM_THEME") {
        return explicit.trim().eq_ignore_ascii_case("dark");
    }
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| background_is_dark(&v))
        .unwrap_or(false)
}

fn background_is_dark(colorfgbg: &str) -> Option<bool> {
    let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

pub trait ThemeStore {
    fn load(&self) -> Result<Option<ThemePreference>>;
    fn save(&self, preference: ThemePreference) -> Result<()>;
}

/// `preferences.json` under the client's home directory.
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a preferences file", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<ThemePreference>> {
        let prefs = self.read_all()?;
        for key in [PREFERENCE_KEY, LEGACY_KEY] {
            if let Some(raw) = prefs.get(key) {
                match raw.parse() {
                    Ok(pref) => {
                        debug!("Theme preference '{pref}' read from key {key}");
                        return Ok(Some(pref));
                    }
                    Err(e) => warn!("Ignoring stored theme under {key}: {e}"),
                }
            }
        }
        Ok(None)
    }

    fn save(&self, preference: ThemePreference) -> Result<()> {
        let mut prefs = self.read_all().unwrap_or_else(|e| {
            warn!("Rewriting unreadable preferences: {e:#}");
            BTreeMap::new()
        });
        prefs.insert(PREFERENCE_KEY.to_string(), preference.as_str().to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&prefs)?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use super::*;

    /// In-process store for runtime tests.
    #[derive(Default)]
    pub struct MemoryThemeStore {
        pub saved: Mutex<Vec<ThemePreference>>,
        pub initial: Option<ThemePreference>,
    }

    impl ThemeStore for MemoryThemeStore {
        fn load(&self) -> Result<Option<ThemePreference>> {
            Ok(self.saved.lock().unwrap().last().copied().or(self.initial))
        }

        fn save(&self, preference: ThemePreference) -> Result<()> {
            self.saved.lock().unwrap().push(preference);
            Ok(())
        }
    }
}
