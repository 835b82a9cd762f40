//! Light/dark theme flag.
//!
//! Initial value: stored choice, then the system preference, then light.
//! Only [`ThemeState::toggle`] changes it afterwards.

use anyhow::{Context, Result};
use std::{
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence for the theme flag.
pub trait ThemeStore: Send + Sync + Debug {
    fn load(&self) -> Option<Theme>;
    fn save(&self, theme: Theme) -> Result<()>;
}

/// Whether the host prefers a dark color scheme.
pub trait SystemThemeProbe: Send + Sync + Debug {
    fn prefers_dark(&self) -> bool;
}

/// Stores the flag as a one-word file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let contents = fs::read_to_string(&self.path).ok()?;
        Theme::parse(&contents)
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }
        fs::write(&self.path, theme.as_str())
            .with_context(|| format!("Failed to write theme file: {}", self.path.display()))
    }
}

/// In-memory store that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    writes: Arc<Mutex<Vec<Theme>>>,
}

impl MemoryThemeStore {
    pub fn with_value(theme: Theme) -> Self {
        Self {
            writes: Arc::new(Mutex::new(vec![theme])),
        }
    }

    pub fn writes(&self) -> Vec<Theme> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.writes.lock().ok()?.last().copied()
    }

    fn save(&self, theme: Theme) -> Result<()> {
        self.writes
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store lock poisoned"))?
            .push(theme);
        Ok(())
    }
}

/// Reads the terminal's `COLORFGBG` hint ("fg;bg"). Background colour
/// indices 0-6 and 8 are dark.
#[derive(Debug, Clone, Default)]
pub struct TerminalThemeProbe {
    colorfgbg: Option<String>,
}

impl TerminalThemeProbe {
    pub fn from_env() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }

    pub fn with_value(colorfgbg: impl Into<String>) -> Self {
        Self {
            colorfgbg: Some(colorfgbg.into()),
        }
    }
}

impl SystemThemeProbe for TerminalThemeProbe {
    fn prefers_dark(&self) -> bool {
        let Some(value) = &self.colorfgbg else {
            return false;
        };
        match value.rsplit(';').next().and_then(|bg| bg.trim().parse::<u8>().ok()) {
            Some(bg) => bg <= 6 || bg == 8,
            None => false,
        }
    }
}

/// Process-wide theme flag with persistence.
#[derive(Debug)]
pub struct ThemeState {
    store: Box<dyn ThemeStore>,
    root: watch::Sender<Theme>,
}

impl ThemeState {
    pub fn new(store: Box<dyn ThemeStore>, probe: &dyn SystemThemeProbe) -> Self {
        let initial = store.load().unwrap_or_else(|| {
            if probe.prefers_dark() { Theme::Dark } else { Theme::Light }
        });
        tracing::debug!(theme = %initial, "Theme resolved");

        let (root, _) = watch::channel(initial);
        Self { store, root }
    }

    pub fn theme(&self) -> Theme {
        *self.root.borrow()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme().is_dark()
    }

    /// Class name the root render context should carry.
    pub fn theme_class(&self) -> &'static str {
        self.theme().as_str()
    }

    /// Follow theme changes from the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.root.subscribe()
    }

    /// Flip the flag, persist it and publish it. Returns the new theme.
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.theme().flipped();
        self.store.save(next)?;
        self.root.send_replace(next);
        tracing::info!(theme = %next, "Theme toggled");
        Ok(next)
    }
}
