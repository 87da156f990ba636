//! Persistence of the last-used color.
//!
//! The editor only needs two operations from storage: load the previous
//! color and save the current one. [`ColorStore`] names them; the JSON file
//! store is what the binary uses, and the memory store serves tests and
//! embedders with their own persistence.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::ColorState;

/// Current saved-color format version.
/// Increment this when making breaking changes to the file format.
pub const STORE_VERSION: u32 = 1;

/// Storage for the last-used color.
pub trait ColorStore {
    /// Load the saved color. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<ColorState>, StoreError>;

    /// Save `state`, replacing whatever was saved before.
    fn save(&self, state: &ColorState) -> Result<(), StoreError>;
}

/// On-disk document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedColor {
    version: u32,
    color: ColorState,
}

/// Stores the color as a small JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default filename for the saved color.
    pub fn default_filename() -> &'static str {
        "last-color.json"
    }

    /// Store in the platform config directory, if one can be found.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_location() -> Result<Self, StoreError> {
        crate::config::app_dir()
            .map(|dir| Self::new(dir.join(Self::default_filename())))
            .ok_or(StoreError::NoStorageLocation)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize a color into the versioned document.
    pub fn to_json(state: &ColorState) -> Result<String, StoreError> {
        let doc = SavedColor {
            version: STORE_VERSION,
            color: *state,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Deserialize a versioned document. Values are clamped into range.
    pub fn from_json(json: &str) -> Result<ColorState, StoreError> {
        let doc: SavedColor = serde_json::from_str(json)?;

        if doc.version > STORE_VERSION {
            return Err(StoreError::VersionTooNew {
                file_version: doc.version,
                supported_version: STORE_VERSION,
            });
        }

        Ok(doc.color.clamped())
    }
}

impl ColorStore for JsonFileStore {
    fn load(&self) -> Result<Option<ColorState>, StoreError> {
        if !self.path.exists() {
            log::debug!("No saved color at {:?}", self.path);
            return Ok(None);
        }
        if !self.path.is_file() {
            return Err(StoreError::NotAFile {
                path: self.path.clone(),
            });
        }

        let json = std::fs::read_to_string(&self.path)?;
        let state = Self::from_json(&json)?;
        log::info!("Loaded color from {:?}", self.path);
        Ok(Some(state))
    }

    fn save(&self, state: &ColorState) -> Result<(), StoreError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = Self::to_json(state)?;
        std::fs::write(&self.path, json)?;
        log::info!("Saved color to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the saved color in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<ColorState>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `state`.
    pub fn with_state(state: ColorState) -> Self {
        Self {
            saved: RefCell::new(Some(state)),
            saves: Cell::new(0),
        }
    }

    /// The saved color, if any.
    pub fn saved(&self) -> Option<ColorState> {
        *self.saved.borrow()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ColorStore for MemoryStore {
    fn load(&self) -> Result<Option<ColorState>, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, state: &ColorState) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(*state);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: ColorStore + ?Sized> ColorStore for &S {
    fn load(&self) -> Result<Option<ColorState>, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &ColorState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}
