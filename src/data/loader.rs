//! RON data loader
//!
//! Loads loadout configuration and item templates from external RON files,
//! with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::config::LoadoutConfig;
use super::items::{default_item_templates, ItemTemplates};
use crate::items::Item;

/// Default location of the data files, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "assets/data";

const CONFIG_FILE: &str = "loadout.ron";
const ITEMS_FILE: &str = "items.ron";

/// Errors reading or writing data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: ron::Error,
    },
}

/// Manages all external data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    /// Container sizes
    pub config: LoadoutConfig,
    /// Item templates
    pub items: ItemTemplates,
}

impl DataManager {
    /// Load every data file under `base_path`
    ///
    /// Missing or malformed files fall back to defaults individually.
    pub fn load_from(base_path: &Path) -> Self {
        let config = load_or_default(&base_path.join(CONFIG_FILE), LoadoutConfig::default);
        let items = load_or_default(&base_path.join(ITEMS_FILE), default_item_templates);
        log::info!(
            "Data ready: {} item templates, inventory {} slots, {} quick slots",
            items.templates.len(),
            config.inventory_capacity,
            config.quick_slot_count
        );
        Self { config, items }
    }

    /// Make `count` of the item with this template id
    pub fn create_item(&self, template_id: &str, count: u32) -> Option<Item> {
        self.items
            .find(template_id)
            .map(|t| t.instantiate(count, self.config.default_bag_capacity))
    }
}

fn load_or_default<T: DeserializeOwned>(path: &Path, fallback: impl FnOnce() -> T) -> T {
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return fallback();
    }
    match read_ron(path) {
        Ok(value) => {
            log::info!("Loaded {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            fallback()
        }
    }
}

/// Parse one RON file
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ron<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { what, source })?;
    fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<(), DataError> {
    fs::create_dir_all(base_path).map_err(|source| DataError::Io {
        path: base_path.to_path_buf(),
        source,
    })?;

    write_ron(&base_path.join(CONFIG_FILE), &LoadoutConfig::default(), "loadout config")?;
    write_ron(&base_path.join(ITEMS_FILE), &default_item_templates(), "item templates")?;

    log::info!("Exported default data to {}", base_path.display());
    Ok(())
}
