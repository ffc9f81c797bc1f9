//! Data loading and external content
//!
//! This module handles loading loadout sizes and item templates from
//! external RON files, so content can change without a rebuild.

pub mod config;
pub mod items;
pub mod loader;

pub use config::LoadoutConfig;
pub use items::{default_item_templates, ItemTemplate, ItemTemplates};
pub use loader::{export_default_data, DataError, DataManager, DEFAULT_DATA_DIR};
