//! Loadout configuration
//!
//! Sizes of the player's storage surfaces. Loaded from `loadout.ron`;
//! any field left out falls back to its default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadoutConfig {
    /// Main inventory slots
    pub inventory_capacity: usize,
    /// Quick slots, numbered from 1
    pub quick_slot_count: usize,
    /// Slots inside a bag whose template gives no capacity
    pub default_bag_capacity: usize,
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: 24,
            quick_slot_count: 8,
            default_bag_capacity: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LoadoutConfig = ron::from_str("(inventory_capacity: 12)").unwrap();
        assert_eq!(config.inventory_capacity, 12);
        assert_eq!(config.quick_slot_count, 8);
        assert_eq!(config.default_bag_capacity, 8);
    }
}
