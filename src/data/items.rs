//! Item templates for data-driven item creation
//!
//! Templates are loaded from `items.ron` and turned into concrete items on
//! demand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::items::{Bag, Category, EquipSlot, Item, ItemId, ItemKind, Rarity, Requirements};
use crate::containers::SlotGrid;
use crate::progression::Stat;

fn default_max_stack() -> u32 {
    1
}

/// A template for creating items from external data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Unique template ID, also the id of every item made from it
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub rarity: Rarity,
    /// Equipment slot affinity
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    /// Stack limit; 1 means the item never stacks
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub stats: BTreeMap<Stat, i32>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
    /// Slots inside the bag, bags only
    #[serde(default)]
    pub bag_capacity: Option<usize>,
}

impl ItemTemplate {
    /// Build an item carrying the template's own id
    pub fn instantiate(&self, count: u32, default_bag_capacity: usize) -> Item {
        self.instantiate_as(ItemId::new(self.id.clone()), count, default_bag_capacity)
    }

    /// Build an item under a different id
    ///
    /// Bags need distinct ids so each one's contents can be addressed.
    pub fn instantiate_as(&self, id: ItemId, count: u32, default_bag_capacity: usize) -> Item {
        let kind = match self.category {
            Category::Tool => ItemKind::Tool,
            Category::Weapon => ItemKind::Weapon,
            Category::Armor => ItemKind::Armor,
            Category::Accessory => ItemKind::Accessory,
            Category::Resource => ItemKind::Resource,
            Category::Misc => ItemKind::Misc,
            Category::Bag => ItemKind::Bag(Bag {
                contents: SlotGrid::bag_contents(
                    id.clone(),
                    self.bag_capacity.unwrap_or(default_bag_capacity),
                ),
                open: false,
            }),
        };

        let mut item = Item::new(id, self.name.clone(), kind)
            .stacked(count, self.max_stack)
            .with_rarity(self.rarity)
            .with_description(self.description.clone());
        item.slot_affinity = self.slot;
        item.stats = self.stats.clone();
        item.requirements = self.requirements.clone();
        item
    }
}

/// Collection of item templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub templates: Vec<ItemTemplate>,
}

impl ItemTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Get all templates of one category
    pub fn by_category(&self, category: Category) -> Vec<&ItemTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }
}

fn template(id: &str, name: &str, category: Category) -> ItemTemplate {
    ItemTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category,
        rarity: Rarity::Common,
        slot: None,
        max_stack: 1,
        stats: BTreeMap::new(),
        requirements: None,
        bag_capacity: None,
    }
}

/// Built-in templates used when no `items.ron` is present
pub fn default_item_templates() -> ItemTemplates {
    let rock = ItemTemplate {
        description: "A fist-sized chunk of stone.".to_string(),
        max_stack: 99,
        ..template("rock", "Rock", Category::Resource)
    };

    let pickaxe = ItemTemplate {
        description: "Breaks rock. Occasionally skulls.".to_string(),
        stats: BTreeMap::from([(Stat::MiningPower, 2), (Stat::Attack, 1)]),
        ..template("pickaxe", "Pickaxe", Category::Tool)
    };

    let iron_sword = ItemTemplate {
        rarity: Rarity::Uncommon,
        stats: BTreeMap::from([(Stat::Attack, 5), (Stat::Strength, 1)]),
        requirements: Some(Requirements::level(2)),
        ..template("iron_sword", "Iron Sword", Category::Weapon)
    };

    let chain_helm = ItemTemplate {
        slot: Some(EquipSlot::Head),
        stats: BTreeMap::from([(Stat::Defense, 3)]),
        ..template("chain_helm", "Chain Helm", Category::Armor)
    };

    let leather_armor = ItemTemplate {
        slot: Some(EquipSlot::Body),
        stats: BTreeMap::from([(Stat::Defense, 4), (Stat::MaxHealth, 10)]),
        ..template("leather_armor", "Leather Armor", Category::Armor)
    };

    let silver_ring = ItemTemplate {
        rarity: Rarity::Rare,
        slot: Some(EquipSlot::Ring),
        stats: BTreeMap::from([(Stat::Intelligence, 2), (Stat::MaxMana, 15)]),
        requirements: Some(Requirements::level(1).with_stat(Stat::Intelligence, 10)),
        ..template("silver_ring", "Silver Ring", Category::Accessory)
    };

    let health_potion = ItemTemplate {
        description: "Smells of iron and mint.".to_string(),
        max_stack: 10,
        ..template("health_potion", "Health Potion", Category::Misc)
    };

    let satchel = ItemTemplate {
        bag_capacity: Some(6),
        ..template("satchel", "Satchel", Category::Bag)
    };

    let pouch = ItemTemplate {
        bag_capacity: Some(3),
        ..template("pouch", "Pouch", Category::Bag)
    };

    ItemTemplates {
        templates: vec![
            rock,
            pickaxe,
            iron_sword,
            chain_helm,
            leather_armor,
            silver_ring,
            health_potion,
            satchel,
            pouch,
        ],
    }
}
