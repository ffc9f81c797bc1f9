//! Item definitions
//!
//! Core item record, categories, rarities and equip requirements.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::containers::SlotGrid;
use crate::progression::Stat;

/// Stable item identity
///
/// Every copy of a stack shares the same id, so two "rock" stacks are the
/// same item for merge purposes. Bags are looked up by this id as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Closed set of item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tool,
    Weapon,
    Armor,
    Accessory,
    Bag,
    Resource,
    Misc,
}

impl Category {
    /// Tools and weapons are the only things hands will hold
    pub fn is_hand_held(&self) -> bool {
        matches!(self, Category::Tool | Category::Weapon)
    }
}

/// What an item is able to do, derived from its record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Equippable,
    Stackable,
    Container,
}

/// Named equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Head,
    Body,
    Legs,
    Feet,
    Hands,
    Neck,
    Ring,
    LeftHand,
    RightHand,
    Backpack,
}

impl EquipSlot {
    /// Key used by the gesture layer and data files
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Head => "head",
            EquipSlot::Body => "body",
            EquipSlot::Legs => "legs",
            EquipSlot::Feet => "feet",
            EquipSlot::Hands => "hands",
            EquipSlot::Neck => "neck",
            EquipSlot::Ring => "ring",
            EquipSlot::LeftHand => "leftHand",
            EquipSlot::RightHand => "rightHand",
            EquipSlot::Backpack => "backpack",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Legs => "Legs",
            EquipSlot::Feet => "Feet",
            EquipSlot::Hands => "Hands",
            EquipSlot::Neck => "Neck",
            EquipSlot::Ring => "Ring",
            EquipSlot::LeftHand => "Left Hand",
            EquipSlot::RightHand => "Right Hand",
            EquipSlot::Backpack => "Backpack",
        }
    }

    /// All slots in display order
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::Head,
            EquipSlot::Neck,
            EquipSlot::Body,
            EquipSlot::Hands,
            EquipSlot::Ring,
            EquipSlot::Legs,
            EquipSlot::Feet,
            EquipSlot::LeftHand,
            EquipSlot::RightHand,
            EquipSlot::Backpack,
        ]
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown equipment slot '{}'", s))
    }
}

/// Level and stat thresholds an item demands before it can be equipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub min_stats: BTreeMap<Stat, i32>,
}

impl Requirements {
    pub fn level(min_level: u32) -> Self {
        Self {
            min_level,
            min_stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        self.min_stats.insert(stat, value);
        self
    }
}

/// Contents of a bag item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bag {
    pub contents: SlotGrid,
    #[serde(default)]
    pub open: bool,
}

/// Category-specific payload
///
/// Only bags carry extra data today; everything else is a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemKind {
    Tool,
    Weapon,
    Armor,
    Accessory,
    Bag(Bag),
    Resource,
    Misc,
}

impl ItemKind {
    pub fn category(&self) -> Category {
        match self {
            ItemKind::Tool => Category::Tool,
            ItemKind::Weapon => Category::Weapon,
            ItemKind::Armor => Category::Armor,
            ItemKind::Accessory => Category::Accessory,
            ItemKind::Bag(_) => Category::Bag,
            ItemKind::Resource => Category::Resource,
            ItemKind::Misc => Category::Misc,
        }
    }
}

/// The main Item struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity (shared across copies of a stack)
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Flavor text
    #[serde(default)]
    pub description: String,
    /// Category and its payload
    pub kind: ItemKind,
    /// Rarity tier
    #[serde(default)]
    pub rarity: Rarity,
    /// Equipment slot this item targets, if any
    #[serde(default)]
    pub slot_affinity: Option<EquipSlot>,
    /// Whether copies merge into one slot
    pub stackable: bool,
    /// Max stack size
    pub max_stack: u32,
    /// Stack count
    pub count: u32,
    /// Stat deltas applied while equipped
    #[serde(default)]
    pub stats: BTreeMap<Stat, i32>,
    /// Gate checked before equipping
    #[serde(default)]
    pub requirements: Option<Requirements>,
}

impl Item {
    /// Create a single, non-stacking item
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            rarity: Rarity::Common,
            slot_affinity: None,
            stackable: false,
            max_stack: 1,
            count: 1,
            stats: BTreeMap::new(),
            requirements: None,
        }
    }

    /// Create a bag whose contents live in a grid of `capacity` slots
    pub fn bag(id: impl Into<ItemId>, name: impl Into<String>, capacity: usize) -> Self {
        let id = id.into();
        let contents = SlotGrid::bag_contents(id.clone(), capacity);
        Self::new(id, name, ItemKind::Bag(Bag { contents, open: false }))
    }

    /// Make this item stack up to `max_stack`, starting at `count`
    ///
    /// Bags always stay single: each one owns its contents.
    pub fn stacked(mut self, count: u32, max_stack: u32) -> Self {
        self.stackable = max_stack > 1 && !self.is_bag();
        self.max_stack = if self.stackable { max_stack } else { 1 };
        self.count = count.clamp(1, self.max_stack);
        self
    }

    /// Same item under another id; a bag's contents follow the new id
    pub fn with_id(mut self, id: ItemId) -> Self {
        if let Some(bag) = self.as_bag_mut() {
            bag.contents.rebind_bag(id.clone());
        }
        self.id = id;
        self
    }

    pub fn with_affinity(mut self, slot: EquipSlot) -> Self {
        self.slot_affinity = Some(slot);
        self
    }

    pub fn with_stat(mut self, stat: Stat, delta: i32) -> Self {
        self.stats.insert(stat, delta);
        self
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Derived capability set
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut caps = Vec::new();
        if self.is_equippable() {
            caps.push(Capability::Equippable);
        }
        if self.stackable {
            caps.push(Capability::Stackable);
        }
        if self.is_bag() {
            caps.push(Capability::Container);
        }
        caps
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether some equipment slot could ever take this item
    pub fn is_equippable(&self) -> bool {
        self.slot_affinity.is_some()
            || self.category().is_hand_held()
            || self.category() == Category::Bag
    }

    pub fn is_bag(&self) -> bool {
        matches!(self.kind, ItemKind::Bag(_))
    }

    pub fn as_bag(&self) -> Option<&Bag> {
        match &self.kind {
            ItemKind::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_bag_mut(&mut self) -> Option<&mut Bag> {
        match &mut self.kind {
            ItemKind::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    /// Two stacks merge only when both stack and share an id. Bags never merge.
    pub fn can_stack_with(&self, other: &Item) -> bool {
        self.stackable
            && other.stackable
            && !self.is_bag()
            && !other.is_bag()
            && self.id == other.id
    }

    /// How many more copies fit on this stack
    pub fn spare_capacity(&self) -> u32 {
        self.max_stack.saturating_sub(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::{Container, ContainerId};

    #[test]
    fn test_capabilities() {
        let rock = Item::new("rock", "Rock", ItemKind::Resource).stacked(3, 99);
        assert_eq!(rock.capabilities(), vec![Capability::Stackable]);

        let sword = Item::new("sword", "Sword", ItemKind::Weapon);
        assert!(sword.has_capability(Capability::Equippable));
        assert!(!sword.has_capability(Capability::Stackable));

        let satchel = Item::bag("satchel", "Satchel", 4);
        assert!(satchel.has_capability(Capability::Container));
        assert!(satchel.has_capability(Capability::Equippable));
        assert_eq!(satchel.category(), Category::Bag);
    }

    #[test]
    fn test_stacking_identity() {
        let a = Item::new("rock", "Rock", ItemKind::Resource).stacked(3, 99);
        let b = Item::new("rock", "Pebble", ItemKind::Resource).stacked(2, 99);
        let c = Item::new("flint", "Rock", ItemKind::Resource).stacked(2, 99);

        // Identity decides, not the display name
        assert!(a.can_stack_with(&b));
        assert!(!a.can_stack_with(&c));
        assert_eq!(a.spare_capacity(), 96);
    }

    #[test]
    fn test_bags_never_stack() {
        let pouch = Item::bag("pouch", "Pouch", 2).stacked(4, 5);
        assert!(!pouch.stackable);
        assert_eq!(pouch.max_stack, 1);
        assert_eq!(pouch.count, 1);

        // Even with the flag forced on, two bags sharing an id stay apart
        let mut a = Item::bag("pouch", "Pouch", 2);
        let mut b = Item::bag("pouch", "Pouch", 2);
        a.stackable = true;
        a.max_stack = 5;
        b.stackable = true;
        b.max_stack = 5;
        assert!(!a.can_stack_with(&b));
    }

    #[test]
    fn test_with_id_moves_bag_contents() {
        let pouch = Item::bag("pouch", "Pouch", 2).with_id(ItemId::new("pouch-2"));
        assert_eq!(pouch.id, ItemId::new("pouch-2"));
        let bag = pouch.as_bag().unwrap();
        assert_eq!(bag.contents.id(), &ContainerId::Bag(ItemId::new("pouch-2")));

        let rock = Item::new("rock", "Rock", ItemKind::Resource).with_id(ItemId::new("flint"));
        assert_eq!(rock.id, ItemId::new("flint"));
    }

    #[test]
    fn test_equip_slot_names() {
        assert_eq!("rightHand".parse::<EquipSlot>(), Ok(EquipSlot::RightHand));
        assert_eq!("HEAD".parse::<EquipSlot>(), Ok(EquipSlot::Head));
        assert!("tail".parse::<EquipSlot>().is_err());
        assert_eq!(EquipSlot::all().len(), 10);
    }
}
