//! Item system

pub mod item;

pub use item::{Bag, Capability, Category, EquipSlot, Item, ItemId, ItemKind, Rarity, Requirements};
