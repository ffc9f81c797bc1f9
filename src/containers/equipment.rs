//! Equipment slots
//!
//! Fixed set of named slots. Which item may sit where is decided by the
//! compatibility rules; stat bonuses are summed straight off the worn items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::container::{Container, ContainerError};
use super::observer::ObserverSlot;
use super::slot::{ContainerId, ContainerKind, SlotKey};
use crate::items::{EquipSlot, Item, ItemId};
use crate::progression::Stat;
use crate::transfer::compat;

/// Player equipment slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentSlots {
    /// Every slot is always present; None = nothing worn
    slots: BTreeMap<EquipSlot, Option<Item>>,
    #[serde(skip, default = "equipment_id")]
    id: ContainerId,
    #[serde(skip)]
    observer: ObserverSlot,
}

fn equipment_id() -> ContainerId {
    ContainerId::Equipment
}

impl EquipmentSlots {
    pub fn new() -> Self {
        Self {
            slots: EquipSlot::all().iter().map(|&slot| (slot, None)).collect(),
            id: ContainerId::Equipment,
            observer: ObserverSlot::default(),
        }
    }

    /// Get item in a slot
    pub fn get_slot(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot).and_then(Option::as_ref)
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get_slot(slot).is_none()
    }

    /// Get all equipped items with their slots
    pub fn all_items(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        self.slots
            .iter()
            .filter_map(|(&slot, item)| item.as_ref().map(|item| (slot, item)))
    }

    pub fn all_items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.values_mut().filter_map(Option::as_mut)
    }

    /// Total contribution of every worn item to one stat
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.all_items()
            .map(|(_, item)| item.stats.get(&stat).copied().unwrap_or(0))
            .sum()
    }

    /// Slot holding the item with this id, if worn
    pub fn slot_of(&self, id: &ItemId) -> Option<EquipSlot> {
        self.all_items()
            .find(|(_, item)| &item.id == id)
            .map(|(slot, _)| slot)
    }

    fn slot_for(&self, key: &SlotKey) -> Result<EquipSlot, ContainerError> {
        match key {
            SlotKey::Equip(slot) if self.slots.contains_key(slot) => Ok(*slot),
            _ => Err(ContainerError::InvalidSlot {
                container: self.id.clone(),
                key: *key,
            }),
        }
    }
}

impl Default for EquipmentSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for EquipmentSlots {
    fn id(&self) -> &ContainerId {
        &self.id
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::Equipment
    }

    fn keys(&self) -> Vec<SlotKey> {
        EquipSlot::all().iter().map(|&slot| SlotKey::Equip(slot)).collect()
    }

    fn slot(&self, key: &SlotKey) -> Result<&Option<Item>, ContainerError> {
        let slot = self.slot_for(key)?;
        self.slots.get(&slot).ok_or(ContainerError::InvalidSlot {
            container: self.id.clone(),
            key: *key,
        })
    }

    fn slot_mut(&mut self, key: &SlotKey) -> Result<&mut Option<Item>, ContainerError> {
        let slot = self.slot_for(key)?;
        let container = self.id.clone();
        self.slots
            .get_mut(&slot)
            .ok_or(ContainerError::InvalidSlot { container, key: *key })
    }

    fn observer_mut(&mut self) -> &mut ObserverSlot {
        &mut self.observer
    }

    /// Slot shape only; level and stat gates need a player
    fn accepts(&self, key: &SlotKey, item: &Item) -> bool {
        match key {
            SlotKey::Equip(slot) => compat::slot_accepts(item, *slot),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;

    #[test]
    fn test_fixed_key_set() {
        let mut equipment = EquipmentSlots::new();
        assert_eq!(equipment.keys().len(), EquipSlot::all().len());
        assert!(equipment.contains_key(&SlotKey::Equip(EquipSlot::Backpack)));
        assert!(!equipment.contains_key(&SlotKey::Index(0)));

        let helm = Item::new("helm", "Helm", ItemKind::Armor).with_affinity(EquipSlot::Head);
        assert!(equipment.set(&SlotKey::Index(0), helm).is_err());
    }

    #[test]
    fn test_stat_bonus_sums_worn_items() {
        let mut equipment = EquipmentSlots::new();
        let helm = Item::new("helm", "Helm", ItemKind::Armor)
            .with_affinity(EquipSlot::Head)
            .with_stat(Stat::Defense, 3);
        let boots = Item::new("boots", "Boots", ItemKind::Armor)
            .with_affinity(EquipSlot::Feet)
            .with_stat(Stat::Defense, 2)
            .with_stat(Stat::MoveSpeed, 1);

        equipment.set(&SlotKey::Equip(EquipSlot::Head), helm).unwrap();
        equipment.set(&SlotKey::Equip(EquipSlot::Feet), boots).unwrap();

        assert_eq!(equipment.stat_bonus(Stat::Defense), 5);
        assert_eq!(equipment.stat_bonus(Stat::MoveSpeed), 1);
        assert_eq!(equipment.slot_of(&ItemId::new("boots")), Some(EquipSlot::Feet));
    }

    #[test]
    fn test_accepts_follows_slot_rules() {
        let equipment = EquipmentSlots::new();
        let axe = Item::new("axe", "Axe", ItemKind::Tool);
        assert!(equipment.accepts(&SlotKey::Equip(EquipSlot::LeftHand), &axe));
        assert!(!equipment.accepts(&SlotKey::Equip(EquipSlot::Head), &axe));
    }
}
