//! Player loadout
//!
//! Owns every storage surface a player has and resolves a `ContainerId` to
//! the container it names. Bags are found by searching what the player
//! wears and carries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::container::Container;
use super::equipment::EquipmentSlots;
use super::grid::SlotGrid;
use super::quick::QuickSlots;
use super::slot::{ContainerId, SlotAddress};
use crate::data::LoadoutConfig;
use crate::items::{Item, ItemId};

/// All of a player's containers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    inventory: SlotGrid,
    equipment: EquipmentSlots,
    quick: QuickSlots,
}

impl Loadout {
    pub fn new(config: &LoadoutConfig) -> Self {
        Self {
            inventory: SlotGrid::inventory(config.inventory_capacity),
            equipment: EquipmentSlots::new(),
            quick: QuickSlots::new(config.quick_slot_count),
        }
    }

    pub fn inventory(&self) -> &SlotGrid {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut SlotGrid {
        &mut self.inventory
    }

    pub fn equipment(&self) -> &EquipmentSlots {
        &self.equipment
    }

    pub fn equipment_mut(&mut self) -> &mut EquipmentSlots {
        &mut self.equipment
    }

    pub fn quick(&self) -> &QuickSlots {
        &self.quick
    }

    pub fn quick_mut(&mut self) -> &mut QuickSlots {
        &mut self.quick
    }

    /// Find a bag by id among equipped and carried items
    pub fn find_bag(&self, id: &ItemId) -> Option<&Item> {
        self.equipment
            .all_items()
            .map(|(_, item)| item)
            .chain(self.inventory.iter_items())
            .find(|item| &item.id == id && item.is_bag())
    }

    pub fn find_bag_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.equipment
            .all_items_mut()
            .chain(self.inventory.iter_items_mut())
            .find(|item| &item.id == id && item.is_bag())
    }

    /// `base`, or the first of `base-2`, `base-3`, ... that no carried bag uses
    pub fn free_bag_id(&self, base: &ItemId) -> ItemId {
        let taken: Vec<&ItemId> = self
            .all_items()
            .into_iter()
            .filter(|item| item.is_bag())
            .map(|item| &item.id)
            .collect();
        let mut id = base.clone();
        let mut n = 1;
        while taken.contains(&&id) {
            n += 1;
            id = ItemId::new(format!("{}-{}", base, n));
        }
        id
    }

    /// Open or close a bag. Returns false if no such bag is reachable.
    pub fn set_bag_open(&mut self, id: &ItemId, open: bool) -> bool {
        match self.find_bag_mut(id).and_then(Item::as_bag_mut) {
            Some(bag) => {
                bag.open = open;
                true
            }
            None => false,
        }
    }

    /// Resolve a container id. Closed or missing bags resolve to nothing.
    pub fn container(&self, id: &ContainerId) -> Option<&dyn Container> {
        match id {
            ContainerId::Inventory => Some(&self.inventory),
            ContainerId::Equipment => Some(&self.equipment),
            ContainerId::QuickSlots => Some(&self.quick),
            ContainerId::Bag(bag_id) => self
                .find_bag(bag_id)
                .and_then(Item::as_bag)
                .filter(|bag| bag.open)
                .map(|bag| &bag.contents as &dyn Container),
        }
    }

    pub fn container_mut(&mut self, id: &ContainerId) -> Option<&mut dyn Container> {
        match id {
            ContainerId::Inventory => Some(&mut self.inventory),
            ContainerId::Equipment => Some(&mut self.equipment),
            ContainerId::QuickSlots => Some(&mut self.quick),
            ContainerId::Bag(bag_id) => self
                .find_bag_mut(bag_id)
                .and_then(Item::as_bag_mut)
                .filter(|bag| bag.open)
                .map(|bag| &mut bag.contents as &mut dyn Container),
        }
    }

    /// Item at an address, if the address resolves and the slot is occupied
    pub fn get(&self, address: &SlotAddress) -> Option<&Item> {
        self.container(&address.container)?.get(&address.key)
    }

    /// Every item reachable from this loadout, nested bag contents included
    pub fn all_items(&self) -> Vec<&Item> {
        let mut items = Vec::new();
        let top = self
            .inventory
            .iter_items()
            .chain(self.equipment.all_items().map(|(_, item)| item))
            .chain(self.quick.iter_items());
        for item in top {
            collect_nested(item, &mut items);
        }
        items
    }

    /// Total count per item id across all surfaces
    pub fn item_totals(&self) -> BTreeMap<ItemId, u32> {
        let mut totals = BTreeMap::new();
        for item in self.all_items() {
            *totals.entry(item.id.clone()).or_insert(0) += item.count;
        }
        totals
    }
}

fn collect_nested<'a>(item: &'a Item, out: &mut Vec<&'a Item>) {
    out.push(item);
    if let Some(bag) = item.as_bag() {
        for inner in bag.contents.iter_items() {
            collect_nested(inner, out);
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(&LoadoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::SlotKey;
    use crate::items::{EquipSlot, ItemKind};

    fn gem() -> Item {
        Item::new("gem", "Gem", ItemKind::Resource).stacked(2, 10)
    }

    #[test]
    fn test_bag_resolution_requires_open_bag() {
        let mut loadout = Loadout::default();
        let mut satchel = Item::bag("satchel", "Satchel", 4);
        if let Some(bag) = satchel.as_bag_mut() {
            bag.contents.add_first_fit(gem()).unwrap();
        }
        loadout.inventory_mut().add_first_fit(satchel).unwrap();

        let bag_id = ContainerId::Bag(ItemId::new("satchel"));
        assert!(loadout.container(&bag_id).is_none());

        assert!(loadout.set_bag_open(&ItemId::new("satchel"), true));
        assert!(loadout.get(&SlotAddress::bag("satchel", 0)).is_some());
        assert!(loadout.container(&ContainerId::Bag(ItemId::new("nope"))).is_none());
    }

    #[test]
    fn test_free_bag_id_skips_carried_bags() {
        let mut loadout = Loadout::default();
        let satchel = ItemId::new("satchel");
        assert_eq!(loadout.free_bag_id(&satchel), satchel);

        loadout
            .inventory_mut()
            .add_first_fit(Item::bag("satchel", "Satchel", 2))
            .unwrap();
        loadout
            .equipment_mut()
            .set(
                &SlotKey::Equip(EquipSlot::Backpack),
                Item::bag("satchel-2", "Satchel", 2),
            )
            .unwrap();
        assert_eq!(loadout.free_bag_id(&satchel), ItemId::new("satchel-3"));

        // Plain items never block an id
        loadout.inventory_mut().add_first_fit(gem()).unwrap();
        assert_eq!(loadout.free_bag_id(&ItemId::new("gem")), ItemId::new("gem"));
    }

    #[test]
    fn test_equipped_bag_is_found_first() {
        let mut loadout = Loadout::default();
        let worn = Item::bag("satchel", "Worn Satchel", 2);
        loadout
            .equipment_mut()
            .set(&SlotKey::Equip(EquipSlot::Backpack), worn)
            .unwrap();

        let found = loadout.find_bag(&ItemId::new("satchel")).unwrap();
        assert_eq!(found.name, "Worn Satchel");
    }

    #[test]
    fn test_item_totals_include_nested_contents() {
        let mut loadout = Loadout::default();
        let mut satchel = Item::bag("satchel", "Satchel", 4);
        if let Some(bag) = satchel.as_bag_mut() {
            bag.contents.add_first_fit(gem()).unwrap();
        }
        loadout.inventory_mut().add_first_fit(satchel).unwrap();
        loadout.inventory_mut().add_first_fit(gem()).unwrap();

        let totals = loadout.item_totals();
        assert_eq!(totals[&ItemId::new("gem")], 4);
        assert_eq!(totals[&ItemId::new("satchel")], 1);
    }
}
