//! Flat slot grid
//!
//! Fixed-capacity indexed storage used for the main inventory and for the
//! contents of every bag.

use serde::{Deserialize, Serialize};

use super::container::{Container, ContainerError};
use super::observer::ObserverSlot;
use super::slot::{ContainerId, ContainerKind, SlotKey};
use crate::items::{Item, ItemId};

/// Indexed, fixed-capacity item storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGrid {
    id: ContainerId,
    /// Slots that can hold an item (None = empty)
    slots: Vec<Option<Item>>,
    #[serde(skip)]
    observer: ObserverSlot,
}

/// How `add_first_fit` would place an item
struct Placement {
    /// (slot index, count added) for existing stacks
    merges: Vec<(usize, u32)>,
    /// Empty slot taking whatever is left
    empty: Option<usize>,
}

impl SlotGrid {
    /// Main inventory grid
    pub fn inventory(capacity: usize) -> Self {
        Self::new(ContainerId::Inventory, capacity)
    }

    /// Contents grid of the bag with `bag_id`
    pub fn bag_contents(bag_id: ItemId, capacity: usize) -> Self {
        Self::new(ContainerId::Bag(bag_id), capacity)
    }

    /// Point a bag's contents at the bag's new id
    pub(crate) fn rebind_bag(&mut self, bag_id: ItemId) {
        self.id = ContainerId::Bag(bag_id);
    }

    fn new(id: ContainerId, capacity: usize) -> Self {
        Self {
            id,
            slots: vec![None; capacity],
            observer: ObserverSlot::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the grid holds nothing
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total stacked count of one item id
    pub fn count_item(&self, id: &ItemId) -> u32 {
        self.iter_items()
            .filter(|item| &item.id == id)
            .map(|item| item.count)
            .sum()
    }

    pub fn get_index(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// All non-empty slots with their index
    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    fn index_of(&self, key: &SlotKey) -> Result<usize, ContainerError> {
        match key {
            SlotKey::Index(i) if *i < self.slots.len() => Ok(*i),
            _ => Err(ContainerError::InvalidSlot {
                container: self.id.clone(),
                key: *key,
            }),
        }
    }

    /// Work out where `item` would go, skipping `skip` if given
    ///
    /// Existing stacks of the same id with spare room are topped up first, in
    /// slot order. Whatever is left needs an empty slot.
    fn plan(&self, item: &Item, skip: Option<usize>) -> Option<Placement> {
        if !self.accepts_item(item) {
            return None;
        }

        let mut merges = Vec::new();
        let mut remaining = item.count;

        if item.stackable {
            for (index, slot) in self.slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                if Some(index) == skip {
                    continue;
                }
                if let Some(stack) = slot {
                    if stack.can_stack_with(item) && stack.spare_capacity() > 0 {
                        let added = remaining.min(stack.spare_capacity());
                        merges.push((index, added));
                        remaining -= added;
                    }
                }
            }
        }

        if remaining == 0 {
            return Some(Placement { merges, empty: None });
        }

        let empty = self
            .slots
            .iter()
            .enumerate()
            .position(|(index, slot)| slot.is_none() && Some(index) != skip)?;

        Some(Placement {
            merges,
            empty: Some(empty),
        })
    }

    /// Bags never go inside bags
    fn accepts_item(&self, item: &Item) -> bool {
        !(matches!(self.id, ContainerId::Bag(_)) && item.is_bag())
    }

    /// Whether `add_first_fit` would succeed
    pub fn can_accept(&self, item: &Item) -> bool {
        self.plan(item, None).is_some()
    }

    /// Like `can_accept`, pretending slot `key` is unavailable
    pub fn can_accept_except(&self, item: &Item, key: &SlotKey) -> bool {
        let skip = match key {
            SlotKey::Index(i) => Some(*i),
            _ => None,
        };
        self.plan(item, skip).is_some()
    }

    /// Place an item by first fit
    ///
    /// Merges into matching stacks with spare room, then takes the first
    /// empty slot for any remainder. Nothing changes if the whole stack
    /// cannot be placed; the item is handed back instead.
    ///
    /// Returns the first slot touched.
    pub fn add_first_fit(&mut self, mut item: Item) -> Result<SlotKey, Item> {
        let Some(placement) = self.plan(&item, None) else {
            return Err(item);
        };

        let mut first = None;
        for (index, added) in placement.merges {
            if let Some(stack) = self.slots[index].as_mut() {
                stack.count += added;
                item.count -= added;
            }
            let key = SlotKey::Index(index);
            self.notify(&key);
            first.get_or_insert(key);
        }

        if let Some(index) = placement.empty {
            let key = SlotKey::Index(index);
            self.slots[index] = Some(item);
            self.notify(&key);
            first.get_or_insert(key);
        }

        Ok(first.unwrap_or(SlotKey::Index(0)))
    }
}

impl Container for SlotGrid {
    fn id(&self) -> &ContainerId {
        &self.id
    }

    fn kind(&self) -> ContainerKind {
        self.id.kind()
    }

    fn keys(&self) -> Vec<SlotKey> {
        (0..self.slots.len()).map(SlotKey::Index).collect()
    }

    fn slot(&self, key: &SlotKey) -> Result<&Option<Item>, ContainerError> {
        let index = self.index_of(key)?;
        Ok(&self.slots[index])
    }

    fn slot_mut(&mut self, key: &SlotKey) -> Result<&mut Option<Item>, ContainerError> {
        let index = self.index_of(key)?;
        Ok(&mut self.slots[index])
    }

    fn observer_mut(&mut self) -> &mut ObserverSlot {
        &mut self.observer
    }

    fn accepts(&self, _key: &SlotKey, item: &Item) -> bool {
        self.accepts_item(item)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::items::ItemKind;

    fn rock(count: u32) -> Item {
        Item::new("rock", "Rock", ItemKind::Resource).stacked(count, 99)
    }

    fn stick() -> Item {
        Item::new("stick", "Stick", ItemKind::Misc)
    }

    #[test]
    fn test_first_fit_merges_before_empty_slot() {
        let mut grid = SlotGrid::inventory(4);
        grid.set(&SlotKey::Index(1), stick()).unwrap();
        grid.set(&SlotKey::Index(2), rock(3)).unwrap();

        let key = grid.add_first_fit(rock(2)).unwrap();
        assert_eq!(key, SlotKey::Index(2));
        assert_eq!(grid.get_index(2).unwrap().count, 5);
        assert_eq!(grid.count(), 2);
    }

    #[test]
    fn test_first_fit_splits_over_full_stack() {
        let mut grid = SlotGrid::inventory(3);
        grid.set(&SlotKey::Index(0), rock(97)).unwrap();

        grid.add_first_fit(rock(5)).unwrap();
        assert_eq!(grid.get_index(0).unwrap().count, 99);
        assert_eq!(grid.get_index(1).unwrap().count, 3);
        assert_eq!(grid.count_item(&ItemId::new("rock")), 102);
    }

    #[test]
    fn test_first_fit_full_hands_item_back_untouched() {
        let mut grid = SlotGrid::inventory(1);
        grid.set(&SlotKey::Index(0), rock(98)).unwrap();

        // One would fit by merging, the other four need a slot that isn't there
        let returned = grid.add_first_fit(rock(5)).unwrap_err();
        assert_eq!(returned.count, 5);
        assert_eq!(grid.get_index(0).unwrap().count, 98);
        assert!(!grid.can_accept(&rock(5)));
        assert!(grid.can_accept(&rock(1)));
    }

    #[test]
    fn test_can_accept_except_skips_slot() {
        let mut grid = SlotGrid::inventory(2);
        grid.set(&SlotKey::Index(0), rock(3)).unwrap();
        grid.set(&SlotKey::Index(1), stick()).unwrap();

        assert!(grid.can_accept(&rock(1)));
        assert!(!grid.can_accept_except(&rock(1), &SlotKey::Index(0)));
    }

    #[test]
    fn test_bag_contents_reject_bags() {
        let mut contents = SlotGrid::bag_contents(ItemId::new("satchel"), 4);
        let pouch = Item::bag("pouch", "Pouch", 2);

        assert!(!contents.accepts(&SlotKey::Index(0), &pouch));
        assert!(contents.add_first_fit(pouch).is_err());
        assert!(contents.add_first_fit(stick()).is_ok());
        assert_eq!(contents.kind(), ContainerKind::BagContents);
    }

    #[test]
    fn test_invalid_key() {
        let mut grid = SlotGrid::inventory(2);
        assert!(grid.get(&SlotKey::Index(5)).is_none());
        assert!(matches!(
            grid.set(&SlotKey::Quick(1), stick()),
            Err(ContainerError::InvalidSlot { .. })
        ));
        assert!(!grid.contains_key(&SlotKey::Index(2)));
    }

    #[test]
    fn test_observer_sees_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let mut grid = SlotGrid::inventory(3);
        grid.set_observer(Box::new(move |id: &ContainerId, key: &SlotKey| {
            log.borrow_mut().push((id.clone(), *key));
        }));

        grid.set(&SlotKey::Index(0), rock(1)).unwrap();
        grid.add_first_fit(rock(1)).unwrap();
        grid.clear(&SlotKey::Index(0)).unwrap();
        // Clearing an empty slot changes nothing
        grid.clear(&SlotKey::Index(2)).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|(id, key)| *id == ContainerId::Inventory
            && *key == SlotKey::Index(0)));
    }
}
