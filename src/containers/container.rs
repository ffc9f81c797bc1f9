//! Container trait for slot storage.

use thiserror::Error;

use super::observer::{ContainerObserver, ObserverSlot};
use super::slot::{ContainerId, ContainerKind, SlotKey};
use crate::items::Item;

/// Misuse of a single container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Key does not exist in this container
    #[error("{container} has no slot {key}")]
    InvalidSlot { container: ContainerId, key: SlotKey },
    /// Operation needs an occupant but the slot is empty
    #[error("{container} slot {key} is empty")]
    EmptySlot { container: ContainerId, key: SlotKey },
}

/// Anything that stores items in keyed slots.
///
/// Implementors provide raw slot access; the provided methods layer the
/// notification contract on top: every change made through `set`, `clear`
/// or `set_count` reaches the observer before the call returns.
pub trait Container {
    fn id(&self) -> &ContainerId;

    fn kind(&self) -> ContainerKind;

    /// Every valid key, in scan order
    fn keys(&self) -> Vec<SlotKey>;

    /// Raw slot access. Does not notify.
    fn slot(&self, key: &SlotKey) -> Result<&Option<Item>, ContainerError>;

    /// Raw mutable slot access. Does not notify.
    fn slot_mut(&mut self, key: &SlotKey) -> Result<&mut Option<Item>, ContainerError>;

    fn observer_mut(&mut self) -> &mut ObserverSlot;

    /// Whether `item` may occupy `key`, ignoring who currently sits there
    fn accepts(&self, _key: &SlotKey, _item: &Item) -> bool {
        true
    }

    fn contains_key(&self, key: &SlotKey) -> bool {
        self.slot(key).is_ok()
    }

    fn get(&self, key: &SlotKey) -> Option<&Item> {
        self.slot(key).ok().and_then(Option::as_ref)
    }

    /// Overwrite a slot, returning the previous occupant
    fn set(&mut self, key: &SlotKey, item: Item) -> Result<Option<Item>, ContainerError> {
        let prior = self.slot_mut(key)?.replace(item);
        self.notify(key);
        Ok(prior)
    }

    /// Empty a slot, returning what was there
    fn clear(&mut self, key: &SlotKey) -> Result<Option<Item>, ContainerError> {
        let prior = self.slot_mut(key)?.take();
        if prior.is_some() {
            self.notify(key);
        }
        Ok(prior)
    }

    /// Change the stack count of an occupied slot
    fn set_count(&mut self, key: &SlotKey, count: u32) -> Result<(), ContainerError> {
        let container = self.id().clone();
        let item = self
            .slot_mut(key)?
            .as_mut()
            .ok_or(ContainerError::EmptySlot { container, key: *key })?;
        item.count = count;
        self.notify(key);
        Ok(())
    }

    fn set_observer(&mut self, observer: Box<dyn ContainerObserver>) {
        *self.observer_mut() = ObserverSlot::new(observer);
    }

    fn notify(&mut self, key: &SlotKey) {
        let id = self.id().clone();
        self.observer_mut().notify(&id, key);
    }

    /// Occupied slots in key order
    fn occupied(&self) -> Vec<(SlotKey, &Item)> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.get(&key).map(|item| (key, item)))
            .collect()
    }

    fn first_empty(&self) -> Option<SlotKey> {
        self.keys()
            .into_iter()
            .find(|key| matches!(self.slot(key), Ok(None)))
    }

    fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }
}
