//! Quick slots (hotbar)
//!
//! Numbered slots with an active cursor. Anything may be parked here; the
//! combat and tool-use side reads whatever sits under the cursor.

use serde::{Deserialize, Serialize};

use super::container::{Container, ContainerError};
use super::observer::ObserverSlot;
use super::slot::{ContainerId, ContainerKind, SlotKey};
use crate::items::Item;

/// Hotbar with an active slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickSlots {
    slots: Vec<Option<Item>>,
    /// Currently selected slot number (1-based)
    active: usize,
    #[serde(skip, default = "quick_id")]
    id: ContainerId,
    #[serde(skip)]
    observer: ObserverSlot,
}

fn quick_id() -> ContainerId {
    ContainerId::QuickSlots
}

impl QuickSlots {
    /// Creates `count` empty quick slots, numbered from 1
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            active: 1,
            id: ContainerId::QuickSlots,
            observer: ObserverSlot::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Key of the selected slot
    pub fn active_key(&self) -> SlotKey {
        SlotKey::Quick(self.active)
    }

    /// Item under the cursor
    pub fn active_item(&self) -> Option<&Item> {
        self.get(&self.active_key())
    }

    /// Move the cursor; out-of-range keys are rejected and the cursor stays
    pub fn set_active(&mut self, key: &SlotKey) -> Result<(), ContainerError> {
        let index = self.index_of(key)?;
        self.active = index + 1;
        Ok(())
    }

    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn index_of(&self, key: &SlotKey) -> Result<usize, ContainerError> {
        match key {
            SlotKey::Quick(n) if (1..=self.slots.len()).contains(n) => Ok(n - 1),
            _ => Err(ContainerError::InvalidSlot {
                container: self.id.clone(),
                key: *key,
            }),
        }
    }
}

impl Container for QuickSlots {
    fn id(&self) -> &ContainerId {
        &self.id
    }

    fn kind(&self) -> ContainerKind {
        ContainerKind::QuickSlots
    }

    fn keys(&self) -> Vec<SlotKey> {
        (1..=self.slots.len()).map(SlotKey::Quick).collect()
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
}
