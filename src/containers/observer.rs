//! Change notification
//!
//! Containers call their observer synchronously after every committed
//! mutation, so a redraw has happened before the next gesture arrives.

use std::fmt;

use super::slot::{ContainerId, SlotKey};

/// Receives one call per changed slot
pub trait ContainerObserver {
    fn on_container_changed(&mut self, container: &ContainerId, key: &SlotKey);
}

impl<F> ContainerObserver for F
where
    F: FnMut(&ContainerId, &SlotKey),
{
    fn on_container_changed(&mut self, container: &ContainerId, key: &SlotKey) {
        self(container, key)
    }
}

/// Optional observer owned by a container
///
/// Not serialized and not cloned: a copied container starts unobserved.
#[derive(Default)]
pub struct ObserverSlot(Option<Box<dyn ContainerObserver>>);

impl ObserverSlot {
    pub fn new(observer: Box<dyn ContainerObserver>) -> Self {
        Self(Some(observer))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn notify(&mut self, container: &ContainerId, key: &SlotKey) {
        if let Some(observer) = self.0.as_mut() {
            observer.on_container_changed(container, key);
        }
    }
}

impl Clone for ObserverSlot {
    fn clone(&self) -> Self {
        Self(None)
    }
}

impl fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObserverSlot")
            .field(&if self.is_set() { "set" } else { "none" })
            .finish()
    }
}
