//! Storage surfaces
//!
//! The inventory grid, equipment slots, quick slots and bag contents, all
//! behind the one `Container` trait.

pub mod slot;
pub mod observer;
pub mod container;
pub mod grid;
pub mod equipment;
pub mod quick;
pub mod loadout;

pub use slot::{AddressParseError, ContainerId, ContainerKind, SlotAddress, SlotKey};
pub use observer::{ContainerObserver, ObserverSlot};
pub use container::{Container, ContainerError};
pub use grid::SlotGrid;
pub use equipment::EquipmentSlots;
pub use quick::QuickSlots;
pub use loadout::Loadout;
