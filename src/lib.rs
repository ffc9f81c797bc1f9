//! Satchel - container transfer engine
//!
//! Inventory, equipment, quick slots and nested bags, with a pick/drop
//! session that moves items between them without ever losing one.

pub mod items;
pub mod progression;
pub mod containers;
pub mod transfer;
pub mod data;

// Re-export commonly used types
pub use containers::{Container, ContainerId, Loadout, SlotAddress, SlotKey};
pub use items::{EquipSlot, Item, ItemId, ItemKind};
pub use progression::{Player, Stat};
pub use transfer::{TransferEngine, TransferError, TransferOutcome};
