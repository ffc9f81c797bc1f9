//! Slot addressing
//!
//! Every place an item can sit is named by a `SlotAddress`: which container,
//! and which key inside it. Bags are addressed through their own item id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{EquipSlot, ItemId};

/// Container shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    Inventory,
    Equipment,
    QuickSlots,
    BagContents,
}

/// Which container an address points into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    Inventory,
    Equipment,
    QuickSlots,
    /// Contents of the bag item with this id
    Bag(ItemId),
}

impl ContainerId {
    pub fn kind(&self) -> ContainerKind {
        match self {
            ContainerId::Inventory => ContainerKind::Inventory,
            ContainerId::Equipment => ContainerKind::Equipment,
            ContainerId::QuickSlots => ContainerKind::QuickSlots,
            ContainerId::Bag(_) => ContainerKind::BagContents,
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Inventory => f.write_str("inventory"),
            ContainerId::Equipment => f.write_str("equipment"),
            ContainerId::QuickSlots => f.write_str("quick"),
            ContainerId::Bag(id) => write!(f, "bag:{}", id),
        }
    }
}

/// Key of one slot inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKey {
    /// Flat index (inventory, bag contents), 0-based
    Index(usize),
    /// Named equipment slot
    Equip(EquipSlot),
    /// Quick slot number, 1-based like the hotbar labels
    Quick(usize),
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Index(i) => write!(f, "{}", i),
            SlotKey::Equip(slot) => f.write_str(slot.name()),
            SlotKey::Quick(n) => write!(f, "quickSlot{}", n),
        }
    }
}

/// Fully resolved slot location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotAddress {
    pub container: ContainerId,
    pub key: SlotKey,
}

impl SlotAddress {
    pub fn new(container: ContainerId, key: SlotKey) -> Self {
        Self { container, key }
    }

    pub fn inventory(index: usize) -> Self {
        Self::new(ContainerId::Inventory, SlotKey::Index(index))
    }

    pub fn equipment(slot: EquipSlot) -> Self {
        Self::new(ContainerId::Equipment, SlotKey::Equip(slot))
    }

    pub fn quick(number: usize) -> Self {
        Self::new(ContainerId::QuickSlots, SlotKey::Quick(number))
    }

    pub fn bag(bag_id: impl Into<ItemId>, index: usize) -> Self {
        Self::new(ContainerId::Bag(bag_id.into()), SlotKey::Index(index))
    }

    pub fn kind(&self) -> ContainerKind {
        self.container.kind()
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.container, self.key)
    }
}

/// Rejected textual slot address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("empty slot address")]
    Empty,
    #[error("unknown container '{0}'")]
    UnknownContainer(String),
    #[error("bad slot key '{key}' for {container}")]
    BadKey { container: String, key: String },
}

impl FromStr for SlotAddress {
    type Err = AddressParseError;

    /// Accepts `inventory:3`, `equipment:head`, `quick:2` / `quick:quickSlot2`
    /// and `bag:<bagId>:4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressParseError::Empty);
        }

        let (container, rest) = s.split_once(':').unwrap_or((s, ""));
        let bad_key = |key: &str| AddressParseError::BadKey {
            container: container.to_string(),
            key: key.to_string(),
        };

        match container.to_ascii_lowercase().as_str() {
            "inventory" | "inv" => rest
                .parse::<usize>()
                .map(SlotAddress::inventory)
                .map_err(|_| bad_key(rest)),
            "equipment" | "equip" => rest
                .parse::<EquipSlot>()
                .map(SlotAddress::equipment)
                .map_err(|_| bad_key(rest)),
            "quick" => {
                let number = rest.strip_prefix("quickSlot").unwrap_or(rest);
                number
                    .parse::<usize>()
                    .map(SlotAddress::quick)
                    .map_err(|_| bad_key(rest))
            }
            "bag" => {
                let (bag_id, index) = rest.rsplit_once(':').ok_or_else(|| bad_key(rest))?;
                if bag_id.is_empty() {
                    return Err(bad_key(rest));
                }
                index
                    .parse::<usize>()
                    .map(|i| SlotAddress::bag(bag_id, i))
                    .map_err(|_| bad_key(index))
            }
            _ => Err(AddressParseError::UnknownContainer(container.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addresses() {
        assert_eq!("inventory:3".parse(), Ok(SlotAddress::inventory(3)));
        assert_eq!(
            "equipment:rightHand".parse(),
            Ok(SlotAddress::equipment(EquipSlot::RightHand))
        );
        assert_eq!("quick:quickSlot3".parse(), Ok(SlotAddress::quick(3)));
        assert_eq!("quick:3".parse(), Ok(SlotAddress::quick(3)));
        assert_eq!("bag:satchel:4".parse(), Ok(SlotAddress::bag("satchel", 4)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<SlotAddress>(), Err(AddressParseError::Empty));
        assert!(matches!(
            "chest:1".parse::<SlotAddress>(),
            Err(AddressParseError::UnknownContainer(_))
        ));
        assert!("inventory:x".parse::<SlotAddress>().is_err());
        assert!("bag:4".parse::<SlotAddress>().is_err());
        assert!("equipment:tail".parse::<SlotAddress>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let addr = SlotAddress::bag("belt_pouch", 2);
        assert_eq!(addr.to_string(), "bag:belt_pouch:2");
        assert_eq!(addr.to_string().parse(), Ok(addr));
        assert_eq!(SlotAddress::quick(3).to_string(), "quick:quickSlot3");
    }
}
