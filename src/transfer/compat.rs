//! Equip compatibility
//!
//! Pure rules for which item may occupy which equipment slot. Storage
//! surfaces (inventory, quick slots, bags) carry no slot rules of their own
//! beyond bags refusing other bags.

use super::error::{TransferError, TransferResult};
use crate::containers::EquipmentSlots;
use crate::items::{Category, EquipSlot, Item};
use crate::progression::Player;

/// Slot shape check, no player involved
pub fn slot_accepts(item: &Item, slot: EquipSlot) -> bool {
    match slot {
        EquipSlot::Backpack => item.category() == Category::Bag,
        EquipSlot::LeftHand | EquipSlot::RightHand => item.category().is_hand_held(),
        _ => item.slot_affinity == Some(slot),
    }
}

/// Level and stat gate
pub fn requirements_met(item: &Item, player: &Player) -> bool {
    let Some(req) = &item.requirements else {
        return true;
    };
    player.level >= req.min_level
        && req
            .min_stats
            .iter()
            .all(|(&stat, &min)| player.stat(stat) >= min)
}

/// Full equip check, distinguishing slot shape from requirement failures
pub fn check_equip(item: &Item, slot: EquipSlot, player: &Player) -> TransferResult<()> {
    if !slot_accepts(item, slot) {
        return Err(TransferError::IncompatibleSlot);
    }
    if !requirements_met(item, player) {
        return Err(TransferError::RequirementsNotMet);
    }
    Ok(())
}

pub fn can_equip(item: &Item, slot: EquipSlot, player: &Player) -> bool {
    check_equip(item, slot, player).is_ok()
}

/// Where a quick-equip would put this item
///
/// Affinity wins. Hand-held items prefer the right hand, falling back to a
/// free left hand while the right is taken.
pub fn natural_slot(item: &Item, equipment: &EquipmentSlots) -> Option<EquipSlot> {
    if let Some(slot) = item.slot_affinity {
        return Some(slot);
    }
    match item.category() {
        Category::Bag => Some(EquipSlot::Backpack),
        Category::Tool | Category::Weapon => {
            if !equipment.is_empty(EquipSlot::RightHand) && equipment.is_empty(EquipSlot::LeftHand) {
                Some(EquipSlot::LeftHand)
            } else {
                Some(EquipSlot::RightHand)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::{Container, SlotKey};
    use crate::items::{ItemKind, Requirements};
    use crate::progression::Stat;

    fn pickaxe() -> Item {
        Item::new("pickaxe", "Pickaxe", ItemKind::Tool)
    }

    #[test]
    fn test_can_equip_core_rules() {
        let player = Player::default();
        let tool = pickaxe();
        let bag = Item::bag("satchel", "Satchel", 4);

        assert!(can_equip(&tool, EquipSlot::RightHand, &player));
        assert!(!can_equip(&tool, EquipSlot::Head, &player));
        assert!(can_equip(&bag, EquipSlot::Backpack, &player));
        assert!(!can_equip(&bag, EquipSlot::LeftHand, &player));
    }

    #[test]
    fn test_affinity_governs_other_slots() {
        let player = Player::default();
        let helm = Item::new("helm", "Helm", ItemKind::Armor).with_affinity(EquipSlot::Head);
        let ring = Item::new("ring", "Ring", ItemKind::Accessory).with_affinity(EquipSlot::Ring);

        assert!(can_equip(&helm, EquipSlot::Head, &player));
        assert!(!can_equip(&helm, EquipSlot::Body, &player));
        assert!(!can_equip(&helm, EquipSlot::RightHand, &player));
        assert!(can_equip(&ring, EquipSlot::Ring, &player));
        assert!(!can_equip(&ring, EquipSlot::Backpack, &player));
    }

    #[test]
    fn test_requirements_are_distinguishable() {
        let player = Player::new("Hero", 3);
        let greatsword = Item::new("greatsword", "Greatsword", ItemKind::Weapon)
            .with_requirements(Requirements::level(5));
        let heavy_axe = Item::new("heavy_axe", "Heavy Axe", ItemKind::Weapon)
            .with_requirements(Requirements::level(1).with_stat(Stat::Strength, 14));

        assert_eq!(
            check_equip(&greatsword, EquipSlot::RightHand, &player),
            Err(TransferError::RequirementsNotMet)
        );
        assert_eq!(
            check_equip(&greatsword, EquipSlot::Head, &player),
            Err(TransferError::IncompatibleSlot)
        );
        assert_eq!(
            check_equip(&heavy_axe, EquipSlot::LeftHand, &player),
            Err(TransferError::RequirementsNotMet)
        );

        let strong = Player::new("Hero", 3).with_base(Stat::Strength, 14);
        assert!(can_equip(&heavy_axe, EquipSlot::LeftHand, &strong));
    }

    #[test]
    fn test_natural_slot() {
        let mut equipment = EquipmentSlots::new();
        let rock = Item::new("rock", "Rock", ItemKind::Resource);

        assert_eq!(natural_slot(&pickaxe(), &equipment), Some(EquipSlot::RightHand));
        assert_eq!(natural_slot(&rock, &equipment), None);
        assert_eq!(
            natural_slot(&Item::bag("pouch", "Pouch", 2), &equipment),
            Some(EquipSlot::Backpack)
        );

        equipment
            .set(&SlotKey::Equip(EquipSlot::RightHand), pickaxe())
            .unwrap();
        let sword = Item::new("sword", "Sword", ItemKind::Weapon);
        assert_eq!(natural_slot(&sword, &equipment), Some(EquipSlot::LeftHand));
    }
}
