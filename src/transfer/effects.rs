//! Equipment stat effects

use crate::items::Item;
use crate::progression::Player;

/// Applies and removes an item's stat contributions.
///
/// The engine calls `apply` once per equip and `remove` once per unequip,
/// and never for quick slots or plain storage.
pub trait EffectApplier {
    fn apply(&mut self, item: &Item, player: &mut Player);

    fn remove(&mut self, item: &Item, player: &mut Player);
}

/// Adds each stat delta to the player's equipment bonus
#[derive(Debug, Clone, Copy, Default)]
pub struct StatEffects;

impl EffectApplier for StatEffects {
    fn apply(&mut self, item: &Item, player: &mut Player) {
        for (&stat, &delta) in &item.stats {
            player.adjust_bonus(stat, delta);
        }
    }

    fn remove(&mut self, item: &Item, player: &mut Player) {
        for (&stat, &delta) in &item.stats {
            player.adjust_bonus(stat, -delta);
        }
    }
}
