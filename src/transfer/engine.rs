//! Transfer engine
//!
//! Owns the drag session and turns pick/drop gestures into container
//! mutations. Every drop is planned first and committed second: all checks
//! run against the untouched loadout, so a refused drop never mutates.

use super::compat;
use super::effects::{EffectApplier, StatEffects};
use super::error::{TransferError, TransferOutcome, TransferResult};
use super::session::{DragSession, HeldItem};
use crate::containers::{Container, ContainerKind, Loadout, SlotAddress, SlotKey};
use crate::items::{EquipSlot, Item, ItemId};
use crate::progression::Player;

/// How a validated drop will be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Move,
    Merge { moved: u32, remaining: u32 },
    Swap,
    Bump,
}

/// Pick/drop orchestrator for one player
pub struct TransferEngine<E: EffectApplier = StatEffects> {
    loadout: Loadout,
    player: Player,
    effects: E,
    session: DragSession,
}

impl TransferEngine<StatEffects> {
    /// Engine applying plain stat deltas
    ///
    /// `player` is expected to already carry the bonuses of anything worn
    /// in `loadout`.
    pub fn new(loadout: Loadout, player: Player) -> Self {
        Self::with_effects(loadout, player, StatEffects)
    }
}

impl<E: EffectApplier> TransferEngine<E> {
    pub fn with_effects(loadout: Loadout, player: Player, effects: E) -> Self {
        Self {
            loadout,
            player,
            effects,
            session: DragSession::Idle,
        }
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Direct access for observers and external item sources
    pub fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_idle()
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Start holding the item at `source`. Nothing is removed yet.
    pub fn begin_pick(&mut self, source: SlotAddress) -> TransferResult<()> {
        self.ensure_idle()?;
        let item = self
            .loadout
            .get(&source)
            .ok_or(TransferError::EmptySource)?;
        let held = HeldItem::of(item);

        log::debug!("Picked up {} x{} from {}", held.name, held.count, source);
        self.session = DragSession::Holding { item: held, source };
        Ok(())
    }

    /// Resolve the held item onto `target`
    ///
    /// The session is Idle when this returns, whatever the outcome.
    pub fn drop(&mut self, target: SlotAddress) -> TransferResult<TransferOutcome> {
        let DragSession::Holding { item, source } = self.session.take() else {
            return Err(TransferError::EmptySource);
        };

        let result = self.transfer(&source, &target, &item);
        match &result {
            Ok(outcome) => log::debug!(
                "Dropped {} from {} onto {}: {:?}",
                item.name,
                source,
                target,
                outcome
            ),
            Err(e) => log::debug!("Drop of {} onto {} refused: {}", item.name, target, e),
        }
        result
    }

    /// Abandon the pick-up. Returns whether anything was held.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            DragSession::Holding { item, source } => {
                log::debug!("Cancelled drag of {} from {}", item.name, source);
                true
            }
            DragSession::Idle => false,
        }
    }

    // ========================================================================
    // Direct operations
    // ========================================================================

    /// Move an equipped item into the inventory by first fit
    pub fn unequip(&mut self, slot: EquipSlot) -> TransferResult<SlotKey> {
        self.ensure_idle()?;
        let source = SlotAddress::equipment(slot);
        let item = self
            .loadout
            .get(&source)
            .ok_or(TransferError::EmptySource)?;
        if !self.loadout.inventory().can_accept(item) {
            log::debug!("Cannot unequip {}: inventory full", item.name);
            return Err(TransferError::Full);
        }

        let item = self.take(&source)?;
        self.on_unequip(&item, slot);
        match self.loadout.inventory_mut().add_first_fit(item) {
            Ok(key) => Ok(key),
            Err(item) => {
                self.on_equip(&item, slot);
                self.put(&source, item)?;
                Err(TransferError::Full)
            }
        }
    }

    /// Equip the item at `source` into the slot it naturally belongs in
    pub fn auto_equip(&mut self, source: SlotAddress) -> TransferResult<TransferOutcome> {
        self.ensure_idle()?;
        let item = self
            .loadout
            .get(&source)
            .ok_or(TransferError::EmptySource)?;
        let slot = compat::natural_slot(item, self.loadout.equipment())
            .ok_or(TransferError::IncompatibleSlot)?;
        let held = HeldItem::of(item);

        self.transfer(&source, &SlotAddress::equipment(slot), &held)
    }

    /// Hand a new item to the inventory. The item comes back if it won't fit.
    ///
    /// A bag whose id is already carried is renamed so its contents stay
    /// addressable.
    pub fn give(&mut self, mut item: Item) -> Result<SlotKey, Item> {
        if item.is_bag() {
            let id = self.loadout.free_bag_id(&item.id);
            if id != item.id {
                log::debug!("Bag id {} in use, renamed to {}", item.id, id);
                item = item.with_id(id);
            }
        }
        let name = item.name.clone();
        let count = item.count;
        let result = self.loadout.inventory_mut().add_first_fit(item);
        match &result {
            Ok(key) => log::debug!("Received {} x{} into slot {}", name, count, key),
            Err(_) => log::debug!("No room for {} x{}", name, count),
        }
        result
    }

    /// Open or close a bag. Closed bags cannot be picked from or dropped into.
    pub fn set_bag_open(&mut self, bag_id: &ItemId, open: bool) -> bool {
        self.loadout.set_bag_open(bag_id, open)
    }

    /// Item under the quick slot cursor
    pub fn active_quick_slot_item(&self) -> Option<&Item> {
        self.loadout.quick().active_item()
    }

    pub fn set_active_quick_slot(&mut self, key: SlotKey) -> TransferResult<()> {
        self.loadout
            .quick_mut()
            .set_active(&key)
            .map_err(|_| TransferError::TargetNotFound)
    }

    // ========================================================================
    // Planning
    // ========================================================================

    fn ensure_idle(&self) -> TransferResult<()> {
        if self.session.is_idle() {
            Ok(())
        } else {
            Err(TransferError::Busy)
        }
    }

    fn transfer(
        &mut self,
        source: &SlotAddress,
        target: &SlotAddress,
        held: &HeldItem,
    ) -> TransferResult<TransferOutcome> {
        if source == target {
            return Ok(TransferOutcome::Noop);
        }
        let plan = self.plan(source, target, held)?;
        self.commit(plan, source, target)
    }

    /// Decide what a drop would do without touching anything
    fn plan(&self, source: &SlotAddress, target: &SlotAddress, held: &HeldItem) -> TransferResult<Plan> {
        let item = self
            .loadout
            .get(source)
            .filter(|item| item.id == held.id)
            .ok_or(TransferError::EmptySource)?;

        let container = self
            .loadout
            .container(&target.container)
            .ok_or(TransferError::TargetNotFound)?;
        if !container.contains_key(&target.key) {
            return Err(TransferError::TargetNotFound);
        }
        let occupant = container.get(&target.key);

        // Requirements are judged without whatever this transfer takes off
        let mut view = self.player.clone();
        if source.kind() == ContainerKind::Equipment {
            view = view.without(&item.stats);
        }
        if let (ContainerKind::Equipment, Some(occupant)) = (target.kind(), occupant) {
            view = view.without(&occupant.stats);
        }

        let Some(occupant) = occupant else {
            self.check_placement(item, target, &view)?;
            return Ok(Plan::Move);
        };

        if item.can_stack_with(occupant) && occupant.spare_capacity() > 0 {
            self.check_placement(item, target, &view)?;
            let moved = item.count.min(occupant.spare_capacity());
            return Ok(Plan::Merge {
                moved,
                remaining: item.count - moved,
            });
        }

        self.check_placement(item, target, &view)?;
        if self.check_placement(occupant, source, &view).is_ok() {
            return Ok(Plan::Swap);
        }

        let inventory = self.loadout.inventory();
        let bump_fits = if target.container == *inventory.id() {
            inventory.can_accept_except(occupant, &target.key)
        } else {
            inventory.can_accept(occupant)
        };
        if bump_fits {
            Ok(Plan::Bump)
        } else {
            log::debug!("No room to bump {} out of {}", occupant.name, target);
            Err(TransferError::Full)
        }
    }

    /// Whether `item` may land at `address`
    fn check_placement(&self, item: &Item, address: &SlotAddress, player: &Player) -> TransferResult<()> {
        let container = self
            .loadout
            .container(&address.container)
            .ok_or(TransferError::TargetNotFound)?;

        match address.key {
            SlotKey::Equip(slot) if container.kind() == ContainerKind::Equipment => {
                compat::check_equip(item, slot, player)
            }
            key if container.accepts(&key, item) => Ok(()),
            _ => Err(TransferError::IncompatibleSlot),
        }
    }

    // ========================================================================
    // Commit
    // ========================================================================

    fn commit(&mut self, plan: Plan, source: &SlotAddress, target: &SlotAddress) -> TransferResult<TransferOutcome> {
        let source_slot = equip_slot(source);
        let target_slot = equip_slot(target);

        match plan {
            Plan::Move => {
                let item = self.take(source)?;
                if let Some(slot) = source_slot {
                    self.on_unequip(&item, slot);
                }
                if let Some(slot) = target_slot {
                    self.on_equip(&item, slot);
                }
                self.put(target, item)?;
                Ok(TransferOutcome::Moved { to: target.clone() })
            }

            Plan::Merge { moved, remaining } => {
                let current = self
                    .loadout
                    .get(target)
                    .map(|item| item.count)
                    .ok_or(TransferError::TargetNotFound)?;
                self.set_count(target, current + moved)?;

                if remaining == 0 {
                    let item = self.take(source)?;
                    if let Some(slot) = source_slot {
                        self.on_unequip(&item, slot);
                    }
                } else {
                    self.set_count(source, remaining)?;
                }
                Ok(TransferOutcome::Merged { moved, remaining })
            }

            Plan::Swap => {
                let held = self.take(source)?;
                let displaced = self.take(target)?;
                if let Some(slot) = source_slot {
                    self.on_unequip(&held, slot);
                }
                if let Some(slot) = target_slot {
                    self.on_unequip(&displaced, slot);
                    self.on_equip(&held, slot);
                }
                if let Some(slot) = source_slot {
                    self.on_equip(&displaced, slot);
                }
                self.put(target, held)?;
                self.put(source, displaced)?;
                Ok(TransferOutcome::Swapped)
            }

            Plan::Bump => {
                let held = self.take(source)?;
                let displaced = self.take(target)?;
                if let Some(slot) = source_slot {
                    self.on_unequip(&held, slot);
                }
                if let Some(slot) = target_slot {
                    self.on_unequip(&displaced, slot);
                    self.on_equip(&held, slot);
                }
                self.put(target, held)?;

                match self.loadout.inventory_mut().add_first_fit(displaced) {
                    Ok(key) => Ok(TransferOutcome::Bumped { displaced_to: key }),
                    Err(displaced) => {
                        // Planning said this fits; put everything back as it was
                        log::warn!("Bump of {} failed after planning, rolling back", displaced.name);
                        let held = self.take(target)?;
                        if let Some(slot) = target_slot {
                            self.on_unequip(&held, slot);
                            self.on_equip(&displaced, slot);
                        }
                        if let Some(slot) = source_slot {
                            self.on_equip(&held, slot);
                        }
                        self.put(target, displaced)?;
                        self.put(source, held)?;
                        Err(TransferError::Full)
                    }
                }
            }
        }
    }

    fn take(&mut self, address: &SlotAddress) -> TransferResult<Item> {
        self.loadout
            .container_mut(&address.container)
            .ok_or(TransferError::EmptySource)?
            .clear(&address.key)
            .ok()
            .flatten()
            .ok_or(TransferError::EmptySource)
    }

    fn put(&mut self, address: &SlotAddress, item: Item) -> TransferResult<()> {
        let container = self
            .loadout
            .container_mut(&address.container)
            .ok_or(TransferError::TargetNotFound)?;
        if !container.contains_key(&address.key) {
            return Err(TransferError::TargetNotFound);
        }
        let prior = container
            .set(&address.key, item)
            .map_err(|_| TransferError::TargetNotFound)?;
        debug_assert!(prior.is_none(), "put over an occupied slot at {}", address);
        Ok(())
    }

    fn set_count(&mut self, address: &SlotAddress, count: u32) -> TransferResult<()> {
        self.loadout
            .container_mut(&address.container)
            .ok_or(TransferError::TargetNotFound)?
            .set_count(&address.key, count)
            .map_err(|_| TransferError::TargetNotFound)
    }

    fn on_equip(&mut self, item: &Item, slot: EquipSlot) {
        log::info!("Equipped {} ({})", item.name, slot.label());
        self.effects.apply(item, &mut self.player);
    }

    fn on_unequip(&mut self, item: &Item, slot: EquipSlot) {
        log::info!("Unequipped {} ({})", item.name, slot.label());
        self.effects.remove(item, &mut self.player);
    }
}

fn equip_slot(address: &SlotAddress) -> Option<EquipSlot> {
    match (address.kind(), address.key) {
        (ContainerKind::Equipment, SlotKey::Equip(slot)) => Some(slot),
        _ => None,
    }
}
