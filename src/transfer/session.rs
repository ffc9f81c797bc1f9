//! Drag session
//!
//! The one piece of in-flight interaction state. It only references the
//! picked item; the item itself stays in its source slot until a drop
//! commits.

use crate::containers::SlotAddress;
use crate::items::{Item, ItemId};

/// Snapshot of what was picked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItem {
    pub id: ItemId,
    pub name: String,
    pub count: u32,
}

impl HeldItem {
    pub fn of(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            count: item.count,
        }
    }
}

/// Idle, or holding an item picked from `source`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Holding { item: HeldItem, source: SlotAddress },
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    pub fn held(&self) -> Option<&HeldItem> {
        match self {
            DragSession::Holding { item, .. } => Some(item),
            DragSession::Idle => None,
        }
    }

    pub fn source(&self) -> Option<&SlotAddress> {
        match self {
            DragSession::Holding { source, .. } => Some(source),
            DragSession::Idle => None,
        }
    }

    /// Move the session out, leaving Idle behind
    pub fn take(&mut self) -> DragSession {
        std::mem::take(self)
    }
}
