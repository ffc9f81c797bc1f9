//! Transfer results

use thiserror::Error;

use crate::containers::{SlotAddress, SlotKey};

/// Why a pick, drop or direct move was refused
///
/// Every variant is recoverable: nothing was mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The item being bumped out has nowhere to go
    #[error("no room for the displaced item")]
    Full,
    /// Slot shape does not fit the item
    #[error("item does not fit that slot")]
    IncompatibleSlot,
    /// Slot fits, but the player's level or stats are too low
    #[error("requirements not met")]
    RequirementsNotMet,
    /// Nothing to pick up, the source moved, or the container is unknown
    #[error("nothing to pick up there")]
    EmptySource,
    /// Drop target container or key does not exist
    #[error("drop target not found")]
    TargetNotFound,
    /// A pick-up is already in progress
    #[error("already holding an item")]
    Busy,
}

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

/// What a successful transfer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Dropped back onto its own slot; nothing changed
    Noop,
    /// Item moved into an empty slot
    Moved { to: SlotAddress },
    /// Counts merged onto an existing stack; `remaining` stayed at the source
    Merged { moved: u32, remaining: u32 },
    /// The two items traded places
    Swapped,
    /// Item took the target slot and its previous occupant went to the inventory
    Bumped { displaced_to: SlotKey },
}
