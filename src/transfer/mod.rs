//! Transfer engine
//!
//! Pick/drop sessions, compatibility rules and equip effects layered over
//! the containers.

pub mod compat;
pub mod effects;
pub mod engine;
pub mod error;
pub mod session;


pub use effects::{EffectApplier, StatEffects};
pub use engine::TransferEngine;
pub use error::{TransferError, TransferOutcome, TransferResult};
pub use session::{DragSession, HeldItem};
