//! Progression systems

pub mod player;

pub use player::{Player, Stat};
