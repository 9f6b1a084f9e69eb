//! The rules engine: combat, movement, abilities, zones, turn flow.

pub mod abilities;
pub mod combat;
pub mod moves;
pub mod turn;
pub mod zones;
