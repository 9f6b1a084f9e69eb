//! Frostfall game engine
//!
//! A complete rules engine and AI opponent for Frostfall, a two-player
//! turn-based strategy game on a fixed 10x10 grid. Snow and Ash each field
//! ten pieces; capturing the enemy leader, or overloading the central
//! shrine onto it, wins the game.
//!
//! The crate splits into the rules layer (`rules`, `board`, `catalog`),
//! the adversarial search (`search`, `evaluation`, `service`), and the
//! interactive session front ends drive (`api`). State is value-semantic:
//! the search clones `GameState` snapshots and plays them forward through
//! the same rules the live game uses.

pub mod api;
pub mod board;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod rng;
pub mod rules;
pub mod search;
pub mod service;
pub mod types;

pub use api::{GameSession, SessionPhase};
pub use error::{EngineError, EngineResult};
pub use search::{Difficulty, SearchConfig, SearchOutcome};
pub use service::SearchService;
pub use types::{Action, ActionKind, Cell, GameState, PieceId, Team};
