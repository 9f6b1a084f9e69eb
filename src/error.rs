//! Error types for the game engine
//!
//! Invalid player intents are rejected with a typed error and never mutate
//! state; search timeouts are ordinary values on the search path. No panics
//! cross the rules/search boundary.

use crate::types::{Cell, Team};
use thiserror::Error;

/// Errors that can occur in the rules engine and the search service.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Action attempted by the side not to move
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Team),

    /// The game has already ended
    #[error("the game is over")]
    GameOver,

    /// No piece at the given cell
    #[error("no piece at {0}")]
    EmptyCell(Cell),

    /// Piece cannot act this turn (stuck or dazed)
    #[error("piece at {0} cannot act this turn")]
    Immobilized(Cell),

    /// Destination is not in the piece's valid move set
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Cell, to: Cell },

    /// Ability target failed validation
    #[error("invalid target {target:?} for {ability}")]
    InvalidTarget {
        ability: &'static str,
        target: Option<Cell>,
    },

    /// Ability is on cooldown or the piece lacks the charges for it
    #[error("ability {0} is not available")]
    AbilityUnavailable(&'static str),

    /// Input that the session's current phase cannot accept
    #[error("unexpected input: {0}")]
    UnexpectedInput(&'static str),

    /// An AI-chosen actor could not be located in the live state
    #[error("stale actor: no {kind} at {pos}", kind = .0, pos = .1)]
    StaleActor(&'static str, Cell),

    /// The search ran out of wall-clock budget mid-depth
    #[error("search timed out at depth {depth}")]
    SearchTimeout { depth: u32 },

    /// The search thread is gone or failed to answer in time
    #[error("search service unavailable: {0}")]
    SearchUnavailable(&'static str),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
