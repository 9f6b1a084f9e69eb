//! Adversarial search
//!
//! Iterative deepening alpha-beta over whole-state snapshots:
//!
//! - `actions` - action enumeration and heuristic ordering
//! - `simulate` - applying an action to a cloned state via the live rules
//! - `minimax` - alpha-beta min/max nodes with a wall-clock deadline
//! - `iterative` - the deepening driver with fallback

mod actions;
mod iterative;
mod minimax;
mod simulate;

pub use actions::{enumerate_actions, ordered_actions};
pub use iterative::choose_action;
pub use simulate::{apply_action, resolve_actor};

use std::time::Duration;

use crate::constants::{DEFAULT_BUDGET_MS, MAX_SEARCH_DEPTH};
use crate::types::Action;

/// How long the AI may think per move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Wall-clock budget for one decision.
    pub fn budget(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(500),
            Difficulty::Medium => Duration::from_millis(1_500),
            Difficulty::Hard => Duration::from_millis(3_000),
        }
    }
}

/// Search tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    pub budget: Duration,
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: Duration::from_millis(DEFAULT_BUDGET_MS),
            max_depth: MAX_SEARCH_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            budget: difficulty.budget(),
            ..Self::default()
        }
    }
}

/// The search's answer: the chosen action plus how it was found.
#[derive(Clone, Copy, Debug)]
pub struct SearchOutcome {
    pub action: Action,
    pub score: f64,
    /// Deepest fully completed depth; 0 means the ordering fallback fired.
    pub depth: u32,
}
