//! Alpha-beta min/max nodes
//!
//! Plain minimax with alpha-beta pruning over cloned states. The wall-clock
//! deadline is checked at every node; running out of time is a typed error
//! that unwinds the whole depth, never a sentinel score.

use instant::Instant;

use crate::constants::WIN_SCORE;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::evaluate;
use crate::search::actions::ordered_actions;
use crate::search::simulate::apply_action;
use crate::types::{GameState, Team};

pub(super) struct SearchContext {
    pub ai_team: Team,
    pub deadline: Instant,
}

impl SearchContext {
    fn check_time(&self, depth: u32) -> EngineResult<()> {
        if Instant::now() >= self.deadline {
            Err(EngineError::SearchTimeout { depth })
        } else {
            Ok(())
        }
    }
}

/// Opponent-to-act node: picks the score worst for the AI.
pub(super) fn min_node(
    state: &GameState,
    ctx: &SearchContext,
    alpha: f64,
    mut beta: f64,
    depth: u32,
    max_depth: u32,
) -> EngineResult<f64> {
    ctx.check_time(depth)?;
    if depth >= max_depth || state.game_over {
        return Ok(evaluate(state, ctx.ai_team));
    }

    let actions = ordered_actions(state, ctx.ai_team.opponent());
    if actions.is_empty() {
        // The opponent is out of options.
        return Ok(WIN_SCORE);
    }

    let mut min_score = f64::INFINITY;
    for action in &actions {
        let mut next = state.clone();
        if apply_action(&mut next, action).is_err() {
            continue;
        }
        let score = max_node(&next, ctx, alpha, beta, depth + 1, max_depth)?;
        min_score = min_score.min(score);
        beta = beta.min(min_score);
        if beta <= alpha {
            break;
        }
    }
    Ok(min_score)
}

/// AI-to-act node: picks the score best for the AI.
pub(super) fn max_node(
    state: &GameState,
    ctx: &SearchContext,
    mut alpha: f64,
    beta: f64,
    depth: u32,
    max_depth: u32,
) -> EngineResult<f64> {
    ctx.check_time(depth)?;
    if depth >= max_depth || state.game_over {
        return Ok(evaluate(state, ctx.ai_team));
    }

    let actions = ordered_actions(state, ctx.ai_team);
    if actions.is_empty() {
        return Ok(-WIN_SCORE);
    }

    let mut max_score = f64::NEG_INFINITY;
    for action in &actions {
        let mut next = state.clone();
        if apply_action(&mut next, action).is_err() {
            continue;
        }
        let score = min_node(&next, ctx, alpha, beta, depth + 1, max_depth)?;
        max_score = max_score.max(score);
        alpha = alpha.max(max_score);
        if beta <= alpha {
            break;
        }
    }
    Ok(max_score)
}
