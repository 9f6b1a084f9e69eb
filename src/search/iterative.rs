//! Iterative deepening driver
//!
//! Searches depth 1, then 2, and so on until the wall-clock budget runs
//! out. A depth interrupted by the deadline is discarded wholesale; the
//! answer always comes from the deepest fully completed depth. If not even
//! depth 1 completes, the highest-ordered action is the fallback.

use instant::Instant;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::search::actions::ordered_actions;
use crate::search::minimax::{min_node, SearchContext};
use crate::search::simulate::apply_action;
use crate::search::{SearchConfig, SearchOutcome};
use crate::types::{Action, GameState};

/// Pick the best action for the side to move.
pub fn choose_action(state: &GameState, config: &SearchConfig) -> EngineResult<SearchOutcome> {
    let start = Instant::now();
    let ai_team = state.current_turn;
    let ctx = SearchContext {
        ai_team,
        deadline: start + config.budget,
    };

    let root_actions = ordered_actions(state, ai_team);
    if root_actions.is_empty() {
        return Err(EngineError::SearchUnavailable("no legal actions"));
    }

    let mut best_overall: Option<(Action, f64, u32)> = None;

    'deepening: for max_depth in 1..=config.max_depth {
        if Instant::now() >= ctx.deadline {
            break;
        }

        let mut best_at_depth: Option<(Action, f64)> = None;
        let mut alpha = f64::NEG_INFINITY;

        for action in &root_actions {
            if Instant::now() >= ctx.deadline {
                debug!(depth = max_depth, "budget exhausted mid-depth, discarding");
                break 'deepening;
            }

            let mut next = state.clone();
            if apply_action(&mut next, action).is_err() {
                continue;
            }
            let score = match min_node(&next, &ctx, alpha, f64::INFINITY, 1, max_depth) {
                Ok(score) => score,
                Err(EngineError::SearchTimeout { .. }) => {
                    debug!(depth = max_depth, "timeout below root, discarding depth");
                    break 'deepening;
                }
                Err(other) => return Err(other),
            };

            if best_at_depth.map(|(_, s)| score > s).unwrap_or(true) {
                best_at_depth = Some((*action, score));
            }
            alpha = alpha.max(score);
        }

        if let Some((action, score)) = best_at_depth {
            debug!(
                depth = max_depth,
                score,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "depth complete"
            );
            best_overall = Some((action, score, max_depth));
        }
    }

    match best_overall {
        Some((action, score, depth)) => Ok(SearchOutcome {
            action,
            score,
            depth,
        }),
        None => {
            // Not even depth 1 finished; the ordering heuristic picks.
            warn!("search budget too small for depth 1, falling back to ordering");
            Ok(SearchOutcome {
                action: root_actions[0],
                score: 0.0,
                depth: 0,
            })
        }
    }
}
