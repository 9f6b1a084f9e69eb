//! Turn and round upkeep
//!
//! Per-turn effects tick when each side ends its turn; round-based effects
//! tick once per full round, after the second side (Ash) ends. Durations are
//! decremented first and records are dropped at zero, so a duration of 2
//! survives exactly one full round.

use tracing::info;

use crate::rules::abilities::resolve_projectiles;
use crate::types::{GameState, Team};

/// End the game immediately.
pub fn end_game(state: &mut GameState, winner: Team) {
    state.game_over = true;
    state.winner = Some(winner);
    info!(winner = winner.name(), "game over");
}

fn end_of_turn_upkeep(state: &mut GameState) {
    let ending = state.current_turn;
    for piece in state.pieces.iter_mut() {
        if piece.stuck > 0 {
            piece.stuck -= 1;
        }
        if let Some(boost) = piece.overload_boost.as_mut() {
            if boost.duration > 0 {
                boost.duration -= 1;
            }
        }
        if piece.team == ending {
            if piece.dazed_for > 0 {
                piece.dazed_for -= 1;
            }
            piece.dazed = piece.dazed_for > 0;
        }
    }
}

fn round_upkeep(state: &mut GameState) {
    state.temporary_boosts.retain_mut(|b| {
        b.duration -= 1;
        b.duration > 0
    });
    state.debuffs.retain_mut(|d| {
        d.duration -= 1;
        d.duration > 0
    });
    state.unstable_grounds.retain_mut(|g| {
        g.duration -= 1;
        g.duration > 0
    });
    state.glacial_walls.retain_mut(|w| {
        w.duration -= 1;
        w.duration > 0
    });
    state.marked_pieces.retain_mut(|m| {
        m.duration -= 1;
        m.duration > 0
    });

    for piece in state.pieces.iter_mut() {
        if let Some(ability) = piece.ability.as_mut() {
            if ability.cooldown > 0 {
                ability.cooldown -= 1;
            }
            if ability.aura_active {
                ability.aura_rounds = ability.aura_rounds.saturating_sub(1);
                if ability.aura_rounds == 0 {
                    ability.aura_active = false;
                }
            }
        }
    }
}

fn start_of_turn_upkeep(state: &mut GameState, incoming: Team) {
    for piece in state.pieces.iter_mut() {
        if piece.team == incoming {
            piece.dazed = piece.dazed_for > 0;
        }
    }
}

/// Hand the turn to the other side, running all upkeep in order. In-flight
/// projectiles land before anything else ticks.
pub fn switch_turn(state: &mut GameState) {
    resolve_projectiles(state);
    end_of_turn_upkeep(state);

    if state.current_turn == Team::Ash {
        state.turn_count += 1;
        round_upkeep(state);
    }

    let next = state.current_turn.opponent();
    start_of_turn_upkeep(state, next);
    state.current_turn = next;
}
