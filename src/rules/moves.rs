//! Move generation and execution
//!
//! Valid moves are the 8-neighborhood minus walls (diagonals may not cut a
//! wall corner), with occupied cells included only when the capture would
//! succeed, plus conduit highway jumps when the link is up. Execution
//! re-validates against this list; a destination outside it is rejected,
//! highway flag or not.

use tracing::debug;

use crate::constants::{ROWS, COLS, UNSTABLE_GROUND_DAMAGE};
use crate::error::{EngineError, EngineResult};
use crate::rules::combat::capture_succeeds;
use crate::rules::turn::end_game;
use crate::rules::zones::{handle_shrine_capture, in_shrine, trigger_overload, update_conduit_link};
use crate::types::{Cell, GameState, PieceId};

/// One entry of a piece's move list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidMove {
    pub to: Cell,
    pub highway: bool,
}

/// All destinations the piece may move to this turn.
pub fn valid_moves(state: &GameState, id: PieceId) -> Vec<ValidMove> {
    let Some(piece) = state.piece(id) else {
        return Vec::new();
    };
    if piece.stuck > 0 || piece.dazed {
        return Vec::new();
    }

    let mut moves = Vec::new();

    // Conduit highway: from beside one anchor to the empty cells beside the
    // other.
    if state.conduit_active && state.conduit_team == Some(piece.team) {
        let anchors: Vec<Cell> = state
            .rift_anchors
            .iter()
            .flatten()
            .filter_map(|&a| state.piece(a).map(|p| p.pos))
            .collect();
        let near = anchors.iter().find(|a| piece.pos.distance(**a) <= 1);
        if let Some(&near) = near {
            if let Some(&far) = anchors.iter().find(|&&a| a != near) {
                for cell in far.neighbors() {
                    if state.piece_id_at(cell).is_none() {
                        moves.push(ValidMove {
                            to: cell,
                            highway: true,
                        });
                    }
                }
            }
        }
    }

    for cell in piece.pos.neighbors() {
        if state.wall_at(cell) {
            continue;
        }
        // A diagonal step may not slip between two wall corners.
        let dr = cell.row - piece.pos.row;
        let dc = cell.col - piece.pos.col;
        if dr != 0 && dc != 0 {
            let corner_a = Cell::new(piece.pos.row + dr, piece.pos.col);
            let corner_b = Cell::new(piece.pos.row, piece.pos.col + dc);
            if state.wall_at(corner_a) || state.wall_at(corner_b) {
                continue;
            }
        }

        match state.piece_at(cell) {
            Some(defender) => {
                if defender.team != piece.team && capture_succeeds(state, piece, defender) {
                    moves.push(ValidMove {
                        to: cell,
                        highway: false,
                    });
                }
            }
            None => moves.push(ValidMove {
                to: cell,
                highway: false,
            }),
        }
    }

    moves
}

/// Put a piece on a new cell: claim the territory, keep the board index in
/// sync, and take permanent damage from hazardous ground underfoot.
pub fn update_position(state: &mut GameState, id: PieceId, to: Cell) {
    if state.wall_at(to) {
        return;
    }
    let Some(piece) = state.piece_mut(id) else {
        return;
    };
    let from = piece.pos;
    let team = piece.team;
    let name = piece.kind.display_name();
    piece.pos = to;
    state.board[from.index()] = None;
    state.board[to.index()] = Some(id);

    state.claim_territory(to, team);

    if state.ground_at(to).is_some() {
        if let Some(piece) = state.piece_mut(id) {
            piece.power = (piece.power - UNSTABLE_GROUND_DAMAGE).max(0);
        }
        state.push_log(
            Some(team),
            format!("{name} takes permanent damage from hazardous ground!"),
        );
    }
}

/// Territory Surge: claim two random unoccupied cells for the team.
pub fn apply_territory_surge(state: &mut GameState, id: PieceId) {
    let Some(piece) = state.piece(id) else {
        return;
    };
    let team = piece.team;

    let mut empty: Vec<Cell> = (0..ROWS)
        .flat_map(|r| (0..COLS).map(move |c| Cell::new(r, c)))
        .filter(|&cell| state.piece_id_at(cell).is_none())
        .collect();
    for _ in 0..2 {
        if empty.is_empty() {
            break;
        }
        let cell = empty.swap_remove(state.rng.gen_index(empty.len()));
        state.claim_territory(cell, team);
    }
    state.push_log(Some(team), "A Territory Surge erupts!");
}

/// Execute a move for the side to play.
///
/// Returns `Ok(true)` when the move consumed the turn; a capture attempt
/// that fails the power contest logs "holds its ground" and returns
/// `Ok(false)` without mutating anything else.
pub fn move_piece(state: &mut GameState, id: PieceId, to: Cell, highway: bool) -> EngineResult<bool> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    let Some(piece) = state.piece(id) else {
        return Err(EngineError::EmptyCell(to));
    };
    let (from, team, kind) = (piece.pos, piece.team, piece.kind);
    if piece.dazed || piece.stuck > 0 {
        return Err(EngineError::Immobilized(from));
    }
    if team != state.current_turn {
        return Err(EngineError::NotYourTurn(team));
    }

    let listed = valid_moves(state, id)
        .into_iter()
        .find(|m| m.to == to && m.highway == highway);
    if listed.is_none() {
        // An adjacent enemy that is missing from the list lost us the power
        // contest; attempting it anyway is a no-op, not an illegal intent.
        if !highway && from.distance(to) == 1 {
            if let Some(defender) = state.piece_at(to) {
                if defender.team != team {
                    let def_name = defender.kind.display_name();
                    state.push_log(Some(team), format!("The {def_name} holds its ground!"));
                    return Ok(false);
                }
            }
        }
        return Err(EngineError::IllegalMove { from, to });
    }

    if highway {
        state.push_log(
            Some(team),
            format!("The {} travels the Conduit Highway!", kind.display_name()),
        );
        update_position(state, id, to);
        update_conduit_link(state);
        return Ok(true);
    }

    if state.shrine_overloaded && in_shrine(to) {
        trigger_overload(state, id, to);
        return Ok(true);
    }

    if let Some(defender) = state.piece_at(to) {
        // Occupied destinations only make the list when the capture wins.
        let (def_id, def_kind) = (defender.id, defender.kind);
        debug!(attacker = ?kind, defender = ?def_kind, "capture");
        state.push_log(
            Some(team),
            format!(
                "The {} has vanquished the {}!",
                kind.display_name(),
                def_kind.display_name()
            ),
        );
        state.remove_piece(def_id);

        // Felling the enemy leader ends the game at once; the attacker does
        // not take the square.
        if def_kind.is_leader() {
            end_game(state, team);
            return Ok(true);
        }

        if in_shrine(to) {
            handle_shrine_capture(state, id, def_kind);
        }
        update_position(state, id, to);

        if kind.surges_on_capture() {
            apply_territory_surge(state, id);
        }
    } else {
        update_position(state, id, to);
    }

    update_conduit_link(state);
    Ok(true)
}
