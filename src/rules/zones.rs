//! Shrine and rift mechanics
//!
//! The shrine charges on qualifying captures and detonates when a piece
//! steps onto it while overloaded. The conduit link activates whenever both
//! rifts hold pieces of the same team, and is recomputed after every
//! position change.

use tracing::debug;

use crate::constants::{
    BLAST_DAZE_TURNS, RIFT_BOTTOM_RIGHT, RIFT_TOP_LEFT, SHRINE_AREA, SHRINE_CENTER,
    SHRINE_OVERLOAD_CHARGES, SHRINE_POWER_BOOST,
};
use crate::rules::moves::update_position;
use crate::rules::turn::end_game;
use crate::types::{Cell, GameState, PieceId, PieceKind};

/// The two rift zones, named by board corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rift {
    TopLeft,
    BottomRight,
}

pub fn in_shrine(cell: Cell) -> bool {
    SHRINE_AREA.iter().any(|&(r, c)| cell == Cell::new(r, c))
}

pub fn rift_at(cell: Cell) -> Option<Rift> {
    let inside = |origin: (i8, i8, i8)| {
        let (r, c, size) = origin;
        cell.row >= r && cell.row < r + size && cell.col >= c && cell.col < c + size
    };
    if inside(RIFT_TOP_LEFT) {
        Some(Rift::TopLeft)
    } else if inside(RIFT_BOTTOM_RIGHT) {
        Some(Rift::BottomRight)
    } else {
        None
    }
}

/// The ring of cells around the shrine block, excluding the shrine itself.
pub fn shrine_ring() -> Vec<Cell> {
    let mut ring = Vec::new();
    for &(sr, sc) in SHRINE_AREA.iter() {
        for dr in -1i8..=1 {
            for dc in -1i8..=1 {
                let cell = Cell::new(sr + dr, sc + dc);
                if cell.in_bounds() && !in_shrine(cell) && !ring.contains(&cell) {
                    ring.push(cell);
                }
            }
        }
    }
    ring
}

/// Capture landing on the shrine: the capturer gains its one-time permanent
/// boost and the shrine charges toward overload. Ice Wisp victims charge
/// nothing.
pub fn handle_shrine_capture(state: &mut GameState, attacker: PieceId, victim: PieceKind) {
    if victim == PieceKind::IceWisp {
        return;
    }

    let Some(piece) = state.piece_mut(attacker) else {
        return;
    };
    let team = piece.team;
    let name = piece.kind.display_name();
    if piece.shrine_boost == 0 {
        piece.shrine_boost = SHRINE_POWER_BOOST;
        state.push_log(
            Some(team),
            format!("{name} gains a permanent +{SHRINE_POWER_BOOST} boost!"),
        );
    }

    if !state.shrine_overloaded {
        state.shrine_charge += 1;
        if state.shrine_charge >= SHRINE_OVERLOAD_CHARGES {
            state.shrine_overloaded = true;
            state.push_log(None, "The Shrine is Overloaded!");
        }
    }
}

/// A piece stepped onto the overloaded shrine: it is destroyed, the ring is
/// dazed and pushed outward, and the shrine resets. Destroying a leader ends
/// the game for the other side.
pub fn trigger_overload(state: &mut GameState, mover: PieceId, to: Cell) {
    update_position(state, mover, to);

    let Some(piece) = state.piece(mover) else {
        return;
    };
    let (kind, team) = (piece.kind, piece.team);
    state.push_log(
        None,
        format!("The Shrine erupts, vaporizing the {}!", kind.display_name()),
    );
    state.remove_piece(mover);

    if kind.is_leader() {
        end_game(state, team.opponent());
        return;
    }

    let victims: Vec<PieceId> = shrine_ring()
        .iter()
        .filter_map(|&cell| state.piece_id_at(cell))
        .collect();
    if !victims.is_empty() {
        state.push_log(None, "Adjacent pieces are dazed and thrown back!");
    }
    for id in victims {
        let Some(victim) = state.piece_mut(id) else {
            continue;
        };
        victim.dazed_for = BLAST_DAZE_TURNS;
        victim.dazed = true;

        let pos = victim.pos;
        let push = Cell::new(
            pos.row + sign(pos.row as f32 - SHRINE_CENTER.0),
            pos.col + sign(pos.col as f32 - SHRINE_CENTER.1),
        );
        if state.is_open(push) {
            update_position(state, id, push);
        }
    }

    state.shrine_charge = 0;
    state.shrine_overloaded = false;
    state.reindex();
}

fn sign(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Recompute the conduit link from current rift occupancy.
///
/// The link is active iff both rifts hold a piece and the two occupants are
/// the same team. The top-left anchor carries the defensive ward; the
/// bottom-right anchor gains a Rift Pulse only when it newly becomes an
/// anchor (the pulse does not recharge while the link holds).
pub fn update_conduit_link(state: &mut GameState) {
    let mut top_left: Option<PieceId> = None;
    let mut bottom_right: Option<PieceId> = None;
    for piece in &state.pieces {
        match rift_at(piece.pos) {
            Some(Rift::TopLeft) => top_left = Some(piece.id),
            Some(Rift::BottomRight) => bottom_right = Some(piece.id),
            None => {}
        }
    }

    let was_active = state.conduit_active;
    let previous_br = state.rift_anchors[1];

    let link = match (top_left, bottom_right) {
        (Some(tl), Some(br)) => {
            let tl_team = state.piece(tl).map(|p| p.team);
            let br_team = state.piece(br).map(|p| p.team);
            (tl_team.is_some() && tl_team == br_team).then_some((tl, br))
        }
        _ => None,
    };

    match link {
        Some((tl, br)) => {
            let team = state.piece(tl).map(|p| p.team);
            if !was_active {
                debug!(?team, "conduit link forged");
                state.push_log(team, "A Conduit Link has been forged!");
            }
            let pulse_ready = !was_active
                || previous_br != Some(br)
                || state.piece(br).map(|p| p.can_rift_pulse).unwrap_or(false);

            for piece in state.pieces.iter_mut() {
                piece.is_anchor = piece.id == tl || piece.id == br;
                piece.has_ward = piece.id == tl;
                if piece.id == br {
                    piece.can_rift_pulse = pulse_ready;
                } else {
                    piece.can_rift_pulse = false;
                }
            }
            state.conduit_active = true;
            state.conduit_team = team;
            state.rift_anchors = [Some(tl), Some(br)];
        }
        None => {
            if was_active {
                state.push_log(state.conduit_team, "The Conduit Link has been broken!");
            }
            state.conduit_active = false;
            state.conduit_team = None;
            state.rift_anchors = [None, None];
            for piece in state.pieces.iter_mut() {
                piece.is_anchor = false;
                piece.has_ward = false;
                piece.can_rift_pulse = false;
            }
        }
    }
}
