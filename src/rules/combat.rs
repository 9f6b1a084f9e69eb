//! Effective power and capture resolution
//!
//! One power formula shared by capture resolution, move legality, and the
//! evaluation function, so the AI can never disagree with the rules about
//! who beats whom.

use crate::constants::{CHILLING_AURA_DEBUFF, MARK_OF_CINDER_DEBUFF, RIFT_ANCHOR_BOOST, UNSTABLE_GROUND_DAMAGE};
use crate::types::{GameState, Piece, PieceId, PieceKind};

/// A piece's power in combat right now.
///
/// Stuck pieces and Ice Wisps are always 0. Otherwise: current base power,
/// plus shrine boost, anchor bonus and timed boosts, minus marks, debuffs,
/// hostile unstable ground underfoot (only when `opponent` created it), and
/// one point per adjacent enemy with an active Chilling Aura. Floored at 0.
pub fn effective_power(state: &GameState, piece: &Piece, opponent: Option<PieceId>) -> i32 {
    if piece.stuck > 0 || piece.kind == PieceKind::IceWisp {
        return 0;
    }

    let mut power = piece.power + piece.shrine_boost;

    if piece.is_anchor {
        power += RIFT_ANCHOR_BOOST;
    }
    if let Some(boost) = piece.overload_boost {
        if boost.duration > 0 {
            power += boost.amount;
        }
    }
    if let Some(boost) = state.temporary_boosts.iter().find(|b| b.piece == piece.id) {
        power += boost.amount;
    }
    if state.marked_pieces.iter().any(|m| m.piece == piece.id) {
        power -= MARK_OF_CINDER_DEBUFF;
    }
    if let Some(debuff) = state.debuffs.iter().find(|d| d.piece == piece.id) {
        power -= debuff.amount;
    }
    if let Some(opp) = opponent {
        if state
            .unstable_grounds
            .iter()
            .any(|g| g.cell == piece.pos && g.creator == opp)
        {
            power -= UNSTABLE_GROUND_DAMAGE;
        }
    }

    for neighbor in piece.pos.neighbors() {
        if let Some(adj) = state.piece_at(neighbor) {
            if adj.team == piece.team.opponent() {
                if let Some(ability) = &adj.ability {
                    if ability.aura_active {
                        power -= CHILLING_AURA_DEBUFF;
                    }
                }
            }
        }
    }

    power.max(0)
}

/// Whether `attacker` takes `defender`'s cell.
///
/// Strictly greater effective power wins. On a power tie the side holding
/// more territory cells wins; a full tie goes to the defender.
pub fn capture_succeeds(state: &GameState, attacker: &Piece, defender: &Piece) -> bool {
    let attack = effective_power(state, attacker, Some(defender.id));
    let defense = effective_power(state, defender, Some(attacker.id));

    if attack > defense {
        return true;
    }
    if attack == defense {
        let a_cells = state.territory(attacker.team).len();
        let d_cells = state.territory(defender.team).len();
        return a_cells > d_cells;
    }
    false
}
