//! Static position evaluation
//!
//! Scores a position from one side's perspective as an `f64`. Twelve factors
//! with hand-tuned weights; a missing leader short-circuits to the terminal
//! score. Uses the same effective-power and move-generation primitives as
//! the rules, so the scorer can never disagree with the game about threats.

use crate::constants::{SHRINE_AREA, WIN_SCORE};
use crate::rules::combat::effective_power;
use crate::rules::moves::valid_moves;
use crate::rules::zones::{in_shrine, rift_at, Rift};
use crate::types::{Cell, GameState, Piece, Team};

const W_LEADER_SAFETY: f64 = 5.0;
const W_PIECE_SAFETY: f64 = 1.5;
const W_NET_VALUE: f64 = 2.0;
const W_NET_POWER: f64 = 150.0;
const W_SIPHON: f64 = 200.0;

/// The twelve cells of the shrine block plus its inner approaches.
const CENTER_SQUARES: [(i8, i8); 12] = [
    (4, 4),
    (4, 5),
    (5, 4),
    (5, 5),
    (3, 4),
    (3, 5),
    (6, 4),
    (6, 5),
    (4, 3),
    (5, 3),
    (4, 6),
    (5, 6),
];

/// Score the position for `ai_team`. Positive is good for that side.
pub fn evaluate(state: &GameState, ai_team: Team) -> f64 {
    let opponent = ai_team.opponent();
    let ai_leader = state.leader(ai_team);
    let opp_leader = state.leader(opponent);
    if opp_leader.is_none() {
        return WIN_SCORE;
    }
    let Some(ai_leader) = ai_leader else {
        return -WIN_SCORE;
    };
    let opp_leader = opp_leader.unwrap();

    let mut score = 0.0;
    score += leader_safety(state, ai_leader, opponent) * W_LEADER_SAFETY;
    score += piece_safety(state, ai_team, opponent) * W_PIECE_SAFETY;
    score += opponent_leader_threat(state, opp_leader, ai_team);
    score += net_piece_value(state, ai_team) * W_NET_VALUE;
    score += net_effective_power(state, ai_team) * W_NET_POWER;
    score += siphon_charges(state, ai_team) * W_SIPHON;
    score += conduit_link(state, ai_team);
    score += shrine(state, ai_team);
    score += ability_status(state, ai_team);
    score += territory_and_mobility(state, ai_team);
    score += positional_value(state, ai_team);
    score += board_hazards(state, ai_team, opponent);
    score
}

fn leader_safety(state: &GameState, leader: &Piece, opponent: Team) -> f64 {
    let mut score = 0.0;
    let mut immediate_threats = 0usize;

    for enemy in state.pieces.iter().filter(|p| p.team == opponent) {
        let moves = valid_moves(state, enemy.id);
        let power = effective_power(state, enemy, None) as f64;

        if leader.pos.distance(enemy.pos) <= 1 {
            score -= 10_000.0 + power * 100.0;
            immediate_threats += 1;
        } else if moves.iter().any(|m| m.to == leader.pos) {
            score -= 5_000.0 + power * 50.0;
            immediate_threats += 1;
        } else if moves.iter().any(|m| m.to.distance(leader.pos) <= 2) {
            score -= 500.0 + power * 10.0;
        }
    }

    if immediate_threats == 0 {
        score += 1_000.0;
    }
    if immediate_threats > 1 {
        score -= immediate_threats as f64 * 2_000.0;
    }
    score
}

fn piece_safety(state: &GameState, ai_team: Team, opponent: Team) -> f64 {
    let mut score = 0.0;
    for piece in state.pieces.iter().filter(|p| p.team == ai_team) {
        if piece.kind.is_leader() {
            continue;
        }
        let threatened = state
            .pieces
            .iter()
            .filter(|p| p.team == opponent)
            .any(|enemy| valid_moves(state, enemy.id).iter().any(|m| m.to == piece.pos));
        if threatened {
            score -= piece.kind.value() as f64 * 1.5;
        } else {
            score += piece.kind.value() as f64 * 0.1;
        }
    }
    score
}

fn opponent_leader_threat(state: &GameState, opp_leader: &Piece, ai_team: Team) -> f64 {
    let mut score = 0.0;
    for piece in state.pieces.iter().filter(|p| p.team == ai_team) {
        let moves = valid_moves(state, piece.id);
        if moves.iter().any(|m| m.to == opp_leader.pos) {
            score += 20_000.0 + piece.kind.value() as f64 * 5.0;
        } else if moves.iter().any(|m| m.to.distance(opp_leader.pos) <= 1) {
            score += 500.0 + piece.kind.value() as f64;
        }
    }
    score
}

fn net_piece_value(state: &GameState, ai_team: Team) -> f64 {
    let diff: f64 = state
        .pieces
        .iter()
        .map(|p| {
            let value = p.kind.value() as f64;
            if p.team == ai_team {
                value
            } else {
                -value
            }
        })
        .sum();
    diff * 2.0
}

fn net_effective_power(state: &GameState, ai_team: Team) -> f64 {
    let diff: f64 = state
        .pieces
        .iter()
        .map(|p| {
            let power = effective_power(state, p, None) as f64;
            if p.team == ai_team {
                power
            } else {
                -power
            }
        })
        .sum();
    diff * 150.0
}

fn siphon_charges(state: &GameState, ai_team: Team) -> f64 {
    state
        .pieces
        .iter()
        .map(|p| {
            let charges = p.charges as f64 * 250.0;
            if p.team == ai_team {
                charges
            } else {
                -charges
            }
        })
        .sum()
}

fn conduit_link(state: &GameState, ai_team: Team) -> f64 {
    if state.conduit_active {
        return if state.conduit_team == Some(ai_team) {
            3_500.0
        } else {
            -3_500.0
        };
    }
    // Potential: each rift already holding one of our pieces.
    let mut rifts = 0;
    for target in [Rift::TopLeft, Rift::BottomRight] {
        if state
            .pieces
            .iter()
            .any(|p| p.team == ai_team && rift_at(p.pos) == Some(target))
        {
            rifts += 1;
        }
    }
    rifts as f64 * 1_000.0
}

fn shrine(state: &GameState, ai_team: Team) -> f64 {
    let mut score = state.shrine_charge as f64 * 300.0;

    if state.shrine_overloaded {
        let mut ai_value = 0.0;
        let mut opp_value = 0.0;
        for piece in &state.pieces {
            let in_blast = SHRINE_AREA
                .iter()
                .any(|&(r, c)| piece.pos.distance(Cell::new(r, c)) <= 1);
            if in_blast {
                if piece.team == ai_team {
                    ai_value += piece.kind.value() as f64;
                } else {
                    opp_value += piece.kind.value() as f64;
                }
            }
        }
        score += ((opp_value - ai_value) * 1.5 + 800.0) / 2.0;
    }

    let mut control = 0i32;
    for &(r, c) in SHRINE_AREA.iter() {
        if let Some(piece) = state.piece_at(Cell::new(r, c)) {
            control += if piece.team == ai_team { 1 } else { -1 };
        }
    }
    score + control as f64 * 200.0
}

fn ability_status(state: &GameState, ai_team: Team) -> f64 {
    let mut score = 0.0;
    for piece in &state.pieces {
        let modifier = piece.kind.value() as f64 / 1_000.0;
        let cooldown = piece.ability.as_ref().map(|a| a.cooldown).unwrap_or(0) as f64;
        let boosted = state.temporary_boosts.iter().any(|b| b.piece == piece.id);
        let hampered = state.debuffs.iter().any(|d| d.piece == piece.id)
            || state.marked_pieces.iter().any(|m| m.piece == piece.id);
        let ready = piece.ability.is_some() && cooldown == 0.0;

        if piece.team == ai_team {
            score -= cooldown * 50.0 * modifier;
            if boosted {
                score += 300.0 * modifier;
            }
            if hampered {
                score -= 400.0 * modifier;
            }
            if ready {
                score += 50.0 * modifier;
            }
        } else {
            score += cooldown * 30.0 * modifier;
            if boosted {
                score -= 300.0 * modifier;
            }
            if hampered {
                score += 400.0 * modifier;
            }
            if ready {
                score -= 50.0 * modifier;
            }
        }
    }
    score
}

fn territory_and_mobility(state: &GameState, ai_team: Team) -> f64 {
    let sign = if ai_team == Team::Snow { 1.0 } else { -1.0 };
    let territory =
        (state.snow_territory.len() as f64 - state.ash_territory.len() as f64) * 50.0 * sign;

    let mut mobility = 0.0;
    for piece in &state.pieces {
        if piece.kind.is_leader() {
            continue;
        }
        let moves = valid_moves(state, piece.id).len() as f64;
        if piece.team == ai_team {
            mobility += moves;
        } else {
            mobility -= moves;
        }
    }
    territory + mobility * 25.0
}

fn positional_value(state: &GameState, ai_team: Team) -> f64 {
    let mut score = 0.0;
    for piece in &state.pieces {
        let modifier = piece.kind.value() as f64 / 500.0;
        let mut bonus = 0.0;

        let on_center = CENTER_SQUARES
            .iter()
            .any(|&(r, c)| piece.pos == Cell::new(r, c));
        if on_center {
            bonus += 150.0;
        } else if CENTER_SQUARES
            .iter()
            .any(|&(r, c)| piece.pos.distance(Cell::new(r, c)) <= 1)
        {
            bonus += 50.0;
        }
        if rift_at(piece.pos).is_some() {
            bonus += 100.0;
        }

        if piece.team == ai_team {
            score += bonus * modifier;
        } else {
            score -= bonus * modifier;
        }

        // Pieces loitering on their own back rows give up tempo.
        let on_back_rank = match piece.team {
            Team::Snow => piece.pos.row >= 8,
            Team::Ash => piece.pos.row <= 1,
        };
        if on_back_rank && !piece.kind.is_leader() {
            if piece.team == ai_team {
                score -= 30.0 * modifier;
            } else {
                score += 30.0 * modifier;
            }
        }
    }
    score
}

fn board_hazards(state: &GameState, ai_team: Team, opponent: Team) -> f64 {
    let mut score = 0.0;
    let ai_leader = state.leader(ai_team).map(|p| p.pos);
    let opp_leader = state.leader(opponent).map(|p| p.pos);

    for wall in &state.glacial_walls {
        if let Some(pos) = opp_leader {
            if wall.cell.distance(pos) <= 2 {
                score += 150.0;
            }
        }
        if let Some(pos) = ai_leader {
            if wall.cell.distance(pos) <= 1 {
                score += 100.0;
            }
        }
    }

    for ground in &state.unstable_grounds {
        let nearby_enemies = state
            .pieces
            .iter()
            .filter(|p| p.team == opponent && ground.cell.distance(p.pos) <= 1)
            .count();
        score += nearby_enemies as f64 * 75.0;
        if in_shrine(ground.cell) {
            score += 100.0;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_piece;
    use crate::types::{PieceId, PieceKind};

    fn spawn(state: &mut GameState, kind: PieceKind, pos: Cell) -> PieceId {
        let id = state.alloc_id();
        state.pieces.push(build_piece(id, kind, pos));
        state.reindex();
        id
    }

    #[test]
    fn missing_leader_is_terminal() {
        let mut state = GameState::empty(17);
        spawn(&mut state, PieceKind::FrostLord, Cell::new(9, 0));
        assert_eq!(evaluate(&state, Team::Snow), WIN_SCORE);
        assert_eq!(evaluate(&state, Team::Ash), -WIN_SCORE);
    }

    #[test]
    fn fresh_game_is_roughly_balanced() {
        let state = GameState::new(17);
        let snow = evaluate(&state, Team::Snow);
        let ash = evaluate(&state, Team::Ash);
        // Mirrored material; any asymmetry comes from minor positional
        // texture, far from a terminal score.
        assert!(snow.abs() < 50_000.0, "snow eval {snow}");
        assert!(ash.abs() < 50_000.0, "ash eval {ash}");
    }

    #[test]
    fn material_advantage_shows_up() {
        let mut state = GameState::empty(17);
        spawn(&mut state, PieceKind::FrostLord, Cell::new(9, 0));
        spawn(&mut state, PieceKind::AshTyrant, Cell::new(0, 9));
        spawn(&mut state, PieceKind::Yeti, Cell::new(5, 0));

        let snow = evaluate(&state, Team::Snow);
        let ash = evaluate(&state, Team::Ash);
        assert!(snow > ash);
    }

    #[test]
    fn active_conduit_is_worth_a_lot() {
        let mut state = GameState::empty(17);
        spawn(&mut state, PieceKind::FrostLord, Cell::new(9, 0));
        spawn(&mut state, PieceKind::AshTyrant, Cell::new(0, 9));
        let without = evaluate(&state, Team::Snow);
        state.conduit_active = true;
        state.conduit_team = Some(Team::Snow);
        let with = evaluate(&state, Team::Snow);
        assert!(with > without + 3_000.0);
        assert!(evaluate(&state, Team::Ash) < -1_000.0);
    }
}
