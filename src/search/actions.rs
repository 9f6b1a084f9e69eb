//! Action enumeration and heuristic ordering
//!
//! Enumerates every legal action for a side against the same primitives the
//! rules use, then sorts best-first with a cheap heuristic so alpha-beta
//! prunes early. Glacial Wall intents carry both wall cells so the search
//! and the interactive flow funnel into the same placement primitive.

use crate::catalog::ability_spec;
use crate::constants::{COLS, ROWS, SHRINE_CENTER, SIPHON_MAX_CHARGES, WHITEOUT_RADIUS};
use crate::rules::abilities::target_valid;
use crate::rules::moves::valid_moves;
use crate::rules::zones::{in_shrine, rift_at};
use crate::types::{
    AbilityKey, AbilityKind, Action, ActionKind, ActorRef, Cell, GameState, Piece, Team,
};

/// Every legal action for `team` in this position, unordered.
pub fn enumerate_actions(state: &GameState, team: Team) -> Vec<Action> {
    let mut actions = Vec::new();

    for piece in state.pieces.iter().filter(|p| p.team == team) {
        if piece.dazed || piece.stuck > 0 {
            continue;
        }
        let actor = ActorRef {
            pos: piece.pos,
            kind: piece.kind,
        };

        for mv in valid_moves(state, piece.id) {
            actions.push(Action {
                actor,
                kind: ActionKind::Move {
                    to: mv.to,
                    highway: mv.highway,
                },
            });
        }

        match piece.ability.as_ref().map(|a| &a.kind) {
            Some(AbilityKind::Siphon { unleash }) => {
                if piece.charges < SIPHON_MAX_CHARGES
                    && (rift_at(piece.pos).is_some() || in_shrine(piece.pos))
                {
                    actions.push(Action {
                        actor,
                        kind: ActionKind::Siphon,
                    });
                }
                for (i, &key) in unleash.iter().enumerate() {
                    if piece.charges as usize >= i + 1 {
                        push_ability_actions(state, piece, key, &mut actions);
                    }
                }
            }
            Some(AbilityKind::Keyed(key)) => {
                if piece.ability.as_ref().map(|a| a.cooldown).unwrap_or(0) == 0 {
                    push_ability_actions(state, piece, *key, &mut actions);
                }
            }
            None => {}
        }

        if piece.can_rift_pulse {
            actions.push(Action {
                actor,
                kind: ActionKind::RiftPulse,
            });
        }
    }

    actions
}

fn push_ability_actions(state: &GameState, piece: &Piece, key: AbilityKey, out: &mut Vec<Action>) {
    let actor = ActorRef {
        pos: piece.pos,
        kind: piece.kind,
    };
    let spec = ability_spec(key);

    if !spec.requires_target {
        out.push(Action {
            actor,
            kind: ActionKind::Ability {
                key,
                target: None,
                second: None,
            },
        });
        return;
    }

    if key == AbilityKey::GlacialWall {
        // Both segments are part of the intent.
        for first in piece.pos.neighbors() {
            if !state.is_open(first) {
                continue;
            }
            for second in first.neighbors() {
                if second != piece.pos && state.is_open(second) {
                    out.push(Action {
                        actor,
                        kind: ActionKind::Ability {
                            key,
                            target: Some(first),
                            second: Some(second),
                        },
                    });
                }
            }
        }
        return;
    }

    for r in 0..ROWS {
        for c in 0..COLS {
            let cell = Cell::new(r, c);
            if piece.pos.distance(cell) > spec.range {
                continue;
            }
            if target_valid(state, piece.id, key, cell) {
                out.push(Action {
                    actor,
                    kind: ActionKind::Ability {
                        key,
                        target: Some(cell),
                        second: None,
                    },
                });
            }
        }
    }
}

/// Cheap action desirability used only for move ordering.
fn heuristic_score(state: &GameState, team: Team, action: &Action) -> f64 {
    let opponent = team.opponent();
    let mut score = 0.0;

    match &action.kind {
        ActionKind::Move { to, .. } => {
            if let Some(defender) = state.piece_at(*to) {
                score += 1_000.0 + defender.kind.value() as f64 * 10.0;
                if action.actor.kind.value() < defender.kind.value() {
                    score -= 50.0;
                }
            }
            let center_dist = (to.row as f64 - SHRINE_CENTER.0 as f64)
                .abs()
                .max((to.col as f64 - SHRINE_CENTER.1 as f64).abs());
            score += (5.0 - center_dist) * 5.0;

            if let Some(leader) = state.leader(opponent) {
                let dist = to.distance(leader.pos);
                if dist <= 3 {
                    score += (4 - dist) as f64 * 20.0;
                }
            }
        }
        ActionKind::Siphon => {
            score += 700.0;
            let threatened = state.pieces.iter().filter(|p| p.team == opponent).any(|p| {
                valid_moves(state, p.id)
                    .iter()
                    .any(|m| m.to == action.actor.pos)
            });
            if !threatened {
                score += 300.0;
            }
        }
        ActionKind::Ability { key, target, .. } => match key {
            AbilityKey::FlashFreeze | AbilityKey::MarkOfCinder | AbilityKey::LavaGlob => {
                if let Some(victim) = target.and_then(|t| state.piece_at(t)) {
                    score += 800.0 + victim.kind.value() as f64 * 2.0;
                    if victim.kind.is_leader() {
                        score += 5_000.0;
                    }
                }
            }
            AbilityKey::StokeTheFlames => {
                if let Some(friendly) = target.and_then(|t| state.piece_at(t)) {
                    score += 400.0 + friendly.kind.value() as f64;
                }
            }
            AbilityKey::RiftAssault | AbilityKey::GlacialStep => score += 600.0,
            AbilityKey::SummonIceWisp => score += 300.0,
            AbilityKey::UnstableGround | AbilityKey::GlacialWall => score += 450.0,
            AbilityKey::Whiteout | AbilityKey::BurningGround => {
                let radius = if *key == AbilityKey::Whiteout {
                    WHITEOUT_RADIUS
                } else {
                    1
                };
                let enemies_hit = state
                    .pieces
                    .iter()
                    .filter(|p| p.team == opponent && action.actor.pos.distance(p.pos) <= radius)
                    .count();
                score += 500.0 + enemies_hit as f64 * 300.0;
            }
            AbilityKey::ChillingAura => score += 350.0,
        },
        ActionKind::RiftPulse => {
            // Scored like the other area effects: worth more the more
            // enemies stand in the blast.
            let enemies_hit = state
                .pieces
                .iter()
                .filter(|p| p.team == opponent && action.actor.pos.distance(p.pos) <= 1)
                .count();
            score += 500.0 + enemies_hit as f64 * 300.0;
        }
    }
    score
}

/// All legal actions for `team`, best-first.
pub fn ordered_actions(state: &GameState, team: Team) -> Vec<Action> {
    let mut actions = enumerate_actions(state, team);
    let mut scored: Vec<(f64, Action)> = actions
        .drain(..)
        .map(|a| (heuristic_score(state, team, &a), a))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, a)| a).collect()
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
    fn fresh_game_has_plenty_of_snow_actions() {
        let state = GameState::new(21);
        let actions = enumerate_actions(&state, Team::Snow);
        assert!(!actions.is_empty());
        // Nothing is on cooldown yet, so the untargeted aura and the wall
        // pairs are in the list alongside plain moves.
        assert!(actions
            .iter()
            .any(|a| matches!(a.kind, ActionKind::Move { .. })));
        assert!(actions.iter().any(|a| matches!(
            a.kind,
            ActionKind::Ability {
                key: AbilityKey::GlacialWall,
                second: Some(_),
                ..
            }
        )));
    }

    #[test]
    fn dazed_pieces_contribute_nothing() {
        let mut state = GameState::empty(21);
        let id = spawn(&mut state, PieceKind::Yeti, Cell::new(4, 4));
        assert!(!enumerate_actions(&state, Team::Snow).is_empty());
        state.piece_mut(id).unwrap().dazed = true;
        assert!(enumerate_actions(&state, Team::Snow).is_empty());
    }

    #[test]
    fn unleashes_unlock_with_charges() {
        let mut state = GameState::empty(21);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 5));
        spawn(&mut state, PieceKind::HellHound, Cell::new(5, 7));

        let has_key = |state: &GameState, key: AbilityKey| {
            enumerate_actions(state, Team::Snow)
                .iter()
                .any(|a| matches!(a.kind, ActionKind::Ability { key: k, .. } if k == key))
        };
        assert!(!has_key(&state, AbilityKey::FlashFreeze));

        state.piece_mut(chanter).unwrap().charges = 1;
        assert!(has_key(&state, AbilityKey::FlashFreeze));
        assert!(!has_key(&state, AbilityKey::Whiteout));

        state.piece_mut(chanter).unwrap().charges = 3;
        assert!(has_key(&state, AbilityKey::Whiteout));
    }

    #[test]
    fn warded_targets_are_not_enumerated() {
        let mut state = GameState::empty(21);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 5));
        state.piece_mut(chanter).unwrap().charges = 1;
        let hound = spawn(&mut state, PieceKind::HellHound, Cell::new(5, 7));
        state.piece_mut(hound).unwrap().has_ward = true;

        let freezes: Vec<_> = enumerate_actions(&state, Team::Snow)
            .into_iter()
            .filter(|a| {
                matches!(
                    a.kind,
                    ActionKind::Ability {
                        key: AbilityKey::FlashFreeze,
                        ..
                    }
                )
            })
            .collect();
        assert!(freezes.is_empty());
    }

    #[test]
    fn captures_order_ahead_of_quiet_moves() {
        let mut state = GameState::empty(21);
        spawn(&mut state, PieceKind::Yeti, Cell::new(4, 4));
        spawn(&mut state, PieceKind::BlazeRunner, Cell::new(4, 5));

        let ordered = ordered_actions(&state, Team::Snow);
        match ordered.first().map(|a| a.kind) {
            Some(ActionKind::Move { to, .. }) => assert_eq!(to, Cell::new(4, 5)),
            other => panic!("expected a capture first, got {other:?}"),
        }
    }

    #[test]
    fn siphon_enumerated_only_on_energy_cells() {
        let mut state = GameState::empty(21);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 0));
        assert!(!enumerate_actions(&state, Team::Snow)
            .iter()
            .any(|a| matches!(a.kind, ActionKind::Siphon)));

        state.piece_mut(chanter).unwrap().pos = Cell::new(1, 1);
        state.reindex();
        assert!(enumerate_actions(&state, Team::Snow)
            .iter()
            .any(|a| matches!(a.kind, ActionKind::Siphon)));
    }
}
