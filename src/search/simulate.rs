//! Applying actions to snapshots
//!
//! The search mutates cloned states through the same rules primitives the
//! live game uses, so captures, shrine charges, surges, and ward blocking
//! behave identically in simulation. Two deliberate differences: in-flight
//! projectiles resolve synchronously, and plies alternate by retargeting
//! `current_turn` without running turn-switch upkeep.

use crate::error::{EngineError, EngineResult};
use crate::rules::abilities::{
    execute_ability, execute_rift_pulse, handle_siphon, resolve_projectiles,
};
use crate::rules::moves::move_piece;
use crate::types::{Action, ActionKind, GameState, PieceId};

/// Find the live piece an action's structural actor reference describes.
pub fn resolve_actor(state: &GameState, action: &Action) -> EngineResult<PieceId> {
    state
        .piece_at(action.actor.pos)
        .filter(|p| p.kind == action.actor.kind)
        .map(|p| p.id)
        .ok_or(EngineError::StaleActor(
            action.actor.kind.display_name(),
            action.actor.pos,
        ))
}

/// Apply one action to `state` as the acting side, without handing the turn
/// over.
pub fn apply_action(state: &mut GameState, action: &Action) -> EngineResult<()> {
    let id = resolve_actor(state, action)?;
    if let Some(team) = state.piece(id).map(|p| p.team) {
        state.current_turn = team;
    }

    match action.kind {
        ActionKind::Move { to, highway } => {
            move_piece(state, id, to, highway)?;
        }
        ActionKind::Ability {
            key,
            target,
            second,
        } => {
            execute_ability(state, id, key, target, second)?;
            resolve_projectiles(state);
        }
        ActionKind::Siphon => {
            handle_siphon(state, id)?;
        }
        ActionKind::RiftPulse => {
            execute_rift_pulse(state, id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_piece;
    use crate::types::{ActorRef, Cell, PieceKind, Team};

    fn spawn(state: &mut GameState, kind: PieceKind, pos: Cell) -> PieceId {
        let id = state.alloc_id();
        state.pieces.push(build_piece(id, kind, pos));
        state.reindex();
        id
    }

    #[test]
    fn stale_actor_is_detected() {
        let mut state = GameState::empty(31);
        spawn(&mut state, PieceKind::Yeti, Cell::new(4, 4));
        let action = Action {
            actor: ActorRef {
                pos: Cell::new(4, 4),
                kind: PieceKind::HellHound,
            },
            kind: ActionKind::Siphon,
        };
        let err = apply_action(&mut state, &action).unwrap_err();
        assert!(matches!(err, EngineError::StaleActor(_, _)));
    }

    #[test]
    fn simulation_does_not_hand_over_the_turn() {
        let mut state = GameState::empty(31);
        spawn(&mut state, PieceKind::HellHound, Cell::new(4, 4));
        state.current_turn = Team::Snow;

        let action = Action {
            actor: ActorRef {
                pos: Cell::new(4, 4),
                kind: PieceKind::HellHound,
            },
            kind: ActionKind::Move {
                to: Cell::new(5, 4),
                highway: false,
            },
        };
        apply_action(&mut state, &action).unwrap();
        // The acting side simply becomes the side to move; no upkeep ran.
        assert_eq!(state.current_turn, Team::Ash);
        assert_eq!(state.piece_at(Cell::new(5, 4)).map(|p| p.kind), Some(PieceKind::HellHound));
    }

    #[test]
    fn projectiles_land_synchronously() {
        let mut state = GameState::empty(31);
        spawn(&mut state, PieceKind::MagmaSpitter, Cell::new(5, 5));
        let wolf = spawn(&mut state, PieceKind::SnowWolf, Cell::new(5, 7));
        state.current_turn = Team::Ash;

        let action = Action {
            actor: ActorRef {
                pos: Cell::new(5, 5),
                kind: PieceKind::MagmaSpitter,
            },
            kind: ActionKind::Ability {
                key: crate::types::AbilityKey::LavaGlob,
                target: Some(Cell::new(5, 7)),
                second: None,
            },
        };
        apply_action(&mut state, &action).unwrap();
        assert!(state.projectiles.is_empty());
        assert_eq!(state.piece(wolf).unwrap().power, 0);
    }
}
