//! Interactive session layer
//!
//! `GameSession` wraps a `GameState` behind a small input state machine so a
//! front end only ever feeds it cell clicks and intent buttons. Multi-step
//! inputs (ability targeting, the two Glacial Wall segments) park in an
//! explicit phase between clicks; every turn-consuming success hands the
//! turn over before returning.

use tracing::warn;

use crate::catalog::ability_spec;
use crate::error::{EngineError, EngineResult};
use crate::rules::abilities::{
    ability_ready, despawn_wisp, execute_ability, execute_rift_pulse, handle_siphon,
    resolve_projectiles,
};
use crate::rules::moves::{move_piece, valid_moves, ValidMove};
use crate::rules::turn::{end_game, switch_turn};
use crate::search::resolve_actor;
use crate::types::{AbilityKey, Action, ActionKind, Cell, GameState, PieceId, Team};

/// What input the session is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the side to move to pick one of its pieces.
    AwaitingSelection,
    /// A piece is selected; a destination, ability, or intent may follow.
    PieceSelected { piece: PieceId },
    /// An ability is armed and waiting for its target cell.
    AbilityTargeting { piece: PieceId, key: AbilityKey },
    /// Glacial Wall placement; `first` is set once the first segment lands.
    WallPlacement { piece: PieceId, first: Option<Cell> },
    /// No further input is accepted.
    GameOver,
}

/// One playable game.
pub struct GameSession {
    state: GameState,
    phase: SessionPhase,
}

impl GameSession {
    /// Start a fresh game.
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            phase: SessionPhase::AwaitingSelection,
        }
    }

    /// Resume from a saved state (e.g. a deserialized snapshot).
    pub fn from_state(mut state: GameState) -> Self {
        state.reindex();
        let phase = if state.game_over {
            SessionPhase::GameOver
        } else {
            SessionPhase::AwaitingSelection
        };
        Self { state, phase }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The currently selected piece, in any phase that has one.
    pub fn selected(&self) -> Option<PieceId> {
        match self.phase {
            SessionPhase::PieceSelected { piece }
            | SessionPhase::AbilityTargeting { piece, .. }
            | SessionPhase::WallPlacement { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// Destinations for the selected piece, for highlighting.
    pub fn selected_moves(&self) -> Vec<ValidMove> {
        match self.selected() {
            Some(piece) => valid_moves(&self.state, piece),
            None => Vec::new(),
        }
    }

    /// Select (or reselect) one of the side to move's pieces.
    pub fn select(&mut self, cell: Cell) -> EngineResult<()> {
        match self.phase {
            SessionPhase::AwaitingSelection | SessionPhase::PieceSelected { .. } => {}
            SessionPhase::GameOver => return Err(EngineError::GameOver),
            _ => return Err(EngineError::UnexpectedInput("an ability is awaiting a target")),
        }
        let piece = self
            .state
            .piece_at(cell)
            .ok_or(EngineError::EmptyCell(cell))?;
        if piece.team != self.state.current_turn {
            return Err(EngineError::NotYourTurn(piece.team));
        }
        self.phase = SessionPhase::PieceSelected { piece: piece.id };
        Ok(())
    }

    /// Drop the selection and any armed ability.
    pub fn deselect(&mut self) {
        if self.phase != SessionPhase::GameOver {
            self.phase = SessionPhase::AwaitingSelection;
        }
    }

    /// Step back from a targeting phase to the plain selection.
    pub fn cancel_targeting(&mut self) {
        if let Some(piece) = self.selected() {
            self.phase = SessionPhase::PieceSelected { piece };
        }
    }

    /// Move the selected piece. A capture attempt that loses the power
    /// contest leaves the selection in place and does not consume the turn.
    pub fn move_to(&mut self, to: Cell, highway: bool) -> EngineResult<()> {
        let piece = self.require_selected()?;
        if move_piece(&mut self.state, piece, to, highway)? {
            self.finish_turn();
        }
        Ok(())
    }

    /// Arm an ability on the selected piece. Untargeted abilities cast at
    /// once; targeted ones wait for `target`, Glacial Wall for two.
    pub fn activate(&mut self, key: AbilityKey) -> EngineResult<()> {
        let piece = self.require_selected()?;
        let held = self
            .state
            .piece(piece)
            .ok_or(EngineError::AbilityUnavailable(key.name()))?;
        if held.dazed || held.stuck > 0 {
            return Err(EngineError::Immobilized(held.pos));
        }
        if !ability_ready(&self.state, piece, key) {
            return Err(EngineError::AbilityUnavailable(key.name()));
        }

        if key == AbilityKey::GlacialWall {
            self.phase = SessionPhase::WallPlacement { piece, first: None };
            return Ok(());
        }
        if ability_spec(key).requires_target {
            self.phase = SessionPhase::AbilityTargeting { piece, key };
            return Ok(());
        }
        execute_ability(&mut self.state, piece, key, None, None)?;
        self.finish_turn();
        Ok(())
    }

    /// Feed a target cell to the armed ability.
    pub fn target(&mut self, cell: Cell) -> EngineResult<()> {
        match self.phase {
            SessionPhase::AbilityTargeting { piece, key } => {
                execute_ability(&mut self.state, piece, key, Some(cell), None)?;
                self.finish_turn();
                Ok(())
            }
            SessionPhase::WallPlacement { piece, first: None } => {
                let pos = self
                    .state
                    .piece(piece)
                    .map(|p| p.pos)
                    .ok_or(EngineError::EmptyCell(cell))?;
                if pos.distance(cell) != 1 || !self.state.is_open(cell) {
                    return Err(EngineError::InvalidTarget {
                        ability: AbilityKey::GlacialWall.name(),
                        target: Some(cell),
                    });
                }
                self.phase = SessionPhase::WallPlacement {
                    piece,
                    first: Some(cell),
                };
                Ok(())
            }
            SessionPhase::WallPlacement {
                piece,
                first: Some(first),
            } => {
                execute_ability(
                    &mut self.state,
                    piece,
                    AbilityKey::GlacialWall,
                    Some(first),
                    Some(cell),
                )?;
                self.finish_turn();
                Ok(())
            }
            SessionPhase::GameOver => Err(EngineError::GameOver),
            _ => Err(EngineError::UnexpectedInput("no ability is awaiting a target")),
        }
    }

    /// Siphon with the selected piece. Attempting it off an energy source
    /// logs the refusal and keeps the turn.
    pub fn siphon(&mut self) -> EngineResult<()> {
        let piece = self.require_selected()?;
        if handle_siphon(&mut self.state, piece)? {
            self.finish_turn();
        }
        Ok(())
    }

    /// Fire the selected anchor's Rift Pulse.
    pub fn rift_pulse(&mut self) -> EngineResult<()> {
        let piece = self.require_selected()?;
        execute_rift_pulse(&mut self.state, piece)?;
        self.finish_turn();
        Ok(())
    }

    /// Dissipate the selected Ice Wisp. Does not consume the turn.
    pub fn dissipate(&mut self) -> EngineResult<()> {
        let piece = self.require_selected()?;
        despawn_wisp(&mut self.state, piece)?;
        self.phase = SessionPhase::AwaitingSelection;
        Ok(())
    }

    /// Replay an AI-chosen action against the live state. The action names
    /// its actor structurally; if the live board no longer matches the
    /// snapshot the search saw, the turn is forfeited rather than played
    /// wrong.
    pub fn apply_search_action(&mut self, action: &Action) -> EngineResult<()> {
        if self.phase == SessionPhase::GameOver {
            return Err(EngineError::GameOver);
        }
        let id = match resolve_actor(&self.state, action) {
            Ok(id) => id,
            Err(EngineError::StaleActor(kind, pos)) => {
                warn!(kind, %pos, "search actor is stale, passing the turn");
                self.finish_turn();
                return Ok(());
            }
            Err(other) => return Err(other),
        };

        match action.kind {
            ActionKind::Move { to, highway } => {
                move_piece(&mut self.state, id, to, highway)?;
            }
            ActionKind::Ability {
                key,
                target,
                second,
            } => {
                execute_ability(&mut self.state, id, key, target, second)?;
                resolve_projectiles(&mut self.state);
            }
            ActionKind::Siphon => {
                handle_siphon(&mut self.state, id)?;
            }
            ActionKind::RiftPulse => {
                execute_rift_pulse(&mut self.state, id)?;
            }
        }
        // The AI's turn ends whatever the action accomplished.
        self.finish_turn();
        Ok(())
    }

    /// End the game for the side whose clock ran out.
    pub fn timeout_loss(&mut self, loser: Team) {
        if !self.state.game_over {
            self.state
                .push_log(Some(loser), format!("{} ran out of time.", loser.name()));
            end_game(&mut self.state, loser.opponent());
        }
        self.phase = SessionPhase::GameOver;
    }

    fn require_selected(&self) -> EngineResult<PieceId> {
        if self.phase == SessionPhase::GameOver {
            return Err(EngineError::GameOver);
        }
        self.selected()
            .ok_or(EngineError::UnexpectedInput("no piece is selected"))
    }

    fn finish_turn(&mut self) {
        if self.state.game_over {
            self.phase = SessionPhase::GameOver;
        } else {
            switch_turn(&mut self.state);
            self.phase = SessionPhase::AwaitingSelection;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActorRef;

    #[test]
    fn selection_rejects_the_idle_side() {
        let mut session = GameSession::new(7);
        // Ash's corner piece while Snow is to move.
        let err = session.select(Cell::new(0, 9)).unwrap_err();
        assert!(matches!(err, EngineError::NotYourTurn(Team::Ash)));
        session.select(Cell::new(9, 1)).unwrap();
        assert!(session.selected().is_some());
    }

    #[test]
    fn moving_hands_the_turn_over() {
        let mut session = GameSession::new(7);
        session.select(Cell::new(6, 0)).unwrap();
        session.move_to(Cell::new(5, 0), false).unwrap();
        assert_eq!(session.state().current_turn, Team::Ash);
        assert_eq!(session.phase(), SessionPhase::AwaitingSelection);
    }

    #[test]
    fn wall_placement_takes_two_clicks() {
        let mut session = GameSession::new(7);
        // The Ice Weaver at (6, 0) owns Glacial Wall.
        session.select(Cell::new(6, 0)).unwrap();
        session.activate(AbilityKey::GlacialWall).unwrap();
        assert!(matches!(
            session.phase(),
            SessionPhase::WallPlacement { first: None, .. }
        ));

        session.target(Cell::new(5, 0)).unwrap();
        assert!(matches!(
            session.phase(),
            SessionPhase::WallPlacement { first: Some(_), .. }
        ));

        session.target(Cell::new(4, 0)).unwrap();
        assert_eq!(session.state().glacial_walls.len(), 2);
        assert_eq!(session.state().current_turn, Team::Ash);
    }

    #[test]
    fn second_wall_must_chain_from_the_first() {
        let mut session = GameSession::new(7);
        session.select(Cell::new(6, 0)).unwrap();
        session.activate(AbilityKey::GlacialWall).unwrap();
        session.target(Cell::new(5, 0)).unwrap();
        let err = session.target(Cell::new(3, 3)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
        // Still waiting on a valid second segment.
        assert!(matches!(
            session.phase(),
            SessionPhase::WallPlacement { first: Some(_), .. }
        ));
    }

    #[test]
    fn stale_search_action_passes_the_turn() {
        let mut session = GameSession::new(7);
        session.select(Cell::new(6, 0)).unwrap();
        session.move_to(Cell::new(5, 0), false).unwrap();

        // An actor reference that matches nothing on the live board.
        let action = Action {
            actor: ActorRef {
                pos: Cell::new(5, 5),
                kind: crate::types::PieceKind::HellHound,
            },
            kind: ActionKind::Siphon,
        };
        session.apply_search_action(&action).unwrap();
        assert_eq!(session.state().current_turn, Team::Snow);
        assert!(!session.state().game_over);
    }

    #[test]
    fn timeout_ends_the_game_for_the_slow_side() {
        let mut session = GameSession::new(7);
        session.timeout_loss(Team::Snow);
        assert!(session.state().game_over);
        assert_eq!(session.state().winner, Some(Team::Ash));
        assert!(matches!(
            session.select(Cell::new(9, 0)).unwrap_err(),
            EngineError::GameOver
        ));
    }
}
