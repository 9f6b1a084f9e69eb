//! Search Integration Tests
//!
//! End-to-end checks of the AI:
//! - Legality of chosen actions
//! - Tactical awareness at shallow depth
//! - The search service thread
//! - Replaying the chosen action into a live session

use std::time::Duration;

use frostfall_engine::catalog::build_piece;
use frostfall_engine::search::ordered_actions;
use frostfall_engine::types::{ActionKind, PieceKind};
use frostfall_engine::{
    Cell, GameSession, GameState, PieceId, SearchConfig, SearchService, Team,
};

fn blank(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.pieces.clear();
    state.snow_territory.clear();
    state.ash_territory.clear();
    state.territory_capture_turn.clear();
    state.message_log.clear();
    state.reindex();
    state
}

fn spawn(state: &mut GameState, kind: PieceKind, pos: Cell) -> PieceId {
    let id = state.alloc_id();
    state.pieces.push(build_piece(id, kind, pos));
    state.reindex();
    id
}

fn quick_config() -> SearchConfig {
    SearchConfig {
        budget: Duration::from_millis(400),
        max_depth: 2,
    }
}

// ============================================================================
// Legality Tests
// ============================================================================

#[test]
fn test_opening_choice_is_legal() {
    let state = GameState::new(11);
    let outcome = frostfall_engine::search::choose_action(&state, &quick_config()).unwrap();
    let legal = ordered_actions(&state, Team::Snow);
    assert!(
        legal.contains(&outcome.action),
        "the chosen action must come from the legal set"
    );
    assert!(outcome.depth >= 1, "the quick budget completes depth 1");
}

#[test]
fn test_same_seed_same_choice() {
    let config = SearchConfig {
        budget: Duration::from_secs(5),
        max_depth: 2,
    };
    let a = frostfall_engine::search::choose_action(&GameState::new(11), &config).unwrap();
    let b = frostfall_engine::search::choose_action(&GameState::new(11), &config).unwrap();
    assert_eq!(a.action, b.action, "the search is deterministic per state");
}

// ============================================================================
// Tactics Tests
// ============================================================================

#[test]
fn test_takes_the_exposed_leader() {
    let mut state = blank(12);
    spawn(&mut state, PieceKind::AshTyrant, Cell::new(0, 9));
    let hound = spawn(&mut state, PieceKind::HellHound, Cell::new(5, 5));
    let lord = spawn(&mut state, PieceKind::FrostLord, Cell::new(5, 6));
    state.piece_mut(lord).unwrap().power = 1;
    state.current_turn = Team::Ash;

    let outcome = frostfall_engine::search::choose_action(&state, &quick_config()).unwrap();
    assert_eq!(outcome.action.actor.pos, state.piece(hound).unwrap().pos);
    match outcome.action.kind {
        ActionKind::Move { to, .. } => {
            assert_eq!(to, Cell::new(5, 6), "the winning capture is forced")
        }
        other => panic!("expected the leader capture, got {other:?}"),
    }
}

#[test]
fn test_avoids_the_losing_capture() {
    // The only capture on offer loses the power contest and so is not even
    // enumerated; the AI must find something else.
    let mut state = blank(12);
    spawn(&mut state, PieceKind::AshTyrant, Cell::new(0, 9));
    spawn(&mut state, PieceKind::BlazeRunner, Cell::new(5, 5));
    spawn(&mut state, PieceKind::Yeti, Cell::new(5, 6));
    state.current_turn = Team::Ash;

    let outcome = frostfall_engine::search::choose_action(&state, &quick_config()).unwrap();
    if let ActionKind::Move { to, .. } = outcome.action.kind {
        assert_ne!(to, Cell::new(5, 6), "the losing capture is not playable");
    }
}

// ============================================================================
// Service Tests
// ============================================================================

#[test]
fn test_service_answers_over_the_channel() {
    let service = SearchService::spawn();
    let state = GameState::new(13);

    let outcome = service.choose(state.clone(), quick_config()).unwrap();
    let legal = ordered_actions(&state, Team::Snow);
    assert!(legal.contains(&outcome.action));
}

#[test]
fn test_service_survives_many_requests() {
    let service = SearchService::spawn();
    let state = GameState::new(13);
    let config = SearchConfig {
        budget: Duration::from_millis(100),
        max_depth: 1,
    };

    for _ in 0..3 {
        let outcome = service.choose(state.clone(), config).unwrap();
        let legal = ordered_actions(&state, Team::Snow);
        assert!(legal.contains(&outcome.action));
    }
}

// ============================================================================
// Session Replay Tests
// ============================================================================

#[test]
fn test_search_action_replays_into_the_session() {
    let mut session = GameSession::new(14);

    // Snow plays by hand; the search answers for Ash.
    session.select(Cell::new(6, 0)).unwrap();
    session.move_to(Cell::new(5, 0), false).unwrap();
    assert_eq!(session.state().current_turn, Team::Ash);

    let outcome =
        frostfall_engine::search::choose_action(session.state(), &quick_config()).unwrap();
    session.apply_search_action(&outcome.action).unwrap();
    assert_eq!(
        session.state().current_turn,
        Team::Snow,
        "the AI's action hands the turn back"
    );
    assert!(!session.state().game_over);
}

#[test]
fn test_search_wins_the_won_position_through_the_session() {
    let mut state = blank(14);
    spawn(&mut state, PieceKind::AshTyrant, Cell::new(0, 9));
    spawn(&mut state, PieceKind::HellHound, Cell::new(5, 5));
    let lord = spawn(&mut state, PieceKind::FrostLord, Cell::new(5, 6));
    state.piece_mut(lord).unwrap().power = 1;
    state.current_turn = Team::Ash;

    let outcome = frostfall_engine::search::choose_action(&state, &quick_config()).unwrap();
    let mut session = GameSession::from_state(state);
    session.apply_search_action(&outcome.action).unwrap();
    assert!(session.state().game_over);
    assert_eq!(session.state().winner, Some(Team::Ash));
}
