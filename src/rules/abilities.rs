//! Ability targeting, execution, and deferred projectiles
//!
//! One declarative catalog drives legality, one `match` applies every
//! effect. Travel-delayed abilities queue a projectile at cast time and
//! apply their effect on impact against whatever occupies the target cell
//! then.

use tracing::debug;

use crate::catalog::{ability_spec, build_piece, AbilitySpec, TargetRule};
use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::rules::moves::update_position;
use crate::rules::zones::{in_shrine, rift_at, update_conduit_link};
use crate::types::{
    AbilityKey, AbilityKind, BoostRecord, Cell, DebuffRecord, GameState, GroundRecord, MarkRecord,
    PieceId, PieceKind, Projectile, WallRecord,
};

/// Whether `target` satisfies the ability's targeting rule for this caster.
pub fn target_valid(state: &GameState, caster: PieceId, key: AbilityKey, target: Cell) -> bool {
    let Some(caster) = state.piece(caster) else {
        return false;
    };
    let spec = ability_spec(key);
    if !target.in_bounds() {
        return false;
    }
    if spec.range > 0 && caster.pos.distance(target) > spec.range {
        return false;
    }
    let occupant = state.piece_at(target);
    if spec.can_be_blocked && occupant.map(|p| p.has_ward).unwrap_or(false) {
        return false;
    }

    match spec.target {
        TargetRule::Enemy => occupant.map(|p| p.team != caster.team).unwrap_or(false),
        TargetRule::Friendly => occupant.map(|p| p.team == caster.team).unwrap_or(false),
        TargetRule::Empty => occupant.is_none(),
        TargetRule::OwnTerritoryEmpty => {
            occupant.is_none() && state.territory(caster.team).contains(&target)
        }
        TargetRule::EmptyNextToEnemy => {
            occupant.is_none()
                && target
                    .neighbors()
                    .filter_map(|c| state.piece_at(c))
                    .any(|p| p.team != caster.team)
        }
        TargetRule::LowPowerEnemy => occupant
            .map(|p| p.team != caster.team && p.kind.base_power() <= LAVA_GLOB_MAX_TARGET_POWER)
            .unwrap_or(false),
        TargetRule::AdjacentEmpty => caster.pos.distance(target) == 1 && occupant.is_none(),
        TargetRule::None => true,
    }
}

/// Cooldown/charge gate: the caster must own the ability and be able to pay
/// for it right now.
fn check_available(state: &GameState, caster: PieceId, spec: &AbilitySpec) -> EngineResult<()> {
    let piece = state
        .piece(caster)
        .ok_or(EngineError::AbilityUnavailable(spec.key.name()))?;
    let Some(ability) = &piece.ability else {
        return Err(EngineError::AbilityUnavailable(spec.key.name()));
    };
    match &ability.kind {
        AbilityKind::Keyed(key) if *key == spec.key => {
            if ability.cooldown > 0 {
                return Err(EngineError::AbilityUnavailable(spec.key.name()));
            }
            Ok(())
        }
        AbilityKind::Siphon { unleash } if unleash.contains(&spec.key) => {
            let cost = spec.cost.unwrap_or(0);
            if piece.charges < cost {
                return Err(EngineError::AbilityUnavailable(spec.key.name()));
            }
            Ok(())
        }
        _ => Err(EngineError::AbilityUnavailable(spec.key.name())),
    }
}

/// Whether the piece could cast `key` right now, targeting aside.
pub fn ability_ready(state: &GameState, caster: PieceId, key: AbilityKey) -> bool {
    check_available(state, caster, &ability_spec(key)).is_ok()
}

/// Move a piece without claiming territory or triggering ground damage
/// (ability teleports, unlike walked moves, do neither).
fn teleport(state: &mut GameState, id: PieceId, to: Cell) {
    if let Some(piece) = state.piece_mut(id) {
        let from = piece.pos;
        piece.pos = to;
        state.board[from.index()] = None;
        state.board[to.index()] = Some(id);
    }
}

/// The single effect interpreter. Projectile impacts re-enter here.
fn apply_effect(state: &mut GameState, caster: PieceId, key: AbilityKey, target: Option<Cell>) {
    match key {
        AbilityKey::FlashFreeze => {
            if let Some(id) = target.and_then(|t| state.piece_id_at(t)) {
                if let Some(piece) = state.piece_mut(id) {
                    piece.stuck = FLASH_FREEZE_DURATION;
                }
            }
        }
        AbilityKey::GlacialStep => {
            if let Some(to) = target {
                teleport(state, caster, to);
            }
        }
        AbilityKey::Whiteout => {
            let Some(center) = state.piece(caster).map(|p| p.pos) else {
                return;
            };
            let team = state.piece(caster).map(|p| p.team);
            let victims: Vec<PieceId> = state
                .pieces
                .iter()
                .filter(|p| {
                    Some(p.team) != team
                        && !p.has_ward
                        && center.distance(p.pos) <= WHITEOUT_RADIUS
                })
                .map(|p| p.id)
                .collect();
            for id in victims {
                state.debuffs.push(DebuffRecord {
                    piece: id,
                    amount: WHITEOUT_DEBUFF,
                    duration: WHITEOUT_DURATION,
                });
            }
        }
        AbilityKey::StokeTheFlames => {
            if let Some(id) = target.and_then(|t| state.piece_id_at(t)) {
                state.temporary_boosts.push(BoostRecord {
                    piece: id,
                    amount: STOKE_THE_FLAMES_BOOST,
                    duration: STOKE_THE_FLAMES_DURATION,
                });
            }
        }
        AbilityKey::RiftAssault => {
            if let Some(to) = target {
                teleport(state, caster, to);
                if let Some(piece) = state.piece_mut(caster) {
                    // Dazed for the rest of this turn only.
                    piece.dazed = true;
                }
            }
        }
        AbilityKey::BurningGround => {
            let Some(piece) = state.piece(caster) else {
                return;
            };
            let (center, creator_team) = (piece.pos, piece.team);
            for dr in -1i8..=1 {
                for dc in -1i8..=1 {
                    let cell = Cell::new(center.row + dr, center.col + dc);
                    if cell.in_bounds() {
                        state.unstable_grounds.push(GroundRecord {
                            cell,
                            duration: BURNING_GROUND_DURATION,
                            creator: caster,
                            creator_team,
                            burning: true,
                        });
                    }
                }
            }
        }
        AbilityKey::ChillingAura => {
            if let Some(ability) = state.piece_mut(caster).and_then(|p| p.ability.as_mut()) {
                ability.aura_active = true;
                ability.aura_rounds = CHILLING_AURA_DURATION;
            }
        }
        AbilityKey::MarkOfCinder => {
            if let Some(id) = target.and_then(|t| state.piece_id_at(t)) {
                state.marked_pieces.push(MarkRecord {
                    piece: id,
                    duration: MARK_OF_CINDER_DURATION,
                });
            }
        }
        AbilityKey::GlacialWall => {
            // Walls go through `place_walls`; there is no single-target
            // effect.
        }
        AbilityKey::UnstableGround => {
            if let Some(cell) = target {
                let creator_team = state.piece(caster).map(|p| p.team);
                state.unstable_grounds.push(GroundRecord {
                    cell,
                    duration: UNSTABLE_GROUND_DURATION,
                    creator: caster,
                    creator_team: creator_team.unwrap_or(crate::types::Team::Snow),
                    burning: false,
                });
            }
        }
        AbilityKey::SummonIceWisp => {
            if let Some(cell) = target {
                let Some(team) = state.piece(caster).map(|p| p.team) else {
                    return;
                };
                let id = state.alloc_id();
                let wisp = build_piece(id, PieceKind::IceWisp, cell);
                state.pieces.push(wisp);
                state.board[cell.index()] = Some(id);
                state.claim_territory(cell, team);
            }
        }
        AbilityKey::LavaGlob => {
            if let Some(id) = target.and_then(|t| state.piece_id_at(t)) {
                if let Some(piece) = state.piece_mut(id) {
                    piece.power = (piece.power - LAVA_GLOB_DAMAGE).max(0);
                }
            }
        }
    }
}

/// Cast an ability for the side to play. Glacial Wall intents must carry
/// both wall cells.
pub fn execute_ability(
    state: &mut GameState,
    caster: PieceId,
    key: AbilityKey,
    target: Option<Cell>,
    second: Option<Cell>,
) -> EngineResult<()> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    let piece = state
        .piece(caster)
        .ok_or(EngineError::AbilityUnavailable(key.name()))?;
    let (pos, team, kind) = (piece.pos, piece.team, piece.kind);
    if team != state.current_turn {
        return Err(EngineError::NotYourTurn(team));
    }
    if piece.dazed || piece.stuck > 0 {
        return Err(EngineError::Immobilized(pos));
    }

    let spec = ability_spec(key);
    check_available(state, caster, &spec)?;

    if key == AbilityKey::GlacialWall {
        let (first, second) = match (target, second) {
            (Some(f), Some(s)) => (f, s),
            _ => {
                return Err(EngineError::InvalidTarget {
                    ability: key.name(),
                    target,
                })
            }
        };
        place_walls(state, caster, first, second)?;
        pay(state, caster, &spec);
        return Ok(());
    }

    if spec.requires_target {
        let Some(cell) = target else {
            return Err(EngineError::InvalidTarget {
                ability: key.name(),
                target,
            });
        };
        if !target_valid(state, caster, key, cell) {
            return Err(EngineError::InvalidTarget {
                ability: key.name(),
                target,
            });
        }
    }

    if spec.projectile {
        // Effect lands on impact; the cost and the announcement do not wait.
        if let Some(cell) = target {
            state.projectiles.push(Projectile {
                key,
                caster,
                target: cell,
                remaining: 1,
            });
        }
    } else {
        apply_effect(state, caster, key, target);
    }

    pay(state, caster, &spec);
    debug!(caster = ?kind, ability = key.name(), "ability cast");
    state.push_log(
        Some(team),
        format!("{} uses {}!", kind.display_name(), key.name()),
    );
    state.reindex();
    update_conduit_link(state);
    Ok(())
}

/// Pay the ability's price: innate casts start their cooldown, unleashes
/// spend Siphon charges.
fn pay(state: &mut GameState, caster: PieceId, spec: &AbilitySpec) {
    if let Some(piece) = state.piece_mut(caster) {
        if let Some(ability) = piece.ability.as_mut() {
            match &ability.kind {
                AbilityKind::Keyed(key) if *key == spec.key => {
                    ability.cooldown = spec.cooldown.unwrap_or(0);
                }
                _ => {
                    piece.charges = piece.charges.saturating_sub(spec.cost.unwrap_or(0));
                }
            }
        }
    }
}

/// Place the Glacial Wall pair: the first segment adjacent to the caster,
/// the second adjacent to the first, both on open cells.
pub fn place_walls(
    state: &mut GameState,
    caster: PieceId,
    first: Cell,
    second: Cell,
) -> EngineResult<()> {
    let piece = state.piece(caster).ok_or(EngineError::InvalidTarget {
        ability: AbilityKey::GlacialWall.name(),
        target: Some(first),
    })?;
    let (pos, team, kind) = (piece.pos, piece.team, piece.kind);

    if pos.distance(first) != 1 || !state.is_open(first) {
        return Err(EngineError::InvalidTarget {
            ability: AbilityKey::GlacialWall.name(),
            target: Some(first),
        });
    }
    if second == first || first.distance(second) != 1 || !state.is_open(second) {
        return Err(EngineError::InvalidTarget {
            ability: AbilityKey::GlacialWall.name(),
            target: Some(second),
        });
    }

    for cell in [first, second] {
        state.glacial_walls.push(WallRecord {
            cell,
            duration: GLACIAL_WALL_DURATION,
        });
    }
    state.push_log(
        Some(team),
        format!("{} creates Glacial Walls!", kind.display_name()),
    );
    Ok(())
}

/// Siphon a charge from the rift or shrine underfoot. Returns whether the
/// attempt consumed the turn.
pub fn handle_siphon(state: &mut GameState, id: PieceId) -> EngineResult<bool> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    let piece = state
        .piece(id)
        .ok_or(EngineError::AbilityUnavailable("Siphon"))?;
    let (pos, team, kind) = (piece.pos, piece.team, piece.kind);
    if team != state.current_turn {
        return Err(EngineError::NotYourTurn(team));
    }
    let is_siphoner = matches!(
        piece.ability.as_ref().map(|a| &a.kind),
        Some(AbilityKind::Siphon { .. })
    );
    if !is_siphoner || piece.charges >= SIPHON_MAX_CHARGES {
        return Err(EngineError::AbilityUnavailable("Siphon"));
    }

    if rift_at(pos).is_some() || in_shrine(pos) {
        if let Some(piece) = state.piece_mut(id) {
            piece.charges += 1;
        }
        state.push_log(
            Some(team),
            format!("{} siphons 1 charge.", kind.display_name()),
        );
        Ok(true)
    } else {
        state.push_log(Some(team), "There is no energy here to Siphon.");
        Ok(false)
    }
}

/// Fire the bottom-right anchor's one-shot pulse: every neighbor is dazed
/// and shoved one cell further out when the cell behind it is open.
pub fn execute_rift_pulse(state: &mut GameState, id: PieceId) -> EngineResult<()> {
    if state.game_over {
        return Err(EngineError::GameOver);
    }
    let piece = state
        .piece(id)
        .ok_or(EngineError::AbilityUnavailable("Rift Pulse"))?;
    let (pos, team) = (piece.pos, piece.team);
    if team != state.current_turn {
        return Err(EngineError::NotYourTurn(team));
    }
    if !piece.can_rift_pulse {
        return Err(EngineError::AbilityUnavailable("Rift Pulse"));
    }

    state.push_log(Some(team), "The Anchor unleashes a powerful Rift Pulse!");
    if let Some(piece) = state.piece_mut(id) {
        piece.can_rift_pulse = false;
    }

    let victims: Vec<(PieceId, i8, i8)> = pos
        .neighbors()
        .filter_map(|cell| {
            state
                .piece_id_at(cell)
                .map(|v| (v, cell.row - pos.row, cell.col - pos.col))
        })
        .collect();
    for (victim, dr, dc) in victims {
        let Some(piece) = state.piece_mut(victim) else {
            continue;
        };
        piece.dazed = true;
        piece.dazed_for = BLAST_DAZE_TURNS;
        let push = Cell::new(piece.pos.row + dr, piece.pos.col + dc);
        if state.is_open(push) {
            update_position(state, victim, push);
        }
    }

    state.reindex();
    update_conduit_link(state);
    Ok(())
}

/// Dissipate one of your own Ice Wisps. Does not consume the turn.
pub fn despawn_wisp(state: &mut GameState, id: PieceId) -> EngineResult<()> {
    let piece = state.piece(id).ok_or(EngineError::AbilityUnavailable("Despawn"))?;
    if piece.kind != PieceKind::IceWisp {
        return Err(EngineError::AbilityUnavailable("Despawn"));
    }
    if piece.team != state.current_turn {
        return Err(EngineError::NotYourTurn(piece.team));
    }
    let team = piece.team;
    state.remove_piece(id);
    state.push_log(Some(team), "The Ice Wisp dissipates.");
    Ok(())
}

/// Tick every in-flight projectile once; those that arrive apply their
/// effect to whatever holds the target cell now.
pub fn advance_projectiles(state: &mut GameState) {
    let mut landed = Vec::new();
    for projectile in state.projectiles.iter_mut() {
        if projectile.remaining > 0 {
            projectile.remaining -= 1;
        }
        if projectile.remaining == 0 {
            landed.push(*projectile);
        }
    }
    state.projectiles.retain(|p| p.remaining > 0);
    for projectile in landed {
        apply_effect(
            state,
            projectile.caster,
            projectile.key,
            Some(projectile.target),
        );
    }
}

/// Run every queued projectile to arrival.
pub fn resolve_projectiles(state: &mut GameState) {
    while !state.projectiles.is_empty() {
        advance_projectiles(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Team;

    fn spawn(state: &mut GameState, kind: PieceKind, pos: Cell) -> PieceId {
        let id = state.alloc_id();
        state.pieces.push(build_piece(id, kind, pos));
        state.reindex();
        id
    }

    #[test]
    fn flash_freeze_needs_charges_and_sticks_the_target() {
        let mut state = GameState::empty(11);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 5));
        let hound = spawn(&mut state, PieceKind::HellHound, Cell::new(5, 7));

        let err = execute_ability(
            &mut state,
            chanter,
            AbilityKey::FlashFreeze,
            Some(Cell::new(5, 7)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::AbilityUnavailable(_)));

        state.piece_mut(chanter).unwrap().charges = 2;
        execute_ability(
            &mut state,
            chanter,
            AbilityKey::FlashFreeze,
            Some(Cell::new(5, 7)),
            None,
        )
        .unwrap();
        assert_eq!(state.piece(hound).unwrap().stuck, FLASH_FREEZE_DURATION);
        assert_eq!(state.piece(chanter).unwrap().charges, 1);
    }

    #[test]
    fn glacial_step_only_lands_in_own_territory() {
        let mut state = GameState::empty(11);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 5));
        state.piece_mut(chanter).unwrap().charges = 3;
        state.claim_territory(Cell::new(7, 7), Team::Snow);

        let err = execute_ability(
            &mut state,
            chanter,
            AbilityKey::GlacialStep,
            Some(Cell::new(6, 6)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));

        execute_ability(
            &mut state,
            chanter,
            AbilityKey::GlacialStep,
            Some(Cell::new(7, 7)),
            None,
        )
        .unwrap();
        assert_eq!(state.piece(chanter).unwrap().pos, Cell::new(7, 7));
        assert_eq!(state.piece(chanter).unwrap().charges, 1);
    }

    #[test]
    fn whiteout_spares_the_warded_anchor() {
        let mut state = GameState::empty(11);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(4, 4));
        state.piece_mut(chanter).unwrap().charges = 3;
        let near = spawn(&mut state, PieceKind::HellHound, Cell::new(5, 5));
        let warded = spawn(&mut state, PieceKind::BlazeRunner, Cell::new(4, 6));
        state.piece_mut(warded).unwrap().has_ward = true;
        let far = spawn(&mut state, PieceKind::RiftForger, Cell::new(9, 9));

        execute_ability(&mut state, chanter, AbilityKey::Whiteout, None, None).unwrap();
        assert!(state.debuffs.iter().any(|d| d.piece == near));
        assert!(!state.debuffs.iter().any(|d| d.piece == warded));
        assert!(!state.debuffs.iter().any(|d| d.piece == far));
    }

    #[test]
    fn rift_assault_teleports_and_dazes_for_the_turn() {
        let mut state = GameState::empty(11);
        state.current_turn = Team::Ash;
        let warden = spawn(&mut state, PieceKind::RiftWarden, Cell::new(5, 5));
        state.piece_mut(warden).unwrap().charges = 2;
        spawn(&mut state, PieceKind::SnowWolf, Cell::new(3, 3));

        execute_ability(
            &mut state,
            warden,
            AbilityKey::RiftAssault,
            Some(Cell::new(3, 4)),
            None,
        )
        .unwrap();
        let warden_piece = state.piece(warden).unwrap();
        assert_eq!(warden_piece.pos, Cell::new(3, 4));
        assert!(warden_piece.dazed);
        assert_eq!(warden_piece.dazed_for, 0);

        // The daze lifts when Ash's turn ends.
        crate::rules::turn::switch_turn(&mut state);
        assert!(!state.piece(warden).unwrap().dazed);
    }

    #[test]
    fn projectile_effects_wait_for_impact() {
        let mut state = GameState::empty(11);
        state.current_turn = Team::Ash;
        let spitter = spawn(&mut state, PieceKind::MagmaSpitter, Cell::new(5, 5));
        let wolf = spawn(&mut state, PieceKind::SnowWolf, Cell::new(5, 7));

        execute_ability(
            &mut state,
            spitter,
            AbilityKey::LavaGlob,
            Some(Cell::new(5, 7)),
            None,
        )
        .unwrap();
        // Cooldown is paid at launch, damage is not yet applied.
        assert_eq!(
            state.piece(spitter).unwrap().ability.as_ref().unwrap().cooldown,
            LAVA_GLOB_COOLDOWN
        );
        assert_eq!(state.piece(wolf).unwrap().power, 1);
        assert_eq!(state.projectiles.len(), 1);

        advance_projectiles(&mut state);
        assert_eq!(state.piece(wolf).unwrap().power, 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn lava_glob_rejects_high_power_targets() {
        let mut state = GameState::empty(11);
        state.current_turn = Team::Ash;
        let spitter = spawn(&mut state, PieceKind::MagmaSpitter, Cell::new(5, 5));
        spawn(&mut state, PieceKind::FrostLord, Cell::new(5, 7));

        let err = execute_ability(
            &mut state,
            spitter,
            AbilityKey::LavaGlob,
            Some(Cell::new(5, 7)),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
    }

    #[test]
    fn summon_claims_the_cell_for_snow() {
        let mut state = GameState::empty(11);
        let mancer = spawn(&mut state, PieceKind::Cryomancer, Cell::new(5, 5));
        state.claim_territory(Cell::new(5, 7), Team::Ash);

        execute_ability(
            &mut state,
            mancer,
            AbilityKey::SummonIceWisp,
            Some(Cell::new(5, 7)),
            None,
        )
        .unwrap();
        let wisp = state.piece_at(Cell::new(5, 7)).unwrap();
        assert_eq!(wisp.kind, PieceKind::IceWisp);
        assert!(state.snow_territory.contains(&Cell::new(5, 7)));
        assert!(!state.ash_territory.contains(&Cell::new(5, 7)));
    }

    #[test]
    fn wall_pair_must_chain_from_the_caster() {
        let mut state = GameState::empty(11);
        let weaver = spawn(&mut state, PieceKind::IceWeaver, Cell::new(5, 5));

        let err = execute_ability(
            &mut state,
            weaver,
            AbilityKey::GlacialWall,
            Some(Cell::new(5, 6)),
            Some(Cell::new(7, 7)),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
        assert!(state.glacial_walls.is_empty());

        execute_ability(
            &mut state,
            weaver,
            AbilityKey::GlacialWall,
            Some(Cell::new(5, 6)),
            Some(Cell::new(5, 7)),
        )
        .unwrap();
        assert_eq!(state.glacial_walls.len(), 2);
        assert_eq!(
            state.piece(weaver).unwrap().ability.as_ref().unwrap().cooldown,
            GLACIAL_WALL_COOLDOWN
        );
    }

    #[test]
    fn siphon_caps_at_three_charges() {
        let mut state = GameState::empty(11);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(1, 1));

        for expected in 1..=3 {
            assert!(handle_siphon(&mut state, chanter).unwrap());
            assert_eq!(state.piece(chanter).unwrap().charges, expected);
        }
        let err = handle_siphon(&mut state, chanter).unwrap_err();
        assert!(matches!(err, EngineError::AbilityUnavailable("Siphon")));
    }

    #[test]
    fn siphon_off_energy_does_not_consume_the_turn() {
        let mut state = GameState::empty(11);
        let chanter = spawn(&mut state, PieceKind::VoidChanter, Cell::new(5, 0));
        assert!(!handle_siphon(&mut state, chanter).unwrap());
        assert_eq!(state.piece(chanter).unwrap().charges, 0);
    }

    #[test]
    fn rift_pulse_is_single_use_and_pushes_neighbors() {
        let mut state = GameState::empty(11);
        let enemy = spawn(&mut state, PieceKind::HellHound, Cell::new(6, 6));
        let anchor = spawn(&mut state, PieceKind::Yeti, Cell::new(7, 7));
        spawn(&mut state, PieceKind::SnowWolf, Cell::new(1, 1));
        update_conduit_link(&mut state);
        assert!(state.piece(anchor).unwrap().can_rift_pulse);

        execute_rift_pulse(&mut state, anchor).unwrap();
        let hit = state.piece(enemy).unwrap();
        assert!(hit.dazed);
        assert_eq!(hit.dazed_for, BLAST_DAZE_TURNS);
        assert_eq!(hit.pos, Cell::new(5, 5));
        assert!(!state.piece(anchor).unwrap().can_rift_pulse);

        let err = execute_rift_pulse(&mut state, anchor).unwrap_err();
        assert!(matches!(err, EngineError::AbilityUnavailable(_)));
    }

    #[test]
    fn only_own_wisps_can_be_dissipated() {
        let mut state = GameState::empty(11);
        let wisp = spawn(&mut state, PieceKind::IceWisp, Cell::new(5, 5));
        let yeti = spawn(&mut state, PieceKind::Yeti, Cell::new(6, 6));

        assert!(despawn_wisp(&mut state, yeti).is_err());
        despawn_wisp(&mut state, wisp).unwrap();
        assert!(state.piece(wisp).is_none());
    }
}
