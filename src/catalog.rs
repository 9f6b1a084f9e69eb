//! Static piece and ability catalog
//!
//! Declarative specs for every castable ability plus piece construction and
//! the starting position. The rules engine interprets these specs; nothing
//! here mutates state.

use crate::constants::*;
use crate::types::{
    AbilityKey, AbilityState, Cell, GameState, Piece, PieceId, PieceKind, Team,
};

/// How an ability picks its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRule {
    /// Any enemy piece in range.
    Enemy,
    /// Any friendly piece in range.
    Friendly,
    /// Any empty cell in range.
    Empty,
    /// Empty cell inside the caster's own territory (Glacial Step).
    OwnTerritoryEmpty,
    /// Empty cell with at least one enemy in its 8-neighborhood (Rift Assault).
    EmptyNextToEnemy,
    /// Enemy piece whose base power is low enough for Lava Glob.
    LowPowerEnemy,
    /// Empty cell adjacent to the caster (Glacial Wall's first segment).
    AdjacentEmpty,
    /// No target at all.
    None,
}

/// One row of the ability catalog. Exactly one of `cost` (Siphon charges)
/// and `cooldown` (rounds) is set.
#[derive(Clone, Copy, Debug)]
pub struct AbilitySpec {
    pub key: AbilityKey,
    pub cost: Option<u8>,
    pub cooldown: Option<u8>,
    /// Chebyshev range; 0 means untargeted or self-centered.
    pub range: i8,
    pub target: TargetRule,
    /// A warded piece cannot be targeted by a blockable ability.
    pub can_be_blocked: bool,
    pub requires_target: bool,
    /// Effect applies on projectile impact rather than at cast time.
    pub projectile: bool,
}

/// Catalog lookup. Total over [`AbilityKey`].
pub fn ability_spec(key: AbilityKey) -> AbilitySpec {
    use AbilityKey::*;
    match key {
        FlashFreeze => AbilitySpec {
            key,
            cost: Some(FLASH_FREEZE_COST),
            cooldown: None,
            range: FLASH_FREEZE_RANGE,
            target: TargetRule::Enemy,
            can_be_blocked: true,
            requires_target: true,
            projectile: false,
        },
        GlacialStep => AbilitySpec {
            key,
            cost: Some(GLACIAL_STEP_COST),
            cooldown: None,
            range: GLACIAL_STEP_RANGE,
            target: TargetRule::OwnTerritoryEmpty,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        Whiteout => AbilitySpec {
            key,
            cost: Some(WHITEOUT_COST),
            cooldown: None,
            range: 0,
            target: TargetRule::None,
            can_be_blocked: false,
            requires_target: false,
            projectile: false,
        },
        StokeTheFlames => AbilitySpec {
            key,
            cost: Some(STOKE_THE_FLAMES_COST),
            cooldown: None,
            range: STOKE_THE_FLAMES_RANGE,
            target: TargetRule::Friendly,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        RiftAssault => AbilitySpec {
            key,
            cost: Some(RIFT_ASSAULT_COST),
            cooldown: None,
            range: RIFT_ASSAULT_RANGE,
            target: TargetRule::EmptyNextToEnemy,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        BurningGround => AbilitySpec {
            key,
            cost: Some(BURNING_GROUND_COST),
            cooldown: None,
            range: 0,
            target: TargetRule::None,
            can_be_blocked: false,
            requires_target: false,
            projectile: false,
        },
        ChillingAura => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(CHILLING_AURA_COOLDOWN),
            range: 0,
            target: TargetRule::None,
            can_be_blocked: false,
            requires_target: false,
            projectile: false,
        },
        MarkOfCinder => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(MARK_OF_CINDER_COOLDOWN),
            range: MARK_OF_CINDER_RANGE,
            target: TargetRule::Enemy,
            can_be_blocked: true,
            requires_target: true,
            projectile: true,
        },
        GlacialWall => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(GLACIAL_WALL_COOLDOWN),
            range: 1,
            target: TargetRule::AdjacentEmpty,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        UnstableGround => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(UNSTABLE_GROUND_COOLDOWN),
            range: UNSTABLE_GROUND_RANGE,
            target: TargetRule::Empty,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        SummonIceWisp => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(SUMMON_ICE_WISP_COOLDOWN),
            range: SUMMON_ICE_WISP_RANGE,
            target: TargetRule::Empty,
            can_be_blocked: false,
            requires_target: true,
            projectile: false,
        },
        LavaGlob => AbilitySpec {
            key,
            cost: None,
            cooldown: Some(LAVA_GLOB_COOLDOWN),
            range: LAVA_GLOB_RANGE,
            target: TargetRule::LowPowerEnemy,
            can_be_blocked: true,
            requires_target: true,
            projectile: true,
        },
    }
}

/// The innate ability (or Siphon kit) a freshly built piece carries.
fn starting_ability(kind: PieceKind) -> Option<AbilityState> {
    use PieceKind::*;
    match kind {
        VoidChanter => Some(AbilityState::siphon([
            AbilityKey::FlashFreeze,
            AbilityKey::GlacialStep,
            AbilityKey::Whiteout,
        ])),
        RiftWarden => Some(AbilityState::siphon([
            AbilityKey::StokeTheFlames,
            AbilityKey::RiftAssault,
            AbilityKey::BurningGround,
        ])),
        Cryomancer => Some(AbilityState::keyed(AbilityKey::SummonIceWisp)),
        SoulFreeze => Some(AbilityState::keyed(AbilityKey::ChillingAura)),
        IceWeaver => Some(AbilityState::keyed(AbilityKey::GlacialWall)),
        MagmaSpitter => Some(AbilityState::keyed(AbilityKey::LavaGlob)),
        ScorchPriest => Some(AbilityState::keyed(AbilityKey::MarkOfCinder)),
        RiftForger => Some(AbilityState::keyed(AbilityKey::UnstableGround)),
        FrostLord | AshTyrant | Yeti | HellHound | SnowWolf | BlazeRunner | IceWisp => None,
    }
}

/// Build a piece of `kind` at `pos` with the catalog's starting stats.
pub fn build_piece(id: PieceId, kind: PieceKind, pos: Cell) -> Piece {
    Piece {
        id,
        kind,
        team: kind.team(),
        pos,
        power: kind.base_power(),
        shrine_boost: 0,
        stuck: 0,
        dazed: false,
        dazed_for: 0,
        charges: 0,
        is_anchor: false,
        has_ward: false,
        can_rift_pulse: false,
        overload_boost: None,
        ability: starting_ability(kind),
    }
}

/// Snow's starting wedge in the bottom-left corner.
const SNOW_LAYOUT: [(i8, i8, PieceKind); 10] = [
    (9, 0, PieceKind::FrostLord),
    (9, 1, PieceKind::VoidChanter),
    (9, 2, PieceKind::Yeti),
    (9, 3, PieceKind::IceWeaver),
    (8, 0, PieceKind::Cryomancer),
    (8, 1, PieceKind::SoulFreeze),
    (8, 2, PieceKind::SnowWolf),
    (7, 0, PieceKind::Yeti),
    (7, 1, PieceKind::SnowWolf),
    (6, 0, PieceKind::IceWeaver),
];

/// Ash's starting wedge in the top-right corner, mirroring Snow's.
const ASH_LAYOUT: [(i8, i8, PieceKind); 10] = [
    (0, 9, PieceKind::AshTyrant),
    (0, 8, PieceKind::RiftWarden),
    (0, 7, PieceKind::HellHound),
    (0, 6, PieceKind::RiftForger),
    (1, 9, PieceKind::MagmaSpitter),
    (1, 8, PieceKind::ScorchPriest),
    (1, 7, PieceKind::BlazeRunner),
    (2, 9, PieceKind::HellHound),
    (2, 8, PieceKind::BlazeRunner),
    (3, 9, PieceKind::RiftForger),
];

impl GameState {
    /// A fresh game: both wedges placed, starting cells claimed as
    /// territory, Snow to move, round counter at zero.
    pub fn new(seed: u64) -> Self {
        let mut state = GameState::empty(seed);
        for &(row, col, kind) in SNOW_LAYOUT.iter().chain(ASH_LAYOUT.iter()) {
            let id = state.alloc_id();
            let piece = build_piece(id, kind, Cell::new(row, col));
            state.pieces.push(piece);
        }
        for i in 0..state.pieces.len() {
            let (pos, team) = (state.pieces[i].pos, state.pieces[i].team);
            match team {
                Team::Snow => state.snow_territory.insert(pos),
                Team::Ash => state.ash_territory.insert(pos),
            };
        }
        state.reindex();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_game_shape() {
        let state = GameState::new(0);
        assert_eq!(state.pieces.len(), 20);
        assert_eq!(
            state.pieces.iter().filter(|p| p.team == Team::Snow).count(),
            10
        );
        assert_eq!(state.current_turn, Team::Snow);
        assert_eq!(state.turn_count, 0);
        assert!(!state.game_over);
        assert_eq!(state.snow_territory.len(), 10);
        assert_eq!(state.ash_territory.len(), 10);
        assert!(state.leader(Team::Snow).is_some());
        assert!(state.leader(Team::Ash).is_some());
    }

    #[test]
    fn leaders_start_in_their_corners() {
        let state = GameState::new(0);
        assert_eq!(state.leader(Team::Snow).map(|p| p.pos), Some(Cell::new(9, 0)));
        assert_eq!(state.leader(Team::Ash).map(|p| p.pos), Some(Cell::new(0, 9)));
    }

    #[test]
    fn siphon_carriers_have_unleash_kits() {
        let state = GameState::new(0);
        let chanter = state
            .pieces
            .iter()
            .find(|p| p.kind == PieceKind::VoidChanter)
            .unwrap();
        match &chanter.ability {
            Some(AbilityState {
                kind: crate::types::AbilityKind::Siphon { unleash },
                ..
            }) => assert_eq!(unleash[0], AbilityKey::FlashFreeze),
            other => panic!("unexpected ability: {other:?}"),
        }
    }

    #[test]
    fn spec_rows_are_cost_xor_cooldown() {
        use AbilityKey::*;
        for key in [
            FlashFreeze,
            GlacialStep,
            Whiteout,
            StokeTheFlames,
            RiftAssault,
            BurningGround,
            ChillingAura,
            MarkOfCinder,
            GlacialWall,
            UnstableGround,
            SummonIceWisp,
            LavaGlob,
        ] {
            let spec = ability_spec(key);
            assert!(
                spec.cost.is_some() != spec.cooldown.is_some(),
                "{key:?} must have exactly one of cost/cooldown"
            );
        }
    }
}
