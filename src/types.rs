//! Core types for the game state
//!
//! Everything here is a plain value: `GameState` is `Clone + Serialize +
//! Deserialize` with no shared mutable substructure, so the search can snapshot
//! it by cloning and the service can ship it across a channel by value. Pieces
//! are referenced by stable [`PieceId`]s; the positional `board` index is
//! derived data and is skipped by serde (rebuild it with
//! [`GameState::reindex`] after deserializing).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{COLS, ROWS};
use crate::rng::GameRng;

/// The two sides. Snow moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Snow,
    Ash,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Snow => Team::Ash,
            Team::Ash => Team::Snow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Snow => "Snow",
            Team::Ash => "Ash",
        }
    }
}

/// A board coordinate. Row 0 is the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < ROWS && self.col >= 0 && self.col < COLS
    }

    pub fn index(self) -> usize {
        self.row as usize * COLS as usize + self.col as usize
    }

    /// Chebyshev (king-move) distance.
    pub fn distance(self, other: Cell) -> i8 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// The up-to-eight in-bounds neighbors.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        let base = self;
        (-1i8..=1)
            .flat_map(move |dr| (-1i8..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(move |(dr, dc)| Cell::new(base.row + dr, base.col + dc))
            .filter(|c| c.in_bounds())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a piece within one game. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Every piece kind in the game, both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    // Snow
    FrostLord,
    VoidChanter,
    Cryomancer,
    SoulFreeze,
    Yeti,
    IceWeaver,
    SnowWolf,
    IceWisp,
    // Ash
    AshTyrant,
    RiftWarden,
    MagmaSpitter,
    ScorchPriest,
    HellHound,
    RiftForger,
    BlazeRunner,
}

impl PieceKind {
    pub fn team(self) -> Team {
        use PieceKind::*;
        match self {
            FrostLord | VoidChanter | Cryomancer | SoulFreeze | Yeti | IceWeaver | SnowWolf
            | IceWisp => Team::Snow,
            AshTyrant | RiftWarden | MagmaSpitter | ScorchPriest | HellHound | RiftForger
            | BlazeRunner => Team::Ash,
        }
    }

    pub fn is_leader(self) -> bool {
        matches!(self, PieceKind::FrostLord | PieceKind::AshTyrant)
    }

    /// Base combat power before any modifier.
    pub fn base_power(self) -> i32 {
        use PieceKind::*;
        match self {
            FrostLord | AshTyrant => 4,
            VoidChanter | RiftWarden | Cryomancer | MagmaSpitter => 3,
            SoulFreeze | ScorchPriest | Yeti | HellHound => 2,
            IceWeaver | RiftForger | SnowWolf | BlazeRunner => 1,
            IceWisp => 0,
        }
    }

    /// Material value used by the evaluation function.
    pub fn value(self) -> i32 {
        use PieceKind::*;
        match self {
            FrostLord | AshTyrant => 1000,
            VoidChanter | RiftWarden => 700,
            Cryomancer | MagmaSpitter => 500,
            SoulFreeze | ScorchPriest => 450,
            Yeti | HellHound => 300,
            IceWeaver | RiftForger => 250,
            SnowWolf | BlazeRunner => 150,
            IceWisp => 50,
        }
    }

    /// Triggers a Territory Surge when this piece captures.
    pub fn surges_on_capture(self) -> bool {
        matches!(
            self,
            PieceKind::Yeti | PieceKind::HellHound | PieceKind::SnowWolf | PieceKind::BlazeRunner
        )
    }

    pub fn display_name(self) -> &'static str {
        use PieceKind::*;
        match self {
            FrostLord => "Frost Lord",
            VoidChanter => "Void Chanter",
            Cryomancer => "Cryomancer",
            SoulFreeze => "Soul Freeze",
            Yeti => "Yeti",
            IceWeaver => "Ice Weaver",
            SnowWolf => "Snow Wolf",
            IceWisp => "Ice Wisp",
            AshTyrant => "Ash Tyrant",
            RiftWarden => "Rift Warden",
            MagmaSpitter => "Magma Spitter",
            ScorchPriest => "Scorch Priest",
            HellHound => "Hell Hound",
            RiftForger => "Rift Forger",
            BlazeRunner => "Blaze Runner",
        }
    }
}

/// Keys for the targetable/castable abilities.
///
/// Siphon and the anchor's Rift Pulse are separate action kinds, not keys:
/// they have no catalog entry and no cooldown or charge cost of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKey {
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
}

impl AbilityKey {
    pub fn name(self) -> &'static str {
        use AbilityKey::*;
        match self {
            FlashFreeze => "Flash Freeze",
            GlacialStep => "Glacial Step",
            Whiteout => "Whiteout",
            StokeTheFlames => "Stoke the Flames",
            RiftAssault => "Rift Assault",
            BurningGround => "Burning Ground",
            ChillingAura => "Chilling Aura",
            MarkOfCinder => "Mark of Cinder",
            GlacialWall => "Glacial Wall",
            UnstableGround => "Unstable Ground",
            SummonIceWisp => "Summon Ice Wisp",
            LavaGlob => "Lava Glob",
        }
    }
}

/// What kind of ability a piece carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// A single cooldown-gated ability.
    Keyed(AbilityKey),
    /// Siphon charges with a fixed unleash list; charge `i + 1` unlocks
    /// `unleash[i]`.
    Siphon { unleash: [AbilityKey; 3] },
}

/// Per-piece ability bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityState {
    pub kind: AbilityKind,
    /// Rounds until a keyed ability is ready again. Always 0 for Siphon.
    pub cooldown: u8,
    /// Chilling Aura only: whether the aura is currently up, and for how
    /// many more rounds.
    pub aura_active: bool,
    pub aura_rounds: u8,
}

impl AbilityState {
    pub fn keyed(key: AbilityKey) -> Self {
        Self {
            kind: AbilityKind::Keyed(key),
            cooldown: 0,
            aura_active: false,
            aura_rounds: 0,
        }
    }

    pub fn siphon(unleash: [AbilityKey; 3]) -> Self {
        Self {
            kind: AbilityKind::Siphon { unleash },
            cooldown: 0,
            aura_active: false,
            aura_rounds: 0,
        }
    }
}

/// A short-lived power infusion on a single piece (amount + rounds left).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedBoost {
    pub amount: i32,
    pub duration: u8,
}

/// One piece on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub team: Team,
    pub pos: Cell,
    /// Current base power. Starts at `kind.base_power()`; permanent damage
    /// (hazardous ground, Lava Glob) lowers it for good.
    pub power: i32,
    /// Permanent +1 from the piece's first qualifying shrine capture.
    pub shrine_boost: i32,
    /// Turns of Flash Freeze remaining; a stuck piece cannot move and has
    /// effective power 0.
    pub stuck: u8,
    pub dazed: bool,
    /// Residual daze turns; recomputed into `dazed` at the start of the
    /// owner's turn.
    pub dazed_for: u8,
    /// Siphon charges (0..=3). Only meaningful for Siphon carriers.
    pub charges: u8,
    /// This piece currently anchors an active conduit link.
    pub is_anchor: bool,
    /// Top-left anchor only: immune to blockable enemy abilities.
    pub has_ward: bool,
    /// Bottom-right anchor only: the one-shot Rift Pulse is still unspent.
    pub can_rift_pulse: bool,
    pub overload_boost: Option<TimedBoost>,
    pub ability: Option<AbilityState>,
}

/// A Glacial Wall segment occupying one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallRecord {
    pub cell: Cell,
    pub duration: u8,
}

/// Hazardous ground (Unstable Ground or Burning Ground).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundRecord {
    pub cell: Cell,
    pub duration: u8,
    pub creator: PieceId,
    pub creator_team: Team,
    pub burning: bool,
}

/// Mark of Cinder on a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub piece: PieceId,
    pub duration: u8,
}

/// Stoke the Flames on a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostRecord {
    pub piece: PieceId,
    pub amount: i32,
    pub duration: u8,
}

/// Whiteout debuff on a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebuffRecord {
    pub piece: PieceId,
    pub amount: i32,
    pub duration: u8,
}

/// An in-flight projectile ability. The effect applies on impact, not launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub key: AbilityKey,
    pub caster: PieceId,
    pub target: Cell,
    /// Ticks until impact.
    pub remaining: u8,
}

/// One entry of the ordered, player-visible message log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub team: Option<Team>,
    pub text: String,
}

/// Identifies an action's actor structurally, so an action chosen against a
/// snapshot can be replayed against the live state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub pos: Cell,
    pub kind: PieceKind,
}

/// A complete player or AI intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub actor: ActorRef,
    pub kind: ActionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Move {
        to: Cell,
        highway: bool,
    },
    Ability {
        key: AbilityKey,
        target: Option<Cell>,
        /// Glacial Wall only: the second wall cell.
        second: Option<Cell>,
    },
    Siphon,
    RiftPulse,
}

/// The whole game in one value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub pieces: Vec<Piece>,
    /// Derived positional index, `ROWS * COLS` slots. Not serialized;
    /// rebuild with [`GameState::reindex`].
    #[serde(skip)]
    pub board: Vec<Option<PieceId>>,
    pub snow_territory: HashSet<Cell>,
    pub ash_territory: HashSet<Cell>,
    /// Turn on which each territory cell last changed hands.
    pub territory_capture_turn: HashMap<Cell, u32>,
    pub glacial_walls: Vec<WallRecord>,
    pub unstable_grounds: Vec<GroundRecord>,
    pub marked_pieces: Vec<MarkRecord>,
    pub temporary_boosts: Vec<BoostRecord>,
    pub debuffs: Vec<DebuffRecord>,
    pub projectiles: Vec<Projectile>,
    pub shrine_charge: u8,
    pub shrine_overloaded: bool,
    pub conduit_active: bool,
    pub conduit_team: Option<Team>,
    /// `[top_left, bottom_right]` anchors of an active link.
    pub rift_anchors: [Option<PieceId>; 2],
    pub current_turn: Team,
    /// Full rounds completed; increments when Ash ends its turn.
    pub turn_count: u32,
    pub game_over: bool,
    pub winner: Option<Team>,
    pub message_log: Vec<LogEntry>,
    pub rng: GameRng,
    next_piece_id: u32,
}

impl GameState {
    /// Empty state with no pieces. [`GameState::new`] builds the real
    /// starting position.
    pub(crate) fn empty(seed: u64) -> Self {
        Self {
            pieces: Vec::new(),
            board: vec![None; ROWS as usize * COLS as usize],
            snow_territory: HashSet::new(),
            ash_territory: HashSet::new(),
            territory_capture_turn: HashMap::new(),
            glacial_walls: Vec::new(),
            unstable_grounds: Vec::new(),
            marked_pieces: Vec::new(),
            temporary_boosts: Vec::new(),
            debuffs: Vec::new(),
            projectiles: Vec::new(),
            shrine_charge: 0,
            shrine_overloaded: false,
            conduit_active: false,
            conduit_team: None,
            rift_anchors: [None, None],
            current_turn: Team::Snow,
            turn_count: 0,
            game_over: false,
            winner: None,
            message_log: Vec::new(),
            rng: GameRng::seed_from_u64(seed),
            next_piece_id: 0,
        }
    }

    pub fn alloc_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        id
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn piece_id_at(&self, cell: Cell) -> Option<PieceId> {
        if !cell.in_bounds() {
            return None;
        }
        self.board[cell.index()]
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.piece_id_at(cell).and_then(|id| self.piece(id))
    }

    pub fn leader(&self, team: Team) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.team == team && p.kind.is_leader())
    }

    pub fn territory(&self, team: Team) -> &HashSet<Cell> {
        match team {
            Team::Snow => &self.snow_territory,
            Team::Ash => &self.ash_territory,
        }
    }

    pub fn wall_at(&self, cell: Cell) -> bool {
        self.glacial_walls.iter().any(|w| w.cell == cell)
    }

    pub fn ground_at(&self, cell: Cell) -> Option<&GroundRecord> {
        self.unstable_grounds.iter().find(|g| g.cell == cell)
    }

    /// Append a player-visible message, stamped with the current turn.
    pub fn push_log(&mut self, team: Option<Team>, text: impl Into<String>) {
        self.message_log.push(LogEntry {
            turn: self.turn_count,
            team,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_bounds_and_distance() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(9, 9).in_bounds());
        assert!(!Cell::new(-1, 0).in_bounds());
        assert!(!Cell::new(0, 10).in_bounds());
        assert_eq!(Cell::new(2, 3).distance(Cell::new(5, 4)), 3);
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(Cell::new(0, 0).neighbors().count(), 3);
        assert_eq!(Cell::new(4, 4).neighbors().count(), 8);
    }

    #[test]
    fn kinds_split_evenly_by_team() {
        use PieceKind::*;
        let all = [
            FrostLord, VoidChanter, Cryomancer, SoulFreeze, Yeti, IceWeaver, SnowWolf, IceWisp,
            AshTyrant, RiftWarden, MagmaSpitter, ScorchPriest, HellHound, RiftForger, BlazeRunner,
        ];
        let snow = all.iter().filter(|k| k.team() == Team::Snow).count();
        assert_eq!(snow, 8);
        assert_eq!(all.len() - snow, 7);
    }

    #[test]
    fn leaders_and_values() {
        assert!(PieceKind::FrostLord.is_leader());
        assert!(PieceKind::AshTyrant.is_leader());
        assert_eq!(PieceKind::FrostLord.value(), 1000);
        assert_eq!(PieceKind::IceWisp.base_power(), 0);
        assert!(PieceKind::HellHound.surges_on_capture());
        assert!(!PieceKind::Cryomancer.surges_on_capture());
    }
}
