//! Game constants: board geometry, ability numbers, special zones, search tuning
//!
//! Every tunable number in the rules and the AI lives here so that the
//! rules engine, the evaluation function and the search agree on the same
//! values by construction.

/// Board dimensions. The grid is fixed; other sizes are out of scope.
pub const ROWS: i8 = 10;
pub const COLS: i8 = 10;

// --- Ability numbers (cost XOR cooldown per ability) ---

pub const FLASH_FREEZE_COST: u8 = 1;
pub const FLASH_FREEZE_RANGE: i8 = 4;
pub const FLASH_FREEZE_DURATION: u8 = 4;

pub const GLACIAL_STEP_COST: u8 = 2;
pub const GLACIAL_STEP_RANGE: i8 = 5;

pub const WHITEOUT_COST: u8 = 3;
pub const WHITEOUT_RADIUS: i8 = 3;
pub const WHITEOUT_DURATION: u8 = 2;
pub const WHITEOUT_DEBUFF: i32 = 1;

pub const STOKE_THE_FLAMES_COST: u8 = 1;
pub const STOKE_THE_FLAMES_RANGE: i8 = 4;
pub const STOKE_THE_FLAMES_DURATION: u8 = 3;
pub const STOKE_THE_FLAMES_BOOST: i32 = 2;

pub const RIFT_ASSAULT_COST: u8 = 2;
pub const RIFT_ASSAULT_RANGE: i8 = 3;

pub const BURNING_GROUND_COST: u8 = 3;
pub const BURNING_GROUND_DURATION: u8 = 2;

pub const CHILLING_AURA_COOLDOWN: u8 = 4;
pub const CHILLING_AURA_DURATION: u8 = 3;
pub const CHILLING_AURA_DEBUFF: i32 = 1;

pub const MARK_OF_CINDER_COOLDOWN: u8 = 4;
pub const MARK_OF_CINDER_RANGE: i8 = 2;
pub const MARK_OF_CINDER_DURATION: u8 = 3;
pub const MARK_OF_CINDER_DEBUFF: i32 = 1;

pub const GLACIAL_WALL_COOLDOWN: u8 = 6;
pub const GLACIAL_WALL_DURATION: u8 = 3;

pub const UNSTABLE_GROUND_COOLDOWN: u8 = 4;
pub const UNSTABLE_GROUND_RANGE: i8 = 4;
pub const UNSTABLE_GROUND_DURATION: u8 = 3;
pub const UNSTABLE_GROUND_DAMAGE: i32 = 1;

pub const SUMMON_ICE_WISP_COOLDOWN: u8 = 4;
pub const SUMMON_ICE_WISP_RANGE: i8 = 4;

pub const LAVA_GLOB_COOLDOWN: u8 = 10;
pub const LAVA_GLOB_RANGE: i8 = 4;
pub const LAVA_GLOB_DAMAGE: i32 = 1;
pub const LAVA_GLOB_MAX_TARGET_POWER: i32 = 2;

pub const SIPHON_MAX_CHARGES: u8 = 3;

pub const SHRINE_POWER_BOOST: i32 = 1;
pub const SHRINE_OVERLOAD_CHARGES: u8 = 3;

pub const RIFT_ANCHOR_BOOST: i32 = 2;

/// Daze applied by the shrine blast and by a rift pulse.
pub const BLAST_DAZE_TURNS: u8 = 2;

// --- Special zones ---

/// The 2x2 shrine block at the board center.
pub const SHRINE_AREA: [(i8, i8); 4] = [(4, 4), (4, 5), (5, 4), (5, 5)];

/// Geometric center of the shrine, used for blast push directions.
pub const SHRINE_CENTER: (f32, f32) = (4.5, 4.5);

/// Each rift is a 3x3 block; (origin_row, origin_col, size).
pub const RIFT_TOP_LEFT: (i8, i8, i8) = (0, 0, 3);
pub const RIFT_BOTTOM_RIGHT: (i8, i8, i8) = (ROWS - 3, COLS - 3, 3);

// --- Search tuning ---

/// Practical ceiling for iterative deepening.
pub const MAX_SEARCH_DEPTH: u32 = 10;

/// Terminal score for a won/lost position.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Default wall-clock budget for one AI decision, in milliseconds.
pub const DEFAULT_BUDGET_MS: u64 = 3_000;
