/// Development coefficient at which progression has no effect
pub const NEUTRAL_CON: f64 = 5.0;

/// Years of look-ahead used by the progression adjustment
pub const PROGRESSION_HORIZON: f64 = 5.0;

/// Rating at the midpoint of the value curve
pub const VALUE_CURVE_MEAN: f64 = 60.0;

/// Rating spread of the value curve
pub const VALUE_CURVE_STDDEV: f64 = 15.0;

/// Highest raw attribute rating
pub const MAX_ATTRIBUTE: u8 = 99;

/// Highest adjusted overall a player can be assigned
pub const MAX_RATING: f64 = 99.0;

/// Teams in a standard league
pub const LEAGUE_TEAMS: u32 = 32;

/// Number of depth chart slots per team (21 positions + 5 specialists)
pub const SLOT_COUNT: usize = 26;

/// Players listed at most slots
pub const DEFAULT_DEPTH: usize = 3;

/// Receivers listed from natural WRs before the open fifth spot
pub const WR_NATURAL_DEPTH: usize = 4;

/// Total receivers listed
pub const WR_DEPTH: usize = 5;

/// Corners listed. The secondary search seats all of them, so corners get
/// no backfill.
pub const CB_DEPTH: usize = 5;

/// Defensive tackles listed
pub const DT_DEPTH: usize = 5;

/// Middle linebackers listed
pub const MLB_DEPTH: usize = 4;
