/// Edge length of one zoning cell in world units.
pub const CELL_SIZE: f32 = 8.0;
/// Fixed height of every generated lot volume.
pub const LOT_HEIGHT: f32 = 5.0;

pub const MIN_LOT_WIDTH: u8 = 1;
pub const MAX_LOT_WIDTH: u8 = 8;
pub const MIN_LOT_DEPTH: u8 = 2;
pub const MAX_LOT_DEPTH: u8 = 6;

/// Blocks are never narrower than this, however narrow the lot.
pub const BLOCK_MIN_WIDTH: u8 = 2;
/// Blocks are always this deep so the deepest building fits behind any lot.
/// Intentionally independent of the lot's own depth.
pub const BLOCK_DEPTH: u8 = 6;

/// Cached transforms loaded with any position component beyond this bound
/// are reset to origin/identity.
pub const DEFAULT_WORLD_BOUND: f32 = 100_000.0;

/// Relative tolerance used when comparing transform components.
pub const TRANSFORM_REL_TOLERANCE: f32 = 1.0e-6;
/// Absolute floor for the comparison tolerance near zero.
pub const TRANSFORM_ABS_TOLERANCE: f32 = f32::EPSILON * 8.0;
