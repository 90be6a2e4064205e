// Physical constants for the coin bucket simulation
use crate::math::Real;

// Global physics
pub const GRAVITY: Real = 9.82;
// Visual unit multiplier, not physically literal.
pub const WORLD_SCALE: Real = 3.0;
pub const COIN_BOUNCE: Real = 0.4;

// Container shape
pub const CONE_FRACTION: Real = 0.9;

// Collision response
pub const WALL_KICK_SLOPE: Real = 50.0;
pub const SETTLE_MIN_VY: Real = -10.0;
pub const SLOPE_FACTOR: Real = 0.2;
pub const SLOPE_FACTOR_MAX: Real = 3.0;
pub const SPILL_EJECT_SPEED: Real = 35.0;
pub const MIN_ESCAPE_SPEED: Real = 6.0;

// Integration
pub const MAX_STEP: Real = 0.1;

// Height-field cells spanned by the bucket interior, at any resolution.
pub const BUCKET_FIELD_SPAN: usize = 20;
