//! Falling coins and their collision response
//!
//! Coins integrate under gravity, collide with the rising floor and the
//! bucket walls, and either bounce or settle. A settling coin freezes and
//! raises the height field where it came to rest.

use rand::Rng;

use crate::config::constants::{
    COIN_BOUNCE, GRAVITY, MIN_ESCAPE_SPEED, SETTLE_MIN_VY, SLOPE_FACTOR, SLOPE_FACTOR_MAX,
    SPILL_EJECT_SPEED, WALL_KICK_SLOPE, WORLD_SCALE,
};
use crate::core::bucket::Bucket;
use crate::math::{Real, Vector, lerp, zero_vector};

/// Which population a coin belongs to; fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinKind {
    /// Counted inside the bucket; settles only once inside.
    Fill,
    /// Overflow; settles only once outside the silhouette.
    Spill,
}

/// Contact recorded by the collision test and consumed by the response in
/// the same tick. Not meaningful outside a single update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    pub height: Real,
    pub slope: Real,
    pub with_wall: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub position: Vector,
    /// Where the coin was last tick; wall crossings are detected against it.
    pub prev_position: Vector,
    pub velocity: Vector,
    pub kind: CoinKind,
    /// Terminal; a stopped coin is excluded from further integration.
    pub stopped: bool,
    pub contact: Contact,
}

impl Coin {
    pub fn new(position: Vector, kind: CoinKind) -> Self {
        Self {
            position,
            prev_position: position,
            velocity: zero_vector(),
            kind,
            stopped: false,
            contact: Contact::default(),
        }
    }

    /// A coin already at rest, as batch catch-up places them.
    pub fn stopped_at(position: Vector, kind: CoinKind) -> Self {
        Self {
            stopped: true,
            ..Self::new(position, kind)
        }
    }

    #[inline(always)]
    pub fn is_fill(&self) -> bool {
        self.kind == CoinKind::Fill
    }

    /// Collision test against the floor, then against the wall.
    ///
    /// Records the contact scratch state and reports whether either
    /// condition fired.
    fn collide(&mut self, bucket: &Bucket) -> bool {
        let sample = bucket.floor_sample(self.position.x, self.position.y);
        let floor = sample.floor_height();
        self.contact = Contact {
            // Biased toward the lower neighbor so the rebound leans away
            // from the nearest wall.
            height: lerp(0.7, floor, sample.lower()),
            slope: sample.slope(),
            with_wall: false,
        };
        if self.position.y <= floor {
            return true;
        }
        // Below the rim, crossing the silhouette within one step is a wall
        // hit rather than a floor hit.
        if bucket.normalized_height(self.position.y) < 1.0 {
            let inside = bucket.contains(self.position.x, self.position.y);
            let was_inside = bucket.contains(self.prev_position.x, self.prev_position.y);
            if inside != was_inside {
                self.contact = Contact {
                    height: (self.position.y + self.prev_position.y) * 0.5,
                    slope: if self.position.x < 0.0 {
                        WALL_KICK_SLOPE
                    } else {
                        -WALL_KICK_SLOPE
                    },
                    with_wall: true,
                };
                return true;
            }
        }
        false
    }

    /// Push the coin back out of whatever it hit.
    fn uncollide(&mut self) {
        if self.contact.with_wall {
            self.position = self.prev_position;
        } else {
            self.velocity.y += (self.contact.height - self.position.y) * WORLD_SCALE;
            self.position.y = self.contact.height;
        }
    }

    /// Advance by `dt` seconds and resolve any collision against the bucket.
    pub fn step(
        &mut self,
        bucket: &mut Bucket,
        full_capacity: u32,
        rng: &mut impl Rng,
        dt: Real,
    ) {
        if self.stopped {
            return;
        }
        self.prev_position = self.position;
        self.velocity.y -= dt * GRAVITY * WORLD_SCALE;
        self.position += self.velocity * (dt * WORLD_SCALE);
        if !self.collide(bucket) {
            return;
        }

        self.velocity.x *= 0.5;
        self.uncollide();
        let inside = bucket.contains(self.position.x, self.position.y);

        // Settle once the rebound is small and downward, except off a wall.
        if self.velocity.y < 0.0 && self.velocity.y > SETTLE_MIN_VY && !self.contact.with_wall {
            if self.is_fill() && !inside {
                // Yet to bounce back into the bucket.
            } else {
                self.stopped = true;
                bucket.settle(self.position.x, self.position.y, full_capacity);
                return;
            }
        }

        let slope = self.contact.slope;
        let mut factor = (slope.abs() * SLOPE_FACTOR).min(SLOPE_FACTOR_MAX);
        factor *= if slope < 0.0 { -1.0 } else { 1.0 };

        match (self.kind, inside) {
            (CoinKind::Fill, true) => {
                self.velocity.y =
                    self.velocity.y.abs() * COIN_BOUNCE * (rng.random::<Real>() + 0.1);
                self.velocity.x = (rng.random::<Real>() - 0.5 + factor) * WORLD_SCALE;
                if self.contact.with_wall {
                    // Wall hits kill the vertical bounce for fill coins.
                    self.velocity.x *= 0.2;
                    self.velocity.y = 0.0;
                }
            }
            (CoinKind::Fill, false) => {
                self.velocity.y =
                    self.velocity.y.abs() * COIN_BOUNCE * (rng.random::<Real>() + 0.1);
                let overshoot = self.position.x.abs() - bucket.bottom_width();
                let toward_center = if self.position.x < 0.0 { -1.0 } else { 1.0 };
                self.velocity.x = overshoot * 0.05 * WORLD_SCALE * toward_center;
                // Forced back up toward the opening.
                self.velocity.y = self.velocity.y.max(MIN_ESCAPE_SPEED * WORLD_SCALE);
            }
            (CoinKind::Spill, true) => {
                // Stray spill coins are relaunched up and over the nearest wall.
                let wall = if self.position.x < 0.0 {
                    -bucket.top_half_width()
                } else {
                    bucket.top_half_width()
                };
                self.velocity.x = (wall - self.position.x) * 0.04 * WORLD_SCALE;
                self.velocity.y = SPILL_EJECT_SPEED * WORLD_SCALE;
            }
            (CoinKind::Spill, false) => {
                self.velocity.x = factor * WORLD_SCALE;
                self.velocity.y =
                    -self.velocity.y * COIN_BOUNCE * (rng.random::<Real>() + 0.1);
            }
        }
    }
}
