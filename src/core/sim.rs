//! Simulation driver
//!
//! Owns the coin collection, the bucket, and the cumulative fill/spill
//! targets supplied from outside. Each target increment animates exactly one
//! falling coin; the rest of a batch is placed pre-settled so catch-up is
//! instant.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BucketParams;
use crate::core::bucket::Bucket;
use crate::core::coin::{Coin, CoinKind};
use crate::math::{Real, Vector};

/// Units that fill the bucket to the rim when no target has been set yet.
pub const DEFAULT_FULL_CAPACITY: u32 = 1000;

/// One independent bucket simulation. Callers hold the value and drive it;
/// instances share no state.
#[derive(Resource)]
pub struct CoinSim {
    bucket: Bucket,
    coins: Vec<Coin>,
    fill: u32,
    spill: u32,
    full_capacity: u32,
    drop_height: Real,
    rng: StdRng,
}

impl CoinSim {
    pub fn new(params: &BucketParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and replay.
    pub fn with_rng(params: &BucketParams, rng: StdRng) -> Self {
        Self {
            bucket: Bucket::new(params),
            coins: Vec::new(),
            fill: 0,
            spill: 0,
            full_capacity: DEFAULT_FULL_CAPACITY,
            drop_height: params.drop_height,
            rng,
        }
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Read-only snapshot for rendering; ordering is unspecified.
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    pub fn fill(&self) -> u32 {
        self.fill
    }

    pub fn spill(&self) -> u32 {
        self.spill
    }

    /// True once every coin is at rest; redraw work may be skipped.
    pub fn is_settled(&self) -> bool {
        self.coins.iter().all(|coin| coin.stopped)
    }

    /// Clear all coins, counts, and the height field.
    pub fn reset(&mut self) {
        self.coins.clear();
        self.bucket.reset();
        self.fill = 0;
        self.spill = 0;
    }

    /// Adjust the cumulative targets.
    ///
    /// Deltas are taken against the previously recorded counts; a decrease in
    /// either count restarts the simulation from empty first (nobody removes
    /// coins one at a time).
    pub fn set_targets(&mut self, fill: u32, spill: u32, full_capacity: u32) {
        self.full_capacity = full_capacity.max(1);
        let fill_delta = fill.saturating_sub(self.fill);
        let spill_delta = spill.saturating_sub(self.spill);
        if fill < self.fill || spill < self.spill {
            self.reset();
        }
        self.spawn_batch(fill_delta, CoinKind::Fill);
        self.spawn_batch(spill_delta, CoinKind::Spill);
        self.fill = fill;
        self.spill = spill;
    }

    /// Step every active coin by `dt` seconds.
    ///
    /// `dt` is expected pre-clamped by the caller; non-finite or non-positive
    /// values are rejected here as a boundary guard.
    pub fn advance(&mut self, dt: Real) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for coin in &mut self.coins {
            coin.step(&mut self.bucket, self.full_capacity, &mut self.rng, dt);
        }
    }

    /// All but the newest coin of a batch are placed pre-settled; the last
    /// one is dropped from above so each increment animates exactly one coin.
    fn spawn_batch(&mut self, mut count: u32, kind: CoinKind) {
        if count == 0 {
            return;
        }
        while count > 1 {
            count -= 1;
            let coin = self.place_at_rest(kind);
            self.coins.push(coin);
        }
        let x = (self.rng.random::<Real>() - 0.5) * self.bucket.bottom_width();
        self.coins
            .push(Coin::new(Vector::new(x, self.drop_height), kind));
    }

    /// Synthesize a settled coin in the kind's resting band, raising the
    /// height field exactly as a live landing would.
    fn place_at_rest(&mut self, kind: CoinKind) -> Coin {
        let (band_width, offset) = match kind {
            CoinKind::Fill => (self.bucket.bottom_half_width(), 0.0),
            CoinKind::Spill => (
                self.bucket.bottom_half_width() / self.bucket.band_fraction(),
                self.bucket.top_half_width(),
            ),
        };
        let mut x = self.rng.random::<Real>() * band_width + offset;
        if self.rng.random::<Real>() < 0.5 {
            x = -x;
        }
        let y = self.bucket.settle(x, 0.0, self.full_capacity);
        Coin::stopped_at(Vector::new(x, y), kind)
    }
}
