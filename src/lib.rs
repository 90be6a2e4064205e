use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod math;

// Public re-exports for clean API
pub use crate::config::BucketParams;
pub use crate::core::bucket::{Bucket, FloorSample};
pub use crate::core::coin::{Coin, CoinKind, Contact};
pub use crate::core::sim::{CoinSim, DEFAULT_FULL_CAPACITY};

use crate::config::constants::MAX_STEP;

pub struct CoinfallPlugin;

impl Plugin for CoinfallPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CoinSim::new(&BucketParams::default()));
        app.add_systems(Update, advance_simulation);
    }
}

/// Steps the simulation once per frame. The frame delta is clamped so hitches
/// cannot tunnel coins through the floor; fully settled simulations are
/// skipped, which also leaves bevy's change detection untouched for them.
fn advance_simulation(time: Res<Time>, mut sim: ResMut<CoinSim>) {
    if sim.is_settled() {
        return;
    }
    let dt = time.delta_secs().min(MAX_STEP);
    sim.advance(dt);
}
