pub mod bucket;
pub mod coin;
pub mod sim;

pub use bucket::{Bucket, FloorSample};
pub use coin::{Coin, CoinKind, Contact};
pub use sim::{CoinSim, DEFAULT_FULL_CAPACITY};
