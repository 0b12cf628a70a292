pub mod ema;
pub mod stats;

pub use ema::ema;
pub use stats::{average_volume, mean, population_std_dev};
