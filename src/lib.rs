mod die;
mod die_list;
mod distribution;
mod plot;
mod probability;
mod roller;
mod util;

pub mod defs;

pub use die::DieSpec;
pub use die_list::DiceList;
pub use distribution::{build_distribution, Distribution};
pub use plot::{render_distribution, Render};
pub use probability::{compute_probabilities, Precision, Probabilities};
pub use roller::{roll_once, Roller};
pub use util::{BigInt, BigRatio, Count, DieMap, Error, Face, Result};

const TALLY_SIZE: u32 = 100_000;
