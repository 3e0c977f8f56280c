use bon::Builder;
use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use tracing::debug;

use crate::die_list::DiceList;
use crate::distribution::Distribution;
use crate::util::{die_map, Count, Error, Face, Result};
use crate::TALLY_SIZE;

/// Rolls dice by drawing one face per die, without building the
/// distribution. Owns its generator; seed it for reproducible rolls.
#[derive(Debug, Builder)]
pub struct Roller<G = ThreadRng>
where
    G: Rng,
{
    #[builder(finish_fn)]
    rng: G,
    #[builder(default = TALLY_SIZE)]
    tally_size: u32,
}

impl Default for Roller<ThreadRng> {
    fn default() -> Self {
        Self::builder().build(thread_rng())
    }
}

impl<G> Roller<G>
where
    G: Rng,
{
    #[must_use]
    pub fn new(rng: G) -> Self {
        Self::builder().build(rng)
    }

    #[must_use]
    pub fn tally_size(&self) -> u32 {
        self.tally_size
    }

    pub fn roll<D>(&mut self, dice: D) -> Result<Face>
    where
        D: TryInto<DiceList>,
        Error: From<D::Error>,
    {
        self.roll_list(&dice.try_into()?)
    }

    /// One sum of independent draws. All dice are checked before drawing.
    pub fn roll_list(&mut self, dice: &DiceList) -> Result<Face> {
        dice.validate()?;
        if dice.is_void() {
            return Err(Error::InvalidArgument("dice list has no faces".into()));
        }

        let mut sum: Face = 0;
        for die in dice {
            if let Some(x) = die.sample_rng(&mut self.rng) {
                sum = sum.checked_add(x).ok_or(Error::Overflow)?;
            }
        }
        Ok(sum)
    }

    /// Empirical outcome counts from `tally_size` rolls.
    pub fn tally<D>(&mut self, dice: D) -> Result<Distribution>
    where
        D: TryInto<DiceList>,
        Error: From<D::Error>,
    {
        let n = self.tally_size;
        self.tally_n(dice, n)
    }

    pub fn tally_n<D>(&mut self, dice: D, n: u32) -> Result<Distribution>
    where
        D: TryInto<DiceList>,
        Error: From<D::Error>,
    {
        let dice = dice.try_into()?;
        let mut map = die_map();
        for _ in 0..n {
            let k = self.roll_list(&dice)?;
            *map.entry(k).or_insert_with(Count::default) += 1u32;
        }
        debug!(rolls = n, outcomes = map.len(), "tallied rolls");
        Ok(Distribution::from(map))
    }
}

/// Rolls the dice once with the calling thread's generator.
pub fn roll_once<D>(dice: D) -> Result<Face>
where
    D: TryInto<DiceList>,
    Error: From<D::Error>,
{
    Roller::default().roll(dice)
}
