use itertools::Itertools;
use num::traits::One;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::util::{die_map, Count, DieMap, Error, Face, Result};

/// One die: `Uniform(n)` has faces `1..=n`, `Explicit` lists every face,
/// repeats and non-positive values included.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DieSpec {
    Uniform(Face),
    Explicit(Vec<Face>),
}

impl DieSpec {
    #[must_use]
    pub fn uniform(sides: impl Into<Face>) -> Self {
        Self::Uniform(sides.into())
    }

    #[must_use]
    pub fn explicit<I, F>(faces: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Face>,
    {
        Self::Explicit(faces.into_iter().map(Into::into).collect())
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Uniform(n) if *n <= 0 => Err(Error::InvalidDie(*n)),
            _ => Ok(()),
        }
    }

    /// Number of faces, counting repeated values separately.
    pub fn face_count(&self) -> Result<Count> {
        self.validate()?;
        match self {
            Self::Uniform(n) => u64::try_from(*n)
                .map(Count::from)
                .map_err(|_| Error::InvalidDie(*n)),
            Self::Explicit(values) => Ok(Count::from(values.len())),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Explicit(values) if values.is_empty())
    }

    /// Face value to the number of faces showing it.
    pub fn outcomes(&self) -> Result<DieMap> {
        match self {
            Self::Uniform(n) => {
                self.validate()?;
                Ok((1..=*n).map(|x| (x, Count::one())).collect())
            }
            Self::Explicit(values) => {
                if values.is_empty() {
                    warn!("explicit die without faces contributes no outcomes");
                    return Ok(die_map());
                }
                Ok(values
                    .iter()
                    .copied()
                    .counts()
                    .into_iter()
                    .map(|(v, c)| (v, Count::from(c)))
                    .collect())
            }
        }
    }

    /// Draws one face. `None` for a die without faces; callers validate first.
    pub(crate) fn sample_rng<G>(&self, rng: &mut G) -> Option<Face>
    where
        G: Rng + ?Sized,
    {
        match self {
            Self::Uniform(n) => Some(rng.gen_range(1..=*n)),
            Self::Explicit(values) => values.choose(rng).copied(),
        }
    }
}

impl From<i32> for DieSpec {
    fn from(value: i32) -> Self {
        Self::Uniform(value.into())
    }
}

impl From<i64> for DieSpec {
    fn from(value: i64) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<i64>> for DieSpec {
    fn from(value: Vec<i64>) -> Self {
        Self::Explicit(value)
    }
}

impl From<Vec<i32>> for DieSpec {
    fn from(value: Vec<i32>) -> Self {
        Self::explicit(value)
    }
}

impl<const N: usize> From<[i64; N]> for DieSpec {
    fn from(value: [i64; N]) -> Self {
        Self::explicit(value)
    }
}

impl<const N: usize> From<[i32; N]> for DieSpec {
    fn from(value: [i32; N]) -> Self {
        Self::explicit(value)
    }
}
