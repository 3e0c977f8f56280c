use std::collections::BTreeMap;

use num::traits::ToPrimitive;

use crate::die_list::DiceList;
use crate::distribution::Distribution;
use crate::util::{ratio, BigRatio, Error, Face, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    Exact,
    #[default]
    Approx,
}

impl From<bool> for Precision {
    /// `true` selects exact rational output.
    fn from(exact: bool) -> Self {
        if exact {
            Self::Exact
        } else {
            Self::Approx
        }
    }
}

/// Outcome probabilities, ordered by outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum Probabilities {
    Exact(BTreeMap<Face, BigRatio>),
    Approx(BTreeMap<Face, f64>),
}

impl Probabilities {
    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Exact(_) => Precision::Exact,
            Self::Approx(_) => Precision::Approx,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(m) => m.len(),
            Self::Approx(m) => m.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn outcomes(&self) -> Vec<Face> {
        match self {
            Self::Exact(m) => m.keys().copied().collect(),
            Self::Approx(m) => m.keys().copied().collect(),
        }
    }

    #[must_use]
    pub fn get_f64(&self, outcome: Face) -> Option<f64> {
        match self {
            Self::Exact(m) => m.get(&outcome).and_then(ToPrimitive::to_f64),
            Self::Approx(m) => m.get(&outcome).copied(),
        }
    }

    #[must_use]
    pub fn as_exact(&self) -> Option<&BTreeMap<Face, BigRatio>> {
        match self {
            Self::Exact(m) => Some(m),
            Self::Approx(_) => None,
        }
    }

    #[must_use]
    pub fn as_approx(&self) -> Option<&BTreeMap<Face, f64>> {
        match self {
            Self::Exact(_) => None,
            Self::Approx(m) => Some(m),
        }
    }
}

impl Distribution {
    pub fn probabilities(&self, precision: Precision) -> Result<Probabilities> {
        match precision {
            Precision::Exact => self.exact_probabilities().map(Probabilities::Exact),
            Precision::Approx => self.approx_probabilities().map(Probabilities::Approx),
        }
    }

    pub fn exact_probabilities(&self) -> Result<BTreeMap<Face, BigRatio>> {
        let total = self.nonzero_total()?;
        Ok(self
            .iter()
            .map(|(k, c)| (*k, ratio(c, &total)))
            .collect())
    }

    pub fn approx_probabilities(&self) -> Result<BTreeMap<Face, f64>> {
        let total = self.nonzero_total()?;
        self.iter()
            .map(|(k, c)| {
                ratio(c, &total)
                    .to_f64()
                    .map(|p| (*k, p))
                    .ok_or(Error::Overflow)
            })
            .collect()
    }
}

/// Probability of every outcome for the sum of the dice. Fails if the dice
/// have no outcomes at all.
pub fn compute_probabilities<D, P>(dice: D, precision: P) -> Result<Probabilities>
where
    D: TryInto<DiceList>,
    Error: From<D::Error>,
    P: Into<Precision>,
{
    Distribution::build(&dice.try_into()?)?.probabilities(precision.into())
}

#[cfg(test)]
mod tests {
    use num::traits::{One, Zero};

    use super::*;
    use crate::die::DieSpec;
    use crate::util::BigInt;

    #[test]
    fn exact_two_d6_sums_to_one() {
        let p = compute_probabilities([6, 6], true).unwrap();
        let exact = p.as_exact().unwrap();
        let sum: BigRatio = exact.values().sum();
        assert!(sum.is_one());
        assert_eq!(exact[&7], BigRatio::new(BigInt::from(1), BigInt::from(6)));
        assert_eq!(exact[&2], BigRatio::new(BigInt::from(1), BigInt::from(36)));
    }

    #[test]
    fn fractions_are_reduced() {
        let p = compute_probabilities(DieSpec::explicit([1, 1, 2, 2, 3, 3]), Precision::Exact)
            .unwrap();
        let third = BigRatio::new(BigInt::from(1), BigInt::from(3));
        assert!(p.as_exact().unwrap().values().all(|x| *x == third));
        assert_eq!(*p.as_exact().unwrap()[&1].denom(), BigInt::from(3));
    }

    #[test]
    fn approx_two_d6_sums_to_one() {
        let p = compute_probabilities([6, 6], false).unwrap();
        let sum: f64 = p.as_approx().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(p.precision(), Precision::Approx);
        assert_eq!(p.outcomes(), (2..=12).collect::<Vec<_>>());
    }

    #[test]
    fn single_repeated_face_is_certain() {
        let p = compute_probabilities(vec![vec![5, 5]], Precision::Approx).unwrap();
        assert_eq!(p, Probabilities::Approx(BTreeMap::from([(5, 1.0)])));
    }

    #[test]
    fn no_outcomes_is_an_error() {
        let empty: Vec<DieSpec> = Vec::new();
        let err = compute_probabilities(empty, true).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let faceless = DieSpec::Explicit(Vec::new());
        assert!(compute_probabilities(faceless, false).is_err());
    }

    #[test]
    fn errors_come_from_the_dice() {
        assert_eq!(compute_probabilities(0, true), Err(Error::InvalidDie(0)));
        assert!(matches!(
            compute_probabilities("abc", false),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn exact_and_approx_agree() {
        let dist = crate::build_distribution([4, 6, 8]).unwrap();
        let exact = dist.probabilities(Precision::Exact).unwrap();
        let approx = dist.probabilities(Precision::Approx).unwrap();
        for k in exact.outcomes() {
            let a = exact.get_f64(k).unwrap();
            let b = approx.get_f64(k).unwrap();
            assert!((a - b).abs() < 1e-15);
        }
        assert!(exact.as_exact().unwrap().values().all(|p| !p.is_zero()));
    }
}
