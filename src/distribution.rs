use std::collections::btree_map;
use std::collections::BTreeMap;

use itertools::Itertools;
use num::traits::{ToPrimitive, Zero};
use tracing::{debug, trace};

use crate::die::DieSpec;
use crate::die_list::DiceList;
use crate::util::{ratio, BigInt, BigRatio, Count, DieMap, Error, Face, Result};

/// Outcome counts for the sum of a list of dice, ordered by outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: DieMap,
}

impl Distribution {
    pub fn build(dice: &DiceList) -> Result<Self> {
        dice.validate()?;
        let counts = build_counts(dice.as_slice())?;
        debug!(
            dice = dice.len(),
            outcomes = counts.len(),
            "built outcome distribution"
        );
        Ok(Self { counts })
    }

    /// Distribution of the sum of one roll from each side.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        merge(&self.counts, &other.counts).map(|counts| Self { counts })
    }

    #[must_use]
    pub fn counts(&self) -> &DieMap {
        &self.counts
    }

    #[must_use]
    pub fn into_counts(self) -> DieMap {
        self.counts
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Face, Count> {
        self.counts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Count {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn count_of(&self, outcome: Face) -> Count {
        self.counts.get(&outcome).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn min_outcome(&self) -> Option<Face> {
        self.counts.keys().next().copied()
    }

    #[must_use]
    pub fn max_outcome(&self) -> Option<Face> {
        self.counts.keys().next_back().copied()
    }

    /// Most frequent outcomes, ascending.
    #[must_use]
    pub fn modes(&self) -> Vec<Face> {
        self.counts
            .iter()
            .max_set_by_key(|(_, c)| *c)
            .into_iter()
            .map(|(k, _)| *k)
            .collect()
    }

    /// Smallest outcome whose cumulative count reaches half the total.
    #[must_use]
    pub fn median(&self) -> Option<Face> {
        let total = self.total();
        let mut acc = Count::zero();
        for (k, c) in &self.counts {
            acc += c;
            if acc.clone() * 2u32 >= total {
                return Some(*k);
            }
        }
        None
    }

    pub fn exact_mean(&self) -> Result<BigRatio> {
        let total = self.nonzero_total()?;
        let sum = self.counts.iter().fold(BigInt::zero(), |acc, (k, c)| {
            acc + BigInt::from(*k) * BigInt::from(c.clone())
        });
        Ok(BigRatio::new(sum, BigInt::from(total)))
    }

    pub fn exact_variance(&self) -> Result<BigRatio> {
        let mean = self.exact_mean()?;
        let total = self.total();
        Ok(self.counts.iter().fold(BigRatio::zero(), |acc, (k, c)| {
            let d = BigRatio::from_integer(BigInt::from(*k)) - &mean;
            acc + &d * &d * ratio(c, &total)
        }))
    }

    pub fn mean(&self) -> Result<f64> {
        self.exact_mean()?.to_f64().ok_or(Error::Overflow)
    }

    pub fn variance(&self) -> Result<f64> {
        self.exact_variance()?.to_f64().ok_or(Error::Overflow)
    }

    pub fn stddev(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Counts as machine integers; `None` if any count exceeds `u64`.
    #[must_use]
    pub fn to_u64_counts(&self) -> Option<BTreeMap<Face, u64>> {
        self.counts
            .iter()
            .map(|(k, c)| c.to_u64().map(|c| (*k, c)))
            .collect()
    }

    pub(crate) fn nonzero_total(&self) -> Result<Count> {
        let total = self.total();
        if total.is_zero() {
            return Err(Error::InvalidArgument("dice list has no outcomes".into()));
        }
        Ok(total)
    }
}

impl From<DieMap> for Distribution {
    fn from(counts: DieMap) -> Self {
        Self {
            counts: counts.into_iter().filter(|(_, c)| !c.is_zero()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (&'a Face, &'a Count);
    type IntoIter = btree_map::Iter<'a, Face, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome counts for the sum of all dice in the list.
pub fn build_distribution<D>(dice: D) -> Result<Distribution>
where
    D: TryInto<DiceList>,
    Error: From<D::Error>,
{
    Distribution::build(&dice.try_into()?)
}

fn build_counts(dice: &[DieSpec]) -> Result<DieMap> {
    match dice {
        [] => Ok(DieMap::new()),
        [die] => die.outcomes(),
        _ => {
            let (lhs, rhs) = dice.split_at(dice.len() / 2);
            let lhs = build_counts(lhs)?;
            let rhs = build_counts(rhs)?;
            merge_owned(lhs, rhs)
        }
    }
}

fn merge_owned(lhs: DieMap, rhs: DieMap) -> Result<DieMap> {
    if lhs.is_empty() {
        return Ok(rhs);
    }
    if rhs.is_empty() {
        return Ok(lhs);
    }
    merge(&lhs, &rhs)
}

/// Convolution of two outcome maps. An empty map is the identity.
pub(crate) fn merge(lhs: &DieMap, rhs: &DieMap) -> Result<DieMap> {
    if lhs.is_empty() {
        return Ok(rhs.clone());
    }
    if rhs.is_empty() {
        return Ok(lhs.clone());
    }

    let mut map = DieMap::new();
    for (k1, c1) in lhs {
        for (k2, c2) in rhs {
            let k = k1.checked_add(*k2).ok_or(Error::Overflow)?;
            *map.entry(k).or_default() += c1 * c2;
        }
    }

    trace!(
        lhs = lhs.len(),
        rhs = rhs.len(),
        outcomes = map.len(),
        "merged outcome maps"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(Face, u32)]) -> DieMap {
        pairs.iter().map(|&(k, c)| (k, Count::from(c))).collect()
    }

    #[test]
    fn merge_accumulates_colliding_sums() {
        let d2 = counts(&[(1, 1), (2, 1)]);
        let merged = merge(&d2, &d2).unwrap();
        assert_eq!(merged, counts(&[(2, 1), (3, 2), (4, 1)]));
    }

    #[test]
    fn merge_multiplies_counts() {
        let lhs = counts(&[(0, 3), (-1, 2)]);
        let rhs = counts(&[(1, 5)]);
        assert_eq!(merge(&lhs, &rhs).unwrap(), counts(&[(0, 10), (1, 15)]));
    }

    #[test]
    fn empty_map_is_identity() {
        let d3 = counts(&[(1, 1), (2, 1), (3, 1)]);
        assert_eq!(merge(&d3, &DieMap::new()).unwrap(), d3);
        assert_eq!(merge(&DieMap::new(), &d3).unwrap(), d3);
        assert!(merge(&DieMap::new(), &DieMap::new()).unwrap().is_empty());
    }

    #[test]
    fn outcome_overflow_is_reported() {
        let lhs = counts(&[(Face::MAX, 1)]);
        let rhs = counts(&[(1, 1)]);
        assert_eq!(merge(&lhs, &rhs), Err(Error::Overflow));
    }

    #[test]
    fn counts_do_not_overflow() {
        let big = DieMap::from([(0, Count::from(u64::MAX))]);
        let merged = merge(&big, &big).unwrap();
        let expected = Count::from(u64::MAX) * Count::from(u64::MAX);
        assert_eq!(merged[&0], expected);
    }

    #[test]
    fn empty_list_builds_empty_distribution() {
        let dist = Distribution::build(&DiceList::empty()).unwrap();
        assert!(dist.is_empty());
        assert!(dist.total().is_zero());
        assert_eq!(dist.median(), None);
        assert!(matches!(dist.mean(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn invalid_die_wins_over_overflow() {
        let dice = DiceList::from(vec![
            DieSpec::explicit([Face::MAX]),
            DieSpec::explicit([1]),
            DieSpec::uniform(5),
            DieSpec::uniform(0),
        ]);
        assert_eq!(Distribution::build(&dice), Err(Error::InvalidDie(0)));
        assert_eq!(
            Distribution::build(&DiceList::from(vec![
                DieSpec::explicit([Face::MAX]),
                DieSpec::explicit([1]),
            ])),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn split_point_does_not_matter() {
        let dice = [
            DieSpec::uniform(4),
            DieSpec::explicit([0, 0, 5]),
            DieSpec::uniform(6),
            DieSpec::explicit([-3, 1]),
            DieSpec::uniform(2),
        ];
        let expected = build_counts(&dice).unwrap();
        for split in 1..dice.len() {
            let (l, r) = dice.split_at(split);
            let merged = merge(&build_counts(l).unwrap(), &build_counts(r).unwrap()).unwrap();
            assert_eq!(merged, expected, "split at {split}");
        }
    }

    #[test]
    fn statistics_of_two_d6() {
        let dist = build_distribution([6, 6]).unwrap();
        assert_eq!(dist.exact_mean().unwrap(), BigRatio::from_integer(7.into()));
        assert_eq!(
            dist.exact_variance().unwrap(),
            BigRatio::new(35.into(), 6.into())
        );
        assert!((dist.stddev().unwrap() - (35.0f64 / 6.0).sqrt()).abs() < 1e-12);
        assert_eq!(dist.modes(), vec![7]);
        assert_eq!(dist.median(), Some(7));
        assert_eq!(dist.min_outcome(), Some(2));
        assert_eq!(dist.max_outcome(), Some(12));
    }

    #[test]
    fn modes_keep_ties() {
        let dist = build_distribution(DieSpec::explicit([1, 1, 4, 4, 2])).unwrap();
        assert_eq!(dist.modes(), vec![1, 4]);
        assert_eq!(dist.count_of(4), Count::from(2u32));
        assert_eq!(dist.count_of(3), Count::from(0u32));
    }

    #[test]
    fn u64_view_for_charting() {
        let dist = build_distribution([4, 4]).unwrap();
        let view = dist.to_u64_counts().unwrap();
        assert_eq!(view.get(&5), Some(&4));
        assert_eq!(view.values().sum::<u64>(), 16);

        let huge = Distribution::from(DieMap::from([(0, Count::from(u64::MAX) + 1u32)]));
        assert_eq!(huge.to_u64_counts(), None);
    }
}
