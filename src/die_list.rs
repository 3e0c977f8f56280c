use std::str::FromStr;

use num::traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::die::DieSpec;
use crate::util::{Count, Error, Face, Result};

/// Ordered dice whose faces are summed. A bare number is one uniform die.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DiceRepr", into = "Vec<DieSpec>")]
pub struct DiceList {
    value: Vec<DieSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DiceRepr {
    Single(Face),
    Many(Vec<DieSpec>),
}

impl DiceList {
    #[must_use]
    pub fn empty() -> Self {
        Self { value: Vec::new() }
    }

    #[must_use]
    pub fn repeat(count: usize, die: impl Into<DieSpec>) -> Self {
        Self {
            value: vec![die.into(); count],
        }
    }

    pub fn push(&mut self, die: impl Into<DieSpec>) {
        self.value.push(die.into());
    }

    pub fn extend(&mut self, dice: DiceList) {
        self.value.extend(dice.value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DieSpec] {
        &self.value
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DieSpec> {
        self.value.iter()
    }

    pub fn validate(&self) -> Result<()> {
        self.value.iter().try_for_each(DieSpec::validate)
    }

    /// True when no die has a face, so nothing can be rolled.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.value.iter().all(DieSpec::is_empty)
    }

    /// Number of equally likely face combinations. Dice without faces are
    /// skipped; a void list has none.
    pub fn combinations(&self) -> Result<Count> {
        self.validate()?;
        if self.is_void() {
            return Ok(Count::zero());
        }
        self.value
            .iter()
            .filter(|d| !d.is_empty())
            .try_fold(Count::one(), |acc, d| Ok(acc * d.face_count()?))
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Self::deserialize(&value).map_err(|e| Error::InvalidArgument(format!("{value}: {e}")))
    }
}

impl From<DiceRepr> for DiceList {
    fn from(value: DiceRepr) -> Self {
        match value {
            DiceRepr::Single(n) => Self::from(n),
            DiceRepr::Many(value) => Self { value },
        }
    }
}

impl From<DiceList> for Vec<DieSpec> {
    fn from(value: DiceList) -> Self {
        value.value
    }
}

impl From<DieSpec> for DiceList {
    fn from(value: DieSpec) -> Self {
        Self { value: vec![value] }
    }
}

impl From<i32> for DiceList {
    fn from(value: i32) -> Self {
        DieSpec::from(value).into()
    }
}

impl From<i64> for DiceList {
    fn from(value: i64) -> Self {
        DieSpec::from(value).into()
    }
}

impl<T> From<Vec<T>> for DiceList
where
    T: Into<DieSpec>,
{
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for DiceList
where
    T: Into<DieSpec>,
{
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<&[DieSpec]> for DiceList {
    fn from(value: &[DieSpec]) -> Self {
        Self {
            value: value.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for DiceList
where
    T: Into<DieSpec>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            value: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for DiceList {
    type Item = DieSpec;
    type IntoIter = std::vec::IntoIter<DieSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiceList {
    type Item = &'a DieSpec;
    type IntoIter = std::slice::Iter<'a, DieSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DiceList {
    type Err = Error;

    /// Parses `6`, `[6, 6]` or `[4, [1, 1, 2]]`.
    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::InvalidArgument(format!("{s:?}: {e}")))
    }
}

impl TryFrom<&str> for DiceList {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<serde_json::Value> for DiceList {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_json(value)
    }
}
