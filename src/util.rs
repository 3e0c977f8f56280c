use std::collections::BTreeMap;
use std::convert::Infallible;

use thiserror::Error;

pub type Face = i64;
pub type Count = num::BigUint;
pub type BigInt = num::BigInt;
pub type BigRatio = num::BigRational;
pub type DieMap = BTreeMap<Face, Count>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid die: {0} sides, expected at least 1")]
    InvalidDie(Face),
    #[error("overflow in outcome sum")]
    Overflow,
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

#[inline]
pub fn die_map() -> DieMap {
    DieMap::new()
}

#[inline]
pub(crate) fn ratio(num: &Count, denom: &Count) -> BigRatio {
    BigRatio::new(BigInt::from(num.clone()), BigInt::from(denom.clone()))
}
