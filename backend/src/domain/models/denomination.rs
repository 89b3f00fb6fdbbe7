//! Domain model for currency denominations and per-denomination counts.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::formatting::format_amount;

/// A face value of currency for which a physical count is recorded.
///
/// Variants are declared in ascending value order so the derived `Ord`
/// sorts denominations by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Denomination {
    Rp100,
    Rp200,
    Rp500,
    Rp1000,
    Rp2000,
    Rp5000,
    Rp10000,
    Rp20000,
    Rp50000,
    Rp100000,
}

impl Denomination {
    /// Every accepted denomination, ascending
    pub const ALL: [Denomination; 10] = [
        Denomination::Rp100,
        Denomination::Rp200,
        Denomination::Rp500,
        Denomination::Rp1000,
        Denomination::Rp2000,
        Denomination::Rp5000,
        Denomination::Rp10000,
        Denomination::Rp20000,
        Denomination::Rp50000,
        Denomination::Rp100000,
    ];

    /// Face value in currency units
    pub fn value(self) -> i64 {
        match self {
            Denomination::Rp100 => 100,
            Denomination::Rp200 => 200,
            Denomination::Rp500 => 500,
            Denomination::Rp1000 => 1_000,
            Denomination::Rp2000 => 2_000,
            Denomination::Rp5000 => 5_000,
            Denomination::Rp10000 => 10_000,
            Denomination::Rp20000 => 20_000,
            Denomination::Rp50000 => 50_000,
            Denomination::Rp100000 => 100_000,
        }
    }

    /// Label used for form lines and report columns, e.g. "Rp 1,000"
    pub fn label(self) -> String {
        format!("Rp {}", format_amount(self.value()))
    }

    /// Currency value of `count` notes of this denomination
    pub fn amount_for(self, count: u32) -> i64 {
        self.value() * i64::from(count)
    }
}

impl TryFrom<i64> for Denomination {
    type Error = UnknownDenomination;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or(UnknownDenomination(value))
    }
}

impl From<Denomination> for i64 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not an accepted denomination")]
pub struct UnknownDenomination(pub i64);

/// One count per denomination, always complete.
///
/// Construction zero-fills every denomination that was not supplied, so a
/// stored entry always carries exactly ten counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationCounts {
    counts: BTreeMap<Denomination, u32>,
}

impl DenominationCounts {
    /// All counts zero
    pub fn zero() -> Self {
        Self {
            counts: Denomination::ALL.into_iter().map(|d| (d, 0)).collect(),
        }
    }

    /// Build from a possibly partial set of counts; later duplicates win
    pub fn from_partial<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Denomination, u32)>,
    {
        let mut result = Self::zero();
        for (denomination, count) in counts {
            result.set(denomination, count);
        }
        result
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn set(&mut self, denomination: Denomination, count: u32) {
        self.counts.insert(denomination, count);
    }

    /// Iterate `(denomination, count)` in ascending denomination order
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }

    /// Σ(denomination × count)
    pub fn total_cash(&self) -> i64 {
        self.iter().map(|(d, c)| d.amount_for(c)).sum()
    }
}

impl Default for DenominationCounts {
    fn default() -> Self {
        Self::zero()
    }
}
