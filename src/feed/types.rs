//! Price history types

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A single price observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observed price
    pub price: Money,
    /// Ordering marker (e.g. block number), not wall-clock time
    pub sequence: u64,
}

impl PricePoint {
    pub fn new(price: Money, sequence: u64) -> Self {
        Self { price, sequence }
    }
}

/// Price observations ordered by ascending sequence.
///
/// Several points may share a sequence; their relative order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, stably sorting by sequence
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.sequence);
        Self { points }
    }

    /// Empty series
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterator over prices in sequence order
    pub fn prices(&self) -> impl Iterator<Item = Money> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Points whose sequence lies within `[from, to]`
    pub fn between(&self, from: u64, to: u64) -> PriceSeries {
        PriceSeries {
            points: self
                .points
                .iter()
                .filter(|p| p.sequence >= from && p.sequence <= to)
                .copied()
                .collect(),
        }
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
