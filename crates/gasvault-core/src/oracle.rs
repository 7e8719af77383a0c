use serde::{Deserialize, Serialize};
use time::Date;

use crate::{EngineError, ValidationError};

/// One observation in the historical/forecast price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}

/// Behavior for queries outside the observed date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationPolicy {
    /// Fail the query with `EngineError::PriceOutOfRange`.
    #[default]
    Reject,
    /// Return the first/last observation.
    ClampToNearest,
}

/// Point-in-time price lookup over a sorted observation series.
///
/// Queries are read-only; one oracle may be shared across parallel ranking
/// workers. Interpolation is exact at knot points and linear in whole days
/// between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOracle {
    points: Vec<PricePoint>,
    policy: ExtrapolationPolicy,
}

impl PriceOracle {
    pub fn new(
        points: Vec<PricePoint>,
        policy: ExtrapolationPolicy,
    ) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptyPriceSeries);
        }

        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::UnsortedPriceSeries { index: index + 1 });
            }
        }

        for point in &points {
            if !point.price.is_finite() {
                return Err(ValidationError::NonFinitePrice { date: point.date });
            }
        }

        Ok(Self { points, policy })
    }

    pub fn first_date(&self) -> Date {
        self.points[0].date
    }

    pub fn last_date(&self) -> Date {
        self.points[self.points.len() - 1].date
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price for `date`: exact at observations, linearly interpolated between
    /// the two bracketing observations otherwise. Bracket lookup is a binary
    /// search, O(log n) per query.
    pub fn price_at(&self, date: Date) -> Result<f64, EngineError> {
        let first = self.first_date();
        let last = self.last_date();

        if date < first || date > last {
            return match self.policy {
                ExtrapolationPolicy::ClampToNearest => {
                    if date < first {
                        Ok(self.points[0].price)
                    } else {
                        Ok(self.points[self.points.len() - 1].price)
                    }
                }
                ExtrapolationPolicy::Reject => {
                    Err(EngineError::PriceOutOfRange { date, first, last })
                }
            };
        }

        let upper = self.points.partition_point(|point| point.date < date);
        let after = self.points[upper];
        if after.date == date {
            return Ok(after.price);
        }

        let before = self.points[upper - 1];
        let span = (after.date - before.date).whole_days() as f64;
        let elapsed = (date - before.date).whole_days() as f64;
        let weight = elapsed / span;

        Ok(before.price + (after.price - before.price) * weight)
    }
}
