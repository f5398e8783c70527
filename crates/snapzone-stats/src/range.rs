use serde::Serialize;

use crate::reading::Reading;

/// Online min/max/average collector with an inclusive acceptance window.
///
/// Values outside `[lower_bound, upper_bound]` and readings that are not a
/// number are ignored. Everything else updates the running minimum,
/// maximum, sum and count in a single pass; no values are stored.
///
/// # Examples
///
/// ```
/// use snapzone_stats::{range::RangeAccumulator, reading::Reading};
///
/// let mut acc = RangeAccumulator::at_least(0.0);
/// acc.add(Reading::Number(4.0));
/// acc.add(Reading::Number(-1.0)); // below bound, ignored
/// acc.add(Reading::NotANumber); // ignored
/// acc.add(Reading::Number(2.0));
///
/// let summary = acc.summary();
/// assert_eq!(summary.count, 2);
/// assert_eq!(summary.min, Some(2.0));
/// assert_eq!(summary.max, Some(4.0));
/// assert_eq!(summary.avg, Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct RangeAccumulator {
    lower_bound: f64,
    upper_bound: f64,
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
}

/// Snapshot of a [`RangeAccumulator`].
///
/// `min`, `max` and `avg` are `None` while `count` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub count: u64,
}

impl Default for RangeAccumulator {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RangeAccumulator {
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            min: upper_bound,
            max: lower_bound,
            sum: 0.0,
            count: 0,
        }
    }

    /// Accepts every number.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Accepts numbers not below `lower_bound`.
    #[must_use]
    pub fn at_least(lower_bound: f64) -> Self {
        Self::new(lower_bound, f64::INFINITY)
    }

    /// Adds a reading, returning whether it passed the bound filter.
    pub fn add(&mut self, reading: Reading) -> bool {
        let Reading::Number(value) = reading else {
            return false;
        };
        if value < self.lower_bound || value > self.upper_bound {
            return false;
        }
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        true
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn summary(&self) -> RangeSummary {
        if self.count == 0 {
            return RangeSummary {
                min: None,
                max: None,
                avg: None,
                count: 0,
            };
        }
        RangeSummary {
            min: Some(self.min),
            max: Some(self.max),
            avg: Some(self.sum / self.count as f64),
            count: self.count,
        }
    }
}
