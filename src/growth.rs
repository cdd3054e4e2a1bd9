use crate::parser::DataPoint;
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Start, end and change of portfolio value for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGrowth {
    /// Sortable `YYYY-MM` key; zero-padded, so lexicographic order equals
    /// chronological order.
    pub month: String,
    pub start_value: i64,
    pub end_value: i64,
    pub growth: i64,
    /// `growth / start_value * 100`, defined as `0` when `start_value` is `0`.
    pub growth_percent: f64,
}

/// Formats the grouping key for a calendar date, e.g. `2024-01`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Collapses an ordered point series into one record per calendar month.
#[derive(Debug, Default)]
pub struct GrowthAggregator;

impl GrowthAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Produces one [`MonthlyGrowth`] per distinct month present in `points`,
    /// in ascending month order. Months absent from the data are absent from
    /// the output; each month's baseline is the previous emitted month's
    /// closing value, so a gap chains to whatever month came before it. The
    /// first month is anchored to its own opening observation.
    ///
    /// Pure function of its input; an empty series yields an empty result.
    pub fn aggregate(&self, points: &[DataPoint]) -> Vec<MonthlyGrowth> {
        let mut buckets: BTreeMap<String, Vec<&DataPoint>> = BTreeMap::new();
        for point in points {
            buckets
                .entry(month_key(point.calendar_date))
                .or_default()
                .push(point);
        }

        // Callers are not required to hand this stage a sorted series.
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|p| p.calendar_date);
        }

        debug!(
            "Aggregating {} points into {} month buckets",
            points.len(),
            buckets.len()
        );

        let mut records: Vec<MonthlyGrowth> = Vec::with_capacity(buckets.len());
        for (month, bucket) in buckets {
            let end_value = bucket[bucket.len() - 1].value;
            let start_value = match records.last() {
                Some(previous) => previous.end_value,
                None => bucket[0].value,
            };
            let growth = end_value - start_value;
            let growth_percent = if start_value == 0 {
                0.0
            } else {
                growth as f64 / start_value as f64 * 100.0
            };

            records.push(MonthlyGrowth {
                month,
                start_value,
                end_value,
                growth,
                growth_percent,
            });
        }

        records
    }
}
