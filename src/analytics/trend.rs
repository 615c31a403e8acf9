//! Period-over-period comparison for trend displays.

use crate::job::{self, Job, Period};

use super::groups::GroupMetric;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub current_revenue: f64,
    pub previous_revenue: f64,
    pub change: f64,
    /// 0.0 when the previous period had no revenue.
    pub percent_change: f64,
}

/// Compare aggregate revenue between a current and a previous job set.
pub fn compare_periods(current: &[Job], previous: &[Job]) -> PeriodComparison {
    let current_revenue: f64 = current.iter().map(job::billing).sum();
    let previous_revenue: f64 = previous.iter().map(job::billing).sum();
    let change = current_revenue - previous_revenue;
    let percent_change = if previous_revenue == 0.0 {
        0.0
    } else {
        change / previous_revenue * 100.0
    };
    PeriodComparison {
        current_revenue,
        previous_revenue,
        change,
        percent_change,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub period: String,
    pub value: f64,
    pub change: f64,
    /// Change vs the prior bucket; 0.0 for the first bucket or when the
    /// prior bucket was 0.
    pub percent_change: f64,
}

/// Per-period values of the chosen metric in period order, each with the
/// change against the previous bucket.
pub fn metric_trend(jobs: &[Job], periods: &[Period], metric: GroupMetric) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = Vec::with_capacity(periods.len());
    let mut previous: Option<f64> = None;

    for period in periods {
        let in_period: Vec<&Job> = jobs
            .iter()
            .filter(|j| j.due_date.is_some_and(|d| period.contains(d)))
            .collect();
        let value = match metric {
            GroupMetric::Revenue => in_period.iter().map(|j| job::billing(j)).sum(),
            GroupMetric::Volume => in_period.iter().map(|j| j.quantity as f64).sum(),
            GroupMetric::Profit => in_period.iter().map(|j| job::profit(j)).sum(),
        };

        let (change, percent_change) = match previous {
            Some(prev) => {
                let change = value - prev;
                let pct = if prev == 0.0 { 0.0 } else { change / prev * 100.0 };
                (change, pct)
            }
            None => (0.0, 0.0),
        };

        points.push(TrendPoint {
            period: period.label.clone(),
            value,
            change,
            percent_change,
        });
        previous = Some(value);
    }

    points
}
