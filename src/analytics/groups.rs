//! Grouping reducers: roll jobs up by client, process type, or period and
//! attach each group's share of the grand total.

use std::collections::HashMap;

use crate::job::{self, Job, Period};

/// Metric used for ordering groups and computing percentage-of-total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMetric {
    Revenue,
    Volume,
    Profit,
}

impl GroupMetric {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "revenue" => Some(Self::Revenue),
            "volume" => Some(Self::Volume),
            "profit" => Some(Self::Profit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub quantity: u64,
    pub job_count: usize,
    /// Chosen metric / grand total x 100; 0 when the grand total is 0.
    pub percentage_of_total: f64,
}

impl GroupSummary {
    fn metric(&self, metric: GroupMetric) -> f64 {
        match metric {
            GroupMetric::Revenue => self.revenue,
            GroupMetric::Volume => self.quantity as f64,
            GroupMetric::Profit => self.profit,
        }
    }
}

#[derive(Default)]
struct Acc {
    revenue: f64,
    cost: f64,
    profit: f64,
    quantity: u64,
    job_count: usize,
}

/// Finalize accumulators into sorted summaries. Encounter order is kept for
/// ties (stable sort); percentage is against the summed metric.
fn finalize(keys: Vec<String>, mut accs: HashMap<String, Acc>, metric: GroupMetric) -> Vec<GroupSummary> {
    let mut groups: Vec<GroupSummary> = keys
        .into_iter()
        .filter_map(|key| {
            let acc = accs.remove(&key)?;
            Some(GroupSummary {
                key,
                revenue: acc.revenue,
                cost: acc.cost,
                profit: acc.profit,
                quantity: acc.quantity,
                job_count: acc.job_count,
                percentage_of_total: 0.0,
            })
        })
        .collect();

    let total: f64 = groups.iter().map(|g| g.metric(metric)).sum();
    for group in &mut groups {
        group.percentage_of_total = if total == 0.0 {
            0.0
        } else {
            group.metric(metric) / total * 100.0
        };
    }

    groups.sort_by(|a, b| {
        b.metric(metric)
            .partial_cmp(&a.metric(metric))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

/// Revenue/profit/volume per client, sorted descending by `metric`.
/// Revenue-conserving: summed group revenue equals summed job billing.
pub fn revenue_by_client(jobs: &[Job], metric: GroupMetric) -> Vec<GroupSummary> {
    let mut keys: Vec<String> = Vec::new();
    let mut accs: HashMap<String, Acc> = HashMap::new();

    for j in jobs {
        let key = if j.client_name.is_empty() {
            "(no client)".to_string()
        } else {
            j.client_name.clone()
        };
        if !accs.contains_key(&key) {
            keys.push(key.clone());
        }
        let acc = accs.entry(key).or_default();
        acc.revenue += job::billing(j);
        acc.cost += job::cost(j);
        acc.profit += job::profit(j);
        acc.quantity += j.quantity;
        acc.job_count += 1;
    }

    finalize(keys, accs, metric)
}

/// Revenue/profit/volume per process type. A job with several process steps
/// contributes each step's own (quantity/1000) x price_per_m revenue to that
/// step's group; job cost and profit are split across steps in proportion to
/// that revenue. Add-on charges and explicit billing overrides stay with the
/// whole-job (client) grouping.
pub fn revenue_by_process_type(jobs: &[Job], metric: GroupMetric) -> Vec<GroupSummary> {
    let mut keys: Vec<String> = Vec::new();
    let mut accs: HashMap<String, Acc> = HashMap::new();

    for j in jobs {
        let per_thousand = j.quantity as f64 / 1000.0;
        let step_revenue: Vec<(String, f64)> = j
            .requirements
            .iter()
            .map(|r| {
                let key = if r.process_type.is_empty() {
                    "(unspecified)".to_string()
                } else {
                    r.process_type.clone()
                };
                (key, per_thousand * r.price_per_m)
            })
            .collect();
        let total_step_revenue: f64 = step_revenue.iter().map(|(_, rev)| rev).sum();
        let job_cost = job::cost(j);
        let job_profit = job::profit(j);

        for (key, revenue) in step_revenue {
            if !accs.contains_key(&key) {
                keys.push(key.clone());
            }
            let share = if total_step_revenue == 0.0 {
                0.0
            } else {
                revenue / total_step_revenue
            };
            let acc = accs.entry(key).or_default();
            acc.revenue += revenue;
            acc.cost += job_cost * share;
            acc.profit += job_profit * share;
            acc.quantity += j.quantity;
            acc.job_count += 1;
        }
    }

    finalize(keys, accs, metric)
}

/// Bucket jobs by due date into the supplied periods. Jobs without a due
/// date, or due outside every period, are left out.
pub fn revenue_by_period(jobs: &[Job], periods: &[Period], metric: GroupMetric) -> Vec<GroupSummary> {
    let mut keys: Vec<String> = Vec::new();
    let mut accs: HashMap<String, Acc> = HashMap::new();

    for j in jobs {
        let Some(due) = j.due_date else { continue };
        let Some(period) = periods.iter().find(|p| p.contains(due)) else {
            continue;
        };
        if !accs.contains_key(&period.label) {
            keys.push(period.label.clone());
        }
        let acc = accs.entry(period.label.clone()).or_default();
        acc.revenue += job::billing(j);
        acc.cost += job::cost(j);
        acc.profit += job::profit(j);
        acc.quantity += j.quantity;
        acc.job_count += 1;
    }

    finalize(keys, accs, metric)
}
