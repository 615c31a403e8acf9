//! Per-job derived financials.
//!
//! Every dashboard number starts from these four functions. They never fail:
//! missing or zero inputs degrade to 0.0, and profit_pct guards the
//! divide-by-zero so a zero-billing job reports 0% rather than NaN.

use super::Job;

/// Revenue for a job: the explicit billing_rate when recorded, otherwise
/// the sum of (quantity / 1000) x price_per_m across requirements, plus
/// add-on charges.
pub fn billing(job: &Job) -> f64 {
    if job.billing_rate > 0.0 {
        return job.billing_rate;
    }
    let per_thousand = job.quantity as f64 / 1000.0;
    let from_requirements: f64 = job
        .requirements
        .iter()
        .map(|r| per_thousand * r.price_per_m)
        .sum();
    from_requirements + job.add_on_charges
}

/// Cost for a job: actuals (cost per thousand x quantity) when production
/// has reported them, else the estimate.
pub fn cost(job: &Job) -> f64 {
    if job.actual_cost_per_m > 0.0 {
        job.actual_cost_per_m * (job.quantity as f64 / 1000.0)
    } else {
        job.estimated_cost
    }
}

pub fn profit(job: &Job) -> f64 {
    billing(job) - cost(job)
}

/// Profit as a percentage of billing; 0.0 when billing is 0.
pub fn profit_pct(job: &Job) -> f64 {
    let revenue = billing(job);
    if revenue == 0.0 {
        0.0
    } else {
        profit(job) / revenue * 100.0
    }
}
