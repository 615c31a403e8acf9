//! Top-line CFO metrics composed from the reducers and detectors.

use crate::config::Thresholds;
use crate::job::{self, Job};

use super::groups::{revenue_by_client, revenue_by_process_type, GroupMetric};
use super::risk::jobs_at_risk;

/// How many entries the "top" lists carry.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone)]
pub struct TopJob {
    pub job_number: String,
    pub client_name: String,
    pub profit: f64,
}

#[derive(Debug, Clone)]
pub struct ProcessCost {
    pub process_type: String,
    /// Cost per piece across all jobs using this process.
    pub per_piece: f64,
}

#[derive(Debug)]
pub struct CfoSummary {
    pub job_count: usize,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub average_job_value: f64,
    pub average_job_profit: f64,
    pub top_client: Option<String>,
    pub top_client_pct: f64,
    pub at_risk_count: usize,
    pub at_risk_revenue: f64,
    pub top_jobs: Vec<TopJob>,
    pub top_process_costs: Vec<ProcessCost>,
}

pub fn cfo_summary(jobs: &[Job], thresholds: &Thresholds) -> CfoSummary {
    let total_revenue: f64 = jobs.iter().map(job::billing).sum();
    let total_profit: f64 = jobs.iter().map(job::profit).sum();
    let job_count = jobs.len();

    let (average_job_value, average_job_profit) = if job_count == 0 {
        (0.0, 0.0)
    } else {
        (
            total_revenue / job_count as f64,
            total_profit / job_count as f64,
        )
    };

    let by_client = revenue_by_client(jobs, GroupMetric::Revenue);
    let (top_client, top_client_pct) = by_client
        .first()
        .map(|g| (Some(g.key.clone()), g.percentage_of_total))
        .unwrap_or((None, 0.0));

    let at_risk = jobs_at_risk(jobs, thresholds);

    let mut ranked: Vec<&Job> = jobs.iter().collect();
    ranked.sort_by(|a, b| {
        job::profit(b)
            .partial_cmp(&job::profit(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_jobs = ranked
        .into_iter()
        .take(TOP_N)
        .map(|j| TopJob {
            job_number: j.job_number.clone(),
            client_name: j.client_name.clone(),
            profit: job::profit(j),
        })
        .collect();

    let mut top_process_costs: Vec<ProcessCost> = revenue_by_process_type(jobs, GroupMetric::Revenue)
        .into_iter()
        .filter(|g| g.quantity > 0)
        .map(|g| ProcessCost {
            per_piece: g.cost / g.quantity as f64,
            process_type: g.key,
        })
        .collect();
    top_process_costs.sort_by(|a, b| {
        b.per_piece
            .partial_cmp(&a.per_piece)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_process_costs.truncate(TOP_N);

    CfoSummary {
        job_count,
        total_revenue,
        total_profit,
        average_job_value,
        average_job_profit,
        top_client,
        top_client_pct,
        at_risk_count: at_risk.jobs.len(),
        at_risk_revenue: at_risk.revenue,
        top_jobs,
        top_process_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(id: u64, client: &str, billing_rate: f64, estimated_cost: f64) -> Job {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "job_number": format!("J-{id}"),
            "client_name": client,
            "billing_rate": billing_rate,
            "estimated_cost": estimated_cost,
        }))
        .unwrap()
    }

    #[test]
    fn empty_snapshot_degrades_to_zeros() {
        let summary = cfo_summary(&[], &Thresholds::default());
        assert_eq!(summary.job_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_job_value, 0.0);
        assert!(summary.top_client.is_none());
        assert!(summary.top_jobs.is_empty());
    }

    #[test]
    fn summary_composes_totals_and_top_client() {
        let jobs = vec![
            make_job(1, "Acme", 600.0, 200.0),
            make_job(2, "Acme", 400.0, 350.0), // 12.5% margin => at risk
            make_job(3, "Globex", 500.0, 100.0),
        ];
        let summary = cfo_summary(&jobs, &Thresholds::default());
        assert_eq!(summary.job_count, 3);
        assert!((summary.total_revenue - 1500.0).abs() < 1e-9);
        assert!((summary.average_job_value - 500.0).abs() < 1e-9);
        assert_eq!(summary.top_client.as_deref(), Some("Acme"));
        assert!((summary.top_client_pct - 1000.0 / 1500.0 * 100.0).abs() < 1e-9);
        assert_eq!(summary.at_risk_count, 1);
        assert!((summary.at_risk_revenue - 400.0).abs() < 1e-9);
        // Most profitable first
        assert_eq!(summary.top_jobs[0].job_number, "J-1");
    }

    #[test]
    fn process_costs_rank_per_piece() {
        // Job cost (650) splits across steps by revenue share: laser gets
        // 900/1300 => 450, insert 400/1300 => 200.
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": 1,
            "client_name": "Acme",
            "quantity": 10_000,
            "estimated_cost": 650.0,
            "requirements": [
                {"process_type": "laser", "price_per_m": 90.0},
                {"process_type": "insert", "price_per_m": 40.0},
            ],
        }))
        .unwrap();
        let summary = cfo_summary(&[job], &Thresholds::default());
        assert_eq!(summary.top_process_costs[0].process_type, "laser");
        assert!((summary.top_process_costs[0].per_piece - 0.045).abs() < 1e-9);
        assert_eq!(summary.top_process_costs[1].process_type, "insert");
        assert!((summary.top_process_costs[1].per_piece - 0.02).abs() < 1e-9);
    }

    #[test]
    fn process_per_piece_is_cost_not_revenue() {
        // Revenue 1000, actual cost 500: per piece must come from the cost.
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": 1,
            "client_name": "Acme",
            "quantity": 10_000,
            "actual_cost_per_m": 50.0,
            "requirements": [
                {"process_type": "insert", "price_per_m": 100.0},
            ],
        }))
        .unwrap();
        let summary = cfo_summary(&[job], &Thresholds::default());
        assert!((summary.top_process_costs[0].per_piece - 0.05).abs() < 1e-9);
    }
}
