//! Risk detectors. Each detector is a pure function over a job snapshot;
//! every threshold comes from the single `Thresholds` config block.

use std::fmt;

use crate::config::Thresholds;
use crate::job::{self, Job, Period};

use super::groups::GroupSummary;

/// Jobs whose profit % falls under the at-risk threshold, plus their
/// combined revenue.
#[derive(Debug)]
pub struct AtRiskReport<'a> {
    pub jobs: Vec<&'a Job>,
    pub revenue: f64,
}

pub fn jobs_at_risk<'a>(jobs: &'a [Job], thresholds: &Thresholds) -> AtRiskReport<'a> {
    let flagged: Vec<&Job> = jobs
        .iter()
        .filter(|j| job::profit_pct(j) < thresholds.at_risk_profit_pct)
        .collect();
    let revenue = flagged.iter().map(|j| job::billing(j)).sum();
    AtRiskReport {
        jobs: flagged,
        revenue,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcentrationLevel {
    High,
    Moderate,
}

impl fmt::Display for ConcentrationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConcentrationFinding {
    pub key: String,
    pub percentage: f64,
    pub level: ConcentrationLevel,
}

#[derive(Debug)]
pub struct ConcentrationReport {
    pub findings: Vec<ConcentrationFinding>,
    /// Combined share of the top three groups.
    pub top3_pct: f64,
}

/// Flag groups whose percentage-of-total crosses the concentration tiers.
/// Works on any grouping (client or process type).
pub fn concentration(groups: &[GroupSummary], thresholds: &Thresholds) -> ConcentrationReport {
    let findings = groups
        .iter()
        .filter_map(|g| {
            let level = if g.percentage_of_total >= thresholds.concentration_high_pct {
                ConcentrationLevel::High
            } else if g.percentage_of_total >= thresholds.concentration_moderate_pct {
                ConcentrationLevel::Moderate
            } else {
                return None;
            };
            Some(ConcentrationFinding {
                key: g.key.clone(),
                percentage: g.percentage_of_total,
                level,
            })
        })
        .collect();

    // Groups arrive sorted descending, so the first three are the top three.
    let top3_pct = groups
        .iter()
        .take(3)
        .map(|g| g.percentage_of_total)
        .sum();

    ConcentrationReport { findings, top3_pct }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterFinding {
    pub period: String,
    pub job_count: usize,
    /// Fraction of all dated jobs due in this period.
    pub share: f64,
}

/// Flag periods holding a disproportionate share of due dates — a delivery
/// bottleneck warning. Share is against jobs that land in some period.
pub fn job_clustering(jobs: &[Job], periods: &[Period], thresholds: &Thresholds) -> Vec<ClusterFinding> {
    let mut counts = vec![0usize; periods.len()];
    let mut total = 0usize;
    for j in jobs {
        let Some(due) = j.due_date else { continue };
        if let Some(idx) = periods.iter().position(|p| p.contains(due)) {
            counts[idx] += 1;
            total += 1;
        }
    }
    if total == 0 {
        return Vec::new();
    }

    periods
        .iter()
        .zip(counts)
        .filter_map(|(period, count)| {
            let share = count as f64 / total as f64;
            if share > thresholds.clustering_share {
                Some(ClusterFinding {
                    period: period.label.clone(),
                    job_count: count,
                    share,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Jobs with profit % below the caller's threshold.
pub fn low_margin_jobs<'a>(jobs: &'a [Job], threshold_pct: f64) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|j| job::profit_pct(j) < threshold_pct)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataHealthIssue {
    DueBeforeStart,
    ZeroQuantityWithBilling,
}

impl fmt::Display for DataHealthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DueBeforeStart => write!(f, "due date before start date"),
            Self::ZeroQuantityWithBilling => write!(f, "zero quantity but non-zero billing"),
        }
    }
}

#[derive(Debug)]
pub struct DataHealthFinding<'a> {
    pub job: &'a Job,
    pub issue: DataHealthIssue,
}

/// Surface records that violate the data invariants; nothing is fixed here.
pub fn data_health(jobs: &[Job]) -> Vec<DataHealthFinding<'_>> {
    let mut findings = Vec::new();
    for j in jobs {
        if let (Some(start), Some(due)) = (j.start_date, j.due_date) {
            if due < start {
                findings.push(DataHealthFinding {
                    job: j,
                    issue: DataHealthIssue::DueBeforeStart,
                });
            }
        }
        if j.quantity == 0 && job::billing(j) > 0.0 {
            findings.push(DataHealthFinding {
                job: j,
                issue: DataHealthIssue::ZeroQuantityWithBilling,
            });
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::groups::{revenue_by_client, GroupMetric};
    use chrono::NaiveDate;

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
    fn at_risk_flags_thin_margins_and_sums_revenue() {
        let jobs = vec![
            make_job(1, "A", 1000.0, 900.0), // 10% => at risk
            make_job(2, "A", 1000.0, 500.0), // 50% => fine
            make_job(3, "B", 400.0, 380.0),  // 5% => at risk
        ];
        let report = jobs_at_risk(&jobs, &Thresholds::default());
        assert_eq!(report.jobs.len(), 2);
        assert!((report.revenue - 1400.0).abs() < 1e-9);
    }

    #[test]
    fn at_risk_threshold_is_exclusive_at_boundary() {
        let jobs = vec![make_job(1, "A", 1000.0, 800.0)]; // exactly 20%
        let report = jobs_at_risk(&jobs, &Thresholds::default());
        assert!(report.jobs.is_empty());
    }

    #[test]
    fn concentration_tiers_40_35_25() {
        let jobs = vec![
            make_job(1, "A", 400.0, 0.0),
            make_job(2, "B", 350.0, 0.0),
            make_job(3, "C", 250.0, 0.0),
        ];
        let groups = revenue_by_client(&jobs, GroupMetric::Revenue);
        let report = concentration(&groups, &Thresholds::default());
        // All three are >= 20%, so all are high
        assert_eq!(report.findings.len(), 3);
        assert_eq!(report.findings[0].key, "A");
        assert_eq!(report.findings[0].level, ConcentrationLevel::High);
        assert!((report.top3_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn concentration_moderate_band() {
        let jobs = vec![
            make_job(1, "Big", 850.0, 0.0),   // 85%
            make_job(2, "Mid", 120.0, 0.0),   // 12% => moderate
            make_job(3, "Small", 30.0, 0.0),  // 3% => unflagged
        ];
        let groups = revenue_by_client(&jobs, GroupMetric::Revenue);
        let report = concentration(&groups, &Thresholds::default());
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].level, ConcentrationLevel::High);
        assert_eq!(report.findings[1].key, "Mid");
        assert_eq!(report.findings[1].level, ConcentrationLevel::Moderate);
    }

    #[test]
    fn clustering_flags_heavy_period() {
        let periods = crate::job::monthly_periods(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        );
        let mut jobs = Vec::new();
        for i in 0..7 {
            let mut j = make_job(i, "A", 100.0, 0.0);
            j.due_date = NaiveDate::from_ymd_opt(2026, 1, 10);
            jobs.push(j);
        }
        for i in 7..10 {
            let mut j = make_job(i, "A", 100.0, 0.0);
            j.due_date = NaiveDate::from_ymd_opt(2026, 3, 5);
            jobs.push(j);
        }
        let findings = job_clustering(&jobs, &periods, &Thresholds::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].period, "2026-01");
        assert_eq!(findings[0].job_count, 7);
        assert!((findings[0].share - 0.7).abs() < 1e-9);
    }

    #[test]
    fn clustering_empty_without_dated_jobs() {
        let periods = crate::job::monthly_periods(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        let jobs = vec![make_job(1, "A", 100.0, 0.0)];
        assert!(job_clustering(&jobs, &periods, &Thresholds::default()).is_empty());
    }

    #[test]
    fn low_margin_uses_caller_threshold() {
        let jobs = vec![
            make_job(1, "A", 1000.0, 950.0), // 5%
            make_job(2, "A", 1000.0, 850.0), // 15%
        ];
        assert_eq!(low_margin_jobs(&jobs, 10.0).len(), 1);
        assert_eq!(low_margin_jobs(&jobs, 20.0).len(), 2);
    }

    #[test]
    fn data_health_flags_inverted_dates_and_phantom_billing() {
        let mut inverted = make_job(1, "A", 100.0, 0.0);
        inverted.quantity = 500;
        inverted.start_date = NaiveDate::from_ymd_opt(2026, 2, 10);
        inverted.due_date = NaiveDate::from_ymd_opt(2026, 2, 1);

        let phantom = make_job(2, "A", 250.0, 0.0); // quantity 0, billing 250

        let jobs = [inverted, phantom];
        let findings = data_health(&jobs);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].issue, DataHealthIssue::DueBeforeStart);
        assert_eq!(findings[1].issue, DataHealthIssue::ZeroQuantityWithBilling);
    }
}
