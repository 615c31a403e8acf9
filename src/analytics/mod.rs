mod filter_index;
mod groups;
mod risk;
mod summary;
mod trend;

pub use filter_index::{build_filter_index, CategoryNode, FieldNode, FilterIndex, ProcessNode, ValueCount};
pub use groups::{revenue_by_client, revenue_by_period, revenue_by_process_type, GroupMetric, GroupSummary};
pub use risk::{
    concentration, data_health, job_clustering, jobs_at_risk, low_margin_jobs, AtRiskReport,
    ClusterFinding, ConcentrationFinding, ConcentrationLevel, ConcentrationReport,
    DataHealthFinding, DataHealthIssue,
};
pub use summary::{cfo_summary, CfoSummary, ProcessCost, TopJob, TOP_N};
pub use trend::{compare_periods, metric_trend, PeriodComparison, TrendPoint};
