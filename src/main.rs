mod analytics;
mod api;
mod config;
mod error;
mod format;
mod import;
mod job;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::analytics::{
    build_filter_index, cfo_summary, compare_periods, concentration, data_health, job_clustering,
    jobs_at_risk, low_margin_jobs, metric_trend, revenue_by_client, revenue_by_period,
    revenue_by_process_type, GroupMetric, GroupSummary,
};
use crate::api::{load_jobs_snapshot, ApiClient};
use crate::config::{config_dir, load_config, Config, CONFIG_TEMPLATE};
use crate::error::{PressdeskError, Result};
use crate::format::{format_amount, format_grouped_int, format_money, format_pct};
use crate::import::{parse_workbook, upload_entries, validate_rows, RowStatus};
use crate::job::{monthly_periods, Job, Period};

#[derive(Parser)]
#[command(name = "pressdesk")]
#[command(version, about = "Production console for print/mail job analytics", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.pressdesk or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Read jobs from a local JSON snapshot instead of the backend
    #[arg(short = 'j', long, global = true, value_name = "FILE")]
    jobs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config file
    Init,

    /// List jobs with derived revenue, cost, and margin
    Jobs {
        /// Number of jobs to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// CFO summary: totals, averages, concentration, jobs at risk
    Dashboard,

    /// Revenue rollup by client, process type, or period
    Revenue {
        /// Grouping: client, process, or period
        #[arg(long, default_value = "client")]
        by: String,

        /// Ordering metric: revenue, volume, or profit
        #[arg(long, default_value = "revenue")]
        metric: String,

        /// Bucket start for period grouping (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Bucket end for period grouping (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Risk report: at-risk jobs, concentration, delivery clustering, data health
    Risk,

    /// Month-over-month revenue/volume/profit trend
    Trend {
        /// Number of trailing months (default: 6)
        #[arg(long, default_value_t = 6)]
        months: u32,

        /// Trend metric: revenue, volume, or profit
        #[arg(long, default_value = "revenue")]
        metric: String,
    },

    /// Show the tiered process/category filter index
    Filters,

    /// List clients
    Clients,

    /// Import production entries from an Excel spreadsheet
    Import {
        /// Path to the .xlsx file (columns: Job Number, Production Quantity, Date, Notes)
        file: PathBuf,

        /// Validate and report only; upload nothing
        #[arg(long)]
        dry_run: bool,

        /// Exclude rows duplicating an already-persisted entry
        #[arg(long)]
        skip_duplicates: bool,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Jobs { limit } => cmd_jobs(&cfg_dir, cli.jobs.as_deref(), limit),
        Commands::Dashboard => cmd_dashboard(&cfg_dir, cli.jobs.as_deref()),
        Commands::Revenue {
            by,
            metric,
            from,
            to,
        } => cmd_revenue(&cfg_dir, cli.jobs.as_deref(), &by, &metric, from, to),
        Commands::Risk => cmd_risk(&cfg_dir, cli.jobs.as_deref()),
        Commands::Trend { months, metric } => {
            cmd_trend(&cfg_dir, cli.jobs.as_deref(), months, &metric)
        }
        Commands::Filters => cmd_filters(&cfg_dir, cli.jobs.as_deref()),
        Commands::Clients => cmd_clients(&cfg_dir, cli.jobs.as_deref()),
        Commands::Import {
            file,
            dry_run,
            skip_duplicates,
        } => cmd_import(&cfg_dir, cli.jobs.as_deref(), &file, dry_run, skip_duplicates),
    }
}

/// Initialize config directory with a template config file
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(PressdeskError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized pressdesk config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point at your backend:      $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Export your token:          export PRESSDESK_TOKEN=...");
    println!();
    println!("Then check the dashboard:");
    println!("  pressdesk dashboard");

    Ok(())
}

fn load_settings(cfg_dir: &PathBuf) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(PressdeskError::ConfigNotFound(cfg_dir.clone()));
    }
    load_config(cfg_dir)
}

/// Jobs come from the snapshot file when given, else from the backend.
fn load_jobs(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>) -> Result<Vec<Job>> {
    match snapshot {
        Some(path) => load_jobs_snapshot(path),
        None => {
            let config = load_settings(cfg_dir)?;
            ApiClient::new(&config.api)?.fetch_jobs()
        }
    }
}

fn parse_date_flag(flag: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PressdeskError::InvalidDate {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_metric(raw: &str) -> Result<GroupMetric> {
    GroupMetric::parse(raw).ok_or_else(|| PressdeskError::InvalidMetric(raw.to_string()))
}

fn due_date_span(jobs: &[Job]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = jobs.iter().filter_map(|j| j.due_date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// Span of due dates, as monthly periods, for commands without explicit
/// range flags.
fn due_date_periods(jobs: &[Job]) -> Vec<Period> {
    match due_date_span(jobs) {
        Some((min, max)) => monthly_periods(min, max),
        None => Vec::new(),
    }
}

// Table row structs for tabled
#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "JOB")]
    job_number: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "JOBS")]
    jobs: usize,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "PROFIT")]
    profit: String,
    #[tabled(rename = "SHARE")]
    share: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "PERIOD")]
    period: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "CHANGE")]
    change: String,
    #[tabled(rename = "CHANGE %")]
    change_pct: String,
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "CLIENT")]
    name: String,
    #[tabled(rename = "JOBS")]
    jobs: usize,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

fn group_rows(groups: &[GroupSummary]) -> Vec<GroupRow> {
    groups
        .iter()
        .map(|g| GroupRow {
            key: g.key.clone(),
            jobs: g.job_count,
            quantity: format_grouped_int(g.quantity as i64),
            revenue: format_money(g.revenue),
            profit: format_money(g.profit),
            share: format_pct(g.percentage_of_total),
        })
        .collect()
}

/// Replace a rounded table's bottom border with summary rows: the leading
/// columns merge into one label cell, `keep` stays as the value column, and
/// everything after it is closed off.
fn add_summary_footer(table: &str, keep: usize, rows: &[(&str, String)]) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 || rows.is_empty() {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if keep == 0 || keep + 1 > widths.len() {
        return table.to_string();
    }

    let left_width = widths[..keep].iter().sum::<usize>() + (keep - 1);
    let keep_width = widths[keep];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // First separator: merge the leading columns, keep the value column,
    // close off the trailing ones
    let merged: Vec<String> = widths[..keep].iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&format!("├{}┼{}", merged.join("┴"), "─".repeat(keep_width)));
    if keep + 1 < widths.len() {
        let trailing: Vec<String> = widths[keep + 1..].iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&format!("┼{}╯\n", trailing.join("┴")));
    } else {
        out.push_str("┤\n");
    }

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>keep$} │\n",
            label,
            value,
            left = left_width - 2,
            keep = keep_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(keep_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(keep_width)
    ));

    out
}

/// List jobs with derived revenue, cost, and margin
fn cmd_jobs(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>, limit: Option<usize>) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;

    if jobs.is_empty() {
        println!("No jobs in snapshot.");
        return Ok(());
    }

    let shown: Vec<&Job> = match limit {
        Some(n) => jobs.iter().take(n).collect(),
        None => jobs.iter().collect(),
    };

    let rows: Vec<JobRow> = shown
        .iter()
        .enumerate()
        .map(|(idx, j)| JobRow {
            index: idx + 1,
            job_number: j.job_number.clone(),
            client: j.client_name.clone(),
            quantity: format_grouped_int(j.quantity as i64),
            due: j
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            revenue: format_money(job::billing(j)),
            margin: format_pct(job::profit_pct(j)),
        })
        .collect();

    let shown_revenue: f64 = shown.iter().map(|j| job::billing(j)).sum();
    let shown_profit: f64 = shown.iter().map(|j| job::profit(j)).sum();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_summary_footer(
        &table,
        5,
        &[
            ("REVENUE", format_money(shown_revenue)),
            ("PROFIT", format_money(shown_profit)),
        ],
    );
    println!("{table}");

    println!();
    println!("Total: {} jobs", jobs.len());

    Ok(())
}

/// CFO summary
fn cmd_dashboard(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;
    let thresholds = load_settings(cfg_dir)
        .map(|c| c.thresholds)
        .unwrap_or_default();

    let summary = cfo_summary(&jobs, &thresholds);

    println!("CFO Dashboard");
    println!("{}", "-".repeat(50));
    println!("Jobs:               {}", summary.job_count);
    println!("Total revenue:      {}", format_amount(summary.total_revenue));
    println!("Total profit:       {}", format_amount(summary.total_profit));
    println!("Avg job value:      {}", format_amount(summary.average_job_value));
    println!("Avg job profit:     {}", format_amount(summary.average_job_profit));
    if let Some(client) = &summary.top_client {
        println!(
            "Top client:         {} ({} of revenue)",
            client,
            format_pct(summary.top_client_pct)
        );
    }
    println!(
        "Jobs at risk:       {} ({} revenue, margin < {})",
        summary.at_risk_count,
        format_money(summary.at_risk_revenue),
        format_pct(thresholds.at_risk_profit_pct)
    );

    if !summary.top_jobs.is_empty() {
        println!();
        println!("Most profitable jobs:");
        for top in &summary.top_jobs {
            println!(
                "  {} - {} - {}",
                top.job_number,
                top.client_name,
                format_money(top.profit)
            );
        }
    }

    if !summary.top_process_costs.is_empty() {
        println!();
        println!("Highest cost per piece by process:");
        for p in &summary.top_process_costs {
            println!("  {:<12} {}", p.process_type, format_amount(p.per_piece));
        }
    }

    Ok(())
}

/// Revenue rollup
fn cmd_revenue(
    cfg_dir: &PathBuf,
    snapshot: Option<&std::path::Path>,
    by: &str,
    metric: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;
    let metric = parse_metric(metric)?;

    let groups = match by {
        "client" => revenue_by_client(&jobs, metric),
        "process" => revenue_by_process_type(&jobs, metric),
        "period" => {
            let from = from
                .as_deref()
                .map(|f| parse_date_flag("--from", f))
                .transpose()?;
            let to = to
                .as_deref()
                .map(|t| parse_date_flag("--to", t))
                .transpose()?;
            let span = due_date_span(&jobs);
            // A one-sided range takes the missing bound from the due-date span.
            let periods = match (from, to) {
                (Some(f), Some(t)) => monthly_periods(f, t),
                (Some(f), None) => monthly_periods(f, span.map_or(f, |(_, hi)| hi.max(f))),
                (None, Some(t)) => monthly_periods(span.map_or(t, |(lo, _)| lo.min(t)), t),
                (None, None) => due_date_periods(&jobs),
            };
            revenue_by_period(&jobs, &periods, metric)
        }
        other => return Err(PressdeskError::InvalidGrouping(other.to_string())),
    };

    if groups.is_empty() {
        println!("No groups to report.");
        return Ok(());
    }

    let total_revenue: f64 = groups.iter().map(|g| g.revenue).sum();
    let table = Table::new(group_rows(&groups))
        .with(Style::rounded())
        .to_string();
    let table = add_summary_footer(&table, 3, &[("TOTAL", format_money(total_revenue))]);
    println!("{table}");

    Ok(())
}

/// Risk report
fn cmd_risk(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;
    let thresholds = load_settings(cfg_dir)
        .map(|c| c.thresholds)
        .unwrap_or_default();

    let at_risk = jobs_at_risk(&jobs, &thresholds);
    println!(
        "Jobs at risk (margin < {}): {}",
        format_pct(thresholds.at_risk_profit_pct),
        at_risk.jobs.len()
    );
    for j in &at_risk.jobs {
        println!(
            "  {} - {} - {} ({})",
            j.job_number,
            j.client_name,
            format_money(job::billing(j)),
            format_pct(job::profit_pct(j))
        );
    }
    if !at_risk.jobs.is_empty() {
        println!("  Revenue at risk: {}", format_money(at_risk.revenue));
    }

    println!();
    let low_margin = low_margin_jobs(&jobs, thresholds.low_margin_profit_pct);
    println!(
        "Low margin (margin < {}): {}",
        format_pct(thresholds.low_margin_profit_pct),
        low_margin.len()
    );
    for j in &low_margin {
        println!(
            "  {} - {} ({})",
            j.job_number,
            j.client_name,
            format_pct(job::profit_pct(j))
        );
    }

    println!();
    println!("Client concentration:");
    let by_client = revenue_by_client(&jobs, GroupMetric::Revenue);
    let client_report = concentration(&by_client, &thresholds);
    if client_report.findings.is_empty() {
        println!("  No client above {}", format_pct(thresholds.concentration_moderate_pct));
    }
    for finding in &client_report.findings {
        println!(
            "  [{}] {} holds {} of revenue",
            finding.level,
            finding.key,
            format_pct(finding.percentage)
        );
    }
    println!(
        "  Top 3 clients: {} of revenue",
        format_pct(client_report.top3_pct)
    );

    println!();
    println!("Process concentration:");
    let by_process = revenue_by_process_type(&jobs, GroupMetric::Revenue);
    let process_report = concentration(&by_process, &thresholds);
    if process_report.findings.is_empty() {
        println!("  No process above {}", format_pct(thresholds.concentration_moderate_pct));
    }
    for finding in &process_report.findings {
        println!(
            "  [{}] {} holds {} of revenue",
            finding.level,
            finding.key,
            format_pct(finding.percentage)
        );
    }

    println!();
    println!("Delivery clustering:");
    let periods = due_date_periods(&jobs);
    let clusters = job_clustering(&jobs, &periods, &thresholds);
    if clusters.is_empty() {
        println!("  No period holds more than {:.0}% of due dates", thresholds.clustering_share * 100.0);
    }
    for cluster in &clusters {
        println!(
            "  {} has {} jobs due ({} of all dated jobs)",
            cluster.period,
            cluster.job_count,
            format_pct(cluster.share * 100.0)
        );
    }

    println!();
    println!("Data health:");
    let issues = data_health(&jobs);
    if issues.is_empty() {
        println!("  No issues found");
    }
    for finding in &issues {
        println!("  {} - {}", finding.job.job_number, finding.issue);
    }

    Ok(())
}

/// Trend
fn cmd_trend(
    cfg_dir: &PathBuf,
    snapshot: Option<&std::path::Path>,
    months: u32,
    metric: &str,
) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;
    let metric = parse_metric(metric)?;

    let today = chrono::Local::now().date_naive();
    let months = months.max(1);
    let start = today
        .checked_sub_months(chrono::Months::new(months - 1))
        .unwrap_or(today);
    let periods = monthly_periods(start, today);

    let points = metric_trend(&jobs, &periods, metric);
    let rows: Vec<TrendRow> = points
        .iter()
        .map(|p| TrendRow {
            period: p.period.clone(),
            value: match metric {
                GroupMetric::Volume => format_grouped_int(p.value as i64),
                _ => format_money(p.value),
            },
            change: match metric {
                GroupMetric::Volume => format_grouped_int(p.change as i64),
                _ => format_money(p.change),
            },
            change_pct: format_pct(p.percent_change),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    // Current vs previous month comparison
    if periods.len() >= 2 {
        let current_period = &periods[periods.len() - 1];
        let previous_period = &periods[periods.len() - 2];
        let in_period = |p: &Period| -> Vec<Job> {
            jobs.iter()
                .filter(|j| j.due_date.is_some_and(|d| p.contains(d)))
                .cloned()
                .collect()
        };
        let cmp = compare_periods(&in_period(current_period), &in_period(previous_period));
        println!();
        println!(
            "{} vs {}: {} -> {} ({}, {})",
            previous_period.label,
            current_period.label,
            format_money(cmp.previous_revenue),
            format_money(cmp.current_revenue),
            format_money(cmp.change),
            format_pct(cmp.percent_change)
        );
    }

    Ok(())
}

/// Tiered filter index
fn cmd_filters(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;
    let index = build_filter_index(&jobs);

    if index.processes.is_empty() {
        println!("No process requirements in snapshot.");
        return Ok(());
    }

    for process in &index.processes {
        println!("{} ({} jobs)", process.process_type, process.job_count);
        for category in &process.categories {
            println!("  {} ({})", category.value, category.count);
            for field in &category.fields {
                let values: Vec<String> = field
                    .values
                    .iter()
                    .map(|v| format!("{} ({})", v.value, v.count))
                    .collect();
                println!("    {}: {}", field.field, values.join(", "));
            }
        }
    }

    Ok(())
}

/// List clients
fn cmd_clients(cfg_dir: &PathBuf, snapshot: Option<&std::path::Path>) -> Result<()> {
    // With a snapshot, derive the client list from the jobs themselves;
    // otherwise ask the backend.
    let rows: Vec<ClientRow> = match snapshot {
        Some(_) => {
            let jobs = load_jobs(cfg_dir, snapshot)?;
            revenue_by_client(&jobs, GroupMetric::Revenue)
                .into_iter()
                .map(|g| ClientRow {
                    name: g.key,
                    jobs: g.job_count,
                    revenue: format_money(g.revenue),
                })
                .collect()
        }
        None => {
            let config = load_settings(cfg_dir)?;
            let client = ApiClient::new(&config.api)?;
            let jobs = client.fetch_jobs()?;
            let groups = revenue_by_client(&jobs, GroupMetric::Revenue);
            client
                .fetch_clients()?
                .into_iter()
                .map(|c| {
                    let group = groups.iter().find(|g| g.key == c.name);
                    ClientRow {
                        name: c.name,
                        jobs: group.map_or(0, |g| g.job_count),
                        revenue: format_money(group.map_or(0.0, |g| g.revenue)),
                    }
                })
                .collect()
        }
    };

    if rows.is_empty() {
        println!("No clients found.");
        return Ok(());
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Import production entries from an Excel spreadsheet
fn cmd_import(
    cfg_dir: &PathBuf,
    snapshot: Option<&std::path::Path>,
    file: &PathBuf,
    dry_run: bool,
    skip_duplicates: bool,
) -> Result<()> {
    let jobs = load_jobs(cfg_dir, snapshot)?;

    // Duplicate detection needs the backend's persisted entries; offline
    // (snapshot) dry runs validate without it.
    let mut client = None;
    let existing = if snapshot.is_none() || !dry_run {
        let config = load_settings(cfg_dir)?;
        let api = ApiClient::new(&config.api)?;
        let entries = api.fetch_production_entries()?;
        client = Some(api);
        entries
    } else {
        Vec::new()
    };

    let rows = parse_workbook(file)?;
    let summary = validate_rows(&rows, &jobs, &existing, skip_duplicates);

    println!("Validated {} rows from {}", rows.len(), file.display());
    println!(
        "  Valid: {}  Invalid: {}  Warnings: {}",
        summary.valid, summary.invalid, summary.warnings
    );
    for report in &summary.reports {
        match report.status {
            RowStatus::Valid => {}
            RowStatus::Warning => println!("  row {}: warning: {}", report.row, report.message),
            RowStatus::Invalid => println!("  row {}: invalid: {}", report.row, report.message),
        }
    }

    if dry_run {
        println!();
        println!(
            "Dry run: {} entr(ies) would be uploaded.",
            summary.entries.len()
        );
        return Ok(());
    }

    if summary.entries.is_empty() {
        return Err(PressdeskError::NothingToUpload {
            invalid: summary.invalid,
        });
    }

    let config = load_settings(cfg_dir)?;
    let mut sink = match client {
        Some(c) => c,
        None => ApiClient::new(&config.api)?,
    };

    println!();
    let report = upload_entries(
        &mut sink,
        &summary.entries,
        config.import.chunk_size,
        |done, total| {
            println!("  Uploaded {done}/{total} entries");
        },
    );

    if let Some(err) = report.error {
        println!(
            "Upload aborted after {} of {} entries ({} chunk(s) sent).",
            report.uploaded, report.total, report.chunks_sent
        );
        return Err(err);
    }

    println!(
        "Uploaded {} entr(ies) in {} chunk(s).",
        report.uploaded, report.chunks_sent
    );

    Ok(())
}
