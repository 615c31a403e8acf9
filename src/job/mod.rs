mod metrics;

pub use metrics::{billing, cost, profit, profit_pct};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One production order as fetched from the backend.
///
/// The backend is loosely typed: numeric fields may arrive as numbers,
/// numeric strings, `"undefined"`, `"null"`, or empty strings, and the
/// requirements list sometimes arrives as a JSON-encoded string. All of that
/// is normalized here so the rest of the crate sees clean values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    #[serde(default)]
    pub job_number: String,
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, deserialize_with = "de_safe_u64")]
    pub quantity: u64,
    /// Explicit recorded revenue; 0 means "derive from requirements".
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub billing_rate: f64,
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub total_billing: f64,
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub add_on_charges: f64,
    /// Recorded cost per thousand pieces, when production actuals exist.
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub actual_cost_per_m: f64,
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub estimated_cost: f64,
    #[serde(default, deserialize_with = "de_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_requirements")]
    pub requirements: Vec<Requirement>,
}

/// One process step of a job (insert, fold, laser, ...) with its
/// per-thousand price and process-specific attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub process_type: String,
    /// Primary category attribute, e.g. envelope size for inserting.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_safe_f64")]
    pub price_per_m: f64,
    /// Remaining process-specific fields, kept as display strings.
    #[serde(flatten, default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Requirement {
    /// Attribute value as a display string; None for null/empty values.
    pub fn attribute(&self, field: &str) -> Option<String> {
        self.attributes.get(field).and_then(value_to_display)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
}

/// A labeled [start, end) interval used to bucket jobs by due date.
/// Caller-supplied and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Build one period per calendar month covering [from, to].
pub fn monthly_periods(from: NaiveDate, to: NaiveDate) -> Vec<Period> {
    let mut periods = Vec::new();
    let mut cursor = NaiveDate::from_ymd_opt(
        chrono::Datelike::year(&from),
        chrono::Datelike::month(&from),
        1,
    )
    .unwrap_or(from);

    while cursor <= to {
        let (year, month) = (
            chrono::Datelike::year(&cursor),
            chrono::Datelike::month(&cursor),
        );
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .unwrap_or(cursor);

        periods.push(Period {
            label: cursor.format("%Y-%m").to_string(),
            start: cursor,
            end: next,
        });

        if next == cursor {
            break;
        }
        cursor = next;
    }

    periods
}

/// Parse a possibly-malformed numeric string. `"undefined"`, `"null"`, and
/// empty strings are 0, matching how the backend serializes blank fields.
pub fn safe_f64(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return 0.0;
    }
    // Tolerate currency formatting like "$1,250.00"
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

fn json_to_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => safe_f64(s),
        _ => 0.0,
    }
}

fn value_to_display(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => {
            let t = s.trim();
            if t.is_empty() || t == "undefined" || t == "null" {
                None
            } else {
                Some(t.to_string())
            }
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn de_safe_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(json_to_f64(&value))
}

fn de_safe_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let n = json_to_f64(&value);
    if n.is_sign_negative() {
        Ok(0)
    } else {
        Ok(n.round() as u64)
    }
}

/// Dates arrive either as epoch milliseconds or as "YYYY-MM-DD" strings.
fn de_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        serde_json::Value::String(s) => {
            let t = s.trim();
            NaiveDate::parse_from_str(t, "%Y-%m-%d")
                .ok()
                .or_else(|| t.parse::<i64>().ok().and_then(|ms| {
                    chrono::DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive())
                }))
        }
        _ => None,
    })
}

/// Requirements sometimes arrive as a JSON-encoded string rather than a
/// parsed array. Decode both shapes into one typed list; anything
/// unrecognizable becomes an empty list rather than an error.
fn de_requirements<'de, D>(deserializer: D) -> Result<Vec<Requirement>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decode_requirements(value))
}

fn decode_requirements(value: serde_json::Value) -> Vec<Requirement> {
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).unwrap_or_default()
        }
        serde_json::Value::String(s) => serde_json::from_str::<serde_json::Value>(&s)
            .map(decode_requirements)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_f64_handles_backend_junk() {
        assert_eq!(safe_f64("undefined"), 0.0);
        assert_eq!(safe_f64("null"), 0.0);
        assert_eq!(safe_f64(""), 0.0);
        assert_eq!(safe_f64("  12.5 "), 12.5);
        assert_eq!(safe_f64("$1,250.00"), 1250.0);
        assert_eq!(safe_f64("-3"), -3.0);
        assert_eq!(safe_f64("not a number"), 0.0);
    }

    #[test]
    fn job_deserializes_numeric_strings() {
        let job: Job = serde_json::from_str(
            r#"{
                "id": 1,
                "job_number": "J-100",
                "client_name": "Acme Mailing",
                "quantity": "5000",
                "billing_rate": "undefined",
                "add_on_charges": "25.50",
                "due_date": "2026-03-01"
            }"#,
        )
        .unwrap();
        assert_eq!(job.quantity, 5000);
        assert_eq!(job.billing_rate, 0.0);
        assert_eq!(job.add_on_charges, 25.50);
        assert_eq!(
            job.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }

    #[test]
    fn dates_accept_epoch_millis() {
        let job: Job = serde_json::from_str(
            r#"{"id": 2, "start_date": 1767225600000, "due_date": "1767225600000"}"#,
        )
        .unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(job.start_date, Some(expected));
        assert_eq!(job.due_date, Some(expected));
    }

    #[test]
    fn requirements_decode_from_array_and_string() {
        let as_array: Job = serde_json::from_str(
            r##"{"id": 3, "requirements": [
                {"process_type": "insert", "category": "#10 envelope", "price_per_m": "45.00"}
            ]}"##,
        )
        .unwrap();
        assert_eq!(as_array.requirements.len(), 1);
        assert_eq!(as_array.requirements[0].process_type, "insert");
        assert_eq!(as_array.requirements[0].price_per_m, 45.0);

        let as_string: Job = serde_json::from_str(
            r#"{"id": 4, "requirements": "[{\"process_type\": \"fold\", \"price_per_m\": 12}]"}"#,
        )
        .unwrap();
        assert_eq!(as_string.requirements.len(), 1);
        assert_eq!(as_string.requirements[0].process_type, "fold");
        assert_eq!(as_string.requirements[0].price_per_m, 12.0);
    }

    #[test]
    fn malformed_requirements_become_empty() {
        let job: Job =
            serde_json::from_str(r#"{"id": 5, "requirements": "not json"}"#).unwrap();
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn requirement_attributes_are_kept() {
        let job: Job = serde_json::from_str(
            r#"{"id": 6, "requirements": [
                {"process_type": "insert", "price_per_m": 40, "stock": "24lb", "pockets": 3}
            ]}"#,
        )
        .unwrap();
        let req = &job.requirements[0];
        assert_eq!(req.attribute("stock").as_deref(), Some("24lb"));
        assert_eq!(req.attribute("pockets").as_deref(), Some("3"));
        assert_eq!(req.attribute("missing"), None);
    }

    #[test]
    fn monthly_periods_cover_range() {
        let from = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let periods = monthly_periods(from, to);
        let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
        // Half-open: first day of next month belongs to the next bucket
        assert!(periods[0].contains(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()));
        assert!(!periods[0].contains(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
    }
}
