use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressdeskError {
    #[error("Config directory not found at {0}. Run 'pressdesk init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("No API token configured. Set [api] token or token_env in config.toml, or pass --jobs <file>.")]
    MissingApiToken,

    #[error("API request to {url} failed: {reason}")]
    ApiRequest { url: String, reason: String },

    #[error("Unexpected API response from {url}: {reason}")]
    ApiResponse { url: String, reason: String },

    #[error("Failed to read jobs snapshot {path}: {reason}")]
    SnapshotRead { path: PathBuf, reason: String },

    #[error("Spreadsheet file not found: {0}")]
    SpreadsheetNotFound(PathBuf),

    #[error("Failed to open spreadsheet {path}: {reason}")]
    SpreadsheetOpen { path: PathBuf, reason: String },

    #[error("Spreadsheet {path} has no worksheets")]
    SpreadsheetEmpty { path: PathBuf },

    #[error("Spreadsheet is missing required column '{0}' (expected: Job Number, Production Quantity, Date, Notes)")]
    MissingColumn(String),

    #[error("No valid rows to upload ({invalid} invalid row(s) reported above)")]
    NothingToUpload { invalid: usize },

    #[error("Invalid --by value '{0}'. Use 'client', 'process', or 'period'.")]
    InvalidGrouping(String),

    #[error("Invalid --metric value '{0}'. Use 'revenue', 'volume', or 'profit'.")]
    InvalidMetric(String),

    #[error("Invalid date '{value}' for {flag}. Expected YYYY-MM-DD.")]
    InvalidDate { flag: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PressdeskError>;
