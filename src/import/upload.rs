//! Sequential chunked upload of validated production entries.
//!
//! Chunks go out one at a time to bound load on the backend. A chunk failure
//! aborts the remaining chunks; the report carries the partial success count.

use log::{debug, warn};

use crate::error::PressdeskError;

use super::NewProductionEntry;

/// Where validated entries go. The REST client implements this; tests use a
/// counting sink.
pub trait EntrySink {
    fn submit(&mut self, batch: &[NewProductionEntry]) -> crate::error::Result<()>;
}

#[derive(Debug)]
pub struct UploadReport {
    pub uploaded: usize,
    pub total: usize,
    pub chunks_sent: usize,
    /// Set when a chunk failed and the rest were aborted.
    pub error: Option<PressdeskError>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.uploaded == self.total
    }
}

/// Upload entries in chunks of `chunk_size`, invoking `progress` with the
/// cumulative uploaded count after each successful chunk.
pub fn upload_entries<S: EntrySink>(
    sink: &mut S,
    entries: &[NewProductionEntry],
    chunk_size: usize,
    mut progress: impl FnMut(usize, usize),
) -> UploadReport {
    let chunk_size = chunk_size.max(1);
    let total = entries.len();
    let mut uploaded = 0;
    let mut chunks_sent = 0;

    for chunk in entries.chunks(chunk_size) {
        chunks_sent += 1;
        debug!("uploading chunk {chunks_sent} ({} entries)", chunk.len());
        if let Err(e) = sink.submit(chunk) {
            warn!("chunk {chunks_sent} failed, aborting remaining uploads: {e}");
            return UploadReport {
                uploaded,
                total,
                chunks_sent,
                error: Some(e),
            };
        }
        uploaded += chunk.len();
        progress(uploaded, total);
    }

    UploadReport {
        uploaded,
        total,
        chunks_sent,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entries(n: usize) -> Vec<NewProductionEntry> {
        (0..n)
            .map(|i| NewProductionEntry {
                job_id: i as u64,
                job_number: format!("J-{i}"),
                quantity: 100,
                entry_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                notes: None,
            })
            .collect()
    }

    struct CountingSink {
        batch_sizes: Vec<usize>,
        fail_on_call: Option<usize>,
    }

    impl EntrySink for CountingSink {
        fn submit(&mut self, batch: &[NewProductionEntry]) -> crate::error::Result<()> {
            let call = self.batch_sizes.len() + 1;
            if self.fail_on_call == Some(call) {
                return Err(PressdeskError::ApiRequest {
                    url: "test".into(),
                    reason: "boom".into(),
                });
            }
            self.batch_sizes.push(batch.len());
            Ok(())
        }
    }

    #[test]
    fn one_hundred_twenty_entries_take_three_calls() {
        let mut sink = CountingSink {
            batch_sizes: Vec::new(),
            fail_on_call: None,
        };
        let mut progress_seen = Vec::new();
        let report = upload_entries(&mut sink, &entries(120), 50, |done, total| {
            progress_seen.push((done, total));
        });

        assert_eq!(sink.batch_sizes, vec![50, 50, 20]);
        assert_eq!(report.chunks_sent, 3);
        assert_eq!(report.uploaded, 120);
        assert!(report.is_complete());
        assert_eq!(progress_seen, vec![(50, 120), (100, 120), (120, 120)]);
    }

    #[test]
    fn chunk_failure_aborts_remaining_and_reports_partial() {
        let mut sink = CountingSink {
            batch_sizes: Vec::new(),
            fail_on_call: Some(2),
        };
        let report = upload_entries(&mut sink, &entries(120), 50, |_, _| {});

        assert_eq!(sink.batch_sizes, vec![50]); // only the first succeeded
        assert_eq!(report.chunks_sent, 2);
        assert_eq!(report.uploaded, 50);
        assert!(!report.is_complete());
        assert!(report.error.is_some());
    }

    #[test]
    fn empty_entry_list_sends_nothing() {
        let mut sink = CountingSink {
            batch_sizes: Vec::new(),
            fail_on_call: None,
        };
        let report = upload_entries(&mut sink, &[], 50, |_, _| {});
        assert_eq!(report.chunks_sent, 0);
        assert!(report.is_complete());
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let mut sink = CountingSink {
            batch_sizes: Vec::new(),
            fail_on_call: None,
        };
        let report = upload_entries(&mut sink, &entries(3), 0, |_, _| {});
        assert_eq!(report.chunks_sent, 3);
        assert_eq!(report.uploaded, 3);
    }
}
