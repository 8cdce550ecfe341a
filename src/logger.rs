use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};

pub fn format_entry(
    timestamp: DateTime<Utc>,
    status: u16,
    model: &str,
    tokens: u64,
    elapsed: Duration,
) -> String {
    format!(
        "{} | {:3} | {:30} | {:8} tokens | {:6} ms\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        status,
        model,
        tokens,
        elapsed.as_millis()
    )
}

/// Appends one ledger line. A failed write is reported and otherwise ignored.
pub fn log_request(
    log_path: &Path,
    status: u16,
    model: &str,
    tokens: u64,
    elapsed: Duration,
) {
    let log_entry = format_entry(Utc::now(), status, model, tokens, elapsed);

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(mut file) => {
            if let Err(err) = file.write_all(log_entry.as_bytes()) {
                tracing::warn!(path = %log_path.display(), error = %err, "failed to write request log");
            }
        }
        Err(err) => {
            tracing::warn!(path = %log_path.display(), error = %err, "failed to open request log");
        }
    }
}
