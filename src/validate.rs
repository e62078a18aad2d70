use crate::model::{ParseStats, WebsiteRecord};
use crate::normalize::clean_url;
use crate::parsers::content_lines;
use log::debug;

/// Keeps records whose URL cleans up, with the URL replaced by its canonical form
pub fn validate(records: Vec<WebsiteRecord>) -> Vec<WebsiteRecord> {
    let before = records.len();
    let valid: Vec<WebsiteRecord> = records
        .into_iter()
        .filter_map(|mut record| {
            record.url = clean_url(&record.url)?;
            Some(record)
        })
        .collect();

    if valid.len() < before {
        debug!("Dropped {} records without a usable URL", before - valid.len());
    }
    valid
}

/// Stats for `records` parsed out of `text`, counting non-blank lines
pub fn compute_stats(text: &str, records: &[WebsiteRecord]) -> ParseStats {
    stats_from_counts(content_lines(text).count(), records.len())
}

/// Stats from raw counts; `parsed` is capped at `total`
pub fn stats_from_counts(total: usize, parsed: usize) -> ParseStats {
    let parsed = parsed.min(total);
    let success_rate = if total == 0 {
        0
    } else {
        (parsed as f64 / total as f64 * 100.0).round() as u32
    };

    ParseStats {
        total_lines: total,
        successfully_parsed: parsed,
        failed_lines: total - parsed,
        success_rate,
    }
}
