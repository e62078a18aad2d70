use crate::error::StrictFormatError;
use crate::model::WebsiteRecord;
use crate::normalize::clean_url;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(https?://|www\.)").unwrap());

/// Outcome of strict validation, shaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictValidation {
    pub valid: bool,
    pub error: Option<String>,
    /// 1-based line the error refers to
    pub error_line: Option<usize>,
    pub records: Vec<WebsiteRecord>,
}

struct OpenEntry {
    url: String,
    notes: Vec<String>,
}

impl OpenEntry {
    fn into_record(self) -> WebsiteRecord {
        WebsiteRecord {
            url: self.url,
            notes: self.notes.join("\n"),
            ..Default::default()
        }
    }
}

/// Parses input where every URL sits on its own line.
///
/// Lines before the first URL are notes for that URL; lines after a URL are
/// notes for it. Anything else is reported with its 1-based line number.
pub fn parse_strict(text: &str) -> Result<Vec<WebsiteRecord>, StrictFormatError> {
    let mut records = Vec::new();
    let mut pending: Vec<(usize, String)> = Vec::new();
    let mut current: Option<OpenEntry> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if !URL_MARKER.is_match(line) {
            match current.as_mut() {
                Some(entry) => entry.notes.push(line.to_string()),
                None => pending.push((line_no, line.to_string())),
            }
            continue;
        }

        let (token, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(token, rest)| (token, rest.trim()));
        if !rest.is_empty() {
            warn!("Strict parse rejected line {}: trailing content", line_no);
            return Err(StrictFormatError::TrailingContent {
                line: line_no,
                content: rest.to_string(),
            });
        }

        let url = clean_url(token).ok_or_else(|| StrictFormatError::InvalidUrl {
            line: line_no,
            url: token.to_string(),
        })?;

        if let Some(entry) = current.take() {
            records.push(entry.into_record());
        }
        current = Some(OpenEntry {
            url,
            notes: pending.drain(..).map(|(_, note)| note).collect(),
        });
    }

    if let Some(entry) = current.take() {
        records.push(entry.into_record());
    }

    if let Some((line, _)) = pending.first() {
        return Err(StrictFormatError::DanglingNotes { line: *line });
    }
    if records.is_empty() {
        return Err(StrictFormatError::Empty);
    }

    debug!("Strict parser accepted {} records", records.len());
    Ok(records)
}

/// [`parse_strict`] folded into a value that never fails
pub fn validate_strict_format(text: &str) -> StrictValidation {
    match parse_strict(text) {
        Ok(records) => StrictValidation {
            valid: true,
            error: None,
            error_line: None,
            records,
        },
        Err(e) => StrictValidation {
            valid: false,
            error: Some(e.to_string()),
            error_line: e.line(),
            records: Vec::new(),
        },
    }
}
