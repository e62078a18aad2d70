use super::content_lines;
use crate::model::WebsiteRecord;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static URL_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

enum GroupState {
    /// Before the first URL; the latest label line is the category
    NoUrlYet { category: String },
    /// Collecting note lines for `url`
    HasUrl {
        category: String,
        url: String,
        notes: Vec<String>,
    },
}

fn flush(category: &str, url: String, notes: Vec<String>) -> WebsiteRecord {
    WebsiteRecord {
        url,
        name: String::new(),
        category: category.to_string(),
        notes: notes.join("\n"),
    }
}

/// Groups label lines and note lines around URL lines.
///
/// ```text
/// 开发工具              <- category for the URLs that follow
/// https://github.com
/// 代码托管平台          <- note for github.com
/// ```
///
/// URLs are returned as written; names are left empty.
pub fn parse_grouped(text: &str) -> Vec<WebsiteRecord> {
    let mut records = Vec::new();
    let mut state = GroupState::NoUrlYet {
        category: String::new(),
    };

    for line in content_lines(text) {
        let is_url = URL_LINE.is_match(line);
        state = match (state, is_url) {
            (GroupState::NoUrlYet { category }, true) => GroupState::HasUrl {
                category,
                url: line.to_string(),
                notes: Vec::new(),
            },
            (GroupState::NoUrlYet { .. }, false) => GroupState::NoUrlYet {
                category: line.to_string(),
            },
            (GroupState::HasUrl { category, url, notes }, true) => {
                records.push(flush(&category, url, notes));
                GroupState::HasUrl {
                    category,
                    url: line.to_string(),
                    notes: Vec::new(),
                }
            }
            (GroupState::HasUrl { category, url, mut notes }, false) => {
                notes.push(line.to_string());
                GroupState::HasUrl { category, url, notes }
            }
        };
    }

    if let GroupState::HasUrl { category, url, notes } = state {
        records.push(flush(&category, url, notes));
    }

    debug!("Grouped parser produced {} records", records.len());
    records
}
