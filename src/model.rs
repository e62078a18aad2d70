use serde::{Deserialize, Serialize};

/// A website recognised in pasted text or an imported bookmark file.
///
/// Serialises to the `{url, name, category, notes}` shape the dashboard
/// stores; empty strings stand for "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl WebsiteRecord {
    pub fn new(url: impl Into<String>) -> Self {
        WebsiteRecord {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Static facts about a well-known site, keyed by domain keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub name: String,
    pub category: String,
    pub description: String,
    /// CSS color class used by the dashboard cards
    pub color: String,
}

/// How well a parse went, recomputed on every run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    pub total_lines: usize,
    pub successfully_parsed: usize,
    pub failed_lines: usize,
    /// Percentage, rounded to the nearest integer
    pub success_rate: u32,
}

/// Records plus stats, as returned by the builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub records: Vec<WebsiteRecord>,
    pub stats: ParseStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = WebsiteRecord {
            url: "https://github.com".to_string(),
            name: "GitHub".to_string(),
            category: String::new(),
            notes: String::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://github.com",
                "name": "GitHub",
                "category": "",
                "notes": ""
            })
        );
    }

    #[test]
    fn test_stats_use_camel_case() {
        let stats = ParseStats {
            total_lines: 4,
            successfully_parsed: 3,
            failed_lines: 1,
            success_rate: 75,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"totalLines\":4"));
        assert!(json.contains("\"successRate\":75"));
    }

    #[test]
    fn test_record_accepts_missing_optional_fields() {
        let record: WebsiteRecord = serde_json::from_str(r#"{"url": "https://a.com"}"#).unwrap();
        assert_eq!(record, WebsiteRecord::new("https://a.com"));
    }
}
