pub mod analysis;
pub mod bookmarks;
pub mod builder;
pub mod config;
pub mod error;
pub mod json_extract;
pub mod knowledge;
pub mod model;
pub mod naming;
pub mod normalize;
pub mod parsers;
pub mod providers;
pub mod validate;

// Re-export commonly used types
pub use analysis::{
    analyze_locally, categorize, generate_notes, local_notes, AnalysisResult, AnalyzedWebsite,
};
pub use bookmarks::{extract_anchors, is_bookmark_export, BookmarkAnchor};
pub use builder::{BookmarkImporter, BookmarkImporterBuilder};
pub use config::{IngestConfig, NamingLimits};
pub use error::{IngestError, JsonExtractionError, StrictFormatError};
pub use json_extract::{extract_json, JsonStrategy};
pub use knowledge::KnowledgeBase;
pub use model::{IngestReport, KnowledgeEntry, ParseStats, WebsiteRecord};
pub use normalize::{clean_url, extract_url};
pub use parsers::{LineCandidate, ParseMode, StrictValidation};
pub use providers::{LlmProvider, OpenRouterProvider};

use log::{debug, info};
use naming::NameResolver;

/// Entry point for every parsing operation.
///
/// Owns its knowledge base and limits; nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct Ingestor {
    kb: KnowledgeBase,
    limits: NamingLimits,
}

impl Default for Ingestor {
    fn default() -> Self {
        Ingestor::new(KnowledgeBase::builtin(), NamingLimits::default())
    }
}

impl Ingestor {
    pub fn new(kb: KnowledgeBase, limits: NamingLimits) -> Self {
        Ingestor { kb, limits }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Ingestor::new(KnowledgeBase::builtin(), config.naming)
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(&self.kb, self.limits)
    }

    /// Raw URL/name/category/notes pieces of one line
    pub fn parse_line(&self, line: &str) -> Option<LineCandidate> {
        parsers::parse_line(line)
    }

    /// One line with name and notes heuristics applied
    pub fn parse_website_line(&self, line: &str) -> Option<WebsiteRecord> {
        parsers::parse_website_line(line, &self.resolver())
    }

    /// Every line parsed on its own
    pub fn parse_smart(&self, text: &str) -> Vec<WebsiteRecord> {
        parsers::parse_smart(text, &self.resolver())
    }

    /// Category lines above URLs, note lines below them
    pub fn parse_grouped(&self, text: &str) -> Vec<WebsiteRecord> {
        parsers::parse_grouped(text)
    }

    pub fn parse_strict(&self, text: &str) -> Result<Vec<WebsiteRecord>, StrictFormatError> {
        parsers::parse_strict(text)
    }

    pub fn validate_strict_format(&self, text: &str) -> StrictValidation {
        let mut validation = parsers::validate_strict_format(text);
        validation.records = self.finish_notes(validation.records, false);
        validation
    }

    /// Anchors of a bookmark export mapped to records, before validation
    pub fn import_bookmark_html(&self, html: &str) -> Vec<WebsiteRecord> {
        let anchors = extract_anchors(html);
        bookmarks::parse_bookmarks(&anchors, &self.resolver())
    }

    pub fn validate(&self, records: Vec<WebsiteRecord>) -> Vec<WebsiteRecord> {
        validate::validate(records)
    }

    pub fn stats(&self, text: &str, records: &[WebsiteRecord]) -> ParseStats {
        validate::compute_stats(text, records)
    }

    /// Cleans multi-line notes against the URL, the name and the domain
    /// keyword, naming unnamed records first when `fill_names` is set
    fn finish_notes(&self, records: Vec<WebsiteRecord>, fill_names: bool) -> Vec<WebsiteRecord> {
        let resolver = self.resolver();
        records
            .into_iter()
            .map(|mut record| {
                if fill_names && record.name.trim().is_empty() {
                    record.name = resolver.derive_name(&record.url, None, None);
                }
                record.notes = resolver.derive_note_lines(&record.notes, &record.url, &record.name);
                record
            })
            .collect()
    }

    /// Parses `text` with `mode`, validates the records and computes stats.
    ///
    /// Only strict mode can fail.
    pub fn ingest(&self, text: &str, mode: ParseMode) -> Result<IngestReport, IngestError> {
        let mode = match mode {
            ParseMode::Auto if is_bookmark_export(text) => ParseMode::BookmarkHtml,
            ParseMode::Auto => ParseMode::Smart,
            other => other,
        };
        debug!("Ingesting {} bytes in {} mode", text.len(), mode.as_str());

        let report = match mode {
            ParseMode::BookmarkHtml => {
                let anchors = extract_anchors(text);
                let records = self.validate(bookmarks::parse_bookmarks(&anchors, &self.resolver()));
                let stats = validate::stats_from_counts(anchors.len(), records.len());
                IngestReport { records, stats }
            }
            ParseMode::Strict => {
                let records = self.finish_notes(self.validate(self.parse_strict(text)?), false);
                let stats = self.stats(text, &records);
                IngestReport { records, stats }
            }
            ParseMode::Grouped => {
                let records = self.finish_notes(self.validate(self.parse_grouped(text)), true);
                let stats = self.stats(text, &records);
                IngestReport { records, stats }
            }
            ParseMode::Smart | ParseMode::Auto => {
                let records = self.validate(self.parse_smart(text));
                let stats = self.stats(text, &records);
                IngestReport { records, stats }
            }
        };

        info!(
            "Parsed {} of {} lines ({}%)",
            report.stats.successfully_parsed, report.stats.total_lines, report.stats.success_rate
        );
        Ok(report)
    }
}

/// Parses a pasted block with the built-in knowledge base
///
/// # Example
/// ```
/// use bookmark_ingest::{parse_text, ParseMode};
///
/// let report = parse_text("GitHub - https://github.com", ParseMode::Smart).unwrap();
/// assert_eq!(report.records[0].name, "GitHub");
/// ```
pub fn parse_text(text: &str, mode: ParseMode) -> Result<IngestReport, IngestError> {
    Ingestor::default().ingest(text, mode)
}

/// Imports a browser bookmark export into validated records
pub fn import_bookmark_html(html: &str) -> Vec<WebsiteRecord> {
    let ingestor = Ingestor::default();
    ingestor.validate(ingestor.import_bookmark_html(html))
}
