use std::path::PathBuf;

use crate::{
    IngestConfig, IngestError, IngestReport, Ingestor, KnowledgeBase, NamingLimits, ParseMode,
};

/// Where the text to ingest comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Pasted text or file contents already in memory
    Text(String),
    /// A file read when the import runs
    File(PathBuf),
}

/// Builder for configuring and executing bookmark imports
#[derive(Debug, Default)]
pub struct BookmarkImporterBuilder {
    source: Option<InputSource>,
    mode: ParseMode,
    kb: Option<KnowledgeBase>,
    limits: Option<NamingLimits>,
}

impl BookmarkImporterBuilder {
    /// Set the input to pasted text
    ///
    /// # Example
    /// ```
    /// use bookmark_ingest::BookmarkImporter;
    ///
    /// let builder = BookmarkImporter::builder()
    ///     .text("GitHub - https://github.com");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input to a file, such as a browser bookmark export
    ///
    /// The file is read by [`build`](Self::build).
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::File(path.into()));
        self
    }

    /// Choose how the input is parsed; defaults to [`ParseMode::Auto`]
    ///
    /// # Example
    /// ```
    /// use bookmark_ingest::{BookmarkImporter, ParseMode};
    ///
    /// let builder = BookmarkImporter::builder()
    ///     .text("开发工具\nhttps://github.com")
    ///     .mode(ParseMode::Grouped);
    /// ```
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the built-in knowledge base
    pub fn knowledge_base(mut self, kb: KnowledgeBase) -> Self {
        self.kb = Some(kb);
        self
    }

    /// Override the name and notes length limits
    pub fn limits(mut self, limits: NamingLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Take the limits from a loaded configuration
    ///
    /// Limits set with [`limits`](Self::limits) win over this.
    pub fn config(mut self, config: &IngestConfig) -> Self {
        self.limits.get_or_insert(config.naming);
        self
    }

    /// Build and execute the import
    ///
    /// # Errors
    /// Returns `IngestError` if:
    /// - No input was specified
    /// - The input file cannot be read
    /// - Strict mode rejects the input
    ///
    /// # Example
    /// ```
    /// use bookmark_ingest::{BookmarkImporter, ParseMode};
    ///
    /// let report = BookmarkImporter::builder()
    ///     .text("https://github.com\n代码托管平台")
    ///     .mode(ParseMode::Strict)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(report.records[0].notes, "代码托管平台");
    /// ```
    pub fn build(self) -> Result<IngestReport, IngestError> {
        let source = self.source.ok_or_else(|| {
            IngestError::BuilderError("No input specified. Use .text() or .file()".to_string())
        })?;

        let text = match source {
            InputSource::Text(text) => text,
            InputSource::File(path) => std::fs::read_to_string(&path)?,
        };

        let ingestor = Ingestor::new(
            self.kb.unwrap_or_else(KnowledgeBase::builtin),
            self.limits.unwrap_or_default(),
        );
        ingestor.ingest(&text, self.mode)
    }
}

/// Main entry point for the builder API
pub struct BookmarkImporter;

impl BookmarkImporter {
    /// Creates a new builder for importing bookmarks
    ///
    /// # Example
    /// ```
    /// use bookmark_ingest::BookmarkImporter;
    ///
    /// let builder = BookmarkImporter::builder();
    /// ```
    pub fn builder() -> BookmarkImporterBuilder {
        BookmarkImporterBuilder::default()
    }
}
