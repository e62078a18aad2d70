mod grouped;
mod line;
mod strict;

pub use grouped::parse_grouped;
pub use line::{parse_line, parse_smart, parse_website_line, LineCandidate};
pub use strict::{parse_strict, validate_strict_format, StrictValidation};

use serde::{Deserialize, Serialize};

/// How a pasted block is turned into records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Bookmark export when the input looks like one, otherwise smart
    #[default]
    Auto,
    /// Every line parsed on its own as a composite entry
    Smart,
    /// Category lines above URLs, note lines below them
    Grouped,
    /// One URL per line, line-numbered errors instead of guesses
    Strict,
    /// Netscape bookmark export HTML
    BookmarkHtml,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Auto => "auto",
            ParseMode::Smart => "smart",
            ParseMode::Grouped => "grouped",
            ParseMode::Strict => "strict",
            ParseMode::BookmarkHtml => "html",
        }
    }
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ParseMode::Auto),
            "smart" => Ok(ParseMode::Smart),
            "grouped" => Ok(ParseMode::Grouped),
            "strict" => Ok(ParseMode::Strict),
            "html" | "bookmarks" => Ok(ParseMode::BookmarkHtml),
            other => Err(format!("Unknown parse mode: {other}")),
        }
    }
}

/// Trimmed, non-blank lines in input order; handles `\r\n`
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_skip_blanks_and_crlf() {
        let lines: Vec<&str> = content_lines("a\r\n\r\n  b  \n\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_mode_from_str() {
        assert_eq!("Grouped".parse::<ParseMode>(), Ok(ParseMode::Grouped));
        assert_eq!("bookmarks".parse::<ParseMode>(), Ok(ParseMode::BookmarkHtml));
        assert!("loose".parse::<ParseMode>().is_err());
    }
}
