//! Single-line layouts.
//!
//! Supported shapes, tried in order:
//! 1. `https://www.google.com | Google搜索 [搜索引擎] # 日常搜索工具`
//! 2. `Google搜索 - https://www.google.com`, `https://www.google.com Google搜索`,
//!    `Google搜索 https://www.google.com`
//! 3. a bare URL or domain
//!
//! `[category]` and `# notes` are recognised the same way in every layout.

use super::content_lines;
use crate::model::WebsiteRecord;
use crate::naming::NameResolver;
use crate::normalize::{extract_url, find_url, UrlMatch};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static CATEGORY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\[([^\]]+)\]\s*$").unwrap());

static ANY_CATEGORY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static PIPE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)\s*\|\s*(.+)$").unwrap());

/// Raw pieces of one line before names and notes are cleaned up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCandidate {
    pub url: String,
    pub name: String,
    pub category: String,
    pub notes: String,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '|' | '–' | '—' | ':' | '：')
}

/// Splits off a trailing `# notes` segment.
///
/// A `#` inside a URL (a fragment) is not a delimiter, and both sides must
/// be non-empty.
fn split_notes(line: &str) -> (&str, Option<&str>) {
    for (idx, _) in line.match_indices('#') {
        let token_start = line[..idx]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let token = &line[token_start..idx];
        if token.contains("://") || find_url(token).is_some() {
            continue;
        }

        let head = line[..idx].trim_end();
        let tail = line[idx + 1..].trim();
        if !head.is_empty() && !tail.is_empty() {
            return (head, Some(tail));
        }
    }

    (line, None)
}

/// What is left of `text` once the URL, `[...]` and `#...` are gone
fn raw_name(text: &str, found: &UrlMatch) -> String {
    let without_url = found.remove_from(text);
    let trimmed = without_url.trim_matches(is_separator);
    let without_category = BRACKETED.replace(trimmed, "");
    let without_notes = without_category
        .split_once('#')
        .map_or(without_category.as_ref(), |(head, _)| head);

    without_notes.trim_matches(is_separator).to_string()
}

/// Layouts that can be told apart by their punctuation
fn parse_structured(line: &str) -> Option<LineCandidate> {
    let (body, notes) = split_notes(line);

    let (body, category) = match CATEGORY_SUFFIX.captures(body) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).trim(),
            caps[2].trim().to_string(),
        ),
        None => (body, String::new()),
    };

    let (url, name) = if let Some(caps) = PIPE_SPLIT.captures(body) {
        let left = caps[1].trim();
        let right = caps[2].trim();

        // Both sides holding a URL resolves to the left one
        match (extract_url(left), extract_url(right)) {
            (Some(url), _) => (url, right.to_string()),
            (None, Some(url)) => (url, left.to_string()),
            (None, None) => return None,
        }
    } else {
        let found = find_url(body)?;
        let name = raw_name(body, &found);
        (found.canonical, name)
    };

    Some(LineCandidate {
        url,
        name,
        category,
        notes: notes.unwrap_or_default().to_string(),
    })
}

/// Last resort: any URL anywhere in the line
fn parse_unstructured(line: &str) -> Option<LineCandidate> {
    let found = find_url(line)?;
    let rest = found.remove_from(line);

    let notes = rest
        .split_once('#')
        .map(|(_, notes)| notes.trim().to_string())
        .unwrap_or_default();
    let category = ANY_CATEGORY
        .captures(&rest)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();
    let name = raw_name(line, &found);

    Some(LineCandidate {
        url: found.canonical,
        name,
        category,
        notes,
    })
}

/// Splits one line into URL, name, category and notes candidates.
///
/// Returns `None` when no URL can be found anywhere in the line.
pub fn parse_line(line: &str) -> Option<LineCandidate> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(candidate) = parse_structured(trimmed) {
        debug!("Structured layout matched: {}", candidate.url);
        return Some(candidate);
    }

    let candidate = parse_unstructured(trimmed);
    match &candidate {
        Some(c) => debug!("Unstructured layout matched: {}", c.url),
        None => debug!("No URL in line: {}", trimmed),
    }
    candidate
}

/// Parses one line and upgrades its raw name and notes into final values
pub fn parse_website_line(line: &str, resolver: &NameResolver<'_>) -> Option<WebsiteRecord> {
    let candidate = parse_line(line)?;

    let surrounding = (!candidate.notes.is_empty()).then_some(candidate.notes.as_str());
    let name = resolver.derive_name(&candidate.url, Some(&candidate.name), surrounding);
    let notes = resolver.derive_notes(&candidate.notes, &candidate.url, &name);

    Some(WebsiteRecord {
        url: candidate.url,
        name,
        category: candidate.category,
        notes,
    })
}

/// Parses every non-blank line on its own; unparseable lines are skipped
pub fn parse_smart(text: &str, resolver: &NameResolver<'_>) -> Vec<WebsiteRecord> {
    content_lines(text)
        .filter_map(|line| parse_website_line(line, resolver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingLimits;
    use crate::knowledge::KnowledgeBase;

    #[test]
    fn test_full_format() {
        let candidate =
            parse_line("https://www.google.com | Google搜索 [搜索引擎] # 日常搜索必备工具").unwrap();
        assert_eq!(
            candidate,
            LineCandidate {
                url: "https://www.google.com".to_string(),
                name: "Google搜索".to_string(),
                category: "搜索引擎".to_string(),
                notes: "日常搜索必备工具".to_string(),
            }
        );
    }

    #[test]
    fn test_pipe_with_name_first() {
        let candidate = parse_line("GitHub | github.com/rust-lang").unwrap();
        assert_eq!(candidate.url, "https://github.com/rust-lang");
        assert_eq!(candidate.name, "GitHub");
    }

    #[test]
    fn test_pipe_with_urls_on_both_sides_prefers_left() {
        let candidate = parse_line("https://a.example.com | https://b.example.com").unwrap();
        assert_eq!(candidate.url, "https://a.example.com");
    }

    #[test]
    fn test_dash_bookmark_format() {
        let candidate = parse_line("Google搜索 - https://www.google.com").unwrap();
        assert_eq!(candidate.url, "https://www.google.com");
        assert_eq!(candidate.name, "Google搜索");
        assert_eq!(candidate.category, "");
    }

    #[test]
    fn test_url_first_and_name_first() {
        let candidate = parse_line("https://www.figma.com 设计协作").unwrap();
        assert_eq!(candidate.name, "设计协作");

        let candidate = parse_line("设计协作 https://www.figma.com").unwrap();
        assert_eq!(candidate.url, "https://www.figma.com");
        assert_eq!(candidate.name, "设计协作");
    }

    #[test]
    fn test_fragment_is_not_notes() {
        let candidate = parse_line("https://example.com/app#/settings 控制台").unwrap();
        assert_eq!(candidate.url, "https://example.com/app");
        assert_eq!(candidate.notes, "");
        assert_eq!(candidate.name, "控制台");
    }

    #[test]
    fn test_notes_holding_the_url_fall_back_to_unstructured() {
        let candidate = parse_line("Google # https://google.com").unwrap();
        assert_eq!(candidate.url, "https://google.com");
        assert_eq!(candidate.name, "Google");
        assert_eq!(candidate.notes, "");
    }

    #[test]
    fn test_no_url() {
        assert!(parse_line("开发工具").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("left | right").is_none());
    }

    #[test]
    fn test_parse_website_line_applies_heuristics() {
        let kb = KnowledgeBase::builtin();
        let resolver = NameResolver::new(&kb, NamingLimits::default());

        let record = parse_website_line("https://github.com", &resolver).unwrap();
        assert_eq!(record.name, "GitHub");
        assert_eq!(record.notes, "");

        let record =
            parse_website_line("https://github.com # GitHub 上的开源项目", &resolver).unwrap();
        assert_eq!(record.name, "GitHub");
        assert_eq!(record.notes, "上的开源项目");
    }

    #[test]
    fn test_parse_smart_skips_unparseable_lines() {
        let kb = KnowledgeBase::builtin();
        let resolver = NameResolver::new(&kb, NamingLimits::default());
        let records = parse_smart(
            "常用网站\nhttps://github.com\n\nYouTube - https://www.youtube.com\n随便写写",
            &resolver,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "YouTube");
    }
}
