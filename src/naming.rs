//! Display names, notes and descriptions for websites.
//!
//! Each value is resolved from an ordered list of sources; the first source
//! that yields something usable wins.

use crate::config::NamingLimits;
use crate::knowledge::KnowledgeBase;
use crate::normalize::{capitalize, domain_keyword, strip_urls};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Name used when nothing at all can be derived
pub const UNKNOWN_SITE: &str = "未知网站";

static NAME_LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(网站|网址|链接|地址|URL)[:：\s]*").unwrap());

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[(（][^()（）]*[)）]\s*$").unwrap());

static DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^这是([^，。！？\s]+)",
        r"使用([^，。！？\s]+)进行",
        r"访问([^，。！？\s]+)观看",
        r"在([^，。！？\s]+)上",
        r"打开([^，。！？\s]+)设计",
        r"登录([^，。！？\s]+)工作",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

static WORD_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s，。！？]+").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Keywords whose capitalized form reads badly
const SPECIAL_NAMES: &[(&str, &str)] = &[
    ("jd", "京东"),
    ("tb", "淘宝"),
    ("tmall", "天猫"),
    ("qq", "QQ"),
    ("wx", "微信"),
    ("wb", "微博"),
    ("zhihu", "知乎"),
    ("douban", "豆瓣"),
    ("csdn", "CSDN"),
    ("oschina", "开源中国"),
    ("gitee", "码云"),
    ("aliyun", "阿里云"),
    ("qcloud", "腾讯云"),
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '|' | '–' | '—' | ':' | '：')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect::<String>().trim().to_string()
}

/// Which characters count as word characters when stripping a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordBoundary {
    /// Any letter or digit; `Google` stays inside `Google搜索`
    Unicode,
    /// ASCII letters and digits only; `GitHub` is cut out of `GitHub代码托管`
    Ascii,
}

impl WordBoundary {
    fn is_word_char(self, c: char) -> bool {
        match self {
            WordBoundary::Unicode => c.is_alphanumeric() || c == '_',
            WordBoundary::Ascii => c.is_ascii_alphanumeric() || c == '_',
        }
    }

    fn assertion(self) -> &'static str {
        match self {
            WordBoundary::Unicode => r"\b",
            WordBoundary::Ascii => r"(?-u:\b)",
        }
    }
}

/// Removes case-insensitive occurrences of `word` that stand on their own.
///
/// Word boundaries are only required at edges where `word` itself begins or
/// ends with a word character, so `Disney+` and `哔哩哔哩` still match.
fn strip_whole_word(text: &str, word: &str, boundary: WordBoundary) -> String {
    let (Some(first), Some(last)) = (word.chars().next(), word.chars().last()) else {
        return text.to_string();
    };

    let pattern = format!(
        "(?i){}{}{}",
        if boundary.is_word_char(first) { boundary.assertion() } else { "" },
        regex::escape(word),
        if boundary.is_word_char(last) { boundary.assertion() } else { "" },
    );

    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Strips URLs, `name` and `keyword` from one piece of note text
fn strip_note_text(raw: &str, name: &str, keyword: Option<&str>) -> String {
    let mut notes = strip_urls(raw.trim());

    if !name.is_empty() && name != UNKNOWN_SITE {
        notes = strip_whole_word(&notes, name, WordBoundary::Ascii);
    }
    if let Some(keyword) = keyword {
        notes = strip_whole_word(&notes, keyword, WordBoundary::Ascii);
    }

    WHITESPACE_RUN
        .replace_all(&notes, " ")
        .trim_matches(is_separator)
        .to_string()
}

/// Fallback name built from the domain keyword alone
pub fn name_from_keyword(keyword: Option<&str>) -> String {
    let Some(keyword) = keyword.filter(|k| !k.is_empty()) else {
        return UNKNOWN_SITE.to_string();
    };

    let lower = keyword.to_lowercase();
    SPECIAL_NAMES
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| capitalize(keyword))
}

/// Derives names, notes and descriptions against a knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    kb: &'a KnowledgeBase,
    limits: NamingLimits,
}

impl<'a> NameResolver<'a> {
    pub fn new(kb: &'a KnowledgeBase, limits: NamingLimits) -> Self {
        NameResolver { kb, limits }
    }

    /// Picks the display name for `url`.
    ///
    /// Order: the cleaned user-provided name, a name found in the surrounding
    /// text, the knowledge base name, and finally one generated from the
    /// domain keyword.
    pub fn derive_name(
        &self,
        url: &str,
        user_provided: Option<&str>,
        surrounding: Option<&str>,
    ) -> String {
        if let Some(name) = user_provided.and_then(|name| self.clean_user_name(name, url)) {
            return name;
        }

        if let Some(name) = surrounding.and_then(|text| self.name_from_description(text)) {
            debug!("Name '{}' inferred from surrounding text", name);
            return truncate_chars(&name, self.limits.name_max_chars);
        }

        let keyword = domain_keyword(url);
        if let Some(entry) = keyword.as_deref().and_then(|k| self.kb.lookup(k)) {
            return truncate_chars(&entry.name, self.limits.name_max_chars);
        }

        truncate_chars(&name_from_keyword(keyword.as_deref()), self.limits.name_max_chars)
    }

    /// Cleans up a name the user typed; `None` when too little survives.
    fn clean_user_name(&self, name: &str, url: &str) -> Option<String> {
        let without_urls = strip_urls(name.trim());
        let mut cleaned = NAME_LABEL_PREFIX
            .replace(without_urls.trim(), "")
            .trim_matches(is_separator)
            .to_string();

        // A name that is just the keyword is kept as typed
        if let Some(keyword) = domain_keyword(url) {
            if cleaned.to_lowercase() != keyword {
                cleaned = strip_whole_word(&cleaned, &keyword, WordBoundary::Unicode);
            }
        }

        let mut cleaned = cleaned.trim_matches(is_separator).to_string();

        if char_len(&cleaned) > 10 {
            let stripped = TRAILING_PARENTHETICAL
                .replace(&cleaned, "")
                .trim_matches(is_separator)
                .to_string();
            if char_len(&stripped) >= self.limits.name_min_chars {
                cleaned = stripped;
            }
        }

        if char_len(&cleaned) < self.limits.name_min_chars || cleaned == UNKNOWN_SITE {
            return None;
        }

        Some(truncate_chars(&cleaned, self.limits.name_max_chars))
    }

    /// Looks for a site name inside free-form description text.
    fn name_from_description(&self, description: &str) -> Option<String> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }

        for pattern in DESCRIPTION_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(description) {
                let extracted = caps[1].trim();
                let len = char_len(extracted);
                if (2..=20).contains(&len) && !extracted.contains("http") {
                    return Some(extracted.to_string());
                }
            }
        }

        for word in WORD_SEPARATORS.split(description) {
            if !(2..=15).contains(&char_len(word)) {
                continue;
            }
            if let Some(entry) = self.kb.lookup(word) {
                return Some(entry.name.clone());
            }
            if CAPITALIZED_WORD.is_match(word) {
                return Some(word.to_string());
            }
        }

        None
    }

    /// Cleans free text into a note for `url`.
    ///
    /// Embedded URLs, the name and the domain keyword are removed. Returns an
    /// empty string when the remainder is too short to be useful.
    pub fn derive_notes(&self, raw: &str, url: &str, name: &str) -> String {
        let keyword = domain_keyword(url);
        let notes = strip_note_text(raw, name, keyword.as_deref());
        let notes = notes.as_str();

        if char_len(notes) < self.limits.notes_min_chars || notes == name {
            return String::new();
        }

        if char_len(notes) > self.limits.notes_max_chars {
            return format!("{}...", truncate_chars(notes, self.limits.notes_max_chars));
        }

        notes.to_string()
    }

    /// Cleans multi-line notes for `url` one line at a time.
    ///
    /// Each line loses embedded URLs, the name and the domain keyword; lines
    /// left empty are dropped and the rest keep their line breaks. Notes that
    /// come out equal to `name` are discarded.
    pub fn derive_note_lines(&self, raw: &str, url: &str, name: &str) -> String {
        let keyword = domain_keyword(url);
        let notes = raw
            .lines()
            .map(|line| strip_note_text(line, name, keyword.as_deref()))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if notes == name {
            return String::new();
        }
        notes
    }

    /// User text wins, then the knowledge base, then a generic sentence.
    pub fn derive_description(&self, url: &str, name: &str, user_provided: Option<&str>) -> String {
        if let Some(description) = user_provided.map(str::trim).filter(|d| !d.is_empty()) {
            return description.to_string();
        }

        if let Some(entry) = self.kb.lookup_url(url) {
            return entry.description.clone();
        }

        generic_description(name)
    }
}

pub(crate) fn generic_description(name: &str) -> String {
    format!("{name}官方网站，提供专业的在线服务")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(kb: &KnowledgeBase) -> NameResolver<'_> {
        NameResolver::new(kb, NamingLimits::default())
    }

    #[test]
    fn test_user_name_is_cleaned() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_name("https://github.com", Some("网址：GitHub - "), None),
            "GitHub"
        );
        assert_eq!(
            r.derive_name("https://www.google.com", Some("Google搜索"), None),
            "Google搜索"
        );
        assert_eq!(
            r.derive_name("https://github.com", Some("github 代码托管"), None),
            "代码托管"
        );
        assert_eq!(r.derive_name("https://github.com", Some("github"), None), "github");
    }

    #[test]
    fn test_short_user_name_falls_through() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(r.derive_name("https://github.com", Some("- x"), None), "GitHub");
        assert_eq!(
            r.derive_name("https://github.com", Some("https://github.com"), None),
            "GitHub"
        );
    }

    #[test]
    fn test_trailing_parenthetical_removed_from_long_names() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_name("https://example.org", Some("Rust Playground (online compiler)"), None),
            "Rust Playground"
        );
        assert_eq!(
            r.derive_name("https://example.org", Some("Docs (v2)"), None),
            "Docs (v2)"
        );
    }

    #[test]
    fn test_name_capped_at_twenty_chars() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        let name = r.derive_name(
            "https://example.org",
            Some("An extremely long bookmark title here"),
            None,
        );
        assert_eq!(name.chars().count(), 20);
    }

    #[test]
    fn test_name_from_description_patterns() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_name("https://example.org", None, Some("使用Gitea进行代码管理")),
            "Gitea"
        );
        assert_eq!(
            r.derive_name("https://example.org", None, Some("平时 spotify 听歌")),
            "Spotify"
        );
        assert_eq!(
            r.derive_name("https://example.org", None, Some("团队 Wiki 入口")),
            "Wiki"
        );
    }

    #[test]
    fn test_fallback_names() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(r.derive_name("https://www.bilibili.com", None, None), "哔哩哔哩");
        assert_eq!(r.derive_name("https://www.csdn.net", None, None), "CSDN");
        assert_eq!(
            r.derive_name("https://some-random-site.xyz", None, None),
            "Some-random-site"
        );
        assert_eq!(r.derive_name("", None, None), UNKNOWN_SITE);
    }

    #[test]
    fn test_notes_strip_name_url_and_keyword() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_notes("GitHub - https://github.com 代码托管平台", "https://github.com", "GitHub"),
            "代码托管平台"
        );
        assert_eq!(
            r.derive_notes("github   开源   社区", "https://github.com", "GitHub"),
            "开源 社区"
        );
    }

    #[test]
    fn test_notes_strip_words_glued_to_cjk_text() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_notes("GitHub代码托管平台", "https://github.com", "GitHub"),
            "代码托管平台"
        );
        assert_eq!(
            r.derive_notes("在github上找开源项目", "https://github.com", "GitHub"),
            "在上找开源项目"
        );
        // Letters inside a longer ASCII word are left alone
        assert_eq!(
            r.derive_notes("githubusercontent 的镜像", "https://github.com", "GitHub"),
            "githubusercontent 的镜像"
        );
    }

    #[test]
    fn test_names_keep_keyword_glued_to_cjk_text() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_name("https://www.google.com", Some("Google搜索"), None),
            "Google搜索"
        );
    }

    #[test]
    fn test_note_lines_keep_line_breaks() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_note_lines(
                "GitHub\n参见 https://github.com 的说明\n\n  github代码托管 ",
                "https://github.com",
                "GitHub"
            ),
            "参见 的说明\n代码托管"
        );
        assert_eq!(r.derive_note_lines("GitHub", "https://github.com", "GitHub"), "");
        assert_eq!(r.derive_note_lines("好", "https://a.com", ""), "好");
    }

    #[test]
    fn test_notes_too_short_or_equal_to_name() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(r.derive_notes("好用", "https://github.com", "GitHub"), "");
        assert_eq!(r.derive_notes("GitHub", "https://github.com", "GitHub"), "");
        assert_eq!(r.derive_notes("", "https://github.com", "GitHub"), "");
    }

    #[test]
    fn test_long_notes_get_ellipsis() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        let raw = "很".repeat(150);
        let notes = r.derive_notes(&raw, "https://example.org", "Example");
        assert!(notes.ends_with("..."));
        assert_eq!(notes.chars().count(), 103);
    }

    #[test]
    fn test_description_resolution() {
        let kb = KnowledgeBase::builtin();
        let r = resolver(&kb);
        assert_eq!(
            r.derive_description("https://github.com", "GitHub", Some("  我的仓库 ")),
            "我的仓库"
        );
        assert_eq!(
            r.derive_description("https://github.com", "GitHub", None),
            "代码托管平台，开源项目管理，开发者协作首选"
        );
        assert_eq!(
            r.derive_description("https://some-random-site.xyz", "Some-random-site", None),
            "Some-random-site官方网站，提供专业的在线服务"
        );
    }
}
