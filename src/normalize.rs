//! URL discovery and canonicalization.
//!
//! A canonical URL is `scheme://host[:port]/path` with no trailing slash,
//! no fragment and no query string. Only `http` and `https` qualify, and the
//! host needs at least two dot-separated labels.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(网址|链接|地址|URL|网站)[:：]\s*").unwrap());

static SCHEME_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s:：(（])((?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(?:/\S*)?)").unwrap()
});

/// A URL found inside a longer piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    /// Byte offset of the raw URL text
    pub start: usize,
    /// Byte offset just past the raw URL text (trailing punctuation excluded)
    pub end: usize,
    pub canonical: String,
}

impl UrlMatch {
    /// The text with the raw URL span cut out
    pub fn remove_from(&self, text: &str) -> String {
        format!("{}{}", &text[..self.start], &text[self.end..])
    }
}

fn is_trailing_punct(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | ')' | ']' | '}')
}

/// Characters that mean a bare domain match ran into a longer token
fn continues_token(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '@')
}

pub(crate) fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Cleans a URL candidate and reduces it to canonical form.
///
/// Adds `https://` to scheme-less candidates that contain a dot. Returns
/// `None` when the candidate is not a web URL, including any candidate with
/// whitespace inside it.
pub fn clean_url(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    let mut url = LABEL_PREFIX.replace(trimmed, "").trim().to_string();
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return None;
    }

    if !has_http_scheme(&url) && url.contains('.') {
        url = format!("https://{url}");
    }

    let parsed = Url::parse(&url).ok()?;
    canonicalize(&parsed)
}

fn canonicalize(parsed: &Url) -> Option<String> {
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?;
    if host.split('.').filter(|label| !label.is_empty()).count() < 2 {
        return None;
    }

    let mut canonical = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        canonical.push_str(&format!(":{port}"));
    }
    canonical.push_str(parsed.path());

    Some(canonical.trim_end_matches('/').to_string())
}

/// Finds the first URL in a line of prose.
///
/// Explicit `http(s)://` URLs take precedence; bare domains such as
/// `www.example.com` or `example.com/path` are tried only when none exist.
pub fn find_url(text: &str) -> Option<UrlMatch> {
    // Only the first explicit URL is considered; if it is invalid, no bare domain is tried
    if let Some(m) = SCHEME_URL.find(text) {
        let raw = m.as_str().trim_end_matches(is_trailing_punct);
        return clean_url(raw).map(|canonical| UrlMatch {
            start: m.start(),
            end: m.start() + raw.len(),
            canonical,
        });
    }

    for caps in BARE_DOMAIN.captures_iter(text) {
        let Some(domain) = caps.get(1) else {
            continue;
        };
        if text[domain.end()..].chars().next().is_some_and(continues_token) {
            continue;
        }

        let raw = domain.as_str().trim_end_matches(is_trailing_punct);
        if let Some(canonical) = clean_url(raw) {
            return Some(UrlMatch {
                start: domain.start(),
                end: domain.start() + raw.len(),
                canonical,
            });
        }
    }

    None
}

/// Canonical form of the first URL in `text`, if there is one
pub fn extract_url(text: &str) -> Option<String> {
    find_url(text).map(|m| m.canonical)
}

/// Removes every `http(s)://` token and every bare domain from `text`.
pub(crate) fn strip_urls(text: &str) -> String {
    let mut stripped = SCHEME_URL.replace_all(text, "").into_owned();
    while let Some(found) = find_url(&stripped) {
        stripped = found.remove_from(&stripped);
    }
    stripped
}

/// Lowercase second-to-last host label, e.g. `github` for `api.github.com`.
pub fn domain_keyword(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let host = match Url::parse(&with_scheme) {
        Ok(parsed) => parsed.host_str()?.to_ascii_lowercase(),
        Err(_) => {
            // Fall back to plain string surgery on unparsable input
            let rest = with_scheme.split_once("://").map_or("", |(_, rest)| rest);
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            let first = host.trim_start_matches("www.").split('.').next()?;
            return (!first.is_empty()).then(|| first.to_ascii_lowercase());
        }
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let keyword = match labels.len() {
        0 => return None,
        1 => labels[0],
        n => labels[n - 2],
    };

    Some(keyword.to_string())
}

/// Uppercases the first character
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_adds_scheme() {
        assert_eq!(
            clean_url("www.example.com"),
            Some("https://www.example.com".to_string())
        );
        assert_eq!(
            clean_url("example.com/path/"),
            Some("https://example.com/path".to_string())
        );
    }

    #[test]
    fn test_clean_url_drops_fragment_query_and_default_port() {
        assert_eq!(
            clean_url("https://example.com:443/a/b/?q=1#top"),
            Some("https://example.com/a/b".to_string())
        );
        assert_eq!(
            clean_url("http://example.com:8080/"),
            Some("http://example.com:8080".to_string())
        );
    }

    #[test]
    fn test_clean_url_strips_label_prefix() {
        assert_eq!(
            clean_url("网址：https://github.com/"),
            Some("https://github.com".to_string())
        );
        assert_eq!(
            clean_url("URL: github.com"),
            Some("https://github.com".to_string())
        );
    }

    #[test]
    fn test_clean_url_rejects_non_urls() {
        assert_eq!(clean_url(""), None);
        assert_eq!(clean_url("hello"), None);
        assert_eq!(clean_url("https://localhost/x"), None);
        assert_eq!(clean_url("two words.com"), None);
        assert_eq!(clean_url("javascript:void(0)"), None);
        assert_eq!(clean_url("ftp://files.example.com"), None);
        assert_eq!(clean_url("www."), None);
        assert_eq!(clean_url("https://github.com/rust-lang 官方仓库"), None);
        assert_eq!(clean_url("https://github.com/rust lang"), None);
    }

    #[test]
    fn test_clean_url_is_idempotent() {
        let inputs = [
            "https://www.Google.com/",
            "example.com//",
            "http://a.b.c/x/./y/?z#w",
            "https://例子.中国/路径",
            "http://example.com:8080/",
        ];
        for input in inputs {
            let once = clean_url(input).unwrap();
            assert_eq!(clean_url(&once), Some(once.clone()), "input: {input}");
        }
    }

    #[test]
    fn test_find_url_strips_trailing_punctuation() {
        let text = "see (https://github.com/rust-lang).";
        let found = find_url(text).unwrap();
        assert_eq!(found.canonical, "https://github.com/rust-lang");
        assert_eq!(&text[found.start..found.end], "https://github.com/rust-lang");
    }

    #[test]
    fn test_find_url_bare_domain() {
        assert_eq!(
            extract_url("Google搜索 www.google.com"),
            Some("https://www.google.com".to_string())
        );
        assert_eq!(
            extract_url("docs at docs.rs/serde, nice"),
            Some("https://docs.rs/serde".to_string())
        );
        assert_eq!(extract_url("mail me@example.com"), None);
        assert_eq!(extract_url("just some words"), None);
    }

    #[test]
    fn test_invalid_explicit_url_hides_bare_domains() {
        assert_eq!(extract_url("https://localhost 见 github.com"), None);
        assert_eq!(
            extract_url("见 github.com"),
            Some("https://github.com".to_string())
        );
    }

    #[test]
    fn test_remove_from() {
        let text = "GitHub - https://github.com 代码";
        let found = find_url(text).unwrap();
        assert_eq!(found.remove_from(text), "GitHub -  代码");
    }

    #[test]
    fn test_strip_urls() {
        assert_eq!(
            strip_urls("mirror of www.github.com and https://gitlab.com/x ok"),
            "mirror of  and  ok"
        );
    }

    #[test]
    fn test_domain_keyword() {
        assert_eq!(domain_keyword("https://api.github.com/x"), Some("github".to_string()));
        assert_eq!(domain_keyword("www.bilibili.com"), Some("bilibili".to_string()));
        assert_eq!(domain_keyword("https://www.jd.com"), Some("jd".to_string()));
        assert_eq!(domain_keyword("https://localhost"), Some("localhost".to_string()));
        assert_eq!(domain_keyword(""), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("github"), "Github");
        assert_eq!(capitalize(""), "");
    }
}
