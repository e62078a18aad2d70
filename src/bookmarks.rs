use crate::model::WebsiteRecord;
use crate::naming::NameResolver;
use crate::normalize::clean_url;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

const NETSCAPE_DOCTYPE: &str = "<!doctype netscape-bookmark-file-1>";
const NETSCAPE_META: &str = r#"<meta http-equiv="content-type" content="text/html; charset=utf-8">"#;

/// One `<A>` from a bookmark export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkAnchor {
    pub href: String,
    pub text: String,
    /// Enclosing folder headings, outermost first
    pub folder_path: Vec<String>,
}

/// Whether `contents` looks like a browser bookmark export
pub fn is_bookmark_export(contents: &str) -> bool {
    let lowered = contents.to_ascii_lowercase();
    lowered.contains(NETSCAPE_DOCTYPE) || lowered.contains(NETSCAPE_META)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The `<H3>` label of a folder `<DL>`, if it has one
fn folder_label(list: ElementRef<'_>) -> Option<String> {
    let heading = list
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "h3")?;

    let label = element_text(heading);
    (!label.is_empty()).then_some(label)
}

fn folder_path(anchor: ElementRef<'_>) -> Vec<String> {
    let mut path: Vec<String> = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "dl")
        .filter_map(folder_label)
        .collect();
    path.reverse();
    path
}

/// Lists every anchor in a bookmark export with its folder ancestry.
///
/// Anchors without a non-empty `href` are skipped.
pub fn extract_anchors(html: &str) -> Vec<BookmarkAnchor> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    let anchors: Vec<BookmarkAnchor> = document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            Some(BookmarkAnchor {
                href: href.to_string(),
                text: element_text(anchor),
                folder_path: folder_path(anchor),
            })
        })
        .collect();

    debug!("Found {} bookmark anchors", anchors.len());
    anchors
}

/// Maps anchors to records.
///
/// The nearest folder becomes the category. Imported bookmarks never get
/// notes. URLs are kept as exported; validation canonicalises them.
pub fn parse_bookmarks(anchors: &[BookmarkAnchor], resolver: &NameResolver<'_>) -> Vec<WebsiteRecord> {
    anchors
        .iter()
        .filter(|anchor| !anchor.href.trim().is_empty())
        .map(|anchor| {
            let href = anchor.href.trim();
            let canonical = clean_url(href);
            let name = resolver.derive_name(canonical.as_deref().unwrap_or(href), Some(&anchor.text), None);

            WebsiteRecord {
                url: href.to_string(),
                name,
                category: anchor.folder_path.last().cloned().unwrap_or_default(),
                notes: String::new(),
            }
        })
        .collect()
}
