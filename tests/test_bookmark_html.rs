use bookmark_ingest::{
    extract_anchors, import_bookmark_html, is_bookmark_export, parse_text, BookmarkImporter,
    ParseMode,
};
use std::io::Write;

const CHROME_EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1699999999" LAST_MODIFIED="1700000000" PERSONAL_TOOLBAR_FOLDER="true">书签栏</H3>
    <DL><p>
        <DT><A HREF="https://www.google.com/" ADD_DATE="1700000001" ICON="data:image/png;base64,AAAA">Google</A>
        <DT><H3 ADD_DATE="1700000002">开发</H3>
        <DL><p>
            <DT><A HREF="https://github.com/rust-lang/rust" ADD_DATE="1700000003">rust-lang/rust: Empowering everyone</A>
            <DT><A HREF="https://stackoverflow.com/questions?tab=Newest#top">Newest Questions - Stack Overflow</A>
        </DL><p>
    </DL><p>
    <DT><A HREF="javascript:alert(1)">bookmarklet</A>
    <DT><A HREF="https://www.bilibili.com/">哔哩哔哩</A>
</DL><p>
"#;

#[test]
fn test_detects_chrome_export() {
    assert!(is_bookmark_export(CHROME_EXPORT));
    assert!(!is_bookmark_export("https://github.com\nhttps://gitlab.com"));
}

#[test]
fn test_anchor_folders() {
    let anchors = extract_anchors(CHROME_EXPORT);
    assert_eq!(anchors.len(), 5);

    assert_eq!(anchors[0].folder_path, vec!["书签栏"]);
    assert_eq!(anchors[1].folder_path, vec!["书签栏", "开发"]);
    assert_eq!(anchors[2].text, "Newest Questions - Stack Overflow");
    assert!(anchors[4].folder_path.is_empty());
}

#[test]
fn test_import_bookmark_html() {
    let records = import_bookmark_html(CHROME_EXPORT);

    // The bookmarklet has no web URL and is dropped
    assert_eq!(records.len(), 4);

    assert_eq!(records[0].url, "https://www.google.com");
    assert_eq!(records[0].name, "Google");
    assert_eq!(records[0].category, "书签栏");

    assert_eq!(records[1].url, "https://github.com/rust-lang/rust");
    assert_eq!(records[1].category, "开发");

    assert_eq!(records[2].url, "https://stackoverflow.com/questions");
    assert_eq!(records[3].name, "哔哩哔哩");
    assert_eq!(records[3].category, "");

    assert!(records.iter().all(|r| r.notes.is_empty()));
    assert!(records.iter().all(|r| !r.name.contains("://")));
}

#[test]
fn test_auto_mode_stats_count_anchors() {
    let report = parse_text(CHROME_EXPORT, ParseMode::Auto).unwrap();
    assert_eq!(report.stats.total_lines, 5);
    assert_eq!(report.stats.successfully_parsed, 4);
    assert_eq!(report.stats.failed_lines, 1);
    assert_eq!(report.stats.success_rate, 80);
}

#[test]
fn test_builder_reads_export_file() {
    let path = std::env::temp_dir().join(format!("bookmark-ingest-{}.html", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CHROME_EXPORT.as_bytes()).unwrap();
    drop(file);

    let report = BookmarkImporter::builder().file(&path).build().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(report.records.len(), 4);
}
