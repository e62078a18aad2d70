use bookmark_ingest::{parse_text, Ingestor, ParseMode};

#[test]
fn test_full_format_line() {
    let ingestor = Ingestor::default();
    let record = ingestor
        .parse_website_line("https://www.google.com | Google搜索 [搜索引擎] # 日常搜索必备工具")
        .unwrap();

    assert_eq!(record.url, "https://www.google.com");
    assert_eq!(record.name, "Google搜索");
    assert_eq!(record.category, "搜索引擎");
    assert_eq!(record.notes, "日常搜索必备工具");
}

#[test]
fn test_common_paste_layouts() {
    let ingestor = Ingestor::default();
    let cases = [
        ("Google搜索 - https://www.google.com", "https://www.google.com", "Google搜索"),
        ("https://www.figma.com 设计协作", "https://www.figma.com", "设计协作"),
        ("设计协作 https://www.figma.com", "https://www.figma.com", "设计协作"),
        ("Notion | notion.so", "https://notion.so", "Notion"),
        ("www.bilibili.com/", "https://www.bilibili.com", "哔哩哔哩"),
        ("网址：https://github.com/", "https://github.com", "GitHub"),
    ];

    for (line, url, name) in cases {
        let record = ingestor
            .parse_website_line(line)
            .unwrap_or_else(|| panic!("no record for {line}"));
        assert_eq!(record.url, url, "url for {line}");
        assert_eq!(record.name, name, "name for {line}");
    }
}

#[test]
fn test_category_and_notes_without_pipe() {
    let ingestor = Ingestor::default();
    let record = ingestor
        .parse_website_line("https://www.youtube.com [娱乐媒体] # 周末看视频")
        .unwrap();

    assert_eq!(record.name, "YouTube");
    assert_eq!(record.category, "娱乐媒体");
    assert_eq!(record.notes, "周末看视频");
}

#[test]
fn test_prose_punctuation_is_trimmed() {
    let candidate = Ingestor::default()
        .parse_line("推荐这个：(https://docs.rs/serde).")
        .unwrap();
    assert_eq!(candidate.url, "https://docs.rs/serde");
}

#[test]
fn test_unparseable_lines_count_as_failures() {
    let report = parse_text(
        "我的收藏\nhttps://github.com\nYouTube - https://www.youtube.com\n随手记的一句话",
        ParseMode::Smart,
    )
    .unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.stats.total_lines, 4);
    assert_eq!(report.stats.successfully_parsed, 2);
    assert_eq!(report.stats.failed_lines, 2);
    assert_eq!(report.stats.success_rate, 50);
}

#[test]
fn test_crlf_input() {
    let report = parse_text("https://github.com\r\n\r\nhttps://gitlab.com\r\n", ParseMode::Smart).unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].name, "GitLab");
    assert_eq!(report.stats.total_lines, 2);
}
