//! Website categorisation and note writing: a remote model when one is
//! available, local heuristics otherwise.

use crate::error::IngestError;
use crate::json_extract::extract_json;
use crate::knowledge::{color_for_category, KnowledgeBase};
use crate::model::WebsiteRecord;
use crate::naming::{generic_description, name_from_keyword};
use crate::normalize::{clean_url, domain_keyword};
use crate::providers::{build_analysis_prompt, build_notes_prompt, LlmProvider};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNCATEGORIZED: &str = "其他";
const DEFAULT_FREQUENCY: &str = "中";

/// Hand-written notes for the most common sites
const LOCAL_NOTES: &[(&str, &str)] = &[
    ("google", "全球最大搜索引擎，日常查询、学习研究必备工具"),
    ("github", "代码托管平台，开源项目管理，开发者协作首选"),
    ("youtube", "视频分享平台，娱乐学习兼备，内容丰富多样"),
    ("netflix", "流媒体视频服务，高质量影视内容，需要会员订阅"),
    ("spotify", "音乐流媒体平台，海量音乐资源，支持离线播放"),
    ("notion", "多功能笔记工具，项目管理，团队协作利器"),
    ("figma", "在线设计工具，UI/UX设计首选，支持团队协作"),
    ("slack", "团队沟通平台，工作协调，提高团队效率"),
];

const NO_SITE_NOTE: &str = "实用的在线服务平台";

/// One website as shown on a dashboard card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedWebsite {
    pub url: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub frequency: String,
    pub notes: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub websites: Vec<AnalyzedWebsite>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub suggestions: String,
}

fn analyze_record(record: &WebsiteRecord, kb: &KnowledgeBase) -> AnalyzedWebsite {
    let keyword = domain_keyword(&record.url);
    let known = keyword.as_deref().and_then(|k| kb.lookup(k));

    let name = match record.name.trim() {
        "" => known
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| name_from_keyword(keyword.as_deref())),
        name => name.to_string(),
    };
    let category = match record.category.trim() {
        "" => known
            .map(|entry| entry.category.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        category => category.to_string(),
    };
    let description = known
        .map(|entry| entry.description.clone())
        .unwrap_or_else(|| generic_description(&name));
    let color = known
        .map(|entry| entry.color.clone())
        .unwrap_or_else(|| color_for_category(&category).to_string());

    let notes = if record.notes.trim() == description {
        String::new()
    } else {
        record.notes.clone()
    };

    AnalyzedWebsite {
        url: record.url.clone(),
        name,
        category,
        description,
        frequency: DEFAULT_FREQUENCY.to_string(),
        notes,
        color,
    }
}

fn unique_categories(websites: &[AnalyzedWebsite]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for site in websites.iter().filter(|site| !site.category.is_empty()) {
        match counts.iter_mut().find(|(category, _)| *category == site.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((site.category.clone(), 1)),
        }
    }
    counts
}

fn suggest(total: usize, counts: &[(String, usize)]) -> String {
    // First category reaching the highest count wins ties
    let dominant = counts
        .iter()
        .fold(None::<&(String, usize)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        });

    if total <= 3 {
        return "您的网站数量较少，建议继续添加更多常用网站，丰富您的导航页面。".to_string();
    }
    if let Some((category, count)) = dominant {
        if *count * 2 >= total {
            return format!(
                "您的网站中有{count}个属于\"{category}\"分类，建议考虑进一步细分或添加其他类型的网站，使导航更加多样化。"
            );
        }
    }
    if total >= 10 {
        return format!(
            "您已添加{}个网站，分布在{}个不同分类中，建议使用颜色标记最常用的网站，提高访问效率。",
            total,
            counts.len()
        );
    }
    "本地分析完成，已保留您的个人标注和分类偏好，并智能补充了缺失信息。".to_string()
}

/// Fills in names, categories, descriptions and colors without a network call.
///
/// User-provided names and categories are kept.
pub fn analyze_locally(records: &[WebsiteRecord], kb: &KnowledgeBase) -> AnalysisResult {
    let websites: Vec<AnalyzedWebsite> = records.iter().map(|r| analyze_record(r, kb)).collect();
    let counts = unique_categories(&websites);
    let suggestions = suggest(websites.len(), &counts);

    AnalysisResult {
        websites,
        categories: counts.into_iter().map(|(category, _)| category).collect(),
        suggestions,
    }
}

/// The prompt sent to the remote model for `urls`
pub fn analysis_prompt<S: AsRef<str>>(urls: &[S]) -> String {
    build_analysis_prompt(urls)
}

/// Reads a model answer into an [`AnalysisResult`].
///
/// The answer must hold a JSON object with a `websites` array.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult, IngestError> {
    let value = extract_json(response)?;
    if !value.get("websites").is_some_and(Value::is_array) {
        return Err(IngestError::Provider(
            "Response has no \"websites\" array".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| IngestError::Provider(format!("Unexpected analysis shape: {e}")))
}

/// Categorises `urls` with `provider`, falling back to [`analyze_locally`].
///
/// Entries without a `.` are dropped first. Never fails: any provider,
/// extraction or shape error degrades to the local result.
pub async fn categorize<S: AsRef<str>>(
    urls: &[S],
    provider: Option<&dyn LlmProvider>,
    kb: &KnowledgeBase,
) -> AnalysisResult {
    let urls: Vec<&str> = urls
        .iter()
        .map(|url| url.as_ref().trim())
        .filter(|url| url.contains('.'))
        .collect();

    if let Some(provider) = provider.filter(|_| !urls.is_empty()) {
        let outcome = match provider.complete(&analysis_prompt(&urls)).await {
            Ok(response) => parse_analysis_response(&response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                info!(
                    "{} categorised {} websites",
                    provider.provider_name(),
                    result.websites.len()
                );
                return result;
            }
            Err(IngestError::JsonExtraction(e)) => {
                warn!("Falling back to local analysis: {}", e);
                warn!("Full model response: {}", e.raw);
            }
            Err(e) => warn!("Falling back to local analysis: {}", e),
        }
    }

    let records: Vec<WebsiteRecord> = urls
        .iter()
        .map(|url| WebsiteRecord::new(clean_url(url).unwrap_or_else(|| url.to_string())))
        .collect();
    analyze_locally(&records, kb)
}

/// A note for `record` written without a network call.
///
/// Known sites get a hand-written note; others get a sentence built from the
/// name and category.
pub fn local_notes(record: &WebsiteRecord, kb: &KnowledgeBase) -> String {
    let Some(keyword) = domain_keyword(&record.url) else {
        return NO_SITE_NOTE.to_string();
    };

    if let Some((_, note)) = LOCAL_NOTES.iter().find(|(site, _)| *site == keyword) {
        return note.to_string();
    }

    let name = match record.name.trim() {
        "" => kb
            .lookup(&keyword)
            .map(|entry| entry.name.clone())
            .unwrap_or(keyword),
        name => name.to_string(),
    };
    let category = match record.category.trim() {
        "" => "实用",
        category => category,
    };

    format!("{name}，{category}工具，提供专业的在线服务")
}

/// Writes a short note for `record` with `provider`, falling back to
/// [`local_notes`].
///
/// Never fails. Records without a URL skip the provider.
pub async fn generate_notes(
    record: &WebsiteRecord,
    provider: Option<&dyn LlmProvider>,
    kb: &KnowledgeBase,
) -> String {
    let provider = provider.filter(|_| !record.url.trim().is_empty());

    if let Some(provider) = provider {
        let prompt = build_notes_prompt(&record.name, &record.url, &record.category);
        match provider.complete(&prompt).await {
            Ok(notes) if !notes.trim().is_empty() => {
                info!("{} wrote notes for {}", provider.provider_name(), record.url);
                return notes.trim().to_string();
            }
            Ok(_) => warn!("Falling back to local notes: empty answer"),
            Err(e) => warn!("Falling back to local notes: {}", e),
        }
    }

    local_notes(record, kb)
}
