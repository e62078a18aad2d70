/// System message sent with every categorisation request.
pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a website analysis expert. Please respond in Chinese and ensure your response is valid JSON format.";

/// The categorisation request template.
///
/// Loaded from `prompt.txt` at compile time; `{urls}` is replaced with one
/// URL per line.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Renders the categorisation request for `urls`.
pub fn build_analysis_prompt<S: AsRef<str>>(urls: &[S]) -> String {
    let list = urls
        .iter()
        .map(|url| url.as_ref().trim())
        .filter(|url| !url.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    ANALYSIS_PROMPT_TEMPLATE.replace("{urls}", &list)
}

/// The note request template; `{name}`, `{url}` and `{category}` are filled in.
pub const NOTES_PROMPT_TEMPLATE: &str = include_str!("notes_prompt.txt");

/// Renders the note request for one website.
///
/// The URL stands in for a missing name, `未知` for a missing category.
pub fn build_notes_prompt(name: &str, url: &str, category: &str) -> String {
    let name = match name.trim() {
        "" => url.trim(),
        name => name,
    };
    let category = match category.trim() {
        "" => "未知",
        category => category,
    };

    NOTES_PROMPT_TEMPLATE
        .replace("{name}", name)
        .replace("{url}", url.trim())
        .replace("{category}", category)
}
