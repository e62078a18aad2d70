//! Pulling a JSON object out of free-form model output.
//!
//! Strategies run in a fixed order and the first one that yields an object
//! wins. None of them shares state with another.

use crate::error::JsonExtractionError;
use log::{debug, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[a-zA-Z]*[ \t]*\r?\n?(.*?)```").unwrap());

static FENCE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(?:json)?\s*").unwrap());

static OUTER_BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStrategy {
    /// The whole trimmed text
    Direct,
    /// Content of a Markdown code fence
    CodeFence,
    /// Greedy `{...}` regex match
    BraceRegex,
    /// First `{` to last `}`
    BraceBounds,
    /// From a line starting with `{` to a later line ending with `}`
    LineScan,
}

type StrategyFn = fn(&str) -> Result<Value, String>;

const STRATEGIES: [(JsonStrategy, StrategyFn); 5] = [
    (JsonStrategy::Direct, direct),
    (JsonStrategy::CodeFence, code_fence),
    (JsonStrategy::BraceRegex, brace_regex),
    (JsonStrategy::BraceBounds, brace_bounds),
    (JsonStrategy::LineScan, line_scan),
];

impl JsonStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            JsonStrategy::Direct => "direct",
            JsonStrategy::CodeFence => "code fence",
            JsonStrategy::BraceRegex => "brace regex",
            JsonStrategy::BraceBounds => "brace bounds",
            JsonStrategy::LineScan => "line scan",
        }
    }
}

fn parse_object(candidate: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("parsed value is not a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn direct(text: &str) -> Result<Value, String> {
    parse_object(text)
}

fn code_fence(text: &str) -> Result<Value, String> {
    if !text.contains("```") {
        return Err("no code fence".to_string());
    }

    if let Some(caps) = FENCED_BLOCK.captures(text) {
        if let Ok(value) = parse_object(&caps[1]) {
            return Ok(value);
        }
    }

    parse_object(&FENCE_MARKER.replace_all(text, ""))
}

fn brace_regex(text: &str) -> Result<Value, String> {
    let found = OUTER_BRACES.find(text).ok_or("no {...} span")?;
    parse_object(found.as_str())
}

fn brace_bounds(text: &str) -> Result<Value, String> {
    let start = text.find('{').ok_or("no opening brace")?;
    let end = text.rfind('}').ok_or("no closing brace")?;
    if end < start {
        return Err("closing brace before opening brace".to_string());
    }
    parse_object(&text[start..=end])
}

fn line_scan(text: &str) -> Result<Value, String> {
    let mut lines = text.lines().skip_while(|line| !line.trim_start().starts_with('{'));
    let first = lines.next().ok_or("no line starts with {")?;

    let mut block = vec![first];
    for line in lines {
        block.push(line);
        if line.trim_end().ends_with('}') {
            break;
        }
    }

    parse_object(&block.join("\n"))
}

/// Runs every strategy in order and returns the first object found,
/// along with the strategy that produced it.
pub fn extract_json_with_strategy(text: &str) -> Result<(Value, JsonStrategy), JsonExtractionError> {
    let mut attempts = Vec::new();

    for (strategy, run) in STRATEGIES {
        match run(text) {
            Ok(value) => {
                debug!("JSON strategy '{}' succeeded", strategy.name());
                return Ok((value, strategy));
            }
            Err(e) => {
                debug!("JSON strategy '{}' failed: {}", strategy.name(), e);
                attempts.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }

    warn!("No JSON object found in a {} byte response", text.len());
    Err(JsonExtractionError {
        raw: text.to_string(),
        attempts,
    })
}

/// Extracts the first JSON object the strategies can find in `text`.
///
/// The shape of the object is not checked.
pub fn extract_json(text: &str) -> Result<Value, JsonExtractionError> {
    extract_json_with_strategy(text).map(|(value, _)| value)
}
