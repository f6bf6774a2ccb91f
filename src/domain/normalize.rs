//! 内容规整
//!
//! 把带 Markdown / JSON 标点的文档文本清洗为适合旁白的纯文本，
//! 以及剥离 LLM 回复中的代码围栏

use std::sync::OnceLock;

use regex::Regex;

fn fence_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```[a-z]*").expect("fence regex"))
}

fn heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*#{1,6}\s+").expect("heading regex"))
}

fn list_leader() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:[-*+]|\d+\.)\s+").expect("list regex"))
}

fn image_syntax() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("image regex"))
}

fn link_syntax() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link regex"))
}

fn quoted_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)":"#).expect("key regex"))
}

fn quoted_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#":\s*"([^"]+)""#).expect("value regex"))
}

fn excess_blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("blank regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace regex"))
}

/// 折叠所有空白为单个空格
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 清洗文档文本
///
/// 去掉 Markdown 装饰（围栏、标题、列表、链接、强调）和 JSON 残留标点，
/// 折叠多余空白。清洗后为空时退回到仅折叠空白的原文；仍为空则返回 None。
pub fn normalize_doc_content(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let text = raw.replace("\r\n", "\n");
    let text = fence_line().replace_all(&text, "");
    let text = heading_marker().replace_all(&text, "");
    let text = list_leader().replace_all(&text, "");
    let text = image_syntax().replace_all(&text, "");
    let text = link_syntax().replace_all(&text, "$1");
    let text = text.replace("**", "").replace("__", "").replace('`', "");
    let text = excess_blank_lines().replace_all(&text, "\n\n");
    let text: String = text.chars().filter(|c| !matches!(c, '{' | '}' | '[' | ']')).collect();
    let text = quoted_key().replace_all(&text, "$1:");
    let text = quoted_value().replace_all(&text, ": $1");
    let text = text.replace("\"\"", "\"");
    let text = whitespace_run().replace_all(&text, " ");

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return Some(trimmed.to_string());
    }

    let fallback = collapse_whitespace(raw);
    if fallback.is_empty() {
        None
    } else {
        Some(fallback)
    }
}

/// 去掉 LLM 回复外层的 Markdown 代码围栏
pub fn strip_code_fences(raw: &str) -> String {
    fence_line().replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_none() {
        assert!(normalize_doc_content("").is_none());
        assert!(normalize_doc_content("  \n\t ").is_none());
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            normalize_doc_content("Step one. Step two.").as_deref(),
            Some("Step one. Step two.")
        );
    }

    #[test]
    fn test_markdown_decoration_stripped() {
        let raw = "## Getting started\n- call the **tasks** endpoint\n- read the [docs](https://example.com)";
        let cleaned = normalize_doc_content(raw).unwrap();
        assert!(!cleaned.contains('#'));
        assert!(!cleaned.contains("**"));
        assert!(!cleaned.contains("]("));
        assert!(cleaned.contains("tasks"));
        assert!(cleaned.contains("docs"));
        assert!(!cleaned.contains("https://example.com"));
    }

    #[test]
    fn test_json_punctuation_stripped() {
        let raw = r#"{"title": "Tasks API", "version": "1.0.0"}"#;
        let cleaned = normalize_doc_content(raw).unwrap();
        assert!(!cleaned.contains('{'));
        assert!(!cleaned.contains('}'));
        assert_eq!(cleaned, "title: Tasks API, version: 1.0.0");
    }

    #[test]
    fn test_code_fence_lines_removed() {
        let raw = "```json\nfoo: 1\n```";
        let cleaned = normalize_doc_content(raw).unwrap();
        assert_eq!(cleaned, "foo: 1");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let cleaned = normalize_doc_content("a    b\n\n\n\nc").unwrap();
        assert_eq!(cleaned, "a b c");
    }

    #[test]
    fn test_decoration_only_input_falls_back_to_raw() {
        // 清洗会剥掉所有字符，但折叠后的原文仍可用
        let cleaned = normalize_doc_content("[]{}").unwrap();
        assert_eq!(cleaned, "[]{}");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(
            strip_code_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }
}
