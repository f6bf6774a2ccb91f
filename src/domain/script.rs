//! 脚本兜底合成器
//!
//! 当没有 AI 生成的对话时，从纯文档文本推导一段确定性的双人脚本

use super::dialogue::Speaker;

/// 最多保留的句子数，限制旁白长度
const MAX_SENTENCES: usize = 6;

/// 没有变体标签时的默认称呼
const DEFAULT_LABEL: &str = "this documentation";

/// 按句末标点切分句子
///
/// `.` `!` `?` 后跟空白视为句界，标点保留在句内；
/// 无句末标点的剩余文本作为最后一句
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut at_boundary = false;

    for ch in text.chars() {
        if at_boundary && ch.is_whitespace() {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
            at_boundary = false;
            continue;
        }
        current.push(ch);
        at_boundary = matches!(ch, '.' | '!' | '?');
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 从文档文本推导双人脚本
///
/// 折叠空白并去掉 `**` 强调符后切句，最多取前 6 句；
/// 开场白 Jamie，正文从 Alex 起轮替，收尾 Jamie。
/// 清洗后没有任何句子时返回 None（上游转入 mock 路径）。
pub fn script_from_doc(content: &str, label: Option<&str>) -> Option<String> {
    let cleaned = content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("**", "");
    if cleaned.is_empty() {
        return None;
    }

    let sentences: Vec<String> = split_sentences(&cleaned)
        .into_iter()
        .take(MAX_SENTENCES)
        .collect();
    if sentences.is_empty() {
        return None;
    }

    let label = label.unwrap_or(DEFAULT_LABEL);
    let mut lines = Vec::with_capacity(sentences.len() + 2);
    lines.push(format!(
        "Jamie: Want a quick walkthrough of the {} version?",
        label
    ));

    for (index, sentence) in sentences.iter().enumerate() {
        let speaker = if index % 2 == 0 {
            Speaker::Alex
        } else {
            Speaker::Jamie
        };
        lines.push(format!("{}: {}", speaker, sentence));
    }

    lines.push(format!(
        "Jamie: That's the heart of the {} flow. Ready to ship it?",
        label
    ));

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::parse_dialogue;

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("Step one. Step two! Step three?");
        assert_eq!(sentences, vec!["Step one.", "Step two!", "Step three?"]);
    }

    #[test]
    fn test_split_sentences_no_terminal_punctuation() {
        let sentences = split_sentences("just one fragment");
        assert_eq!(sentences, vec!["just one fragment"]);
    }

    #[test]
    fn test_split_sentences_dot_inside_word_does_not_split() {
        let sentences = split_sentences("call api.example.com first. then retry.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "call api.example.com first.");
    }

    #[test]
    fn test_empty_content_yields_none() {
        assert!(script_from_doc("", None).is_none());
        assert!(script_from_doc("   \n\t ", None).is_none());
        // 只剩强调符的文本清洗后为空
        assert!(script_from_doc("****", None).is_none());
    }

    #[test]
    fn test_script_uses_label() {
        let script = script_from_doc("One sentence.", Some("beginner")).unwrap();
        assert!(script.starts_with("Jamie: Want a quick walkthrough of the beginner version?"));
        assert!(script.ends_with("Jamie: That's the heart of the beginner flow. Ready to ship it?"));
    }

    #[test]
    fn test_script_defaults_label() {
        let script = script_from_doc("One sentence.", None).unwrap();
        assert!(script.contains("this documentation"));
    }

    #[test]
    fn test_body_alternates_starting_with_alex() {
        let script = script_from_doc("First. Second. Third.", None).unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Alex: First."));
        assert!(lines[2].starts_with("Jamie: Second."));
        assert!(lines[3].starts_with("Alex: Third."));
    }

    #[test]
    fn test_sentence_cap() {
        let content = "A. B. C. D. E. F. G. H.";
        let script = script_from_doc(content, None).unwrap();
        // 开场 + 6 句 + 收尾
        assert_eq!(script.lines().count(), 8);
        assert!(!script.contains("G."));
    }

    #[test]
    fn test_reparsed_script_yields_three_to_eight_segments() {
        for content in [
            "One.",
            "One. Two.",
            "One. Two. Three. Four. Five. Six. Seven. Eight. Nine.",
        ] {
            let script = script_from_doc(content, None).unwrap();
            let segments = parse_dialogue(&script);
            assert!(
                (3..=8).contains(&segments.len()),
                "unexpected segment count {} for {:?}",
                segments.len(),
                content
            );
        }
    }
}
