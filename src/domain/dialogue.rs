//! 对话解析器
//!
//! 把两位主播的原始脚本解析为有序的发言片段序列

use std::fmt;

/// 对话主播身份
///
/// 固定两位：Alex（学习者）与 Jamie（讲解者）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Alex,
    Jamie,
}

impl Speaker {
    /// 对方主播
    pub fn other(self) -> Self {
        match self {
            Speaker::Alex => Speaker::Jamie,
            Speaker::Jamie => Speaker::Alex,
        }
    }

    /// 从行首标签识别主播
    ///
    /// 大小写不敏感；未识别的标签一律归为 Alex
    pub fn from_label(label: &str) -> Self {
        if label.trim().to_lowercase().contains("jamie") {
            Speaker::Jamie
        } else {
            Speaker::Alex
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Speaker::Alex => "Alex",
            Speaker::Jamie => "Jamie",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条发言片段
///
/// 序列顺序即播放顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSegment {
    pub speaker: Speaker,
    pub text: String,
}

impl DialogueSegment {
    /// 渲染为 `Speaker: text` 脚本行
    pub fn render(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

/// 解析对话脚本
///
/// 逐行扫描：带 `Speaker:` 前缀的行按标签归属；无前缀的行使用轮替主播。
/// 轮替状态是局部累加器，每处理一行（无论显式或隐式）翻转一次。
/// 去掉前缀后为空的行被丢弃，但仍参与轮替。
pub fn parse_dialogue(script: &str) -> Vec<DialogueSegment> {
    let mut segments = Vec::new();
    let mut fallback = Speaker::Alex;

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (speaker, text) = match line.split_once(':') {
            Some((label, rest)) => (Speaker::from_label(label), rest.trim()),
            None => (fallback, line),
        };

        // 下一条无前缀行使用对方主播
        fallback = speaker.other();

        if text.is_empty() {
            continue;
        }

        segments.push(DialogueSegment {
            speaker,
            text: text.to_string(),
        });
    }

    segments
}
