//! Domain Layer - 领域层
//!
//! 纯文本算法，无 IO：
//! - dialogue: 双人对话解析
//! - script: 文档文本 → 兜底脚本
//! - normalize: Markdown / JSON 标点清洗

pub mod dialogue;
pub mod normalize;
pub mod script;

pub use dialogue::{parse_dialogue, DialogueSegment, Speaker};
pub use normalize::{normalize_doc_content, strip_code_fences};
pub use script::script_from_doc;
