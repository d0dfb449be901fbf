//! 题目结构抽取引擎
//!
//! 输入 PDF 提取出的原始文本，输出有序、分层的题目台账
//! （任务 → 题目 → 字母小题 → 罗马数字小题，附带分值）。
//!
//! ## 流水线
//!
//! ```text
//! normalize  文本规范化
//!     ↓
//! sections   切分 `Task N: title` 段落
//!     ↓
//! locator    多策略扫描题号
//!     ↓
//! resolver   父级栈解析续接标记、去重、排序
//!     ↓
//! span       切分题干、提取引导文字、清理
//!     ↓
//! marks      识别分值（默认 8 分）
//!     ↓
//! extractor  组装台账
//! ```
//!
//! 整个引擎是纯函数式的文本转换：无 I/O、无共享可变状态，
//! 同一输入多次抽取得到完全相同的台账。

pub mod extractor;
pub mod locator;
pub mod marks;
pub mod normalize;
pub mod resolver;
pub mod sections;
pub mod span;

pub use extractor::{parse_questions, QuestionExtractor};
pub use marks::DEFAULT_MARKS;
pub use span::MIN_QUESTION_CHARS;
