//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量试卷处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载试卷（Vec<PaperSource>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 单个试卷处理器
//! - 抽取单个试卷的题目台账（QuestionLedger）
//! - 导出 TOML 台账
//! - 并发调用 AnswerFlow 并组装答案
//! - 输出单个试卷的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PaperSource>)
//!     ↓
//! paper_processor (处理 QuestionLedger)
//!     ↓              ↘
//! workflow::AnswerFlow   extraction (纯函数：文本 → 台账)
//!     ↓
//! services (能力层：llm / warn)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，paper_processor 管单个
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **无业务逻辑**：只做调度和统计，题目识别全部在 extraction 中

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use crate::utils::logging::RunSummary;
pub use batch_processor::App;
pub use paper_processor::{process_paper, QuestionStats};
