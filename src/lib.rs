//! # Paper Answer Gen
//!
//! 从纯文本试卷中识别题目结构，并为每道题生成答案的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构，外加一个纯函数的抽取引擎：
//!
//! ### ⓪ 抽取引擎（Extraction）
//! - `extraction/` - 文本 → 题目台账，无 I/O
//! - 规范化 → 任务分段 → 题号定位 → 层级解析 → 题干切分 → 分值识别
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `AnswerGenerator` - 答案生成能力（trait）
//! - `LlmService` - 基于 LLM 的答案生成
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整答题流程
//! - `QuestionCtx` - 上下文封装（paper_name + question_index）
//! - `AnswerFlow` - 流程编排（generate → warn）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量试卷处理器，管理并发
//! - `orchestrator/paper_processor` - 单个试卷处理器，抽取、导出、答题
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod extraction;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extraction::{parse_questions, QuestionExtractor};
pub use models::{AnswerSheet, DocumentContext, PaperSource, Question, QuestionLedger};
pub use orchestrator::{process_paper, App, RunSummary};
pub use services::{AnswerGenerator, LlmService};
pub use workflow::{AnswerFlow, FlowResult, QuestionCtx};
