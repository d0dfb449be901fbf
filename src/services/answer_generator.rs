//! 答案生成接口
//!
//! 抽取引擎只定义题目结构；答案由外部协作方生成，
//! 核心只要求"给定题目和整卷上下文，返回该题号的答案文本"

use crate::models::{DocumentContext, Question};
use anyhow::Result;
use async_trait::async_trait;

/// 答案生成方
///
/// 每道题独立调用，调用方可以并发执行，不保证完成顺序
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, question: &Question, context: &DocumentContext)
        -> Result<String>;

    /// 生成方名称（仅用于日志）
    fn name(&self) -> &str;
}
