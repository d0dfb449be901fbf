//! 答题流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整答题流程
//!
//! 流程顺序：
//! 1. 显示题干预览
//! 2. 调用答案生成方
//! 3. 生成失败或答案为空 → warn.txt（兜底）

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::{DocumentContext, Question};
use crate::services::{AnswerGenerator, WarnWriter};
use crate::utils::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 单题处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    /// 成功生成答案
    Answered(String),
    /// 跳过（已写入 warn.txt）
    Skipped,
}

/// 答题流程
///
/// - 编排单题的答题流程
/// - 决定何时生成、何时兜底
/// - 不持有整卷数据
/// - 只依赖业务能力（services）
pub struct AnswerFlow {
    generator: Arc<dyn AnswerGenerator>,
    warn_writer: WarnWriter,
    verbose_logging: bool,
}

impl AnswerFlow {
    /// 创建新的答题流程
    pub fn new(
        generator: Arc<dyn AnswerGenerator>,
        warn_writer: WarnWriter,
        verbose_logging: bool,
    ) -> Self {
        Self {
            generator,
            warn_writer,
            verbose_logging,
        }
    }

    /// 处理一道题
    ///
    /// 生成失败不会向上返回错误，只有写 warn.txt 失败才会
    pub async fn run(
        &self,
        question: &Question,
        context: &DocumentContext,
        ctx: &QuestionCtx,
    ) -> Result<FlowResult> {
        info!(
            "[试卷 {}] 📝 题目 {} ({} 分): {}",
            ctx.paper_index,
            ctx.number,
            question.marks,
            truncate_text(&question.text, 80)
        );

        match self.generator.generate_answer(question, context).await {
            Ok(answer) if !answer.trim().is_empty() => {
                info!(
                    "[试卷 {}] ✓ 题目 {} 答案生成成功 ({} 字符, {})",
                    ctx.paper_index,
                    ctx.number,
                    answer.chars().count(),
                    self.generator.name()
                );
                if self.verbose_logging {
                    info!("[试卷 {}]   {}", ctx.paper_index, truncate_text(&answer, 120));
                }
                Ok(FlowResult::Answered(answer))
            }
            Ok(_) => {
                warn!(
                    "[试卷 {}] ⚠️ 题目 {} 答案为空，写入 warn.txt",
                    ctx.paper_index, ctx.number
                );
                self.write_warn(ctx, "答案为空").await?;
                Ok(FlowResult::Skipped)
            }
            Err(e) => {
                error!(
                    "[试卷 {}] ❌ 题目 {} 答案生成失败: {}",
                    ctx.paper_index, ctx.number, e
                );
                self.write_warn(ctx, &e.to_string()).await?;
                Ok(FlowResult::Skipped)
            }
        }
    }

    /// 写入警告日志
    async fn write_warn(&self, ctx: &QuestionCtx, reason: &str) -> Result<()> {
        self.warn_writer
            .write(&ctx.paper_name, &ctx.number, reason)
            .await?;

        warn!(
            "[试卷 {}] ⚠️ 已写入 {}: 题目 {}",
            ctx.paper_index,
            self.warn_writer.path(),
            ctx.number
        );

        Ok(())
    }
}
