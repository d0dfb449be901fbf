//! 单个试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个试卷，是试卷级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **抽取题目**：调用抽取引擎得到题目台账
//! 2. **导出台账**：写入 `<输出目录>/<试卷名>.toml`
//! 3. **并发答题**：为每道题创建 `QuestionCtx`，交给 `AnswerFlow`
//! 4. **组装结果**：按任务分组，写入 `<输出目录>/<试卷名>.answers.json`
//! 5. **统计输出**：记录成功/跳过数量

use crate::config::Config;
use crate::error::AppError;
use crate::extraction::QuestionExtractor;
use crate::models::{
    save_ledger_toml, AnswerSheet, DocumentContext, LedgerFile, PaperSource, QuestionLedger,
};
use crate::services::{AnswerGenerator, WarnWriter};
use crate::workflow::{AnswerFlow, FlowResult, QuestionCtx};
use anyhow::{Context, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// 题目处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QuestionStats {
    /// 识别到的题目数量
    pub total: usize,
    pub answered: usize,
    pub skipped: usize,
}

/// 处理单个试卷
///
/// # 参数
/// - `paper`: 试卷文本
/// - `paper_index`: 试卷索引（用于日志）
/// - `config`: 配置
/// - `extractor`: 题目抽取器
/// - `generator`: 答案生成方，`None` 时只抽取题目
///
/// # 返回
/// 返回题目统计；一道题都没识别到时返回错误
pub async fn process_paper(
    paper: PaperSource,
    paper_index: usize,
    config: &Config,
    extractor: &QuestionExtractor,
    generator: Option<Arc<dyn AnswerGenerator>>,
) -> Result<QuestionStats> {
    log_paper_start(paper_index, &paper);

    let ledger = extractor
        .extract(&paper.text)
        .with_context(|| format!("抽取题目失败: {}", paper.name))?;

    if ledger.is_empty() {
        return Err(AppError::no_questions_found(&paper.name).into());
    }

    log_ledger(paper_index, &ledger);

    let output_folder = Path::new(&config.output_folder);
    let toml_path = output_folder.join(format!("{}.toml", paper.name));
    save_ledger_toml(&toml_path, &LedgerFile::new(&paper.name, &ledger)).await?;
    info!(
        "[试卷 {}] 💾 题目台账已保存: {}",
        paper_index,
        toml_path.display()
    );

    let mut stats = QuestionStats {
        total: ledger.len(),
        ..Default::default()
    };

    let Some(generator) = generator else {
        info!("[试卷 {}] 答案生成已关闭，跳过答题", paper_index);
        stats.skipped = ledger.len();
        log_paper_complete(paper_index, &stats);
        return Ok(stats);
    };

    let flow = AnswerFlow::new(
        generator,
        WarnWriter::with_path(config.warn_file.clone()),
        config.verbose_logging,
    );
    let sheet = answer_all(&flow, &paper.name, paper_index, &ledger, config).await?;

    stats.answered = sheet.len();
    stats.skipped = ledger.len() - sheet.len();

    let answers_path = write_answers(output_folder, &paper.name, &sheet, &ledger).await?;
    info!(
        "[试卷 {}] 💾 答案已保存: {}",
        paper_index,
        answers_path.display()
    );

    log_paper_complete(paper_index, &stats);

    Ok(stats)
}

/// 并发为台账中的每道题生成答案
///
/// 同时进行的请求数不超过 `max_concurrent_answers`；完成顺序不定，按题号回填
async fn answer_all(
    flow: &AnswerFlow,
    paper_name: &str,
    paper_index: usize,
    ledger: &QuestionLedger,
    config: &Config,
) -> Result<AnswerSheet> {
    let context = DocumentContext::from_ledger(paper_name, ledger);
    let context = &context;

    // 题目按值进入流，spawn 出去的 future 不能持有带生命周期参数的闭包入参
    let results: Vec<_> = futures::stream::iter(ledger.questions().iter().cloned().enumerate())
        .map(move |(index, question)| async move {
            let ctx = QuestionCtx::new(
                paper_name.to_string(),
                paper_index,
                index + 1,
                question.number.clone(),
            );
            let result = flow.run(&question, context, &ctx).await;
            (question, result)
        })
        .buffer_unordered(config.max_concurrent_answers.max(1))
        .collect()
        .await;

    let mut sheet = AnswerSheet::new();
    for (question, result) in results {
        match result {
            Ok(FlowResult::Answered(answer)) => sheet.insert(question, answer),
            Ok(FlowResult::Skipped) => {}
            Err(e) => {
                error!(
                    "[试卷 {}] 题目 {} 处理失败: {}",
                    paper_index, question.number, e
                );
            }
        }
    }

    Ok(sheet)
}

/// 按任务分组写出答案 JSON
async fn write_answers(
    output_folder: &Path,
    paper_name: &str,
    sheet: &AnswerSheet,
    ledger: &QuestionLedger,
) -> Result<PathBuf> {
    let tasks = sheet.assemble(ledger);
    let json = serde_json::to_string_pretty(&tasks)?;

    tokio::fs::create_dir_all(output_folder)
        .await
        .with_context(|| format!("无法创建目录: {}", output_folder.display()))?;

    let path = output_folder.join(format!("{}.answers.json", paper_name));
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("无法写入答案文件: {}", path.display()))?;

    Ok(path)
}

// ========== 日志辅助函数 ==========

fn log_paper_start(paper_index: usize, paper: &PaperSource) {
    info!("[试卷 {}] 开始处理", paper_index);
    info!("[试卷 {}] 名称: {}", paper_index, paper.name);
    if let Some(path) = &paper.file_path {
        info!("[试卷 {}] 文件: {}", paper_index, path);
    }
    info!(
        "[试卷 {}] 文本长度: {} 字符",
        paper_index,
        paper.text.chars().count()
    );
}

fn log_ledger(paper_index: usize, ledger: &QuestionLedger) {
    for group in ledger.group_by_task() {
        info!(
            "[试卷 {}] Task {}: {} → {}",
            paper_index,
            group.task_number,
            group.title,
            group
                .questions
                .iter()
                .map(|q| format!("{}[{}分]", q.number, q.marks))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

fn log_paper_complete(paper_index: usize, stats: &QuestionStats) {
    info!(
        "[试卷 {}] 题目统计: 成功 {}, 跳过 {}, 总计 {}",
        paper_index, stats.answered, stats.skipped, stats.total
    );
    info!("\n[试卷 {}] ✅ 试卷处理完成\n", paper_index);
}
