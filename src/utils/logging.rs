//! 日志工具模块
//!
//! 运行日志文件的表头，以及启动、批次、汇总三类横幅

use anyhow::Result;
use std::fs;
use tracing::info;

const BANNER_WIDTH: usize = 60;

fn rule(ch: &str) -> String {
    ch.repeat(BANNER_WIDTH)
}

/// 本次运行的汇总数字
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub papers_total: usize,
    pub papers_ok: usize,
    pub papers_failed: usize,
    /// 成功试卷的题目台账条数之和
    pub questions: usize,
    pub answered: usize,
}

impl RunSummary {
    /// 累加一个批次的结果（`papers_total` 由调用方预先给定）
    pub fn absorb(&mut self, batch: &RunSummary) {
        self.papers_ok += batch.papers_ok;
        self.papers_failed += batch.papers_failed;
        self.questions += batch.questions;
        self.answered += batch.answered;
    }
}

/// 创建运行日志文件并写入表头
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n试卷答题日志 - {}\n{}\n\n",
        rule("="),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        rule("=")
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 启动横幅：两级并发上限与是否答题
pub fn log_startup(
    max_concurrent_papers: usize,
    max_concurrent_answers: usize,
    generate_answers: bool,
) {
    info!("{}", rule("="));
    info!("🚀 试卷题目抽取启动");
    info!(
        "📊 并发上限: 试卷 {} 份 / 每卷答题 {} 道",
        max_concurrent_papers, max_concurrent_answers
    );
    if generate_answers {
        info!("🤖 抽取后为每道题生成答案");
    } else {
        info!("📝 只导出题目台账，不生成答案");
    }
    info!("{}", rule("="));
}

pub fn log_papers_loaded(folder: &str, total: usize, per_batch: usize) {
    info!("✓ {} 下共有 {} 份试卷文本", folder, total);
    info!("📋 每批抽取 {} 份", per_batch);
}

/// 批次开始；`first`、`last` 为试卷序号（从 1 开始）
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    first: usize,
    last: usize,
    total: usize,
) {
    info!("\n{}", rule("="));
    info!(
        "📦 批次 {}/{}: 试卷 {}-{} (共 {})",
        batch_num, total_batches, first, last, total
    );
    info!("{}", rule("="));
}

pub fn log_batch_complete(batch_num: usize, batch: &RunSummary) {
    info!("\n{}", rule("─"));
    info!(
        "✓ 批次 {} 结束: 试卷 {}/{} 成功, 题目 {} 道, 已答 {} 道",
        batch_num, batch.papers_ok, batch.papers_total, batch.questions, batch.answered
    );
    info!("{}", rule("─"));
}

/// 全部试卷处理完后的汇总
pub fn print_final_stats(summary: &RunSummary, log_file_path: &str) {
    info!("\n{}", rule("="));
    info!(
        "📊 运行汇总 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", rule("="));
    info!(
        "✅ 试卷: {}/{} 成功, {} 失败",
        summary.papers_ok, summary.papers_total, summary.papers_failed
    );
    info!("📝 题目: {} 道", summary.questions);
    info!(
        "💬 答案: {} 道, 未答 {} 道",
        summary.answered,
        summary.questions.saturating_sub(summary.answered)
    );
    info!("{}", rule("="));
    info!("运行日志: {}", log_file_path);
}

/// 按字符数截断题干或答案，用于日志预览
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
