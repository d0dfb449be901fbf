//! 批量试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量试卷的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、初始化日志文件、创建抽取器和答案生成方
//! 2. **批量加载**：扫描并加载所有待处理的试卷文本（`Vec<PaperSource>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将试卷分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有试卷的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个试卷的细节
//! - **并发安全**：通过 Semaphore 和 tokio::spawn 实现并发
//! - **向下委托**：委托 paper_processor 处理单个试卷

use crate::config::Config;
use crate::extraction::QuestionExtractor;
use crate::models::{load_all_paper_texts, PaperSource};
use crate::orchestrator::paper_processor;
use crate::services::{AnswerGenerator, LlmService};
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_papers_loaded, log_startup,
    print_final_stats, RunSummary,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    extractor: Arc<QuestionExtractor>,
    generator: Option<Arc<dyn AnswerGenerator>>,
}

impl App {
    /// 初始化应用
    ///
    /// `generate_answers` 打开时使用 `LlmService` 作为答案生成方
    pub fn initialize(config: Config) -> Result<Self> {
        let generator = if config.generate_answers {
            Some(Arc::new(LlmService::new(&config)) as Arc<dyn AnswerGenerator>)
        } else {
            None
        };

        Self::build(config, generator)
    }

    /// 使用自定义答案生成方初始化
    pub fn with_generator(config: Config, generator: Arc<dyn AnswerGenerator>) -> Result<Self> {
        Self::build(config, Some(generator))
    }

    fn build(config: Config, generator: Option<Arc<dyn AnswerGenerator>>) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(
            config.max_concurrent_papers,
            config.max_concurrent_answers,
            config.generate_answers,
        );

        let extractor = Arc::new(QuestionExtractor::new()?);

        Ok(Self {
            config,
            extractor,
            generator,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        // 加载所有待处理的试卷
        let all_papers = self.load_papers().await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待处理的试卷文本，程序结束");
            return Ok(RunSummary::default());
        }

        let total_papers = all_papers.len();
        log_papers_loaded(
            &self.config.papers_folder,
            total_papers,
            self.config.max_concurrent_papers,
        );

        // 处理所有试卷
        let stats = self.process_all_papers(all_papers).await?;

        // 输出最终统计
        print_final_stats(&stats, &self.config.output_log_file);

        Ok(stats)
    }

    /// 加载试卷
    async fn load_papers(&self) -> Result<Vec<PaperSource>> {
        info!("\n📁 正在扫描待处理的试卷...");
        load_all_paper_texts(&self.config.papers_folder).await
    }

    /// 处理所有试卷
    async fn process_all_papers(&self, all_papers: Vec<PaperSource>) -> Result<RunSummary> {
        let batch_size = self.config.max_concurrent_papers;
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_papers = all_papers.len();
        let total_batches = total_papers.div_ceil(batch_size);
        let mut stats = RunSummary {
            papers_total: total_papers,
            ..Default::default()
        };

        // 分批处理
        for (batch_idx, batch_papers) in all_papers.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_papers.len(),
                total_papers,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await?;

            stats.absorb(&batch_result);

            log_batch_complete(batch_num, &batch_result);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_papers: &[PaperSource],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<RunSummary> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, paper) in batch_papers.iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let paper = paper.clone();
            let config = self.config.clone();
            let extractor = self.extractor.clone();
            let generator = self.generator.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = paper_processor::process_paper(
                    paper,
                    paper_index,
                    &config,
                    &extractor,
                    generator,
                )
                .await;
                if let Err(e) = &result {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {:#}", paper_index, e);
                }
                result
            });
            batch_handles.push((paper_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = RunSummary {
            papers_total: batch_handles.len(),
            ..Default::default()
        };

        for (paper_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(question_stats)) => {
                    result.papers_ok += 1;
                    result.questions += question_stats.total;
                    result.answered += question_stats.answered;
                }
                Ok(Err(_)) => {
                    result.papers_failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", paper_index, e);
                    result.papers_failed += 1;
                }
            }
        }

        Ok(result)
    }
}
