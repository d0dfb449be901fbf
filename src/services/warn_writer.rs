//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将没有生成答案的题目写入 warn.txt，便于人工补答
/// - 只处理单个题目的警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `paper_name`: 试卷名称
    /// - `number`: 题号
    /// - `reason`: 原因
    pub async fn write(&self, paper_name: &str, number: &str, reason: &str) -> Result<()> {
        debug!(
            "写入警告: 试卷 {} | 题目 {} | 原因: {}",
            paper_name, number, reason
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("试卷 {} | 题目 {} | 原因: {}\n", paper_name, number, reason);

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
