use crate::models::question::{Question, QuestionLedger};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// 题目台账的 TOML 文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFile {
    pub paper: String,
    pub generated_at: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl LedgerFile {
    pub fn new(paper: impl Into<String>, ledger: &QuestionLedger) -> Self {
        Self {
            paper: paper.into(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            questions: ledger.questions().to_vec(),
        }
    }

    pub fn into_ledger(self) -> QuestionLedger {
        QuestionLedger::new(self.questions)
    }
}

/// 将题目台账写入 TOML 文件
pub async fn save_ledger_toml(toml_file_path: &Path, file: &LedgerFile) -> Result<()> {
    if let Some(parent) = toml_file_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("无法创建目录: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(file)
        .with_context(|| format!("无法序列化题目台账: {}", file.paper))?;

    fs::write(toml_file_path, content)
        .await
        .with_context(|| format!("无法写入TOML文件: {}", toml_file_path.display()))?;

    Ok(())
}

/// 从 TOML 文件加载题目台账
pub async fn load_ledger_toml(toml_file_path: &Path) -> Result<LedgerFile> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let file: LedgerFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> QuestionLedger {
        QuestionLedger::new(vec![Question {
            number: "1(a)".to_string(),
            task_number: 1,
            task_title: "Fire Safety".to_string(),
            text: "Explain evacuation procedures.".to_string(),
            preamble: "Read the case study below.".to_string(),
            marks: 8,
        }])
    }

    #[tokio::test]
    async fn test_saved_ledger_loads_back() {
        let path = std::env::temp_dir()
            .join(format!("paper_answer_gen_ledger_{}", std::process::id()))
            .join("fire_safety.toml");

        let file = LedgerFile::new("fire_safety", &sample_ledger());
        save_ledger_toml(&path, &file).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[[questions]]"));
        assert!(raw.contains("taskNumber = 1"));

        let loaded = load_ledger_toml(&path).await.unwrap();
        assert_eq!(loaded.paper, "fire_safety");
        assert_eq!(loaded.into_ledger(), sample_ledger());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = load_ledger_toml(Path::new("definitely/not/here.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }
}
