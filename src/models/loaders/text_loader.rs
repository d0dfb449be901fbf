use crate::models::paper::PaperSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 .txt 文件加载一份试卷
pub async fn load_paper_text(text_file_path: &Path) -> Result<PaperSource> {
    let text = fs::read_to_string(text_file_path)
        .await
        .with_context(|| format!("无法读取试卷文本: {}", text_file_path.display()))?;

    let name = text_file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(PaperSource::new(name, text).with_file_path(text_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 .txt 试卷，按文件名排序
pub async fn load_all_paper_texts(folder_path: &str) -> Result<Vec<PaperSource>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut papers = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_paper_text(&path).await {
            Ok(paper) => {
                tracing::info!("成功加载 {} 个字符", paper.text.chars().count());
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_loads_only_txt_files_sorted() {
        let folder = std::env::temp_dir().join(format!("paper_answer_gen_texts_{}", std::process::id()));
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("b_paper.txt"), "Task 1: B\n").unwrap();
        std::fs::write(folder.join("a_paper.txt"), "Task 1: A\n").unwrap();
        std::fs::write(folder.join("notes.md"), "ignored").unwrap();

        let papers = load_all_paper_texts(folder.to_str().unwrap()).await.unwrap();
        let names: Vec<_> = papers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a_paper", "b_paper"]);
        assert!(papers[0].file_path.as_deref().unwrap().ends_with("a_paper.txt"));

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_missing_folder_is_an_error() {
        assert!(load_all_paper_texts("no_such_papers_folder").await.is_err());
    }
}
