use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 待处理试卷（已提取的 .txt 文本）所在目录
    pub papers_folder: String,
    /// 输出目录（题目 TOML 与答案 JSON）
    pub output_folder: String,
    /// 同时处理的试卷数量
    pub max_concurrent_papers: usize,
    /// 单张试卷内同时生成答案的题目数量
    pub max_concurrent_answers: usize,
    /// 是否调用 LLM 生成答案（关闭时只输出题目结构）
    pub generate_answers: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 生成失败的题目写入此文件
    pub warn_file: String,
    /// 每 1 分对应的答案字数
    pub words_per_mark: u32,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            papers_folder: "papers".to_string(),
            output_folder: "output_toml".to_string(),
            max_concurrent_papers: 4,
            max_concurrent_answers: 4,
            generate_answers: true,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
            words_per_mark: 25,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            papers_folder: std::env::var("PAPERS_FOLDER").unwrap_or(default.papers_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            max_concurrent_papers: std::env::var("MAX_CONCURRENT_PAPERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_papers),
            max_concurrent_answers: std::env::var("MAX_CONCURRENT_ANSWERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_answers),
            generate_answers: std::env::var("GENERATE_ANSWERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.generate_answers),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            words_per_mark: std::env::var("WORDS_PER_MARK").ok().and_then(|v| v.parse().ok()).unwrap_or(default.words_per_mark),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 校验配置
    ///
    /// 并发数为 0 会让信号量永远拿不到许可，直接拒绝
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_papers == 0 {
            return Err(AppError::invalid_config("max_concurrent_papers", "必须大于 0"));
        }
        if self.max_concurrent_answers == 0 {
            return Err(AppError::invalid_config("max_concurrent_answers", "必须大于 0"));
        }
        if self.words_per_mark == 0 {
            return Err(AppError::invalid_config("words_per_mark", "必须大于 0"));
        }
        if self.generate_answers && self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "llm_api_key".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requires_api_key_when_generating() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::Missing { .. }))
        ));
    }

    #[test]
    fn test_extraction_only_config_is_valid_without_key() {
        let config = Config {
            generate_answers: false,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = Config {
            generate_answers: false,
            max_concurrent_answers: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
