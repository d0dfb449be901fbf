use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 正则表达式编译失败（与输入文本无关，属于程序错误）
    #[error("正则表达式编译失败: {0}")]
    Pattern(#[from] regex::Error),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {field} 取值非法: {reason}")]
    InvalidValue { field: String, reason: String },
    /// 必填配置项缺失
    #[error("配置项 {field} 不能为空")]
    Missing { field: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 业务逻辑错误
#[derive(Debug, Error)]
pub enum BusinessError {
    /// 试卷中没有识别到任何题目
    #[error("试卷 {paper} 中未识别到任何题目")]
    NoQuestionsFound { paper: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: async_openai::error::OpenAIError,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source,
        })
    }

    /// 创建配置项非法错误
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// 创建"未识别到题目"错误
    pub fn no_questions_found(paper: impl Into<String>) -> Self {
        AppError::Business(BusinessError::NoQuestionsFound {
            paper: paper.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_error_message_names_paper() {
        let err = AppError::no_questions_found("fire_safety");
        assert_eq!(err.to_string(), "业务错误: 试卷 fire_safety 中未识别到任何题目");
    }

    #[test]
    fn test_config_error_converts_into_app_error() {
        let err: AppError = ConfigError::Missing {
            field: "llm_api_key".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(ConfigError::Missing { .. })));
    }
}
