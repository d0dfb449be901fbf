//! LLM 服务 - 业务能力层
//!
//! 只负责"为单道题生成答案"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, LlmError};
use crate::models::{DocumentContext, Question};
use crate::services::answer_generator::AnswerGenerator;

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 为题目生成答案
/// - 提供通用的 LLM 调用接口
/// - 只处理单个题目
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    words_per_mark: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            words_per_mark: config.words_per_mark,
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `max_tokens`: 最大输出 token 数
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        max_tokens: u32,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(max_tokens)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 目标答案字数
    pub fn target_words(&self, question: &Question) -> u32 {
        question.marks.saturating_mul(self.words_per_mark)
    }

    /// 构建答题消息
    ///
    /// 返回 (user_message, system_message)
    fn build_answer_messages(
        &self,
        question: &Question,
        context: &DocumentContext,
    ) -> (String, String) {
        let system_message = "You are an experienced candidate sitting a written vocational exam. \
                              Answer each question directly, in clear paragraphs, \
                              without repeating the question and without headings."
            .to_string();

        let preamble = if question.preamble.is_empty() {
            "(none)".to_string()
        } else {
            question.preamble.clone()
        };

        let user_message = format!(
            r#"Exam paper: {}
Tasks in this paper:
{}

Task {}: {}
Task context:
{}

Question {} ({} marks):
{}

Write an answer of about {} words. Return only the answer text."#,
            context.paper_name,
            context.task_titles.join("\n"),
            question.task_number,
            question.task_title,
            preamble,
            question.number,
            question.marks,
            question.text,
            self.target_words(question)
        );

        (user_message, system_message)
    }
}

#[async_trait]
impl AnswerGenerator for LlmService {
    async fn generate_answer(
        &self,
        question: &Question,
        context: &DocumentContext,
    ) -> Result<String> {
        let (user_message, system_message) = self.build_answer_messages(question, context);
        // 1 个英文单词约 1.3 个 token，留出余量
        let max_tokens = self.target_words(question).saturating_mul(2).max(256);

        debug!(
            "为题目 {} 生成答案，目标 {} 词",
            question.number,
            self.target_words(question)
        );

        self.send_to_llm(&user_message, Some(&system_message), max_tokens)
            .await
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
