//! 题目处理上下文
//!
//! 封装"我正在处理哪张卷子的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 试卷名称
    pub paper_name: String,

    /// 试卷索引（仅用于日志显示）
    pub paper_index: usize,

    /// 题目在台账中的索引（从1开始）
    pub question_index: usize,

    /// 题号，例如 `2(a)(i)`
    pub number: String,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(
        paper_name: String,
        paper_index: usize,
        question_index: usize,
        number: String,
    ) -> Self {
        Self {
            paper_name,
            paper_index,
            question_index,
            number,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[试卷 {}#{} 题目#{} 题号 {}]",
            self.paper_name, self.paper_index, self.question_index, self.number
        )
    }
}
