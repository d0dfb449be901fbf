use crate::models::question::{Question, QuestionLedger};
use serde::{Deserialize, Serialize};

/// 交给答案生成方的整卷上下文
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub paper_name: String,
    /// `Task N: title` 列表，让生成方知道整份试卷的范围
    pub task_titles: Vec<String>,
}

impl DocumentContext {
    pub fn from_ledger(paper_name: impl Into<String>, ledger: &QuestionLedger) -> Self {
        Self {
            paper_name: paper_name.into(),
            task_titles: ledger.task_titles(),
        }
    }
}

/// 题目 + 答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub answer: String,
}

/// 一张试卷的全部答案
///
/// 答案可能乱序生成，查找按 `task_number` + `number`
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: Vec<AnsweredQuestion>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question: Question, answer: String) {
        self.answers.push(AnsweredQuestion { question, answer });
    }

    pub fn get(&self, task_number: u32, number: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.question.task_number == task_number && a.question.number == number)
            .map(|a| a.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// 按台账顺序组装成任务 → 题目 → 答案结构
    ///
    /// 没有答案的题目不会出现在结果中
    pub fn assemble(&self, ledger: &QuestionLedger) -> Vec<AnsweredTask> {
        ledger
            .group_by_task()
            .into_iter()
            .map(|group| AnsweredTask {
                task_number: group.task_number,
                title: group.title,
                preamble: group.preamble,
                questions: group
                    .questions
                    .into_iter()
                    .filter_map(|question| {
                        let answer = self.get(question.task_number, &question.number)?;
                        Some(AnsweredQuestion {
                            answer: answer.to_string(),
                            question,
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 渲染用的任务分组（含答案）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredTask {
    pub task_number: u32,
    pub title: String,
    pub preamble: String,
    pub questions: Vec<AnsweredQuestion>,
}
