use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 一道题目（台账中的一条记录）
///
/// 抽取完成后只读；答案生成与文档渲染都只消费这个结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 层级编号，例如 `1`、`1(a)`、`1(a)(ii)`
    pub number: String,
    pub task_number: u32,
    pub task_title: String,
    /// 清理后的题干
    pub text: String,
    /// 任务开头、第一个题号之前的引导文字，同一任务的题目共享
    #[serde(default)]
    pub preamble: String,
    /// 分值，未标注时为默认值
    pub marks: u32,
}

impl Question {
    /// 是否为带字母的小题（`2(a)`、`2(a)(i)`）
    pub fn is_lettered(&self) -> bool {
        self.number.contains('(')
    }
}

/// 任务段落：由 `Task <N>: <title>` 开头的一段连续文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSection {
    pub task_number: u32,
    pub title: String,
    /// 正文在（规范化后）源文本中的字节区间，不含标题行
    pub body_range: Range<usize>,
}

impl TaskSection {
    /// 取出段落正文
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.body_range.clone()).unwrap_or_default()
    }
}

/// 题目台账：整份试卷按顺序排列的全部题目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLedger {
    questions: Vec<Question>,
}

impl QuestionLedger {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 按 `task_number` + `task_title` 分组，保持台账顺序
    ///
    /// 相邻且任务相同的题目归为一组
    pub fn group_by_task(&self) -> Vec<TaskGroup> {
        let mut groups: Vec<TaskGroup> = Vec::new();

        for question in &self.questions {
            match groups.last_mut() {
                Some(group)
                    if group.task_number == question.task_number
                        && group.title == question.task_title =>
                {
                    group.questions.push(question.clone());
                }
                _ => groups.push(TaskGroup {
                    task_number: question.task_number,
                    title: question.task_title.clone(),
                    preamble: question.preamble.clone(),
                    questions: vec![question.clone()],
                }),
            }
        }

        groups
    }

    /// 所有任务标题（去重，按出现顺序）
    pub fn task_titles(&self) -> Vec<String> {
        self.group_by_task()
            .into_iter()
            .map(|group| format!("Task {}: {}", group.task_number, group.title))
            .collect()
    }
}

impl<'a> IntoIterator for &'a QuestionLedger {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// 同一任务下的题目分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub task_number: u32,
    pub title: String,
    pub preamble: String,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(task_number: u32, title: &str, number: &str) -> Question {
        Question {
            number: number.to_string(),
            task_number,
            task_title: title.to_string(),
            text: "Describe the procedure in full.".to_string(),
            preamble: String::new(),
            marks: 8,
        }
    }

    #[test]
    fn test_group_by_task_keeps_ledger_order() {
        let ledger = QuestionLedger::new(vec![
            question(2, "Audits", "2(a)"),
            question(2, "Audits", "2(b)"),
            question(1, "Fire Safety", "1"),
        ]);

        let groups = ledger.group_by_task();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].task_number, 2);
        assert_eq!(groups[0].questions.len(), 2);
        assert_eq!(groups[1].title, "Fire Safety");
        assert_eq!(
            ledger.task_titles(),
            vec!["Task 2: Audits".to_string(), "Task 1: Fire Safety".to_string()]
        );
    }

    #[test]
    fn test_question_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(question(3, "Audits", "3(a)(i)")).unwrap();
        assert_eq!(json["taskNumber"], 3);
        assert_eq!(json["taskTitle"], "Audits");
        assert!(json.get("task_number").is_none());
    }

    #[test]
    fn test_is_lettered() {
        assert!(question(1, "t", "1(a)").is_lettered());
        assert!(!question(1, "t", "1").is_lettered());
    }
}
