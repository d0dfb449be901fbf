use crate::error::AppResult;
use crate::models::question::TaskSection;
use regex::Regex;

/// 任务段落切分器
///
/// 识别 `Task <N>: <title>` 标题行，按出现顺序切出各任务正文
pub struct SectionSplitter {
    header_re: Regex,
}

impl SectionSplitter {
    pub fn new() -> AppResult<Self> {
        let header_re = Regex::new(r"(?mi)^[ \t]*task[ \t]+(\d+)[ \t]*:[ \t]*([^\n]*)$")?;
        Ok(Self { header_re })
    }

    /// 切分任务段落
    ///
    /// 正文从标题行末尾开始，到下一个标题行开头（或文本末尾）为止。
    /// 任务号为 0 或无法解析的标题行不算任务
    pub fn split(&self, text: &str) -> Vec<TaskSection> {
        let headers: Vec<(usize, usize, u32, String)> = self
            .header_re
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let task_number = caps
                    .get(1)?
                    .as_str()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)?;
                let title = caps
                    .get(2)
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default()
                    .to_string();
                Some((whole.start(), whole.end(), task_number, title))
            })
            .collect();

        headers
            .iter()
            .enumerate()
            .map(|(i, (_, header_end, task_number, title))| {
                let end = headers.get(i + 1).map(|next| next.0).unwrap_or(text.len());
                TaskSection {
                    task_number: *task_number,
                    title: title.clone(),
                    body_range: *header_end..end,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_text_order() {
        let text = "Cover page\nTask 2: Audits\nbody two\nTask 1:   Fire Safety  \nbody one\n";
        let sections = SectionSplitter::new().unwrap().split(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].task_number, 2);
        assert_eq!(sections[0].title, "Audits");
        assert_eq!(sections[0].body(text), "\nbody two\n");
        assert_eq!(sections[1].task_number, 1);
        assert_eq!(sections[1].title, "Fire Safety");
        assert_eq!(sections[1].body(text), "\nbody one\n");
    }

    #[test]
    fn test_header_is_case_insensitive_and_indented() {
        let sections = SectionSplitter::new().unwrap().split("  TASK 7: Review\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].task_number, 7);
    }

    #[test]
    fn test_no_header_means_no_sections() {
        let splitter = SectionSplitter::new().unwrap();
        assert!(splitter.split("1 (a) Explain evacuation procedures.\n").is_empty());
        assert!(splitter.split("Task 0: Nothing\n").is_empty());
        assert!(splitter.split("Task one: Words\n").is_empty());
    }
}
