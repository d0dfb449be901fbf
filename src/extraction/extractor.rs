//! 台账组装
//!
//! 串起整条抽取流水线：规范化 → 切分任务 → 定位题号 → 解析层级 → 切分题干 → 识别分值

use crate::error::AppResult;
use crate::extraction::locator::MarkerPatterns;
use crate::extraction::marks::MarkDetector;
use crate::extraction::normalize::normalize_text;
use crate::extraction::resolver;
use crate::extraction::sections::SectionSplitter;
use crate::extraction::span::SpanExtractor;
use crate::models::question::{Question, QuestionLedger, TaskSection};
use crate::utils::logging::truncate_text;
use tracing::{debug, info, warn};

/// 题目结构抽取器
///
/// 只持有编译好的正则，无内部可变状态，可在多个线程间共享
pub struct QuestionExtractor {
    splitter: SectionSplitter,
    spans: SpanExtractor,
    marks: MarkDetector,
}

impl QuestionExtractor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            splitter: SectionSplitter::new()?,
            spans: SpanExtractor::new()?,
            marks: MarkDetector::new()?,
        })
    }

    /// 从整份试卷文本中抽取题目台账
    ///
    /// 格式不规范的文本不会报错：没有任务返回空台账，
    /// 没有题号的任务不产出题目，过短的题干直接丢弃
    pub fn extract(&self, text: &str) -> AppResult<QuestionLedger> {
        let text = normalize_text(text);
        let sections = self.splitter.split(&text);

        if sections.is_empty() {
            warn!("⚠️ 未找到任何 Task 标题");
            return Ok(QuestionLedger::default());
        }

        debug!("找到 {} 个任务段落", sections.len());

        let mut questions = Vec::new();
        for section in &sections {
            let extracted = self.extract_section(&text, section)?;
            info!(
                "[任务 {}] {} - 识别到 {} 道题目",
                section.task_number,
                section.title,
                extracted.len()
            );
            questions.extend(extracted);
        }

        Ok(QuestionLedger::new(questions))
    }

    /// 抽取单个任务段落
    fn extract_section(&self, text: &str, section: &TaskSection) -> AppResult<Vec<Question>> {
        let body = section.body(text);
        let patterns = MarkerPatterns::for_task(section.task_number)?;
        let markers = resolver::resolve(section.task_number, patterns.locate(body));

        if markers.is_empty() {
            debug!("[任务 {}] 没有找到任何题号", section.task_number);
            return Ok(Vec::new());
        }

        let preamble = self.spans.preamble(body, &markers);
        let mut questions = Vec::new();

        for span in self.spans.spans(body, &markers) {
            let marks = self.marks.detect(span.raw);
            let cleaned = self.spans.clean(span.raw);

            if !SpanExtractor::is_admissible(&cleaned) {
                debug!(
                    "[任务 {}] 题号 {} 题干过短，已丢弃: {:?}",
                    section.task_number, span.marker.candidate_id, cleaned
                );
                continue;
            }

            debug!(
                "[任务 {}] {} ({} 分): {}",
                section.task_number,
                span.marker.candidate_id,
                marks,
                truncate_text(&cleaned, 60)
            );

            questions.push(Question {
                number: span.marker.candidate_id.clone(),
                task_number: section.task_number,
                task_title: section.title.clone(),
                text: cleaned,
                preamble: preamble.clone(),
                marks,
            });
        }

        Ok(questions)
    }
}

/// 便捷函数：创建抽取器并抽取一次
pub fn parse_questions(text: &str) -> AppResult<QuestionLedger> {
    QuestionExtractor::new()?.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_is_shared_by_task_questions() {
        let text = "Task 1: Fire Safety\nRead the scenario about the warehouse fire.\n1 (a) Explain evacuation procedures. (8)\n(b) Explain fire drills. (6)\n";
        let ledger = parse_questions(text).unwrap();

        assert_eq!(ledger.len(), 2);
        for question in &ledger {
            assert_eq!(question.preamble, "Read the scenario about the warehouse fire.");
        }
    }

    #[test]
    fn test_task_without_markers_does_not_affect_others() {
        let text = "Task 1: Intro\nJust some words without numbering.\nTask 2: Audits\n2 (a) Describe an internal audit.\n";
        let ledger = parse_questions(text).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.questions()[0].number, "2(a)");
        assert_eq!(ledger.questions()[0].task_title, "Audits");
    }

    #[test]
    fn test_crlf_input_matches_lf_input() {
        let lf = "Task 1: Fire Safety\n1 (a) Explain evacuation procedures. (8)\n(b) Explain fire drills. (6)\n";
        let crlf = lf.replace('\n', "\r\n");
        assert_eq!(parse_questions(lf).unwrap(), parse_questions(&crlf).unwrap());
    }

    #[test]
    fn test_note_blocks_are_removed_from_text() {
        let text = "Task 5: Reporting\n5 Write an incident report for the event.\nNote: the report must\nfollow the company format.\n";
        let ledger = parse_questions(text).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.questions()[0].number, "5");
        assert_eq!(
            ledger.questions()[0].text,
            "Write an incident report for the event."
        );
    }

    #[test]
    fn test_flat_question_keeps_roman_list_in_text() {
        let text = "Task 4: Y\n4 Explain the process in detail.\n(ii) Refer to the second stage of the flow.\n";
        let ledger = parse_questions(text).unwrap();

        assert_eq!(ledger.len(), 1);
        let question = &ledger.questions()[0];
        assert_eq!(question.number, "4");
        assert_eq!(question.preamble, "");
        assert_eq!(
            question.text,
            "Explain the process in detail.\n(ii) Refer to the second stage of the flow."
        );
    }
}
