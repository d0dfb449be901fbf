use crate::error::AppResult;
use crate::models::marker::Marker;
use regex::Regex;

/// 清理后题干的最少字符数，更短的视为误匹配
pub const MIN_QUESTION_CHARS: usize = 11;

/// 一个标记对应的原始题干片段
#[derive(Debug, Clone, Copy)]
pub struct QuestionSpan<'a> {
    pub marker: &'a Marker,
    pub raw: &'a str,
}

/// 题干切分与清理
pub struct SpanExtractor {
    trailing_marks_re: Regex,
    note_re: Regex,
    leading_blank_re: Regex,
}

impl SpanExtractor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            trailing_marks_re: Regex::new(
                r"(?mi)(?:[ \t]*\([ \t]*\d+[ \t]*(?:marks?)?[ \t]*\))+[ \t]*$",
            )?,
            note_re: Regex::new(r"(?mi)^[ \t]*note:[^\n]*(?:\n[ \t]*\S[^\n]*)*\n?")?,
            leading_blank_re: Regex::new(r"^(?:[ \t]*\n)+")?,
        })
    }

    /// 第一个标记之前的文字（已去除首尾空白）
    pub fn preamble(&self, section: &str, markers: &[Marker]) -> String {
        markers
            .first()
            .and_then(|first| section.get(..first.offset))
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }

    /// 按标记切出每道题的原始题干
    ///
    /// 题干从标记匹配文本之后开始，到下一个标记的位置（或段落末尾）为止；
    /// 下一个标记在本题干起点之前时题干为空
    pub fn spans<'a>(&self, section: &'a str, markers: &'a [Marker]) -> Vec<QuestionSpan<'a>> {
        markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let start = marker.body_start();
                let end = markers
                    .get(i + 1)
                    .map(|next| next.offset)
                    .unwrap_or(section.len());
                let raw = if start < end {
                    section.get(start..end).unwrap_or_default()
                } else {
                    ""
                };
                QuestionSpan { marker, raw }
            })
            .collect()
    }

    /// 清理题干：去掉行尾分值标注、`Note:` 段落、开头空行，再去首尾空白
    pub fn clean(&self, raw: &str) -> String {
        let text = self.trailing_marks_re.replace_all(raw, "");
        let text = self.note_re.replace_all(&text, "");
        let text = self.leading_blank_re.replace(&text, "");
        text.trim().to_string()
    }

    /// 题干是否够长，可以作为一道题
    pub fn is_admissible(text: &str) -> bool {
        text.chars().count() >= MIN_QUESTION_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marker::MarkerStrategy;

    fn marker(offset: usize, matched: &str, id: &str) -> Marker {
        Marker {
            offset,
            matched_text: matched.to_string(),
            candidate_id: id.to_string(),
            origin: MarkerStrategy::Lettered,
            is_nested: false,
            parent_letter: None,
        }
    }

    #[test]
    fn test_spans_run_to_next_marker() {
        let section = "Intro text\n1 (a) First body (4)\n(b) Second body\n";
        let markers = vec![marker(11, "1 (a)", "1(a)"), marker(32, "(b)", "1(b)")];
        let extractor = SpanExtractor::new().unwrap();

        let spans = extractor.spans(section, &markers);
        assert_eq!(spans[0].raw, " First body (4)\n");
        assert_eq!(spans[1].raw, " Second body\n");
        assert_eq!(extractor.preamble(section, &markers), "Intro text");
    }

    #[test]
    fn test_overlapping_markers_give_empty_span() {
        let section = "\n3 (a) (i) Identify risks.\n";
        let markers = vec![
            marker(1, "3 (a)", "3(a)"),
            marker(1, "3 (a) (i)", "3(a)(i)"),
        ];
        let spans = SpanExtractor::new().unwrap().spans(section, &markers);
        assert_eq!(spans[0].raw, "");
        assert_eq!(spans[1].raw, " Identify risks.\n");
    }

    #[test]
    fn test_clean_strips_trailing_marks() {
        let extractor = SpanExtractor::new().unwrap();
        assert_eq!(
            extractor.clean(" Explain evacuation procedures. (8)\n"),
            "Explain evacuation procedures."
        );
        assert_eq!(
            extractor.clean("Line one (2)\nLine two (3 marks)  \n"),
            "Line one\nLine two"
        );
        // 行中间的括号数字保留
        assert_eq!(
            extractor.clean("Refer to clause (4) of the policy."),
            "Refer to clause (4) of the policy."
        );
    }

    #[test]
    fn test_clean_strips_note_block_until_blank_line() {
        let extractor = SpanExtractor::new().unwrap();
        let raw = "\n\nDescribe the audit cycle.\nNote: use the template\nprovided in appendix B.\n\nInclude two examples.\n";
        assert_eq!(
            extractor.clean(raw),
            "Describe the audit cycle.\n\nInclude two examples."
        );
    }

    #[test]
    fn test_admission_threshold() {
        assert!(!SpanExtractor::is_admissible("ok"));
        assert!(!SpanExtractor::is_admissible("ten chars!"));
        assert!(SpanExtractor::is_admissible("eleven char"));
    }
}
