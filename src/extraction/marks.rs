use crate::error::AppResult;
use regex::Regex;

/// 题干中没有分值标注时使用的默认分值
pub const DEFAULT_MARKS: u32 = 8;

/// 分值识别
///
/// 在未清理的题干中找第一个括号整数，例如 `(6)` 或 `(6 marks)`
pub struct MarkDetector {
    marks_re: Regex,
}

impl MarkDetector {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            marks_re: Regex::new(r"(?i)\([ \t]*(\d+)[ \t]*(?:marks?)?[ \t]*\)")?,
        })
    }

    /// 只看第一个括号整数；为 0 或无法解析时取默认值
    pub fn detect(&self, raw: &str) -> u32 {
        self.marks_re
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|marks| *marks > 0)
            .unwrap_or(DEFAULT_MARKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_parenthesized_integer_wins() {
        let detector = MarkDetector::new().unwrap();
        assert_eq!(detector.detect(" Explain fire drills. (6)\n"), 6);
        assert_eq!(detector.detect("Part one (4)\nPart two (10)"), 4);
        assert_eq!(detector.detect("Discuss the policy (12 Marks)"), 12);
    }

    #[test]
    fn test_default_when_missing_or_zero() {
        let detector = MarkDetector::new().unwrap();
        assert_eq!(detector.detect("Explain the process in detail."), DEFAULT_MARKS);
        assert_eq!(detector.detect("Explain (see figure) briefly."), DEFAULT_MARKS);
        assert_eq!(detector.detect("Trick question (0) then (5)"), DEFAULT_MARKS);
        assert_eq!(detector.detect("Overflow (99999999999999999999)"), DEFAULT_MARKS);
    }
}
