//! 层级解析
//!
//! 把定位器的原始命中解析成带规范编号的 [`Marker`]：
//! 1. 按文本位置从前往后走，用"最近打开的父级"栈给续接标记找父级
//! 2. 按编号去重，扫描顺序靠前的保留
//! 3. 按文本位置排序

use crate::extraction::locator::roman_value;
use crate::models::marker::{HitKind, Marker, MarkerHit};
use std::collections::HashSet;
use tracing::debug;

/// 父级栈的一层
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    /// 没有字母的整题
    Flat,
    Letter(char),
    Roman(String),
}

/// 最近打开的父级
#[derive(Debug, Default)]
struct ParentStack {
    frames: Vec<Frame>,
}

impl ParentStack {
    fn close_all(&mut self) {
        self.frames.clear();
    }

    fn open_flat(&mut self) {
        self.close_all();
        self.frames.push(Frame::Flat);
    }

    fn is_flat(&self) -> bool {
        matches!(self.frames.last(), Some(Frame::Flat))
    }

    fn open_letter(&mut self, letter: char) {
        self.close_all();
        self.frames.push(Frame::Letter(letter));
    }

    fn open_nested(&mut self, letter: char, roman: &str) {
        self.open_letter(letter);
        self.frames.push(Frame::Roman(roman.to_string()));
    }

    /// 关闭已打开的罗马数字层，挂到当前字母下；没有字母可挂时返回 `None`
    fn open_roman(&mut self, roman: &str) -> Option<char> {
        while matches!(self.frames.last(), Some(Frame::Roman(_))) {
            self.frames.pop();
        }
        let parent = self.current_letter()?;
        self.frames.push(Frame::Roman(roman.to_string()));
        Some(parent)
    }

    fn current_letter(&self) -> Option<char> {
        self.frames.iter().rev().find_map(|frame| match frame {
            Frame::Letter(c) => Some(*c),
            Frame::Flat | Frame::Roman(_) => None,
        })
    }

    fn current_roman(&self) -> Option<&str> {
        match self.frames.last() {
            Some(Frame::Roman(r)) => Some(r.as_str()),
            _ => None,
        }
    }

    /// `(i)`、`(v)`、`(x)` 既可能是字母也可能是罗马数字
    ///
    /// 能接上当前罗马数字序列就按罗马数字；是当前字母的下一个字母就按字母；
    /// 否则有字母打开且是 `i` 时按罗马数字，其余按字母。
    /// 整题下面没有字母，一律按罗马数字（随后并入整题题干）
    fn prefers_roman(&self, numeral: &str) -> bool {
        let Some(open_letter) = self.current_letter() else {
            return self.is_flat();
        };

        if let (Some(open), Some(value)) = (self.current_roman(), roman_value(numeral)) {
            if roman_value(open).map(|v| v + 1) == Some(value) {
                return true;
            }
        }

        let next_letter = char::from_u32(open_letter as u32 + 1);
        if numeral.chars().next() == next_letter && numeral.len() == 1 {
            return false;
        }

        numeral == "i"
    }
}

/// 解析一个任务的全部命中
///
/// 返回按文本位置排序、编号唯一的标记列表
pub fn resolve(task_number: u32, hits: Vec<MarkerHit>) -> Vec<Marker> {
    // (扫描序号, 命中)；扫描序号用于去重时的先后
    let mut ordered: Vec<(usize, MarkerHit)> = hits.into_iter().enumerate().collect();
    ordered.sort_by_key(|(scan, hit)| (hit.offset, hit.kind.depth(), *scan));

    let mut stack = ParentStack::default();
    let mut resolved: Vec<(usize, Marker)> = Vec::new();

    let mut i = 0;
    while i < ordered.len() {
        let offset = ordered[i].1.offset;
        let mut end = i;
        while end < ordered.len() && ordered[end].1.offset == offset {
            end += 1;
        }

        let group = disambiguate(&ordered[i..end], &stack);
        for (scan, hit) in group {
            if let Some(marker) = resolve_hit(task_number, hit, &mut stack) {
                resolved.push((*scan, marker));
            }
        }

        i = end;
    }

    let mut markers = dedup_by_scan_order(task_number, resolved);
    markers.sort_by_key(|marker| (marker.offset, marker.depth()));
    markers
}

/// 同一位置上同时命中单独字母和单独罗马数字时，只留下一个
fn disambiguate<'a>(
    group: &'a [(usize, MarkerHit)],
    stack: &ParentStack,
) -> Vec<&'a (usize, MarkerHit)> {
    let ambiguous = group.iter().find_map(|(_, hit)| match &hit.kind {
        HitKind::BareRoman(roman) => group
            .iter()
            .any(|(_, other)| {
                matches!(&other.kind, HitKind::BareLetter(c) if roman.len() == 1 && roman.starts_with(*c))
            })
            .then(|| roman.clone()),
        _ => None,
    });

    match ambiguous {
        Some(numeral) => {
            let keep_roman = stack.prefers_roman(&numeral);
            group
                .iter()
                .filter(|(_, hit)| match hit.kind {
                    HitKind::BareLetter(_) => !keep_roman,
                    HitKind::BareRoman(_) => keep_roman,
                    _ => true,
                })
                .collect()
        }
        None => group.iter().collect(),
    }
}

fn resolve_hit(task_number: u32, hit: &MarkerHit, stack: &mut ParentStack) -> Option<Marker> {
    let (candidate_id, is_nested, parent_letter) = match &hit.kind {
        HitKind::Standalone => {
            stack.open_flat();
            (task_number.to_string(), false, None)
        }
        HitKind::Letter(letter) | HitKind::BareLetter(letter) => {
            stack.open_letter(*letter);
            (format!("{}({})", task_number, letter), false, None)
        }
        HitKind::Nested { letter, roman } => {
            stack.open_nested(*letter, roman);
            (
                format!("{}({})({})", task_number, letter, roman),
                true,
                Some(*letter),
            )
        }
        HitKind::BareRoman(roman) => match stack.open_roman(roman) {
            Some(letter) => (
                format!("{}({})({})", task_number, letter, roman),
                true,
                Some(letter),
            ),
            None => {
                debug!(
                    "[任务 {}] 续接标记 ({}) 没有可挂的字母小题，已忽略",
                    task_number, roman
                );
                return None;
            }
        },
    };

    Some(Marker {
        offset: hit.offset,
        matched_text: hit.matched_text.clone(),
        candidate_id,
        origin: hit.strategy,
        is_nested,
        parent_letter,
    })
}

/// 按编号去重，扫描顺序靠前的保留
fn dedup_by_scan_order(task_number: u32, mut resolved: Vec<(usize, Marker)>) -> Vec<Marker> {
    resolved.sort_by_key(|(scan, _)| *scan);

    let mut seen = HashSet::new();
    resolved
        .into_iter()
        .filter_map(|(_, marker)| {
            if seen.insert(marker.candidate_id.clone()) {
                Some(marker)
            } else {
                debug!(
                    "[任务 {}] 重复题号 {} (位置 {}, 策略 {})，已丢弃",
                    task_number,
                    marker.candidate_id,
                    marker.offset,
                    marker.origin.name()
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::locator::MarkerPatterns;

    fn resolve_text(task_number: u32, section: &str) -> Vec<String> {
        let hits = MarkerPatterns::for_task(task_number).unwrap().locate(section);
        resolve(task_number, hits)
            .into_iter()
            .map(|m| m.candidate_id)
            .collect()
    }

    #[test]
    fn test_bare_letter_continues_task() {
        let ids = resolve_text(1, "\n1 (a) Explain evacuation.\n(b) Explain drills.\n(c) Explain alarms.\n");
        assert_eq!(ids, vec!["1(a)", "1(b)", "1(c)"]);
    }

    #[test]
    fn test_bare_roman_attaches_to_nested_parent() {
        let section = "\n3 (a) (i) Identify risks.\n(ii) Mitigate risks.\n";
        let hits = MarkerPatterns::for_task(3).unwrap().locate(section);
        let markers = resolve(3, hits);

        let ids: Vec<_> = markers.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["3(a)", "3(a)(i)", "3(a)(ii)"]);
        assert_eq!(markers[2].parent_letter, Some('a'));
        assert!(markers[2].is_nested);
        assert_eq!(markers[0].offset, markers[1].offset);
    }

    #[test]
    fn test_roman_follows_most_recent_letter_by_offset() {
        let section = "\n2 (a) First part overview.\n(i) detail one here\n(b) Second part overview.\n(i) detail two here\n(ii) detail three here\n";
        let ids = resolve_text(2, section);
        assert_eq!(ids, vec!["2(a)", "2(a)(i)", "2(b)", "2(b)(i)", "2(b)(ii)"]);
    }

    #[test]
    fn test_letter_i_after_h_stays_a_letter() {
        let section = "\n1 (g) Part g text.\n(h) Part h text.\n(i) Part i text.\n";
        let ids = resolve_text(1, section);
        assert_eq!(ids, vec!["1(g)", "1(h)", "1(i)"]);
    }

    #[test]
    fn test_roman_v_continues_roman_sequence() {
        let section = "\n4 (a) Intro.\n(iii) three\n(iv) four\n(v) five\n";
        let ids = resolve_text(4, section);
        assert_eq!(ids, vec!["4(a)", "4(a)(iii)", "4(a)(iv)", "4(a)(v)"]);
    }

    #[test]
    fn test_orphan_roman_is_dropped() {
        let ids = resolve_text(5, "\n(ii) No parent letter anywhere.\n");
        assert!(ids.is_empty());
    }

    #[test]
    fn test_roman_list_under_flat_question_is_not_a_part() {
        let section = "\n4 List the stages below.\n(i) Planning stage\n(ii) Review stage\n";
        let ids = resolve_text(4, section);
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn test_flat_question_survives_orphan_roman() {
        let section = "\n4 Explain the process in detail.\n(ii) Refer to the second stage of the flow.\n";
        let ids = resolve_text(4, section);
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first_in_scan_order() {
        // 单独的 (a) 在文本中靠前，但扫描顺序晚于 Lettered
        let section = "\n(a) Bare first in text.\n1 (a) Lettered later in text.\n";
        let hits = MarkerPatterns::for_task(1).unwrap().locate(section);
        let markers = resolve(1, hits);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].candidate_id, "1(a)");
        assert_eq!(markers[0].matched_text, "1 (a)");
    }

    #[test]
    fn test_resolved_markers_are_sorted_by_offset() {
        let section = "\n7 Explain the first idea.\n";
        let markers = resolve(7, MarkerPatterns::for_task(7).unwrap().locate(section));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].candidate_id, "7");
        assert_eq!(markers[0].depth(), 0);
    }
}
