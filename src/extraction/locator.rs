//! 题号定位器
//!
//! 在一个任务段落内，用多种题号写法扫描所有可能的题目边界。
//! 同一份试卷里写法往往并不统一（PDF 提取时会丢掉后续小题前面的题号），
//! 所以每种写法都是一个 [`MarkerStrategy`]，按固定顺序扫描并汇总

use crate::error::AppResult;
use crate::models::marker::{HitKind, MarkerHit, MarkerStrategy};
use phf::phf_map;
use regex::{Captures, Regex};
use tracing::debug;

/// 小题可用的罗马数字及其序号
static ROMAN_NUMERALS: phf::Map<&'static str, u8> = phf_map! {
    "i" => 1,
    "ii" => 2,
    "iii" => 3,
    "iv" => 4,
    "v" => 5,
    "vi" => 6,
    "vii" => 7,
    "viii" => 8,
    "ix" => 9,
    "x" => 10,
    "xi" => 11,
    "xii" => 12,
};

/// 罗马数字的序号（不区分大小写）；不是合法小题编号时返回 `None`
pub fn roman_value(numeral: &str) -> Option<u8> {
    ROMAN_NUMERALS
        .get(numeral.to_ascii_lowercase().as_str())
        .copied()
}

/// 某个任务号对应的一组题号模式
pub struct MarkerPatterns {
    task_number: u32,
    lettered: Regex,
    bare_letter: Regex,
    compact_lettered: Regex,
    nested: Regex,
    bare_roman: Regex,
    standalone: Regex,
}

impl MarkerPatterns {
    /// 以任务号为字面量编译模式
    pub fn for_task(task_number: u32) -> AppResult<Self> {
        let n = task_number;
        Ok(Self {
            task_number,
            lettered: Regex::new(&format!(
                r"(?m)^[ \t]*{n}[ \t]+\([ \t]*([a-zA-Z])[ \t]*\)"
            ))?,
            bare_letter: Regex::new(r"(?m)^[ \t]*\(([a-zA-Z])\)")?,
            compact_lettered: Regex::new(&format!(r"(?m)^[ \t]*{n}\(([a-zA-Z])\)"))?,
            nested: Regex::new(&format!(
                r"(?m)^[ \t]*{n}[ \t]*\([ \t]*([a-zA-Z])[ \t]*\)[ \t]*\(([ivxIVX]+)\)"
            ))?,
            bare_roman: Regex::new(r"(?m)^[ \t]*\(([ivxIVX]+)\)")?,
            standalone: Regex::new(&format!(r"(?m)^([ \t]*{n}\.?[ \t]+)[A-Z]"))?,
        })
    }

    fn regex(&self, strategy: MarkerStrategy) -> &Regex {
        match strategy {
            MarkerStrategy::Lettered => &self.lettered,
            MarkerStrategy::BareLetter => &self.bare_letter,
            MarkerStrategy::CompactLettered => &self.compact_lettered,
            MarkerStrategy::Nested => &self.nested,
            MarkerStrategy::BareRoman => &self.bare_roman,
            MarkerStrategy::Standalone => &self.standalone,
        }
    }

    /// 按策略顺序扫描整个段落
    ///
    /// 已有字母题号时不再扫描整题写法；只有罗马数字命中的段落仍按整题处理。
    /// 结果按扫描顺序排列（先策略顺序，再策略内的文本位置），后续去重依赖这个顺序
    pub fn locate(&self, section: &str) -> Vec<MarkerHit> {
        let mut hits = Vec::new();

        for strategy in MarkerStrategy::ALL {
            if strategy.is_fallback() && has_lettered(&hits) {
                continue;
            }

            let found = self.scan(strategy, section);
            if !found.is_empty() {
                debug!(
                    "[任务 {}] 策略 {} 命中 {} 处",
                    self.task_number,
                    strategy.name(),
                    found.len()
                );
            }
            hits.extend(found);
        }

        hits
    }

    /// 只用一种策略扫描
    pub fn scan(&self, strategy: MarkerStrategy, section: &str) -> Vec<MarkerHit> {
        self.regex(strategy)
            .captures_iter(section)
            .filter_map(|caps| build_hit(strategy, section, &caps))
            .collect()
    }
}

/// 是否已有字母级别的题号
///
/// 与同位置罗马数字重合的 `(i)`、`(v)`、`(x)` 不算，它们可能只是整题下的列表
fn has_lettered(hits: &[MarkerHit]) -> bool {
    hits.iter().any(|hit| match hit.kind {
        HitKind::Letter(_) | HitKind::Nested { .. } => true,
        HitKind::BareLetter(letter) => !hits.iter().any(|other| {
            other.offset == hit.offset
                && matches!(&other.kind, HitKind::BareRoman(roman) if roman.len() == 1 && roman.starts_with(letter))
        }),
        HitKind::BareRoman(_) | HitKind::Standalone => false,
    })
}

fn build_hit(strategy: MarkerStrategy, section: &str, caps: &Captures<'_>) -> Option<MarkerHit> {
    let whole = caps.get(0)?;
    let mut body_start = whole.end();

    let kind = match strategy {
        MarkerStrategy::Lettered | MarkerStrategy::CompactLettered => {
            HitKind::Letter(letter_at(caps, 1)?)
        }
        MarkerStrategy::BareLetter => HitKind::BareLetter(letter_at(caps, 1)?),
        MarkerStrategy::Nested => HitKind::Nested {
            letter: letter_at(caps, 1)?,
            roman: roman_at(caps, 2)?,
        },
        MarkerStrategy::BareRoman => HitKind::BareRoman(roman_at(caps, 1)?),
        MarkerStrategy::Standalone => {
            // 大写单词属于题干，不算进匹配文本
            body_start = caps.get(1)?.end();
            HitKind::Standalone
        }
    };

    Some(MarkerHit {
        offset: whole.start(),
        matched_text: section[whole.start()..body_start].to_string(),
        kind,
        strategy,
    })
}

fn letter_at(caps: &Captures<'_>, group: usize) -> Option<char> {
    caps.get(group)?
        .as_str()
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
}

fn roman_at(caps: &Captures<'_>, group: usize) -> Option<String> {
    let numeral = caps.get(group)?.as_str().to_ascii_lowercase();
    roman_value(&numeral)?;
    Some(numeral)
}
