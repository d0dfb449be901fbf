/// 题号定位策略
///
/// 扫描顺序即声明顺序；`Standalone` 是兜底策略，前面的策略没有命中任何字母题号时才会扫描
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStrategy {
    /// `N (a)`：行首题号 + 空白 + 字母
    Lettered,
    /// `(b)`：行首单独的字母，续接当前任务
    BareLetter,
    /// `N(a)`：题号与括号之间没有空白
    CompactLettered,
    /// `N (a)(i)`：字母 + 罗马数字的双层小题
    Nested,
    /// `(ii)`：行首单独的罗马数字，续接最近的字母小题
    BareRoman,
    /// `N Explain...`：没有字母的整题
    Standalone,
}

impl MarkerStrategy {
    /// 全部策略，按扫描顺序排列
    pub const ALL: [MarkerStrategy; 6] = [
        MarkerStrategy::Lettered,
        MarkerStrategy::BareLetter,
        MarkerStrategy::CompactLettered,
        MarkerStrategy::Nested,
        MarkerStrategy::BareRoman,
        MarkerStrategy::Standalone,
    ];

    /// 策略名称（仅用于日志）
    pub fn name(self) -> &'static str {
        match self {
            MarkerStrategy::Lettered => "lettered",
            MarkerStrategy::BareLetter => "bare-letter",
            MarkerStrategy::CompactLettered => "compact-lettered",
            MarkerStrategy::Nested => "nested",
            MarkerStrategy::BareRoman => "bare-roman",
            MarkerStrategy::Standalone => "standalone",
        }
    }

    /// 是否为兜底策略
    pub fn is_fallback(self) -> bool {
        matches!(self, MarkerStrategy::Standalone)
    }
}

/// 定位器的原始命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    Letter(char),
    Nested { letter: char, roman: String },
    BareLetter(char),
    BareRoman(String),
    Standalone,
}

impl HitKind {
    /// 层级深度：整题 0，字母 1，罗马数字 2
    pub fn depth(&self) -> u8 {
        match self {
            HitKind::Standalone => 0,
            HitKind::Letter(_) | HitKind::BareLetter(_) => 1,
            HitKind::Nested { .. } | HitKind::BareRoman(_) => 2,
        }
    }
}

/// 尚未解析层级的题号命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHit {
    /// 在任务段落内的字节偏移
    pub offset: usize,
    pub matched_text: String,
    pub kind: HitKind,
    pub strategy: MarkerStrategy,
}

/// 已解析的题号标记
///
/// 创建后不再修改；`candidate_id` 在同一任务内唯一
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub offset: usize,
    pub matched_text: String,
    pub candidate_id: String,
    pub origin: MarkerStrategy,
    pub is_nested: bool,
    pub parent_letter: Option<char>,
}

impl Marker {
    /// 题干起始位置（紧跟在匹配文本之后）
    pub fn body_start(&self) -> usize {
        self.offset + self.matched_text.len()
    }

    pub fn depth(&self) -> u8 {
        if self.is_nested {
            2
        } else if self.candidate_id.contains('(') {
            1
        } else {
            0
        }
    }
}
