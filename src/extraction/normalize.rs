//! 文本规范化
//!
//! PDF 提取出的文本常带有 `\r\n`、不换行空格、BOM 等字符，
//! 题号匹配依赖行首位置和普通空白，所以在任何模式运行之前先统一处理

/// 规范化换行符与特殊空白
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    text.chars()
        .filter_map(|c| match c {
            '\r' => Some('\n'),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
            '\u{FEFF}' | '\u{200B}' => None,
            c => Some(c),
        })
        .collect()
}
