/// 一份待处理的试卷文本
#[derive(Debug, Clone)]
pub struct PaperSource {
    /// 文件名（不含扩展名），用作输出文件名
    pub name: String,
    pub file_path: Option<String>,
    /// PDF 提取出的原始文本
    pub text: String,
}

impl PaperSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_path: None,
            text: text.into(),
        }
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
