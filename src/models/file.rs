use std::fmt;

/// 允许上传的媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MediaType {
    /// 纯文本
    PlainText,
    /// PDF
    Pdf,
    /// 旧版 Word (.doc)
    LegacyWord,
    /// Word-XML (.docx)
    WordXml,
}

impl MediaType {
    /// 允许列表
    pub const ALLOWED: [MediaType; 4] = [
        MediaType::PlainText,
        MediaType::Pdf,
        MediaType::LegacyWord,
        MediaType::WordXml,
    ];

    /// 获取 MIME 字符串
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::PlainText => "text/plain",
            MediaType::Pdf => "application/pdf",
            MediaType::LegacyWord => "application/msword",
            MediaType::WordXml => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// 获取简短名称
    pub fn name(self) -> &'static str {
        match self {
            MediaType::PlainText => "TXT",
            MediaType::Pdf => "PDF",
            MediaType::LegacyWord => "DOC",
            MediaType::WordXml => "DOCX",
        }
    }

    /// 从 MIME 字符串解析（精确匹配）
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALLOWED.into_iter().find(|t| t.mime() == mime)
    }

    /// 从文件扩展名推断声明类型，与浏览器填充 `File.type` 的方式一致
    pub fn mime_for_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => MediaType::PlainText.mime(),
            "pdf" => MediaType::Pdf.mime(),
            "doc" => MediaType::LegacyWord.mime(),
            "docx" => MediaType::WordXml.mime(),
            _ => "",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 用户选择的文件
///
/// `declared_type` 保留原始声明值，校验由 Uploader 完成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// 解析声明类型，不在允许列表中时返回 None
    pub fn media_type(&self) -> Option<MediaType> {
        MediaType::from_mime(&self.declared_type)
    }

    /// 文件大小（字节）
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
