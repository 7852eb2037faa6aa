//! 文本提取器 - 基础设施层
//!
//! 只暴露"读出单页文件的纯文本"能力，不认识日期、姓名

use crate::error::ExtractError;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::Path;

/// 文本提取能力
///
/// 同步接口，调用方负责放到阻塞线程池中执行
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// 使用 lopdf 提取 PDF 文本
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let doc = lopdf::Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(ExtractError::Pdf("文档没有页面".to_string()));
        }

        let mut text = String::new();
        for page_num in pages.keys() {
            let page_text = doc
                .extract_text(&[*page_num])
                .map_err(|e| ExtractError::Pdf(e.to_string()))?;
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(text)
    }
}

/// 从 DOCX 的 `word/document.xml` 中提取文本
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let file = std::fs::File::open(path)?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| ExtractError::Docx(e.to_string()))?;

        let mut document_xml = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::Docx(format!("找不到 document.xml: {}", e)))?;

        let mut xml = String::new();
        document_xml.read_to_string(&mut xml)?;

        parse_document_xml(&xml)
    }
}

fn parse_document_xml(xml: &str) -> Result<String, ExtractError> {
    // 不裁剪空白：`<w:t>` 里实体两侧的空格属于正文
    let mut reader = Reader::from_str(xml);

    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let decoded = e.decode().map_err(|e| ExtractError::Docx(e.to_string()))?;
                text.push_str(&decoded);
            }
            // `&amp;`、`&#x5E74;` 等引用是独立事件
            Ok(Event::GeneralRef(e)) if in_text => {
                match e.resolve_char_ref() {
                    Ok(Some(ch)) => text.push(ch),
                    Ok(None) => {
                        let name = e.decode().map_err(|e| ExtractError::Docx(e.to_string()))?;
                        let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                            ExtractError::Docx(format!("未知的实体引用: &{};", name))
                        })?;
                        text.push_str(resolved);
                    }
                    Err(e) => return Err(ExtractError::Docx(format!("字符引用无效: {}", e))),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(format!("XML解析失败: {}", e))),
            _ => {}
        }
    }

    Ok(text)
}

/// 按 UTF-8 读取整个文件
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// 按扩展名选择提取器
pub struct ExtractorRegistry {
    pdf: PdfTextExtractor,
    docx: DocxTextExtractor,
    plain: PlainTextExtractor,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            pdf: PdfTextExtractor,
            docx: DocxTextExtractor,
            plain: PlainTextExtractor,
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for ExtractorRegistry {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => self.pdf.extract(path),
            "docx" => self.docx.extract(path),
            "txt" => self.plain.extract(path),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}
