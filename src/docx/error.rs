use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocxError>;

/// DOCX转换相关的错误类型
#[derive(Error, Debug)]
pub enum DocxError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("XML结构不完整: {0}")]
    MalformedXml(String),

    #[error("文档包中缺少部件: {0}")]
    PartNotFound(String),

    #[error("{slug}: 文档结构错误: {reason}")]
    DocumentStructure { slug: String, reason: String },

    #[error("配置文件错误: {0}")]
    ConfigError(String),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocxError {
    /// 是否只影响单个文档的转换
    ///
    /// 批处理在 `FailurePolicy::Skip` 下可以跳过这类错误继续处理其余文档；
    /// 输出目录的IO错误和配置错误会影响整个批次，不属于此类。
    pub fn is_document_scoped(&self) -> bool {
        matches!(
            self,
            DocxError::Zip(_)
                | DocxError::XmlError(_)
                | DocxError::MalformedXml(_)
                | DocxError::PartNotFound(_)
                | DocxError::DocumentStructure { .. }
        )
    }
}
