use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::docx::error::{DocxError, Result};

/// 正文部件路径
pub const DOCUMENT_PART: &str = "word/document.xml";
/// 编号定义部件路径
pub const NUMBERING_PART: &str = "word/numbering.xml";
/// 正文关系部件路径
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
/// 媒体部件所在目录前缀
pub const MEDIA_PREFIX: &str = "word/media/";

/// 表示一个DOCX文档包（内存中的zip归档）
pub struct Package {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    /// 从内存中的字节创建Package实例
    ///
    /// # 参数
    /// * `data` - docx文件的完整字节
    ///
    /// # 返回值
    /// * `Result<Package, DocxError>` - 成功返回Package实例，失败返回错误
    pub fn from_bytes(data: Vec<u8>) -> Result<Package> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Package { archive })
    }

    /// 从文件路径创建Package实例
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Package> {
        Self::from_bytes(fs::read(path)?)
    }

    /// 按归档顺序列出所有条目
    pub fn list_files(&mut self) -> Result<Vec<String>> {
        let mut files = Vec::with_capacity(self.archive.len());

        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i)?;
            files.push(file.name().to_string());
        }

        Ok(files)
    }

    /// 检查包中是否存在指定部件
    pub fn has_part(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// 读取必需部件的二进制内容
    ///
    /// # 参数
    /// * `name` - 部件名称
    ///
    /// # 返回值
    /// * `Result<Vec<u8>, DocxError>` - 部件不存在时返回 `PartNotFound`
    pub fn read_part(&mut self, name: &str) -> Result<Vec<u8>> {
        self.read_optional_part(name)?
            .ok_or_else(|| DocxError::PartNotFound(name.to_string()))
    }

    /// 读取可选部件的二进制内容
    ///
    /// 部件不存在不视为错误，返回 `Ok(None)`。
    pub fn read_optional_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.archive.by_name(name) {
            Ok(mut file) => {
                let mut buffer = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut buffer)?;
                Ok(Some(buffer))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
