//! 关系解析模块
//!
//! 解析 `word/_rels/document.xml.rels`，按关系类型拆分为图片与超链接两张映射表。

use log::debug;
use std::collections::HashMap;

use crate::docx::error::Result;
use crate::docx::package::{Package, RELATIONSHIPS_PART};
use crate::docx::xml::XmlElement;

/// 关系类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Image,
    Hyperlink,
    Other,
}

impl RelationshipKind {
    /// 根据关系声明的Type后缀判断类型
    pub fn from_type(rel_type: &str) -> Self {
        if rel_type.ends_with("/image") {
            RelationshipKind::Image
        } else if rel_type.ends_with("/hyperlink") {
            RelationshipKind::Hyperlink
        } else {
            RelationshipKind::Other
        }
    }
}

/// 单个关系条目
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub target: String,
    pub kind: RelationshipKind,
}

/// 文档关系表，构建后不再修改
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    images: HashMap<String, String>,
    hyperlinks: HashMap<String, String>,
}

impl Relationships {
    /// 从文档包读取关系部件；部件不存在时返回空表
    pub fn from_package(package: &mut Package) -> Result<Relationships> {
        match package.read_optional_part(RELATIONSHIPS_PART)? {
            Some(content) => Self::parse_xml(&content),
            None => {
                debug!("文档包中没有 {}，使用空关系表", RELATIONSHIPS_PART);
                Ok(Relationships::default())
            }
        }
    }

    /// 解析关系部件内容
    ///
    /// # 参数
    /// * `content` - 关系部件的XML字节
    ///
    /// # 返回值
    /// * `Result<Relationships, DocxError>` - 图片与超链接映射
    pub fn parse_xml(content: &[u8]) -> Result<Relationships> {
        let root = XmlElement::parse(content)?;
        let mut relationships = Relationships::default();

        for relationship in root.elements().filter_map(Self::parse_entry) {
            relationships.insert(relationship);
        }

        Ok(relationships)
    }

    fn parse_entry(element: &XmlElement) -> Option<Relationship> {
        let id = element.attribute("Id").filter(|v| !v.is_empty())?;
        let target = element.attribute("Target").filter(|v| !v.is_empty())?;
        let kind = RelationshipKind::from_type(element.attribute("Type").unwrap_or_default());

        Some(Relationship {
            id: id.to_string(),
            target: target.to_string(),
            kind,
        })
    }

    /// 添加一个关系条目，其他类型的关系被忽略
    pub fn insert(&mut self, relationship: Relationship) {
        let Relationship { id, target, kind } = relationship;
        match kind {
            RelationshipKind::Image => {
                self.images.insert(id, target);
            }
            RelationshipKind::Hyperlink => {
                self.hyperlinks.insert(id, target);
            }
            RelationshipKind::Other => {}
        }
    }

    /// 图片关系的目标路径
    pub fn image_target(&self, id: &str) -> Option<&str> {
        self.images.get(id).map(String::as_str)
    }

    /// 超链接关系的目标地址
    pub fn hyperlink_target(&self, id: &str) -> Option<&str> {
        self.hyperlinks.get(id).map(String::as_str)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn hyperlink_count(&self) -> usize {
        self.hyperlinks.len()
    }
}
