//! 单文档转换
//!
//! 打开文档包，解析关系与编号定义，提取图片后渲染正文并套上固定骨架。

use log::{debug, info};

use crate::alias::AliasTable;
use crate::docx::error::{DocxError, Result};
use crate::docx::media::{ImageExtractor, ImageSink, MediaMap};
use crate::docx::numbering::NumberingDefinitions;
use crate::docx::package::{DOCUMENT_PART, Package};
use crate::docx::relationships::Relationships;
use crate::docx::render::{Renderer, html};
use crate::docx::xml::{W_NS, XmlElement, XmlNode};

/// 默认CSS块名
pub const DEFAULT_CSS_BLOCK: &str = "smile-description";
/// 默认图片URL前缀
pub const DEFAULT_IMAGE_URL_PREFIX: &str = "/descriptions/images/";

/// 渲染选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// 输出HTML使用的CSS块名
    pub css_block: String,
    /// 图片 `src` 的前缀
    pub image_url_prefix: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            css_block: DEFAULT_CSS_BLOCK.to_string(),
            image_url_prefix: DEFAULT_IMAGE_URL_PREFIX.to_string(),
        }
    }
}

/// 转换完成的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub slug: String,
    pub title: String,
    /// 完整的 `<article>` 片段
    pub html: String,
}

/// 单个文档的转换器
pub struct DocumentConverter<'a> {
    slug: String,
    body: XmlElement,
    relationships: Relationships,
    numbering: NumberingDefinitions,
    media: MediaMap,
    aliases: &'a AliasTable,
    options: &'a ConvertOptions,
}

impl<'a> DocumentConverter<'a> {
    /// 创建转换器
    ///
    /// 先读取正文并确认 `w:body` 存在，再解析关系与编号定义，最后把全部图片写入 `sink`。
    /// 结构不完整的文档不会向 `sink` 写入任何图片。
    ///
    /// # 参数
    /// * `slug` - 文档标识，即docx文件名去掉扩展名
    /// * `data` - docx文件字节
    /// * `sink` - 图片输出区
    /// * `aliases` - 别名表，用于默认标题
    /// * `options` - 渲染选项
    pub fn new(
        slug: &str,
        data: Vec<u8>,
        sink: &mut dyn ImageSink,
        aliases: &'a AliasTable,
        options: &'a ConvertOptions,
    ) -> Result<Self> {
        let mut package = Package::from_bytes(data)?;
        let body = read_body(&mut package, slug)?;
        let relationships = Relationships::from_package(&mut package)?;
        let numbering = NumberingDefinitions::from_package(&mut package)?;
        let media = ImageExtractor::extract(&mut package, slug, sink)?;

        debug!(
            "{}: {} 个图片关系, {} 个超链接, 提取 {} 张图片",
            slug,
            relationships.image_count(),
            relationships.hyperlink_count(),
            media.len()
        );

        Ok(Self {
            slug: slug.to_string(),
            body,
            relationships,
            numbering,
            media,
            aliases,
            options,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn media(&self) -> &MediaMap {
        &self.media
    }

    /// 渲染正文并生成完整的文章片段
    pub fn convert(&self) -> Result<ConvertedDocument> {
        let renderer = Renderer::new(&self.relationships, &self.numbering, &self.media, self.options);
        let rendered = renderer.render_body(&self.body);

        let title = rendered
            .title
            .unwrap_or_else(|| self.aliases.default_title(&self.slug));
        let html = html::article(&title, &rendered.html, &self.options.css_block);

        info!("{}: 转换完成, 标题 \"{}\"", self.slug, title);

        Ok(ConvertedDocument {
            slug: self.slug.clone(),
            title,
            html,
        })
    }
}

/// 读取 `word/document.xml` 并取出 `w:body`
fn read_body(package: &mut Package, slug: &str) -> Result<XmlElement> {
    let structure_error = |reason: String| DocxError::DocumentStructure {
        slug: slug.to_string(),
        reason,
    };

    let data = match package.read_part(DOCUMENT_PART) {
        Ok(data) => data,
        Err(DocxError::PartNotFound(_)) => {
            return Err(structure_error(format!("缺少 {}", DOCUMENT_PART)));
        }
        Err(e) => return Err(e),
    };

    XmlElement::parse(&data)?
        .children
        .into_iter()
        .find_map(|node| match node {
            XmlNode::Element(e) if e.is(W_NS, "body") => Some(e),
            _ => None,
        })
        .ok_or_else(|| structure_error("document.xml中没有body元素".to_string()))
}

/// 便捷函数：转换单个docx文档
pub fn convert_document(
    slug: &str,
    data: Vec<u8>,
    sink: &mut dyn ImageSink,
    aliases: &AliasTable,
    options: &ConvertOptions,
) -> Result<ConvertedDocument> {
    DocumentConverter::new(slug, data, sink, aliases, options)?.convert()
}
