//! 渲染器测试辅助：直接构造解析结果，绕过文档包

use crate::docx::converter::ConvertOptions;
use crate::docx::media::{ImageAsset, MediaMap};
use crate::docx::numbering::NumberingDefinitions;
use crate::docx::relationships::{Relationship, RelationshipKind, Relationships};
use crate::docx::render::{RenderedBody, Renderer};
use crate::docx::testing::{document_xml, numbering_xml};
use crate::docx::xml::{W_NS, XmlElement};

#[derive(Default)]
pub struct TestDocument {
    pub relationships: Relationships,
    pub numbering: NumberingDefinitions,
    assets: Vec<ImageAsset>,
    media: MediaMap,
    pub options: ConvertOptions,
}

impl TestDocument {
    pub fn with_numbering(mut self, defs: &[(u32, u32, &[&str])]) -> Self {
        let xml = numbering_xml(defs);
        self.numbering = NumberingDefinitions::parse_xml(xml.as_bytes()).unwrap();
        self
    }

    pub fn with_link(mut self, id: &str, target: &str) -> Self {
        self.relationships.insert(Relationship {
            id: id.to_string(),
            target: target.to_string(),
            kind: RelationshipKind::Hyperlink,
        });
        self
    }

    pub fn with_image(mut self, id: &str, target: &str, part_name: &str, assigned_name: &str) -> Self {
        self.relationships.insert(Relationship {
            id: id.to_string(),
            target: target.to_string(),
            kind: RelationshipKind::Image,
        });
        self.assets.push(ImageAsset {
            original_part_name: part_name.to_string(),
            assigned_name: assigned_name.to_string(),
        });
        self.media = MediaMap::from_assets(self.assets.clone());
        self
    }

    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.relationships, &self.numbering, &self.media, &self.options)
    }

    /// 渲染一段正文XML
    pub fn render_body(&self, body: &str) -> RenderedBody {
        let root = XmlElement::parse(document_xml(body).as_bytes()).unwrap();
        let body = root.child(W_NS, "body").unwrap();
        self.renderer().render_body(body)
    }
}
