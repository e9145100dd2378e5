//! XML元素树模块
//!
//! 使用quick-xml把部件内容解析为不可变的、已解析命名空间的元素树，
//! 供渲染器递归下降遍历。

use crate::docx::error::{DocxError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

/// WordprocessingML主命名空间
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// 关系引用命名空间
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// DrawingML主命名空间
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML文字处理绘图命名空间
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// VML命名空间
pub const V_NS: &str = "urn:schemas-microsoft-com:vml";

/// 元素属性
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// 命名空间URI（无前缀属性为None）
    pub namespace: Option<String>,
    /// 本地名称
    pub name: String,
    /// 已反转义的属性值
    pub value: String,
}

/// 元素树节点
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// XML元素
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// 命名空间URI
    pub namespace: Option<String>,
    /// 本地名称
    pub name: String,
    /// 属性列表
    pub attributes: Vec<XmlAttribute>,
    /// 子节点（文档顺序）
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// 解析XML字节为根元素
    ///
    /// # 参数
    /// * `content` - 部件的原始字节
    ///
    /// # 返回值
    /// * `Result<XmlElement, DocxError>` - 根元素
    pub fn parse(content: &[u8]) -> Result<XmlElement> {
        let mut reader = NsReader::from_reader(content);
        reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
            let namespace = namespace_uri(resolved);

            match event {
                Event::Start(ref e) => {
                    let element = Self::open(&reader, namespace, e)?;
                    stack.push(element);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        DocxError::MalformedXml("出现多余的结束标签".to_string())
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => {
                            return Err(DocxError::MalformedXml("存在多个根元素".to_string()));
                        }
                    }
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape()?;
                        parent.push_text(&text);
                    }
                }
                Event::CData(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocxError::MalformedXml(format!(
                "元素 <{}> 未闭合",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| DocxError::MalformedXml("没有找到根元素".to_string()))
    }

    fn open(
        reader: &NsReader<&[u8]>,
        namespace: Option<String>,
        start: &BytesStart<'_>,
    ) -> Result<XmlElement> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).to_string();
        let mut attributes = Vec::new();

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| DocxError::XmlError(quick_xml::Error::InvalidAttr(e)))?;
            let key = attr.key;
            if key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let (resolved, local_name) = reader.resolve_attribute(key);
            attributes.push(XmlAttribute {
                namespace: namespace_uri(resolved),
                name: String::from_utf8_lossy(local_name.as_ref()).to_string(),
                value: attr.unescape_value()?.to_string(),
            });
        }

        Ok(XmlElement {
            namespace,
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// 检查元素的命名空间和本地名称
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// 获取无前缀属性
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// 获取带命名空间的属性
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// 遍历子元素（忽略文本节点）
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// 查找第一个匹配的直接子元素
    pub fn child(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(namespace, name))
    }

    /// 遍历所有匹配的直接子元素
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(namespace, name))
    }

    /// 按文档顺序深度优先查找第一个匹配的后代元素
    pub fn find_descendant(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        for child in self.elements() {
            if child.is(namespace, name) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(namespace, name) {
                return Some(found);
            }
        }
        None
    }

    /// 元素自身的直接文本（不含子元素内的文本）
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// 元素及其全部后代的文本
    pub fn text(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, result: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => result.push_str(text),
                XmlNode::Element(e) => e.collect_text(result),
            }
        }
    }
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).to_string()),
        _ => None,
    }
}
