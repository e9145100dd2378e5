//! 编号定义模块
//!
//! 解析 `word/numbering.xml` 中的抽象编号定义与编号实例，
//! 提供 `(numId, ilvl) -> 层级格式` 的查询。

use log::debug;
use std::collections::HashMap;

use crate::docx::error::Result;
use crate::docx::package::{NUMBERING_PART, Package};
use crate::docx::xml::{W_NS, XmlElement};

/// 视为有序列表的编号格式
pub const ORDERED_FORMATS: &[&str] = &[
    "decimal",
    "decimalZero",
    "upperRoman",
    "lowerRoman",
    "upperLetter",
    "lowerLetter",
    "ordinal",
    "cardinalText",
];

/// 列表标签类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// 根据编号格式判断列表类型
    pub fn from_format(format: &str) -> Self {
        if ORDERED_FORMATS.contains(&format) {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }

    /// 对应的HTML标签名
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// 单个编号层级的格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingLevel {
    /// 编号格式（numFmt），缺省为 `bullet`
    pub format: String,
    /// 层级文本模板（lvlText）
    pub level_text: String,
}

impl NumberingLevel {
    pub fn list_kind(&self) -> ListKind {
        ListKind::from_format(&self.format)
    }
}

type LevelTable = HashMap<u32, NumberingLevel>;

/// 编号定义查询表
#[derive(Debug, Clone, Default)]
pub struct NumberingDefinitions {
    levels: HashMap<u32, LevelTable>,
}

impl NumberingDefinitions {
    /// 从文档包读取编号部件；部件不存在时返回空表
    pub fn from_package(package: &mut Package) -> Result<NumberingDefinitions> {
        match package.read_optional_part(NUMBERING_PART)? {
            Some(content) => Self::parse_xml(&content),
            None => {
                debug!("文档包中没有 {}，所有列表按无序列表处理", NUMBERING_PART);
                Ok(NumberingDefinitions::default())
            }
        }
    }

    /// 解析编号部件内容
    ///
    /// 先收集全部 `abstractNum`，再把每个 `num` 实例映射到其抽象定义的层级表。
    /// 引用了未知抽象定义的实例对应空层级表。
    pub fn parse_xml(content: &[u8]) -> Result<NumberingDefinitions> {
        let root = XmlElement::parse(content)?;

        let mut abstracts: HashMap<u32, LevelTable> = HashMap::new();
        for abstract_num in root.children_named(W_NS, "abstractNum") {
            let Some(abstract_id) = parse_id(abstract_num.attribute_ns(W_NS, "abstractNumId")) else {
                continue;
            };
            let levels = abstract_num
                .children_named(W_NS, "lvl")
                .filter_map(|lvl| {
                    let level = parse_id(lvl.attribute_ns(W_NS, "ilvl"))?;
                    Some((level, Self::parse_level(lvl)))
                })
                .collect();
            abstracts.insert(abstract_id, levels);
        }

        let mut levels = HashMap::new();
        for num in root.children_named(W_NS, "num") {
            let Some(num_id) = parse_id(num.attribute_ns(W_NS, "numId")) else {
                continue;
            };
            let Some(abstract_id) = parse_id(
                num.child(W_NS, "abstractNumId")
                    .and_then(|e| e.attribute_ns(W_NS, "val")),
            ) else {
                continue;
            };
            levels.insert(num_id, abstracts.get(&abstract_id).cloned().unwrap_or_default());
        }

        Ok(NumberingDefinitions { levels })
    }

    fn parse_level(lvl: &XmlElement) -> NumberingLevel {
        let value_of = |name: &str| {
            lvl.child(W_NS, name)
                .and_then(|e| e.attribute_ns(W_NS, "val"))
                .map(str::to_string)
        };

        NumberingLevel {
            format: value_of("numFmt").unwrap_or_else(|| "bullet".to_string()),
            level_text: value_of("lvlText").unwrap_or_default(),
        }
    }

    /// 查询编号实例在指定层级的格式
    ///
    /// 实例或层级未定义时返回None
    pub fn resolve(&self, num_id: u32, level: u32) -> Option<&NumberingLevel> {
        self.levels.get(&num_id).and_then(|levels| levels.get(&level))
    }

    /// 查询列表类型，无法解析时为无序列表
    pub fn list_kind(&self, num_id: u32, level: u32) -> ListKind {
        self.resolve(num_id, level)
            .map(NumberingLevel::list_kind)
            .unwrap_or(ListKind::Unordered)
    }

    /// 是否没有任何编号实例
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn parse_id(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::testing::{W_DECL, build_zip, numbering_xml};

    #[test]
    fn test_resolve_through_indirection() {
        let xml = numbering_xml(&[
            (1, 10, ["decimal", "bullet"].as_slice()),
            (2, 20, ["lowerRoman"].as_slice()),
        ]);
        let numbering = NumberingDefinitions::parse_xml(xml.as_bytes()).unwrap();

        let level = numbering.resolve(1, 0).unwrap();
        assert_eq!(level.format, "decimal");
        assert_eq!(level.level_text, "%1.");
        assert_eq!(numbering.resolve(1, 1).unwrap().format, "bullet");
        assert_eq!(numbering.resolve(2, 0).unwrap().format, "lowerRoman");

        assert_eq!(numbering.list_kind(1, 0), ListKind::Ordered);
        assert_eq!(numbering.list_kind(1, 1), ListKind::Unordered);
    }

    #[test]
    fn test_undefined_instance_or_level() {
        let xml = numbering_xml(&[(1, 10, ["decimal"].as_slice())]);
        let numbering = NumberingDefinitions::parse_xml(xml.as_bytes()).unwrap();

        assert!(numbering.resolve(1, 3).is_none());
        assert!(numbering.resolve(9, 0).is_none());
        assert_eq!(numbering.list_kind(9, 0), ListKind::Unordered);
    }

    #[test]
    fn test_defaults_and_unknown_abstract() {
        let xml = format!(
            concat!(
                r#"<w:numbering {}>"#,
                r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"/></w:abstractNum>"#,
                r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
                r#"<w:num w:numId="2"><w:abstractNumId w:val="42"/></w:num>"#,
                r#"<w:num w:numId="x"><w:abstractNumId w:val="0"/></w:num>"#,
                r#"</w:numbering>"#
            ),
            W_DECL
        );
        let numbering = NumberingDefinitions::parse_xml(xml.as_bytes()).unwrap();

        let level = numbering.resolve(1, 0).unwrap();
        assert_eq!(level.format, "bullet");
        assert_eq!(level.level_text, "");
        assert!(numbering.resolve(2, 0).is_none());
    }

    #[test]
    fn test_ordered_format_set() {
        for format in ORDERED_FORMATS {
            assert_eq!(ListKind::from_format(format), ListKind::Ordered);
        }
        assert_eq!(ListKind::from_format("bullet"), ListKind::Unordered);
        assert_eq!(ListKind::from_format("none"), ListKind::Unordered);
        assert_eq!(ListKind::Ordered.tag(), "ol");
        assert_eq!(ListKind::Unordered.tag(), "ul");
    }

    #[test]
    fn test_missing_part_resolves_nothing() {
        let data = build_zip(&[("word/document.xml", b"<doc/>".as_slice())]);
        let mut package = Package::from_bytes(data).unwrap();

        let numbering = NumberingDefinitions::from_package(&mut package).unwrap();
        assert!(numbering.is_empty());
        assert!(numbering.resolve(1, 0).is_none());
    }
}
