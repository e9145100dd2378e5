//! 行内内容渲染：run、超链接与文字格式

use crate::docx::render::Renderer;
use crate::docx::render::html::{escape_attribute, escape_text};
use crate::docx::xml::{R_NS, V_NS, W_NS, XmlElement};

/// 段落内不产生输出的元素
const SKIPPED_INLINE: &[&str] = &[
    "pPr",
    "bookmarkStart",
    "bookmarkEnd",
    "proofErr",
    "del",
    "moveFrom",
    "commentRangeStart",
    "commentRangeEnd",
];

/// run内不产生输出的元素
const SKIPPED_RUN_CHILDREN: &[&str] = &["rPr", "fldChar", "instrText", "delText"];

/// 超链接无法解析时的目标
const PLACEHOLDER_HREF: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalAlign {
    Superscript,
    Subscript,
}

/// run的文字格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    vertical: Option<VerticalAlign>,
}

impl RunFormat {
    fn from_properties(properties: Option<&XmlElement>) -> Self {
        let Some(rpr) = properties else {
            return Self::default();
        };

        let vertical = rpr
            .child(W_NS, "vertAlign")
            .and_then(|e| e.attribute_ns(W_NS, "val"))
            .and_then(|val| match val {
                "superscript" => Some(VerticalAlign::Superscript),
                "subscript" => Some(VerticalAlign::Subscript),
                _ => None,
            });

        Self {
            bold: rpr.child(W_NS, "b").is_some_and(toggle_on),
            italic: rpr.child(W_NS, "i").is_some_and(toggle_on),
            underline: rpr
                .child(W_NS, "u")
                .is_some_and(|u| toggle_on(u) && u.attribute_ns(W_NS, "val") != Some("none")),
            vertical,
        }
    }

    /// 按固定顺序包裹：粗体在最内层，其后斜体、下划线、上下标
    fn apply(&self, mut content: String) -> String {
        if self.bold {
            content = format!("<strong>{}</strong>", content);
        }
        if self.italic {
            content = format!("<em>{}</em>", content);
        }
        if self.underline {
            content = format!("<span style=\"text-decoration: underline;\">{}</span>", content);
        }
        match self.vertical {
            Some(VerticalAlign::Superscript) => format!("<sup>{}</sup>", content),
            Some(VerticalAlign::Subscript) => format!("<sub>{}</sub>", content),
            None => content,
        }
    }
}

/// 开关型属性：`w:val` 为 0/false/off 时视为关闭
fn toggle_on(element: &XmlElement) -> bool {
    !matches!(element.attribute_ns(W_NS, "val"), Some("0" | "false" | "off"))
}

fn is_word(element: &XmlElement, names: &[&str]) -> bool {
    element.namespace.as_deref() == Some(W_NS) && names.contains(&element.name.as_str())
}

impl Renderer<'_> {
    /// 按顺序拼接段落（或超链接等容器）内的run与超链接
    ///
    /// 未识别的容器元素（如 `w:ins`、`w:smartTag`）递归展开其内容。
    pub(crate) fn render_inline(&self, container: &XmlElement) -> String {
        let mut pieces = String::new();

        for child in container.elements() {
            if child.is(W_NS, "r") {
                pieces.push_str(&self.render_run(child));
            } else if child.is(W_NS, "hyperlink") {
                pieces.push_str(&self.render_hyperlink(child));
            } else if is_word(child, SKIPPED_INLINE) {
                continue;
            } else {
                pieces.push_str(&self.render_inline(child));
            }
        }

        pieces
    }

    fn render_run(&self, run: &XmlElement) -> String {
        let mut content = String::new();

        for child in run.elements() {
            if child.is(W_NS, "t") {
                content.push_str(&escape_text(&child.direct_text()));
            } else if child.is(W_NS, "tab") {
                content.push_str("&emsp;");
            } else if child.is(W_NS, "br") || child.is(W_NS, "cr") {
                content.push_str("<br />");
            } else if child.is(W_NS, "drawing") {
                if let Some(figure) = self.render_drawing(child) {
                    content.push_str(&figure);
                }
            } else if child.is(V_NS, "shape") || is_word(child, SKIPPED_RUN_CHILDREN) {
                continue;
            } else {
                content.push_str(&escape_text(&child.direct_text()));
            }
        }

        if content.is_empty() {
            return content;
        }

        RunFormat::from_properties(run.child(W_NS, "rPr")).apply(content)
    }

    fn render_hyperlink(&self, link: &XmlElement) -> String {
        let rel_id = link
            .attribute_ns(R_NS, "id")
            .or_else(|| link.attribute("id"))
            .filter(|id| !id.is_empty());

        let href = match rel_id {
            Some(id) => self
                .relationships
                .hyperlink_target(id)
                .unwrap_or(PLACEHOLDER_HREF)
                .to_string(),
            None => link
                .attribute_ns(W_NS, "anchor")
                .filter(|anchor| !anchor.is_empty())
                .map(|anchor| format!("#{}", anchor))
                .unwrap_or_else(|| PLACEHOLDER_HREF.to_string()),
        };

        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_attribute(&href),
            self.render_inline(link)
        )
    }
}
