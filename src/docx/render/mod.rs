//! 文档渲染模块
//!
//! 按文档顺序遍历正文的直接子元素，把段落、列表、表格和图片渲染为HTML片段。
//! 渲染是对不可变元素树的递归下降，列表栈作为显式参数传入：
//! 正文与每个表格单元格各自持有独立的列表栈。

pub mod html;
pub mod list;

mod drawing;
mod inline;
mod table;
#[cfg(test)]
pub(crate) mod testing;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::docx::converter::ConvertOptions;
use crate::docx::media::MediaMap;
use crate::docx::numbering::NumberingDefinitions;
use crate::docx::relationships::Relationships;
use crate::docx::xml::{W_NS, XmlElement};
use html::Segment;
use list::ListStack;

pub use drawing::emu_to_px;

static HEADING_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Heading([0-9])").unwrap());

/// 段落的编号引用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingRef {
    pub num_id: u32,
    pub level: u32,
}

/// 段落属性（pPr）中渲染关心的部分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphProperties {
    pub style: Option<String>,
    pub numbering: Option<NumberingRef>,
}

impl ParagraphProperties {
    /// 读取 `w:pPr` 中的样式名与编号属性
    ///
    /// 没有 `w:numId`（或其值非数字）的段落不是列表项；`w:ilvl` 缺失时为0层。
    pub fn parse(paragraph: &XmlElement) -> Self {
        let Some(ppr) = paragraph.child(W_NS, "pPr") else {
            return Self::default();
        };
        let value_of = |parent: &XmlElement, name: &str| {
            parent
                .child(W_NS, name)
                .and_then(|e| e.attribute_ns(W_NS, "val"))
                .map(str::to_string)
        };

        let numbering = ppr.child(W_NS, "numPr").and_then(|num_pr| {
            let num_id = value_of(num_pr, "numId")?.trim().parse().ok()?;
            let level = value_of(num_pr, "ilvl")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            Some(NumberingRef { num_id, level })
        });

        Self {
            style: value_of(ppr, "pStyle"),
            numbering,
        }
    }

    /// 根据样式名判断标题层级：`HeadingN`（限制在1-6）、`Title` 为1、`Subtitle` 为2
    pub fn heading_level(&self) -> Option<u32> {
        let style = self.style.as_deref()?;
        match style {
            "Title" => Some(1),
            "Subtitle" => Some(2),
            _ => HEADING_STYLE
                .captures(style)
                .and_then(|caps| caps[1].parse::<u32>().ok())
                .map(|level| level.clamp(1, 6)),
        }
    }
}

/// 单个段落的渲染结果
#[derive(Debug, Clone, Default)]
pub struct ParagraphOutput {
    pub fragments: Vec<String>,
    /// 标题类段落的纯文本，作为文档标题候选
    pub heading: Option<String>,
}

/// 正文渲染过程中的可变状态
#[derive(Debug, Default)]
pub struct RenderState {
    lists: ListStack,
    fragments: Vec<String>,
    title: Option<String>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 收下段落输出；标题候选先到先得
    fn absorb(&mut self, output: ParagraphOutput) {
        self.fragments.extend(output.fragments);
        if self.title.is_none() {
            self.title = output.heading;
        }
    }

    fn close_lists(&mut self) {
        self.lists.close_all(&mut self.fragments);
    }

    fn finish(mut self) -> RenderedBody {
        self.close_lists();
        RenderedBody {
            html: self.fragments.concat().trim().to_string(),
            title: self.title,
        }
    }
}

/// 正文渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    /// 第一个标题类段落的文本
    pub title: Option<String>,
}

/// 文档渲染器，持有解析好的关系、编号与图片映射
pub struct Renderer<'a> {
    relationships: &'a Relationships,
    numbering: &'a NumberingDefinitions,
    media: &'a MediaMap,
    options: &'a ConvertOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(
        relationships: &'a Relationships,
        numbering: &'a NumberingDefinitions,
        media: &'a MediaMap,
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            relationships,
            numbering,
            media,
            options,
        }
    }

    /// 渲染 `w:body`
    ///
    /// 段落与表格之外的子元素（如 `w:sectPr`、`w:sdt`）不输出内容，但会结束正在进行的列表。
    pub fn render_body(&self, body: &XmlElement) -> RenderedBody {
        let mut state = RenderState::new();

        for child in body.elements() {
            if child.is(W_NS, "p") {
                let output = self.render_paragraph(child, &mut state.lists);
                state.absorb(output);
            } else if child.is(W_NS, "tbl") {
                state.close_lists();
                let table = self.render_table(child);
                state.fragments.push(table);
            } else {
                state.close_lists();
            }
        }

        state.finish()
    }

    /// 渲染单个段落
    ///
    /// 编号段落输出列表项，并按需调整 `lists`；其他段落先关闭全部列表，
    /// 再按样式输出标题、图片块或普通段落。
    pub fn render_paragraph(&self, paragraph: &XmlElement, lists: &mut ListStack) -> ParagraphOutput {
        let properties = ParagraphProperties::parse(paragraph);
        let rendered = self.render_inline(paragraph);
        let content = rendered.trim();
        let mut output = ParagraphOutput::default();

        if let Some(NumberingRef { num_id, level }) = properties.numbering {
            lists.enter_item(num_id, level, self.numbering, &mut output.fragments);
            output.fragments.push(format!("  <li>{}</li>\n", content));
            return output;
        }

        lists.close_all(&mut output.fragments);

        if content.is_empty() {
            return output;
        }

        if let Some(level) = properties.heading_level() {
            output.fragments.push(format!("<h{0}>{1}</h{0}>\n", level, content));
            let text = html::plain_text(content);
            if !text.is_empty() {
                output.heading = Some(text);
            }
            return output;
        }

        let mut emitted = false;
        for segment in html::split_figures(content) {
            match segment {
                Segment::Figure(figure) => {
                    output.fragments.push(format!("{}\n", figure));
                    emitted = true;
                }
                Segment::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        output.fragments.push(format!("<p>{}</p>\n", text));
                        emitted = true;
                    }
                }
            }
        }
        if !emitted {
            output.fragments.push(format!("<p>{}</p>\n", content));
        }

        output
    }
}
