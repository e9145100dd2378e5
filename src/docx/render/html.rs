//! HTML输出辅助函数

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::borrow::Cow;

static FIGURE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<figure.*?</figure>").unwrap());

/// 转义文本内容，引号同样转义
pub fn escape_text(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// 转义属性值
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

/// 提取HTML片段的纯文本（去掉标签并解码实体）
pub fn plain_text(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    document.root_element().text().collect::<String>().trim().to_string()
}

/// 段落内容按图片块切分后的片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Figure(&'a str),
    Text(&'a str),
}

/// 把段落内容切分为图片块和文本片段，空片段被丢弃
pub fn split_figures(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for found in FIGURE_PATTERN.find_iter(content) {
        if found.start() > last {
            segments.push(Segment::Text(&content[last..found.start()]));
        }
        segments.push(Segment::Figure(found.as_str()));
        last = found.end();
    }
    if last < content.len() {
        segments.push(Segment::Text(&content[last..]));
    }

    segments
}

/// 用固定骨架包裹正文
///
/// # 参数
/// * `title` - 文档标题（未转义）
/// * `body` - 已渲染的正文HTML
/// * `block` - CSS块名，如 `smile-description`
pub fn article(title: &str, body: &str, block: &str) -> String {
    format!(
        concat!(
            "<article class=\"{block}\">\n",
            "  <header class=\"{block}__header\">\n",
            "    <h1>{title}</h1>\n",
            "  </header>\n",
            "  <div class=\"{block}__content\">\n",
            "{body}\n",
            "  </div>\n",
            "</article>\n"
        ),
        block = block,
        title = escape_text(title),
        body = body
    )
}
