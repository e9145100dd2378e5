//! 内嵌图片渲染

use log::debug;

use crate::docx::media::base_name;
use crate::docx::render::Renderer;
use crate::docx::render::html::escape_attribute;
use crate::docx::xml::{A_NS, R_NS, WP_NS, XmlElement};

/// 每英寸的EMU数
pub const EMU_PER_INCH: f64 = 914_400.0;
/// 每英寸的CSS像素数
pub const PX_PER_INCH: f64 = 96.0;

/// EMU换算为像素，四舍五入，至少为1
pub fn emu_to_px(emu: i64) -> u32 {
    let px = (emu as f64 * PX_PER_INCH / EMU_PER_INCH).round();
    if px < 1.0 { 1 } else { px as u32 }
}

/// 根据 `wp:extent` 计算宽高比；尺寸缺失、非数字或非正数时返回None
fn aspect_ratio(extent: &XmlElement) -> Option<String> {
    let dimension = |name: &str| {
        extent
            .attribute(name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
    };
    let width = dimension("cx")?;
    let height = dimension("cy")?;

    Some(format!("{} / {}", emu_to_px(width), emu_to_px(height)))
}

impl Renderer<'_> {
    /// 渲染 `w:drawing`，关系或图片映射无法解析时不输出
    pub(super) fn render_drawing(&self, drawing: &XmlElement) -> Option<String> {
        let embed = drawing
            .find_descendant(A_NS, "blip")
            .and_then(|blip| blip.attribute_ns(R_NS, "embed"))
            .filter(|id| !id.is_empty())?;

        let Some(target) = self.relationships.image_target(embed) else {
            debug!("图片关系 {} 无法解析，忽略该图片", embed);
            return None;
        };
        let Some(assigned_name) = self.media.assigned_name(base_name(target)) else {
            debug!("图片 {} 没有对应的提取文件，忽略该图片", target);
            return None;
        };

        let mut style = vec![
            "display: block".to_string(),
            "width: 100%".to_string(),
            "height: auto".to_string(),
        ];
        if let Some(ratio) = drawing.find_descendant(WP_NS, "extent").and_then(aspect_ratio) {
            style.push(format!("aspect-ratio: {}", ratio));
        }

        let alt = drawing
            .find_descendant(WP_NS, "docPr")
            .and_then(|doc_pr| doc_pr.attribute("descr"))
            .unwrap_or_default();

        Some(format!(
            concat!(
                "<figure class=\"{block}__media\">",
                "<img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\" decoding=\"async\" style=\"{style}\" />",
                "</figure>"
            ),
            block = self.options.css_block,
            src = escape_attribute(&format!("{}{}", self.options.image_url_prefix, assigned_name)),
            alt = escape_attribute(alt),
            style = style.join(" ; "),
        ))
    }
}
