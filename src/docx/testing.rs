//! 测试辅助工具：在内存中构造docx文档包

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::FileOptions;

pub const W_DECL: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml""#,
);

const IMAGE_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const HYPERLINK_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// 按给定顺序写入条目，返回zip字节
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, FileOptions::<()>::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// 用命名空间声明包裹正文内容，生成document.xml
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {}><w:body>{}</w:body></w:document>"#,
        W_DECL, body
    )
}

/// 生成numbering.xml，`defs` 为 (numId, abstractNumId, 各层级格式)
pub fn numbering_xml(defs: &[(u32, u32, &[&str])]) -> String {
    let mut abstracts = String::new();
    let mut nums = String::new();
    for (num_id, abstract_id, formats) in defs {
        abstracts.push_str(&format!(r#"<w:abstractNum w:abstractNumId="{}">"#, abstract_id));
        for (level, format) in formats.iter().enumerate() {
            abstracts.push_str(&format!(
                r#"<w:lvl w:ilvl="{}"><w:numFmt w:val="{}"/><w:lvlText w:val="%{}."/></w:lvl>"#,
                level,
                format,
                level + 1
            ));
        }
        abstracts.push_str("</w:abstractNum>");
        nums.push_str(&format!(
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
            num_id, abstract_id
        ));
    }
    format!(r#"<w:numbering {}>{}{}</w:numbering>"#, W_DECL, abstracts, nums)
}

/// 生成关系部件，`images`/`links` 为 (Id, Target)
pub fn relationships_xml(images: &[(&str, &str)], links: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, target) in images {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, IMAGE_TYPE, target
        ));
    }
    for (id, target) in links {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}" TargetMode="External"/>"#,
            id, HYPERLINK_TYPE, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// 段落：可选样式、可选编号 (numId, ilvl)，内部为原始run XML
pub fn paragraph(style: Option<&str>, numbering: Option<(u32, u32)>, runs: &str) -> String {
    let mut ppr = String::new();
    if let Some(style) = style {
        ppr.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style));
    }
    if let Some((num_id, level)) = numbering {
        ppr.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            level, num_id
        ));
    }
    if ppr.is_empty() {
        format!("<w:p>{}</w:p>", runs)
    } else {
        format!("<w:p><w:pPr>{}</w:pPr>{}</w:p>", ppr, runs)
    }
}

/// 纯文本run
pub fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text)
}

/// 内嵌图片绘图run
pub fn drawing_run(embed: &str, cx: &str, cy: &str, descr: &str) -> String {
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline><wp:extent cx="{}" cy="{}"/>"#,
            r#"<wp:docPr id="1" name="Picture 1" descr="{}"/>"#,
            r#"<a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/>"#,
            r#"</pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
        ),
        cx, cy, descr, embed
    )
}
