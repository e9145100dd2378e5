//! 表格渲染

use crate::docx::render::Renderer;
use crate::docx::render::list::ListStack;
use crate::docx::xml::{W_NS, XmlElement};

/// 空单元格的占位内容
const EMPTY_CELL: &str = "&nbsp;";

impl Renderer<'_> {
    /// 渲染 `w:tbl`，嵌套表格递归处理
    pub(super) fn render_table(&self, table: &XmlElement) -> String {
        let mut rows = String::new();

        for row in table.children_named(W_NS, "tr") {
            rows.push_str("<tr>");
            for cell in row.children_named(W_NS, "tc") {
                rows.push_str("<td>");
                rows.push_str(&self.render_cell(cell));
                rows.push_str("</td>");
            }
            rows.push_str("</tr>");
        }

        format!("<table class=\"{}__table\">{}</table>", self.options.css_block, rows)
    }

    /// 单元格使用独立的列表栈，结束前关闭其中仍打开的列表
    ///
    /// 嵌套表格不打断单元格内的列表。
    fn render_cell(&self, cell: &XmlElement) -> String {
        let mut lists = ListStack::new();
        let mut fragments = Vec::new();

        for child in cell.elements() {
            if child.is(W_NS, "p") {
                fragments.extend(self.render_paragraph(child, &mut lists).fragments);
            } else if child.is(W_NS, "tbl") {
                fragments.push(self.render_table(child));
            }
        }
        lists.close_all(&mut fragments);

        let html = fragments.concat();
        let trimmed = html.trim();
        if trimmed.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::docx::render::testing::TestDocument;
    use crate::docx::testing::{paragraph, run};

    fn table(rows: &[Vec<&str>]) -> String {
        let mut xml = String::from("<w:tbl><w:tblPr/>");
        for row in rows {
            xml.push_str("<w:tr>");
            for cell in row.iter() {
                xml.push_str(&format!("<w:tc><w:tcPr/>{}</w:tc>", cell));
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        xml
    }

    #[test]
    fn test_simple_table() {
        let doc = TestDocument::default();
        let a = paragraph(None, None, &run("A"));
        let b = paragraph(None, None, &run("B"));
        let body = doc.render_body(&table(&[vec![a.as_str(), b.as_str()]]));

        assert_eq!(
            body.html,
            "<table class=\"smile-description__table\"><tr><td><p>A</p></td><td><p>B</p></td></tr></table>"
        );
    }

    #[test]
    fn test_empty_cell_gets_placeholder() {
        let doc = TestDocument::default();
        let empty = paragraph(None, None, "");
        let blank = paragraph(None, None, &run("   "));
        let body = doc.render_body(&table(&[vec![empty.as_str(), blank.as_str(), ""]]));

        assert_eq!(body.html.matches("<td>&nbsp;</td>").count(), 3);
        assert!(!body.html.contains("<td></td>"));
    }

    #[test]
    fn test_cell_lists_are_closed_inside_cell() {
        let doc = TestDocument::default().with_numbering(&[(1, 1, ["decimal"].as_slice())]);
        let item = paragraph(None, Some((1, 0)), &run("step"));
        let outer_item = paragraph(None, Some((1, 0)), &run("outer"));
        let body = doc.render_body(&format!(
            "{}{}{}",
            outer_item,
            table(&[vec![item.as_str()]]),
            outer_item
        ));

        assert!(body.html.contains("<td><ol>\n  <li>step</li>\n</ol></td>"));
        // 表格打断了外层列表
        assert_eq!(body.html.matches("<ol>").count(), 3);
        assert_eq!(body.html.matches("</ol>").count(), 3);
    }

    #[test]
    fn test_nested_table() {
        let doc = TestDocument::default();
        let inner = table(&[vec![paragraph(None, None, &run("inner")).as_str()]]);
        let body = doc.render_body(&table(&[vec![inner.as_str()]]));

        assert!(body.html.contains(
            "<td><table class=\"smile-description__table\"><tr><td><p>inner</p></td></tr></table></td>"
        ));
    }

    #[test]
    fn test_nested_table_keeps_cell_list_open() {
        let doc = TestDocument::default().with_numbering(&[(1, 1, ["decimal"].as_slice())]);
        let one = paragraph(None, Some((1, 0)), &run("one"));
        let two = paragraph(None, Some((1, 0)), &run("two"));
        let inner = table(&[vec![paragraph(None, None, &run("inner")).as_str()]]);
        let cell = format!("{}{}{}", one, inner, two);
        let body = doc.render_body(&table(&[vec![cell.as_str()]]));

        assert_eq!(body.html.matches("<ol>").count(), 1);
        assert_eq!(body.html.matches("</ol>").count(), 1);
        assert!(body.html.contains(concat!(
            "<td><ol>\n  <li>one</li>\n",
            "<table class=\"smile-description__table\"><tr><td><p>inner</p></td></tr></table>",
            "  <li>two</li>\n</ol></td>"
        )));
    }

    #[test]
    fn test_headings_in_cells_do_not_set_title() {
        let doc = TestDocument::default();
        let heading = paragraph(Some("Heading1"), None, &run("Cell heading"));
        let body = doc.render_body(&table(&[vec![heading.as_str()]]));

        assert!(body.html.contains("<h1>Cell heading</h1>"));
        assert_eq!(body.title, None);
    }
}
