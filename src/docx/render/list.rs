//! 列表栈
//!
//! 文档中的列表成员关系只体现在相邻段落的编号ID与层级上，
//! 这里把扁平的段落序列还原为嵌套的 `<ol>`/`<ul>` 结构。
//! 栈中下标 i 的帧始终对应编号层级 i。

use crate::docx::numbering::{ListKind, NumberingDefinitions};

/// OOXML允许的最大编号层级（ilvl 0-8）
pub const MAX_LEVEL: u32 = 8;

/// 列表栈中的一帧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    pub depth: usize,
}

/// 打开的列表栈
#[derive(Debug, Clone, Default)]
pub struct ListStack {
    frames: Vec<ListFrame>,
}

impl ListStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前嵌套深度
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[ListFrame] {
        &self.frames
    }

    /// 打开一层新列表
    pub fn open(&mut self, kind: ListKind, out: &mut Vec<String>) {
        out.push(format!("<{}>\n", kind.tag()));
        self.frames.push(ListFrame {
            kind,
            depth: self.frames.len(),
        });
    }

    /// 关闭多余的列表，只保留最外层的 `keep` 层
    pub fn close_to(&mut self, keep: usize, out: &mut Vec<String>) {
        while self.frames.len() > keep {
            if let Some(frame) = self.frames.pop() {
                out.push(format!("</{}>\n", frame.kind.tag()));
            }
        }
    }

    /// 关闭全部打开的列表
    pub fn close_all(&mut self, out: &mut Vec<String>) {
        self.close_to(0, out);
    }

    /// 为编号段落调整列表栈，使栈顶正好是 `level` 层且类型与该段落的编号格式一致
    ///
    /// 1. 关闭比 `level` 更深的列表；
    /// 2. 从当前深度到 `level` 逐层补齐缺失的列表，每层类型按该层的编号格式解析；
    /// 3. 已存在的 `level` 层类型与期望不同时，关闭并换成新类型。
    pub fn enter_item(
        &mut self,
        num_id: u32,
        level: u32,
        numbering: &NumberingDefinitions,
        out: &mut Vec<String>,
    ) {
        let level = level.min(MAX_LEVEL);
        let desired = numbering.list_kind(num_id, level);
        let target = level as usize + 1;

        self.close_to(target, out);

        for depth in self.depth()..target {
            self.open(numbering.list_kind(num_id, depth as u32), out);
        }

        let top_kind = self.frames.last().map(|frame| frame.kind);
        if top_kind != Some(desired) {
            self.close_to(target - 1, out);
            self.open(desired, out);
        }
    }
}
