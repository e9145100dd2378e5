pub mod error;
pub mod package;
pub mod xml;
pub mod relationships;
pub mod numbering;
pub mod media;
pub mod render;
pub mod converter;

#[cfg(test)]
pub mod testing;

// 重新导出错误处理
pub use error::{DocxError, Result};

// 重新导出文档包相关
pub use package::Package;

// 重新导出解析结果
pub use relationships::{Relationship, RelationshipKind, Relationships};
pub use numbering::{ListKind, NumberingDefinitions, NumberingLevel};

// 重新导出图片提取相关
pub use media::{
    DirectorySink,
    ImageAsset,
    ImageExtractor,
    ImageSink,
    MediaMap,
    MemorySink
};

// 重新导出渲染与转换
pub use render::{RenderedBody, Renderer, emu_to_px};
pub use converter::{
    ConvertOptions,
    ConvertedDocument,
    DocumentConverter,
    convert_document
};
