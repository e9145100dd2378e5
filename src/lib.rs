pub mod docx;
pub mod alias;
pub mod batch;

// === 核心API重新导出 ===

/// 批量转换（主要接口）
pub use batch::{BatchOptions, BatchReport, DocumentFailure, FailurePolicy, convert_bundle};

/// 错误处理
pub use docx::{DocxError, Result};

// === 单文档转换 ===

/// 文档转换器与渲染选项
pub use docx::{ConvertOptions, ConvertedDocument, DocumentConverter, convert_document};

/// 图片输出区
pub use docx::{DirectorySink, ImageSink, MemorySink};

// === 别名表 ===

/// 别名配置与映射表
pub use alias::{AliasConfig, AliasTable, DocumentAliases};

// === 底层组件（高级用法） ===

/// 文档包与解析结果
pub use docx::{
    Package,
    Relationships,
    NumberingDefinitions,
    MediaMap,
    Renderer,
    RenderedBody,
};

// === 库信息 ===

/// DocxForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DocxForge库的描述
pub const DESCRIPTION: &str = "一个将DOCX参考文档批量转换为HTML片段与别名映射表的Rust库";

// === 便捷函数 ===

/// 快速打开DOCX文档包
///
/// 这是 `Package::open` 的便捷包装函数。
///
/// # 参数
/// * `path` - docx文件路径
///
/// # 返回值
/// * `Result<Package>` - 文档包实例
///
/// # 示例
///
/// ```rust,no_run
/// let mut package = docxforge::open("oven.docx")?;
/// println!("共 {} 个部件", package.list_files()?.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Package> {
    Package::open(path)
}
