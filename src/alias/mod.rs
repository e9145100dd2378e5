pub mod config;
pub mod mapping;

// 重新导出别名配置
pub use config::{AliasConfig, DocumentAliases};

// 重新导出映射表
pub use mapping::{AliasTable, normalize_alias, title_case};
