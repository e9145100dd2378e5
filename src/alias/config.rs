//! 别名配置模块
//!
//! 定义每个文档标识（slug）对应的人类可读别名，支持从YAML文件加载配置。

use crate::docx::error::{DocxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "aliases.yaml";

/// 默认的HTML访问路径前缀
pub const DEFAULT_BASE_PATH: &str = "/descriptions";

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

/// 单个文档的别名配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAliases {
    /// 文档标识，即docx文件名去掉扩展名
    pub slug: String,
    /// 别名列表，第一个别名同时作为默认标题
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DocumentAliases {
    pub fn new(slug: &str, aliases: &[&str]) -> Self {
        Self {
            slug: slug.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// 别名配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// 映射表中HTML地址的前缀
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// 按顺序排列的文档别名
    #[serde(default)]
    pub documents: Vec<DocumentAliases>,
}

impl AliasConfig {
    /// 从YAML文件加载别名配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回 `ConfigError`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| DocxError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// 从YAML文本解析别名配置
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| DocxError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件
    ///
    /// # 参数
    /// * `path` - 输出路径，通常为 `aliases.yaml`
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let default_config = Self::default_config();
        let yaml_content = serde_yml::to_string(&default_config)
            .map_err(|e| DocxError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# 文档别名配置文件\n# 定义每个文档标识对应的别名，第一个别名作为默认标题\n# base_path 为映射表中HTML地址的前缀\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| DocxError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取默认配置
    pub fn default_config() -> Self {
        let documents = vec![
            DocumentAliases::new(
                "chem_cabinet",
                &["Chemical Cabinet", "chem_cabinet", "chemical cabinet"],
            ),
            DocumentAliases::new(
                "dry_etching",
                &[
                    "Dry Etching Tool",
                    "Dry Etcher",
                    "dry_etching",
                    "dry etching",
                    "dry_etching_a",
                    "dry_etching_b",
                ],
            ),
            DocumentAliases::new(
                "EBE",
                &[
                    "Electron Beam Evaporator",
                    "Electron Beam Evaporator 2",
                    "Electron Beam Evaporator 3",
                    "EBE",
                    "EBE_a",
                    "EBE_b",
                    "EBE_2",
                    "EBE_2_a",
                    "EBE_2_b",
                    "EBE_3",
                    "EBE_3_a",
                    "EBE_3_b",
                ],
            ),
            DocumentAliases::new(
                "EBE_control",
                &["EBE_control", "EBE Control", "Electron Beam Evaporator Control"],
            ),
            DocumentAliases::new("EBL", &["Electron Beam Lithography", "EBL", "EBL_a", "EBL_b"]),
            DocumentAliases::new("EBL_control", &["Electron Beam Lithography Control", "EBL_control"]),
            DocumentAliases::new(
                "fume_hood",
                &[
                    "Fume Hood",
                    "Fume Hood (Wet Bench)",
                    "fume_hood",
                    "fume hood",
                    "fume_hood_b",
                ],
            ),
            DocumentAliases::new("gear_rack", &["Gear Rack", "gear_rack"]),
            DocumentAliases::new("gown_rack", &["Gown Rack", "gown_rack"]),
            DocumentAliases::new("hot_plate", &["Hot Plate", "hot_plate"]),
            DocumentAliases::new("mask_aligner", &["Mask Aligner", "mask_aligner"]),
            DocumentAliases::new("microscope", &["Microscope", "microscope"]),
            DocumentAliases::new("oven", &["Oven", "oven", "Furnace"]),
            DocumentAliases::new("SEM", &["Scanning Electron Microscope", "SEM", "SEM_a"]),
            DocumentAliases::new("SEM_control", &["SEM_control", "SEM Control", "SEM_control_a"]),
            DocumentAliases::new("shower", &["Shower", "shower"]),
            DocumentAliases::new("spill_control", &["Spill Control Station", "spill_control"]),
            DocumentAliases::new("spin_coater", &["Spin Coater", "spin_coater"]),
            DocumentAliases::new("ult_bath", &["Ultrasonic Bath", "ult_bath"]),
        ];

        Self {
            base_path: default_base_path(),
            documents,
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
