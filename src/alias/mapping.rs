//! 别名映射表
//!
//! 把每个别名的若干规范化变体映射到文档的HTML地址，供前端按名称查找说明文档。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

use crate::alias::config::{AliasConfig, DocumentAliases};
use crate::docx::error::Result;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

static BUILTIN: Lazy<AliasTable> = Lazy::new(|| AliasTable::new(AliasConfig::default_config()));

/// 生成别名的规范化变体
///
/// 变体包括：去掉首尾空白的原文、小写形式、空白替换为 `_`、空白替换为 `-`、
/// 非 `[a-z0-9]` 字符替换为 `_`。空输入没有变体。
pub fn normalize_alias(value: &str) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();
    let base = value.trim();
    if base.is_empty() {
        return variants;
    }

    let lower = base.to_lowercase();
    variants.insert(WHITESPACE.replace_all(&lower, "_").into_owned());
    variants.insert(WHITESPACE.replace_all(&lower, "-").into_owned());
    variants.insert(NON_ALNUM.replace_all(&lower, "_").into_owned());
    variants.insert(base.to_string());
    variants.insert(lower);

    variants
}

/// 按单词首字母大写、其余小写
///
/// 单词边界是任意无大小写之分的字符，因此 `EBE_2` 变为 `Ebe_2`，`中a` 变为 `中A`。
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_cased = false;

    for c in value.chars() {
        if c.is_uppercase() || c.is_lowercase() {
            if previous_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            result.push(c);
            previous_cased = false;
        }
    }

    result
}

/// 只读的别名表
#[derive(Debug, Clone)]
pub struct AliasTable {
    config: AliasConfig,
}

impl AliasTable {
    pub fn new(config: AliasConfig) -> Self {
        Self { config }
    }

    /// 内置别名表，进程内只构建一次
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    /// 文档的HTML地址，如 `/descriptions/oven.html`
    pub fn canonical_url(&self, slug: &str) -> String {
        format!("{}/{}.html", self.config.base_path.trim_end_matches('/'), slug)
    }

    /// 查询文档的别名，同一slug出现多次时后者生效
    pub fn aliases(&self, slug: &str) -> Option<&[String]> {
        self.document(slug).map(|doc| doc.aliases.as_slice())
    }

    /// 文档的默认标题
    ///
    /// 取第一个别名；没有配置别名时，把slug中的 `_` 换成空格后按单词首字母大写。
    pub fn default_title(&self, slug: &str) -> String {
        self.aliases(slug)
            .and_then(|aliases| aliases.first())
            .cloned()
            .unwrap_or_else(|| title_case(&slug.replace('_', " ")))
    }

    /// 展开完整的映射表
    ///
    /// 每个别名的全部变体，以及slug本身的几种便捷写法，都映射到文档的HTML地址；
    /// 冲突的键以后出现的文档为准。
    pub fn expanded_mapping(&self) -> BTreeMap<String, String> {
        let mut mapping = BTreeMap::new();

        for doc in &self.config.documents {
            let url = self.canonical_url(&doc.slug);
            for alias in &doc.aliases {
                for variant in normalize_alias(alias) {
                    if !variant.is_empty() {
                        mapping.insert(variant, url.clone());
                    }
                }
            }

            let slug = doc.slug.as_str();
            let spaced = slug.replace('_', " ");
            let slug_variants = [
                slug.to_string(),
                slug.to_lowercase(),
                slug.replace('_', "-"),
                title_case(&spaced),
                slug.replace('_', "/"),
                spaced,
            ];
            for variant in slug_variants {
                mapping.insert(variant, url.clone());
            }
        }

        mapping
    }

    /// 映射表的JSON文本：两空格缩进，键有序，末尾带换行
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.expanded_mapping())?;
        json.push('\n');
        Ok(json)
    }

    fn document(&self, slug: &str) -> Option<&DocumentAliases> {
        self.config.documents.iter().rev().find(|doc| doc.slug == slug)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new(AliasConfig::default_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table(yaml: &str) -> AliasTable {
        AliasTable::new(AliasConfig::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn test_normalize_alias() {
        assert_eq!(
            normalize_alias("  Fume Hood (Wet Bench) "),
            set(&[
                "Fume Hood (Wet Bench)",
                "fume hood (wet bench)",
                "fume_hood_(wet_bench)",
                "fume-hood-(wet-bench)",
                "fume_hood_wet_bench_",
            ])
        );
        assert_eq!(normalize_alias("oven"), set(&["oven"]));
        assert!(normalize_alias("").is_empty());
        assert!(normalize_alias("   ").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hot plate"), "Hot Plate");
        assert_eq!(title_case("EBE control"), "Ebe Control");
        assert_eq!(title_case("EBE_2"), "Ebe_2");
        assert_eq!(title_case("3d printer"), "3D Printer");
        assert_eq!(title_case("中a"), "中A");
        assert_eq!(title_case("烤箱oven"), "烤箱Oven");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_default_title() {
        let aliases = AliasTable::builtin();
        assert_eq!(aliases.default_title("hot_plate"), "Hot Plate");
        assert_eq!(aliases.default_title("SEM"), "Scanning Electron Microscope");
        assert_eq!(aliases.default_title("laser_cutter"), "Laser Cutter");
        assert_eq!(aliases.default_title("XRD_room"), "Xrd Room");
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(AliasTable::builtin(), AliasTable::builtin()));
    }

    #[test]
    fn test_builtin_mapping_entries() {
        let mapping = AliasTable::builtin().expanded_mapping();
        let hood = "/descriptions/fume_hood.html";

        assert_eq!(mapping.get("Fume Hood").map(String::as_str), Some(hood));
        assert_eq!(mapping.get("fume-hood").map(String::as_str), Some(hood));
        assert_eq!(mapping.get("fume/hood").map(String::as_str), Some(hood));
        assert_eq!(mapping.get("fume_hood_wet_bench_").map(String::as_str), Some(hood));

        let ebe = "/descriptions/EBE_control.html";
        assert_eq!(mapping.get("EBE_control").map(String::as_str), Some(ebe));
        assert_eq!(mapping.get("Ebe Control").map(String::as_str), Some(ebe));
        assert_eq!(mapping.get("EBE/control").map(String::as_str), Some(ebe));
        assert_eq!(
            mapping.get("electron_beam_evaporator_control").map(String::as_str),
            Some(ebe)
        );
        assert_eq!(mapping.get("furnace").map(String::as_str), Some("/descriptions/oven.html"));
    }

    #[test]
    fn test_every_slug_is_mapped_to_own_page() {
        let aliases = AliasTable::builtin();
        let mapping = aliases.expanded_mapping();
        for doc in &aliases.config().documents {
            assert_eq!(mapping.get(&doc.slug), Some(&aliases.canonical_url(&doc.slug)));
        }
    }

    #[test]
    fn test_later_documents_overwrite() {
        let aliases = table(concat!(
            "documents:\n",
            "  - slug: first\n    aliases: [Shared Name]\n",
            "  - slug: second\n    aliases: [shared name]\n",
        ));
        let mapping = aliases.expanded_mapping();
        assert_eq!(mapping.get("Shared Name").map(String::as_str), Some("/descriptions/first.html"));
        assert_eq!(mapping.get("shared name").map(String::as_str), Some("/descriptions/second.html"));
        assert_eq!(mapping.get("shared_name").map(String::as_str), Some("/descriptions/second.html"));
    }

    #[test]
    fn test_custom_base_path() {
        let aliases = table("base_path: /docs/\ndocuments:\n  - slug: oven\n");
        assert_eq!(aliases.canonical_url("oven"), "/docs/oven.html");
        assert_eq!(aliases.default_title("oven"), "Oven");
        assert!(aliases.aliases("oven").unwrap().is_empty());
    }

    #[test]
    fn test_to_json_format() {
        let aliases = table("documents:\n  - slug: b_c\n  - slug: a\n");
        let json = aliases.to_json().unwrap();

        assert!(json.ends_with("}\n"));
        assert!(json.starts_with("{\n  \"A\": \"/descriptions/a.html\",\n"));
        let keys: Vec<String> = serde_json::from_str::<BTreeMap<String, String>>(&json)
            .unwrap()
            .into_keys()
            .collect();
        assert_eq!(keys, vec!["A", "B C", "a", "b c", "b-c", "b/c", "b_c"]);
    }
}
