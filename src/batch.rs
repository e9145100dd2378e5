//! 批量转换
//!
//! 遍历外层zip中的全部docx文档，逐个转换为HTML文件，最后写出别名映射表。

use log::{info, warn};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::alias::AliasTable;
use crate::docx::converter::{ConvertOptions, convert_document};
use crate::docx::error::{DocxError, Result};
use crate::docx::media::DirectorySink;

/// 单个文档失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 遇到第一个失败的文档即终止
    #[default]
    Abort,
    /// 记录失败并继续处理其余文档
    Skip,
}

/// 批量转换选项
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// 外层zip路径
    pub bundle: PathBuf,
    /// HTML输出目录
    pub output_dir: PathBuf,
    /// 图片子目录名（位于输出目录下）
    pub image_subdir: String,
    /// 映射表JSON路径
    pub mapping_path: PathBuf,
    /// 转换前清理旧的输出
    pub clean: bool,
    pub failure_policy: FailurePolicy,
    pub convert: ConvertOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            bundle: PathBuf::from("refs.zip"),
            output_dir: PathBuf::from("public/descriptions"),
            image_subdir: "images".to_string(),
            mapping_path: PathBuf::from("public/descriptions/mapping.json"),
            clean: false,
            failure_policy: FailurePolicy::Abort,
            convert: ConvertOptions::default(),
        }
    }
}

impl BatchOptions {
    /// 图片输出目录
    pub fn image_dir(&self) -> PathBuf {
        self.output_dir.join(&self.image_subdir)
    }
}

/// 转换失败的文档
#[derive(Debug)]
pub struct DocumentFailure {
    /// 外层zip中的条目名
    pub entry: String,
    pub slug: String,
    pub error: DocxError,
}

/// 批量转换结果
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 已转换文档：slug -> 标题
    pub converted: BTreeMap<String, String>,
    /// 在 `FailurePolicy::Skip` 下被跳过的文档
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 判断外层zip条目是否是需要转换的docx文档
///
/// macOS归档产生的 `__MACOSX/` 条目和Office锁文件 `~$...` 不参与转换。
pub fn is_document_entry(name: &str) -> bool {
    if name.ends_with('/') || !name.to_lowercase().ends_with(".docx") {
        return false;
    }
    if name.starts_with("__MACOSX/") || name.contains("/__MACOSX/") {
        return false;
    }
    !file_name(name).starts_with("~$")
}

/// 条目名对应的文档标识：最后一段路径去掉扩展名
pub fn slug_for_entry(name: &str) -> String {
    let file_name = file_name(name);
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => file_name[..pos].to_string(),
        _ => file_name.to_string(),
    }
}

fn file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// 批量转换外层zip中的全部文档
///
/// # 参数
/// * `options` - 批量转换选项
/// * `aliases` - 别名表，用于默认标题与映射表
///
/// # 返回值
/// * `Result<BatchReport, DocxError>` - 转换结果；输出目录的IO错误总是终止批处理
pub fn convert_bundle(options: &BatchOptions, aliases: &AliasTable) -> Result<BatchReport> {
    if !options.bundle.exists() {
        return Err(DocxError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("找不到文档包: {}", options.bundle.display()),
        )));
    }

    let image_dir = options.image_dir();
    fs::create_dir_all(&options.output_dir)?;
    fs::create_dir_all(&image_dir)?;

    if options.clean {
        clean_outputs(&options.output_dir, &image_dir)?;
    }

    let mut sink = DirectorySink::new(&image_dir)?;
    let mut archive = ZipArchive::new(File::open(&options.bundle)?)?;
    let mut report = BatchReport::default();

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?.name().to_string();
        if !is_document_entry(&entry) {
            continue;
        }
        let slug = slug_for_entry(&entry);
        info!("正在转换 {}", entry);

        let converted = read_entry(&mut archive, index).and_then(|data| {
            convert_document(&slug, data, &mut sink, aliases, &options.convert)
        });

        let document = match converted {
            Ok(document) => document,
            Err(e) if options.failure_policy == FailurePolicy::Skip && e.is_document_scoped() => {
                warn!("跳过 {}: {}", entry, e);
                report.failures.push(DocumentFailure { entry, slug, error: e });
                continue;
            }
            Err(e) => return Err(e),
        };

        let output_file = options.output_dir.join(format!("{}.html", slug));
        fs::write(&output_file, &document.html)?;
        report.converted.insert(document.slug, document.title);
    }

    write_mapping(&options.mapping_path, aliases)?;

    info!(
        "已写出 {} 个HTML文件, 映射表位于 {}",
        report.converted.len(),
        options.mapping_path.display()
    );

    Ok(report)
}

/// 写出别名映射表，必要时创建父目录
pub fn write_mapping(path: &Path, aliases: &AliasTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, aliases.to_json()?)?;
    Ok(())
}

fn read_entry(archive: &mut ZipArchive<File>, index: usize) -> Result<Vec<u8>> {
    let mut file = archive.by_index(index)?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// 删除输出目录下的HTML文件并重建图片目录
fn clean_outputs(output_dir: &Path, image_dir: &Path) -> Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        let is_html = path.extension().is_some_and(|ext| ext == "html");
        if is_html && path.is_file() {
            fs::remove_file(&path)?;
        }
    }

    if image_dir.exists() {
        fs::remove_dir_all(image_dir)?;
    }
    fs::create_dir_all(image_dir)?;

    Ok(())
}
