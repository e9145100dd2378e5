//! 媒体提取模块
//!
//! 在渲染正文之前，把 `word/media/` 下的全部部件按确定的名称写入图片输出区。

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::docx::error::Result;
use crate::docx::package::{MEDIA_PREFIX, Package};

/// 图片输出区
pub trait ImageSink {
    /// 以指定名称保存图片字节
    fn store(&mut self, name: &str, data: &[u8]) -> Result<()>;
}

/// 写入文件系统目录的图片输出区
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// 创建输出区，目录不存在时自动创建
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSink for DirectorySink {
    fn store(&mut self, name: &str, data: &[u8]) -> Result<()> {
        fs::write(self.root.join(name), data)?;
        Ok(())
    }
}

/// 保存在内存中的图片输出区
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// 按写入顺序保存的 (名称, 字节)
    pub images: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.images
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }
}

impl ImageSink for MemorySink {
    fn store(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.images.push((name.to_string(), data.to_vec()));
        Ok(())
    }
}

/// 已提取的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// 包内原始部件名，如 `word/media/image1.png`
    pub original_part_name: String,
    /// 分配的输出文件名，如 `oven_1.png`
    pub assigned_name: String,
}

/// 原始文件名到输出文件名的映射
#[derive(Debug, Clone, Default)]
pub struct MediaMap {
    assets: Vec<ImageAsset>,
    by_base_name: HashMap<String, String>,
}

impl MediaMap {
    /// 由已提取的图片列表构建映射
    pub fn from_assets(assets: impl IntoIterator<Item = ImageAsset>) -> Self {
        let mut media = MediaMap::default();
        for asset in assets {
            media.push(asset);
        }
        media
    }

    /// 根据原始文件名（不含目录）查询输出文件名
    pub fn assigned_name(&self, base_name: &str) -> Option<&str> {
        self.by_base_name.get(base_name).map(String::as_str)
    }

    /// 按提取顺序排列的全部图片
    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn push(&mut self, asset: ImageAsset) {
        self.by_base_name
            .insert(base_name(&asset.original_part_name).to_string(), asset.assigned_name.clone());
        self.assets.push(asset);
    }
}

/// 图片提取器
pub struct ImageExtractor;

impl ImageExtractor {
    /// 提取文档包中的全部媒体部件
    ///
    /// 按归档条目顺序从1开始编号，输出名为 `<slug>_<序号><扩展名>`，
    /// 扩展名取自原部件（小写），缺失时使用 `.png`。
    ///
    /// # 参数
    /// * `package` - 文档包
    /// * `slug` - 文档标识
    /// * `sink` - 图片输出区
    ///
    /// # 返回值
    /// * `Result<MediaMap, DocxError>` - 文件名映射
    pub fn extract(package: &mut Package, slug: &str, sink: &mut dyn ImageSink) -> Result<MediaMap> {
        let media_parts: Vec<String> = package
            .list_files()?
            .into_iter()
            .filter(|name| name.starts_with(MEDIA_PREFIX) && !name.ends_with('/'))
            .collect();

        let mut media = MediaMap::default();
        for (index, part_name) in media_parts.into_iter().enumerate() {
            let assigned_name = format!("{}_{}{}", slug, index + 1, extension_of(&part_name));
            let data = package.read_part(&part_name)?;
            sink.store(&assigned_name, &data)?;
            debug!("提取图片 {} -> {}", part_name, assigned_name);

            media.push(ImageAsset {
                original_part_name: part_name,
                assigned_name,
            });
        }

        Ok(media)
    }
}

/// 路径的最后一段
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension_of(part_name: &str) -> String {
    Path::new(base_name(part_name))
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_else(|| ".png".to_string())
}
