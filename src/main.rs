use clap::Parser;
use docxforge::alias::config::DEFAULT_CONFIG_PATH;
use docxforge::{AliasConfig, AliasTable, BatchOptions, ConvertOptions, DocxError, FailurePolicy, Result};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// 📄 DocxForge - DOCX参考文档转换工具
#[derive(Parser)]
#[command(name = "docxforge")]
#[command(about = "把zip包中的DOCX参考文档转换为HTML片段与别名映射表")]
#[command(version)]
struct Args {
    /// 包含DOCX文档的zip包
    #[arg(long = "zip", default_value = "refs.zip", help = "包含DOCX文档的zip包路径")]
    zip_path: PathBuf,

    /// HTML输出目录
    #[arg(long = "output", default_value = "public/descriptions", help = "HTML文件的输出目录")]
    output_dir: PathBuf,

    /// 图片子目录
    #[arg(long, default_value = "images", help = "输出目录下存放提取图片的子目录")]
    images_subdir: String,

    /// 映射表路径
    #[arg(long = "mapping", default_value = "public/descriptions/mapping.json", help = "别名映射表JSON文件路径")]
    mapping_path: PathBuf,

    /// 清理旧输出
    #[arg(long, help = "转换前删除已生成的HTML文件和图片")]
    clean: bool,

    /// 日志级别
    #[arg(long, default_value = "info", help = "日志级别（error、warn、info、debug、trace）")]
    log_level: String,

    /// 别名配置文件
    #[arg(long, help = "从YAML文件加载别名配置，未指定时使用内置别名表")]
    aliases: Option<PathBuf>,

    /// 生成默认别名配置
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = DEFAULT_CONFIG_PATH,
        help = "把内置别名表写入指定的YAML文件后退出，省略路径时写入 aliases.yaml"
    )]
    write_default_aliases: Option<PathBuf>,

    /// 跳过失败的文档
    #[arg(long, help = "某个文档转换失败时记录错误并继续处理其余文档")]
    keep_going: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logger(&args.log_level) {
        eprintln!("❌ 错误: {}", e);
        return ExitCode::FAILURE;
    }

    println!("📄 DocxForge - DOCX转换工具");

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(level: &str) -> Result<()> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| DocxError::ConfigError(format!("无效的日志级别: {}", level)))?;

    env_logger::builder()
        .filter_level(filter)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init()
        .map_err(|e| DocxError::ConfigError(format!("初始化日志失败: {}", e)))
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.write_default_aliases {
        AliasConfig::generate_default_config(path)?;
        println!("📝 已生成默认别名配置: {}", path.display());
        return Ok(());
    }

    let aliases = match &args.aliases {
        Some(path) => {
            println!("📋 使用别名配置: {}", path.display());
            AliasTable::new(AliasConfig::from_file(path)?)
        }
        None => AliasTable::builtin().clone(),
    };

    let options = BatchOptions {
        bundle: args.zip_path.clone(),
        output_dir: args.output_dir.clone(),
        image_subdir: args.images_subdir.clone(),
        mapping_path: args.mapping_path.clone(),
        clean: args.clean,
        failure_policy: if args.keep_going {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        },
        convert: ConvertOptions::default(),
    };

    if args.clean {
        println!("🧹 清理模式已启用");
    }
    println!("正在处理文档包: {}", options.bundle.display());

    let report = docxforge::convert_bundle(&options, &aliases)?;

    println!("\n📚 已转换 {} 个文档:", report.converted.len());
    for (i, (slug, title)) in report.converted.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, slug, title);
    }

    if !report.failures.is_empty() {
        println!("\n⚠️  跳过 {} 个文档:", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.entry, failure.error);
        }
    }

    println!("\n🗺️  映射表: {}", options.mapping_path.display());
    println!("🎉 DOCX文档转换完成！");

    Ok(())
}
