//! rsgrok 命令行工具：编译 grok 表达式、校验指标配置、试匹配日志行

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use rsgrok::{
    CompiledMetric, ConfigManager, FancyRegexEngine, GrokCompiler, GrokConfig, MetricDefinition,
    PatternLoader, RegexEngine, StdRegexEngine,
};

#[derive(Debug, Parser)]
#[command(name = "rsgrok", version, about = "grok 表达式编译与指标字段校验工具")]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalOptions {
    /// 自定义模式文件目录
    #[arg(long, global = true)]
    patterns_dir: Option<PathBuf>,

    /// 不加载内置模式库
    #[arg(long, global = true)]
    no_embedded: bool,

    /// 正则引擎（std 不支持环视与原子分组，内置模式库中的部分模式无法编译）
    #[arg(long, global = true, value_enum, default_value_t = EngineKind::Fancy)]
    engine: EngineKind,

    /// 占位符最大嵌套展开层数
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Fancy,
    Std,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 展开并编译 grok 表达式，输出正则与命名分组
    Compile {
        expression: String,
    },
    /// 编译指标配置文件中每个指标的 match 表达式并校验字段
    Verify {
        config: PathBuf,
    },
    /// 使用 grok 表达式匹配一行日志，输出捕获字段
    Match {
        expression: String,
        line: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.options);
    init_logging(config.verbose);
    debug!("运行配置：{:?}", config);

    match cli.options.engine {
        EngineKind::Fancy => run(&cli.command, build_compiler(&config, FancyRegexEngine)?),
        EngineKind::Std => {
            if config.embedded_patterns {
                warn!("std 引擎不支持环视与原子分组，引用此类内置模式的表达式会编译失败");
            }
            run(&cli.command, build_compiler(&config, StdRegexEngine)?)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(options: &GlobalOptions) -> GrokConfig {
    let mut builder = ConfigManager::custom()
        .embedded_patterns(!options.no_embedded)
        .verbose(options.verbose);
    if let Some(dir) = options.patterns_dir.clone() {
        builder = builder.patterns_dir(dir);
    }
    if let Some(depth) = options.max_depth {
        builder = builder.max_expansion_depth(depth);
    }
    builder.build()
}

fn build_compiler<E: RegexEngine>(config: &GrokConfig, engine: E) -> Result<GrokCompiler<E>> {
    let dictionary = PatternLoader::load(config).context("加载模式字典失败")?;
    Ok(GrokCompiler::with_engine(Arc::new(dictionary), engine)
        .max_expansion_depth(config.max_expansion_depth))
}

fn run<E: RegexEngine>(command: &Command, compiler: GrokCompiler<E>) -> Result<()> {
    match command {
        Command::Compile { expression } => {
            let pattern = compiler.compile(expression)?;
            println!("{}", pattern.source());
            for (name, index) in pattern.capture_groups() {
                println!("  {:>3}  {}", index, name);
            }
        }
        Command::Verify { config } => {
            let source = fs::read_to_string(config)
                .with_context(|| format!("读取指标配置失败：{}", config.display()))?;
            let metrics = MetricDefinition::list_from_yaml(&source)
                .with_context(|| format!("解析指标配置失败：{}", config.display()))?;

            let mut failed = 0;
            for metric in metrics {
                let name = metric.name.clone();
                match CompiledMetric::new(metric, &compiler) {
                    Ok(_) => println!("ok    {}", name),
                    Err(e) => {
                        println!("FAIL  {}: {}", name, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} 个指标校验失败", failed);
            }
        }
        Command::Match { expression, line } => {
            let pattern = compiler.compile(expression)?;
            let Some(fields) = pattern.captures(line)? else {
                bail!("日志行与表达式不匹配");
            };
            let mut fields: Vec<_> = fields.into_iter().collect();
            fields.sort();
            for (name, value) in fields {
                println!("{}={:?}", name, value);
            }
        }
    }
    Ok(())
}
