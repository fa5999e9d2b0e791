// ==========================================
// 个别指导排课系统 - CLI 主入口
// ==========================================
// 用法: booth-scheduler <demands.csv> <slots.csv> [capabilities.csv] [config.json]
// 输出: ExpansionOutcome JSON（stdout）
// ==========================================

use anyhow::{bail, Context, Result};
use booth_scheduler::api::ExpansionApi;
use booth_scheduler::config::ConfigManager;
use booth_scheduler::logging;
use std::path::PathBuf;

const USAGE: &str = "用法: booth-scheduler <demands.csv> <slots.csv> [capabilities.csv] [config.json]";

struct CliArgs {
    demands: PathBuf,
    slots: PathBuf,
    capabilities: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 4 {
        bail!("{}", USAGE);
    }

    Ok(CliArgs {
        demands: PathBuf::from(&args[0]),
        slots: PathBuf::from(&args[1]),
        capabilities: args.get(2).map(PathBuf::from),
        config: args.get(3).map(PathBuf::from),
    })
}

fn main() -> Result<()> {
    logging::init();

    let args = parse_args()?;

    tracing::info!("==================================================");
    tracing::info!("{} v{}", booth_scheduler::APP_NAME, booth_scheduler::VERSION);
    tracing::info!("==================================================");

    let config = match &args.config {
        Some(path) => ConfigManager::from_json_file(path)
            .with_context(|| format!("配置加载失败: {}", path.display()))?,
        None => ConfigManager::new(),
    };
    tracing::debug!(snapshot = %config.get_config_snapshot()?, "有效配置");

    let api = ExpansionApi::new(config);
    let outcome = api
        .run_files(&args.demands, &args.slots, args.capabilities.as_deref())
        .context("展开流程失败")?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
