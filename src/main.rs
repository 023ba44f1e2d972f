// ==========================================
// 条码装箱系统 - 命令行入口
// ==========================================
// 用法:
//   carton-packing <runs.csv> <run_code> [capacity_table.json]
//
// 输出: 装箱清单 JSON（stdout），日志输出到 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use carton_packing::config::load_capacity_table;
use carton_packing::importer::RunCsvImporter;
use carton_packing::{logging, CartonAssembler, PackingManifest};
use std::path::PathBuf;

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let (runs_path, run_code) = match (args.next(), args.next()) {
        (Some(path), Some(code)) => (PathBuf::from(path), code),
        _ => bail!("用法: carton-packing <runs.csv> <run_code> [capacity_table.json]"),
    };
    let config_path = args.next().map(PathBuf::from);

    tracing::info!("{} v{}", carton_packing::APP_NAME, carton_packing::VERSION);

    let table = load_capacity_table(config_path.as_deref()).context("容量表加载失败")?;

    let runs = RunCsvImporter::parse_path(&runs_path)
        .with_context(|| format!("批次文件导入失败: {}", runs_path.display()))?;

    let cartons = CartonAssembler::new(table)
        .pack(&runs)
        .context("装箱失败")?;

    let manifest = PackingManifest::build(&run_code, &cartons).context("装箱清单生成失败")?;
    println!("{}", manifest.to_json_pretty()?);

    Ok(())
}
