// ==========================================
// 酒店收益管理系统 - 命令行入口
// ==========================================
// 职责: 生成预测快照并以 JSON 输出各看板数据
// 说明: 日志写入 stderr,数据写入 stdout
// ==========================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use hotel_rms::api::error::parse_date;
use hotel_rms::config::ConfigManager;
use hotel_rms::i18n::{t, t_with_args};
use hotel_rms::{logging, AppRoute, AppState, TimePeriod};

#[derive(Parser)]
#[command(name = "hotel-rms", version, about = "酒店收益管理系统 - 预测与定价建议")]
struct Cli {
    /// 配置文件路径（默认使用用户配置目录）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 随机种子（覆盖配置）
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// 预测天数（覆盖配置）
    #[arg(long, global = true)]
    days: Option<u32>,

    /// 窗口首日 YYYY-MM-DD（覆盖配置）
    #[arg(long, global = true)]
    start: Option<String>,

    /// 语言: zh-CN / en
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 停用的预测代理（可重复）
    #[arg(long = "disable", global = true)]
    disabled_agents: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 生成快照并输出元数据
    Snapshot,
    /// 输出单个代理的预测序列
    Agent { id: String },
    /// 输出定价建议
    Recommendations {
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        segment: Option<String>,
    },
    /// 单日建议汇总
    Summary {
        #[arg(long)]
        date: Option<String>,
    },
    /// 导出定价建议 CSV
    Export {
        file: PathBuf,
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        segment: Option<String>,
    },
    /// 收益影响分析
    Impact {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long = "as-of")]
        as_of: Option<String>,
    },
    /// 入住曲线 / 提前预订曲线
    Curve {
        period: TimePeriod,
        #[arg(long)]
        pickup: bool,
    },
    /// 输出看板页面数据
    View { path: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_state(cli: &Cli) -> Result<AppState> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => ConfigManager::load_default().context("加载默认配置失败")?,
    };
    if let Some(path) = manager.path() {
        tracing::info!("{}", t_with_args("cli.config_loaded", &[("path", &path.display().to_string())]));
    }

    let mut config = manager.current();
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(days) = cli.days {
        config.horizon_days = days;
    }
    if let Some(start) = &cli.start {
        config.start_date = Some(parse_date(start)?);
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }

    let mut state = AppState::new(config)?;
    if !cli.disabled_agents.is_empty() {
        for id in &cli.disabled_agents {
            let agent = state.agent_api.set_agent_enabled(id, false)?;
            tracing::info!(
                "{}",
                t_with_args(
                    "cli.agent_toggled",
                    &[("agent", &agent.name), ("state", &t("cli.disabled"))]
                )
            );
        }
        state = state.regenerate()?;
    }
    Ok(state)
}

fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(value.map(parse_date).transpose()?)
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    tracing::info!("{} v{}", hotel_rms::APP_NAME, hotel_rms::VERSION);
    let state = load_state(&cli)?;
    let api = &state.dashboard_api;

    match &cli.command {
        Command::Snapshot => {
            let snapshot = &state.snapshot;
            eprintln!(
                "{}",
                t_with_args(
                    "cli.snapshot_created",
                    &[
                        ("id", &snapshot.snapshot_id),
                        ("seed", &snapshot.seed.to_string()),
                        ("days", &snapshot.dates.len().to_string()),
                    ],
                )
            );
            print_json(&AppRoute::Data.payload(&state, AppRoute::Data.path())?)?;
        }
        Command::Agent { id } => print_json(&api.agent_forecasts(id)?)?,
        Command::Recommendations { room, segment } => {
            print_json(&api.recommendations(room.as_deref(), segment.as_deref())?)?
        }
        Command::Summary { date } => {
            print_json(&api.recommendation_summary(optional_date(date.as_deref())?)?)?
        }
        Command::Export {
            file,
            room,
            segment,
        } => {
            let count =
                api.export_recommendations_to_path(file, room.as_deref(), segment.as_deref())?;
            eprintln!(
                "{}",
                t_with_args(
                    "cli.export_done",
                    &[
                        ("count", &count.to_string()),
                        ("path", &file.display().to_string()),
                    ],
                )
            );
        }
        Command::Impact { from, to, as_of } => {
            let from = parse_date(from)?;
            let to = parse_date(to)?;
            let as_of = match as_of {
                Some(d) => parse_date(d)?,
                None => chrono::Local::now().date_naive(),
            };
            print_json(&api.revenue_impact(from, to, as_of)?)?;
        }
        Command::Curve { period, pickup } => {
            if *pickup {
                print_json(&api.pickup_curve(*period, None)?)?;
            } else {
                print_json(&api.booking_curve(*period)?)?;
            }
        }
        Command::View { path } => {
            let route = AppRoute::resolve(path);
            print_json(&route.payload(&state, path)?)?;
        }
    }

    Ok(())
}
