// ==========================================
// 酒店收益管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、快照与恢复
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use crate::config::forecast_config::{ConfigError, ConfigResult, ForecastConfig};
use crate::domain::pricing::OptimizationConstraints;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    // 配置文件路径
    pub const CONFIG_PATH: &str = "HOTEL_RMS_CONFIG_PATH";

    // 生成参数
    pub const SEED: &str = "HOTEL_RMS_SEED";
    pub const HORIZON_DAYS: &str = "HOTEL_RMS_HORIZON_DAYS";
    pub const START_DATE: &str = "HOTEL_RMS_START_DATE";

    // 语言
    pub const LOCALE: &str = "HOTEL_RMS_LOCALE";
}

/// 默认配置文件路径
///
/// 优先读取 HOTEL_RMS_CONFIG_PATH；否则为 {config_dir}/hotel-rms/config.json，
/// Debug 构建使用 hotel-rms-dev 子目录
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
        let path = path.trim();
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    let app_dir = if cfg!(debug_assertions) {
        "hotel-rms-dev"
    } else {
        "hotel-rms"
    };

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_dir)
        .join("config.json")
}

/// 从 JSON 文件加载配置
///
/// 文件不存在时返回默认配置
pub fn load_from_file(path: &Path) -> ConfigResult<ForecastConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "配置文件不存在，使用默认配置");
        return Ok(ForecastConfig::default());
    }

    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// 以环境变量查询函数覆写配置
///
/// 查询函数便于测试时注入，正式使用见 [`apply_env_overrides`]
pub fn apply_overrides_with<F>(config: &mut ForecastConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(config_keys::SEED) {
        let seed = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::Parse(format!("{}={}: {}", config_keys::SEED, raw, e)))?;
        config.seed = Some(seed);
    }

    if let Some(raw) = lookup(config_keys::HORIZON_DAYS) {
        config.horizon_days = raw.trim().parse::<u32>().map_err(|e| {
            ConfigError::Parse(format!("{}={}: {}", config_keys::HORIZON_DAYS, raw, e))
        })?;
    }

    if let Some(raw) = lookup(config_keys::START_DATE) {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
            ConfigError::Parse(format!("{}={}: {}", config_keys::START_DATE, raw, e))
        })?;
        config.start_date = Some(date);
    }

    if let Some(raw) = lookup(config_keys::LOCALE) {
        config.locale = raw.trim().to_string();
    }

    Ok(())
}

/// 以进程环境变量覆写配置
pub fn apply_env_overrides(config: &mut ForecastConfig) -> ConfigResult<()> {
    apply_overrides_with(config, |key| std::env::var(key).ok())
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: RwLock<ForecastConfig>,
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// 由现成配置创建（不关联文件）
    pub fn new(config: ForecastConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
            path: None,
        })
    }

    /// 从文件加载并应用环境变量覆写
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut config = load_from_file(path)?;
        apply_env_overrides(&mut config)?;
        config.validate()?;

        info!(path = %path.display(), seed = ?config.seed, days = config.horizon_days, "配置已加载");
        Ok(Self {
            config: RwLock::new(config),
            path: Some(path.to_path_buf()),
        })
    }

    /// 从默认路径加载
    pub fn load_default() -> ConfigResult<Self> {
        Self::load(&get_default_config_path())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 当前配置副本
    pub fn current(&self) -> ForecastConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 更新定价约束（校验失败时不修改）
    pub fn update_constraints(&self, constraints: OptimizationConstraints) -> ConfigResult<()> {
        constraints
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let mut guard = self
            .config
            .write()
            .map_err(|e| ConfigError::Invalid(format!("锁获取失败: {}", e)))?;
        guard.constraints = constraints;
        Ok(())
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(&self.current()).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从快照恢复配置
    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<()> {
        let config: ForecastConfig =
            serde_json::from_str(snapshot_json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;

        let mut guard = self
            .config
            .write()
            .map_err(|e| ConfigError::Invalid(format!("锁获取失败: {}", e)))?;
        *guard = config;
        Ok(())
    }

    /// 写回配置文件（未关联文件时写到默认路径）
    pub fn save(&self) -> ConfigResult<PathBuf> {
        let path = self.path.clone().unwrap_or_else(get_default_config_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, self.get_config_snapshot()?)?;
        if self.path.is_none() {
            warn!(path = %path.display(), "配置未关联文件，已写入默认路径");
        }
        Ok(path)
    }
}
