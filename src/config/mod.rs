// ==========================================
// 酒店收益管理系统 - 配置层
// ==========================================
// 职责: 预测配置加载、校验、环境变量覆写
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod forecast_config;

// 重导出核心配置类型
pub use config_manager::{
    apply_env_overrides, config_keys, get_default_config_path, load_from_file, ConfigManager,
};
pub use forecast_config::{ConfigError, ConfigResult, ForecastConfig};
