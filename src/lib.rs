// ==========================================
// 酒店收益管理系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 决策支持系统 (定价建议,人工最终决定)
// 数据来源: 可复现种子驱动的模拟数据
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 生成与分析规则
pub mod engine;

// 配置层 - 预测配置
pub mod config;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态与看板路由
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AgentKind, AlertSeverity, AlertType, Consensus, OptimizationAlgorithm, RiskLevel, TimePeriod,
};

// 领域实体
pub use domain::{
    Agent, AgentForecast, AgentRoster, Alert, CombinedForecast, CustomerSegment, ForecastData,
    MarketCondition, OptimizationConstraints, PriceRecommendation, RoomType,
};

// 引擎
pub use engine::{
    AgentForecaster, AlertDetector, ConstraintOptimizer, EngineError, ForecastPipeline,
    ForecastSnapshot, MarketConditionGenerator, NoiseSource, PriceRecommendationEngine,
};

// API
pub use api::{AgentApi, ApiError, ApiResult, DashboardApi, MappingApi};

// 应用
pub use app::{AppRoute, AppState};

// 配置
pub use config::{ConfigManager, ForecastConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "酒店收益管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
