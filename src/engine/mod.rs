// ==========================================
// 酒店收益管理系统 - 引擎层
// ==========================================
// 职责: 市场状况 / 代理预测 / 定价建议 / 看板分析 的生成规则
// 红线: 生成器不返回错误,越界一律钳制；随机性一律经由 NoiseSource
// ==========================================

pub mod agent_forecast;
pub mod alerts;
pub mod booking_curve;
pub mod combined_forecast;
pub mod constraints;
pub mod error;
pub mod forecast_data;
pub mod kpi;
pub mod market_conditions;
pub mod noise;
pub mod price_recommendation;
pub mod recommendation_summary;
pub mod revenue_impact;
pub mod snapshot;

// 重导出核心引擎
pub use agent_forecast::AgentForecaster;
pub use alerts::AlertDetector;
pub use constraints::{apply_constraints, ConstraintOptimizer};
pub use error::{EngineError, EngineResult};
pub use forecast_data::combine_forecast_data;
pub use market_conditions::{generate_dates, generate_dates_from_today, MarketConditionGenerator};
pub use noise::NoiseSource;
pub use price_recommendation::PriceRecommendationEngine;
pub use snapshot::{ForecastPipeline, ForecastSnapshot};
