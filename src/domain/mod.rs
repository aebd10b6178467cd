// ==========================================
// 酒店收益管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含生成逻辑,不含随机数
// ==========================================

pub mod agent;
pub mod alert;
pub mod catalog;
pub mod forecast;
pub mod mapping;
pub mod market;
pub mod pricing;
pub mod revenue;
pub mod types;

// 重导出核心类型
pub use agent::{Agent, AgentRoster, SubFactor};
pub use alert::{Alert, AlertInbox};
pub use catalog::{CustomerSegment, RoomType};
pub use forecast::{AgentForecast, CombinedForecast, CombinedForecastInsights, ForecastData};
pub use mapping::{CompetitorHotel, HotelMappingBook, RoomMapping};
pub use market::{CalendarDay, MarketCondition};
pub use pricing::{OptimizationConstraints, PriceRecommendation, RecommendationSummary};
pub use revenue::{
    BookingCurvePoint, DashboardKpis, PickupCurvePoint, RevenueImpactMetrics,
    RevenueImpactPoint, RevenueImpactReport,
};
pub use types::{
    AgentKind, AlertSeverity, AlertType, Consensus, OptimizationAlgorithm, RiskLevel, TimePeriod,
};
