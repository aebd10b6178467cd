// ==========================================
// 酒店收益管理系统 - 收益与预订曲线
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单日收益对比点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueImpactPoint {
    pub date: NaiveDate,
    pub projected_revenue: f64,
    pub optimized_revenue: f64,
    /// 仅截至 as_of 的日期才有实际收益
    pub actual_revenue: Option<f64>,
}

/// 区间收益影响指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueImpactMetrics {
    pub total_projected: f64,
    pub total_optimized: f64,
    pub total_actual: f64,
    pub projected_vs_actual: f64,
    pub optimized_vs_actual: f64,
    pub projected_vs_actual_pct: f64,
    pub avg_daily_impact: f64,
    pub day_count: usize,
}

/// 收益影响分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueImpactReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub as_of: NaiveDate,
    pub points: Vec<RevenueImpactPoint>,
    pub metrics: RevenueImpactMetrics,
}

/// 预订曲线点（入住量：预测 vs 实际）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCurvePoint {
    pub period_start: NaiveDate,
    pub label: String,
    pub predicted: f64,
    pub actual: f64,
}

/// 提前预订曲线点（到店日前各期累计预订）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupCurvePoint {
    pub booking_date: NaiveDate,
    pub label: String,
    /// 距到店: "Arrival Day" / "3 days before" / "2 week before"
    pub days_out: String,
    pub predicted: f64,
    pub actual: f64,
}

/// 驾驶舱核心指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub date: NaiveDate,
    /// 预测入住率（%）
    pub occupancy: f64,
    /// 较前一日变化（%），前一日不在窗口内时为 0
    pub occupancy_change_pct: f64,
    /// 平均房价 ADR
    pub adr: f64,
    /// 每间可售房收入 RevPAR
    pub revpar: f64,
    pub expected_revenue: f64,
    pub rooms_sold: f64,
    pub rooms_available: f64,
}
