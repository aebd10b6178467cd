// ==========================================
// 酒店收益管理系统 - 看板 KPI
// ==========================================
// 职责: 单日入住率 / ADR / RevPAR 计算
// 说明: 入住率即当日预测需求；环比取窗口内前一日,缺失按 0
// ==========================================

use crate::domain::catalog::RoomType;
use crate::domain::forecast::ForecastData;
use crate::domain::pricing::PriceRecommendation;
use crate::domain::revenue::DashboardKpis;
use crate::engine::agent_forecast::round_to;
use chrono::NaiveDate;
use std::collections::HashMap;

/// 计算单日 KPI
///
/// 日期不在预测窗口内时返回 None
pub fn compute_kpis(
    date: NaiveDate,
    forecast_data: &[ForecastData],
    recommendations: &[PriceRecommendation],
    rooms: &[RoomType],
) -> Option<DashboardKpis> {
    let today = forecast_data.iter().find(|f| f.timestamp == date)?;
    let occupancy = today.predicted_demand;

    let previous = date
        .pred_opt()
        .and_then(|prev| forecast_data.iter().find(|f| f.timestamp == prev));
    let occupancy_change_pct = match previous {
        Some(prev) if prev.predicted_demand != 0.0 => round_to(
            (occupancy - prev.predicted_demand) / prev.predicted_demand * 100.0,
            2,
        ),
        _ => 0.0,
    };

    let inventory: HashMap<&str, u32> =
        rooms.iter().map(|r| (r.id.as_str(), r.inventory)).collect();

    let mut expected_revenue = 0.0;
    let mut rooms_sold = 0.0;
    let mut rooms_available = 0.0;
    for rec in recommendations.iter().filter(|r| r.timestamp == date) {
        let total = inventory.get(rec.room_type.as_str()).copied().unwrap_or(0) as f64;
        expected_revenue += rec.expected_revenue;
        rooms_sold += rec.expected_occupancy / 100.0 * total;
        rooms_available += total;
    }

    let adr = if rooms_sold > 0.0 {
        expected_revenue / rooms_sold
    } else {
        0.0
    };
    let revpar = if rooms_available > 0.0 {
        expected_revenue / rooms_available
    } else {
        0.0
    };

    Some(DashboardKpis {
        date,
        occupancy,
        occupancy_change_pct,
        adr: round_to(adr, 2),
        revpar: round_to(revpar, 2),
        expected_revenue,
        rooms_sold: round_to(rooms_sold, 1),
        rooms_available,
    })
}
