// ==========================================
// 酒店收益管理系统 - 约束优化
// ==========================================
// 职责: 在用户约束下重算定价建议
// 顺序: 调价幅度带 → 毛利下限 → [最低售价, 最高售价]
// 说明: 算法选择仅做记录,不影响数值
// ==========================================

use crate::domain::catalog::RoomType;
use crate::domain::forecast::ForecastData;
use crate::domain::pricing::{OptimizationConstraints, PriceRecommendation};
use crate::engine::error::EngineResult;
use crate::engine::price_recommendation::{expected_occupancy, expected_revenue};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ConstraintOptimizer - 约束优化器
// ==========================================
pub struct ConstraintOptimizer {
    constraints: OptimizationConstraints,
}

impl ConstraintOptimizer {
    /// 构造前校验约束
    pub fn new(constraints: OptimizationConstraints) -> EngineResult<Self> {
        constraints.validate()?;
        Ok(Self { constraints })
    }

    pub fn constraints(&self) -> &OptimizationConstraints {
        &self.constraints
    }

    /// 约束后的建议价（未取整前依次施加三道约束）
    pub fn constrain_price(&self, recommended: f64, current: f64, cost: f64) -> f64 {
        let c = &self.constraints;
        let band = c.max_price_change / 100.0;
        let mut price = recommended.clamp(current * (1.0 - band), current * (1.0 + band));
        price = price.max(cost * (1.0 + c.min_profit_margin / 100.0));
        price.clamp(c.min_price, c.max_price).round()
    }

    /// 重算全部建议
    ///
    /// 找不到对应日期预测的建议原样保留
    #[instrument(skip_all, fields(count = recommendations.len(), algorithm = ?self.constraints.algorithm))]
    pub fn apply(
        &self,
        recommendations: &[PriceRecommendation],
        forecast_data: &[ForecastData],
        rooms: &[RoomType],
    ) -> Vec<PriceRecommendation> {
        let by_date: HashMap<NaiveDate, &ForecastData> =
            forecast_data.iter().map(|f| (f.timestamp, f)).collect();
        let inventory: HashMap<&str, u32> =
            rooms.iter().map(|r| (r.id.as_str(), r.inventory)).collect();

        recommendations
            .iter()
            .map(|rec| {
                let Some(forecast) = by_date.get(&rec.timestamp) else {
                    debug!(date = %rec.timestamp, "无对应日期预测，跳过约束");
                    return rec.clone();
                };

                let price = self.constrain_price(
                    rec.recommended_price,
                    rec.current_price,
                    forecast.cost_estimate,
                );
                let occupancy = expected_occupancy(
                    forecast.predicted_demand,
                    forecast.price_elasticity,
                    price,
                    rec.current_price,
                );
                let rooms_total = inventory.get(rec.room_type.as_str()).copied().unwrap_or(0);

                PriceRecommendation {
                    recommended_price: price,
                    expected_occupancy: occupancy,
                    expected_revenue: expected_revenue(price, occupancy, rooms_total),
                    ..rec.clone()
                }
            })
            .collect()
    }
}

/// 便捷入口: 校验约束并重算建议
pub fn apply_constraints(
    recommendations: &[PriceRecommendation],
    forecast_data: &[ForecastData],
    rooms: &[RoomType],
    constraints: &OptimizationConstraints,
) -> EngineResult<Vec<PriceRecommendation>> {
    let optimizer = ConstraintOptimizer::new(constraints.clone())?;
    Ok(optimizer.apply(recommendations, forecast_data, rooms))
}
