// ==========================================
// 酒店收益管理系统 - 定价建议引擎
// ==========================================
// 职责: 房型 × 客群 × 日 生成定价建议
// 输入: 房型/客群目录 + 市场状况 + 合并预测
// 输出: PriceRecommendation 列表（房型优先,其次客群,最后日期）
// 红线: 建议价不得低于 成本 × 最低毛利倍数
// ==========================================

use crate::domain::catalog::{CustomerSegment, RoomType};
use crate::domain::forecast::ForecastData;
use crate::domain::market::MarketCondition;
use crate::domain::pricing::PriceRecommendation;
use crate::engine::agent_forecast::round_to;
use crate::engine::noise::NoiseSource;
use tracing::instrument;

/// 默认最低毛利倍数（30% 毛利）
pub const DEFAULT_MIN_MARGIN_RATIO: f64 = 1.3;

/// 入住率下限（%）
pub const OCCUPANCY_FLOOR: f64 = 10.0;
/// 入住率上限（%）
pub const OCCUPANCY_CEILING: f64 = 95.0;

// ==========================================
// PriceRecommendationEngine - 定价建议引擎
// ==========================================
pub struct PriceRecommendationEngine {
    min_margin_ratio: f64,
}

impl PriceRecommendationEngine {
    pub fn new(min_margin_ratio: f64) -> Self {
        Self { min_margin_ratio }
    }

    pub fn min_margin_ratio(&self) -> f64 {
        self.min_margin_ratio
    }

    /// 生成全部定价建议
    ///
    /// 条数 = 房型数 × 客群数 × 天数
    /// forecast_data 与 conditions 按日序号对应
    #[instrument(skip_all, fields(
        rooms = rooms.len(),
        segments = segments.len(),
        days = forecast_data.len()
    ))]
    pub fn generate(
        &self,
        rooms: &[RoomType],
        segments: &[CustomerSegment],
        conditions: &[MarketCondition],
        forecast_data: &[ForecastData],
        noise: &mut NoiseSource,
    ) -> Vec<PriceRecommendation> {
        let mut recommendations =
            Vec::with_capacity(rooms.len() * segments.len() * forecast_data.len());

        for room in rooms {
            for segment in segments {
                for (forecast, condition) in forecast_data.iter().zip(conditions) {
                    recommendations.push(self.recommend(room, segment, condition, forecast, noise));
                }
            }
        }

        recommendations
    }

    /// 单条定价建议
    pub fn recommend(
        &self,
        room: &RoomType,
        segment: &CustomerSegment,
        condition: &MarketCondition,
        forecast: &ForecastData,
        noise: &mut NoiseSource,
    ) -> PriceRecommendation {
        let base_price = room.base_price * segment.price_multiplier;

        let current_price = current_price(base_price, condition, noise);
        let recommended_price = recommend_price(base_price, forecast, self.min_margin_ratio);

        let expected_occupancy = expected_occupancy(
            forecast.predicted_demand,
            forecast.price_elasticity,
            recommended_price,
            current_price,
        );

        PriceRecommendation {
            timestamp: forecast.timestamp,
            room_type: room.id.clone(),
            segment: segment.id.clone(),
            recommended_price,
            min_price: (base_price * 0.75).round(),
            max_price: (base_price * 1.8).round(),
            current_price,
            expected_occupancy,
            expected_revenue: expected_revenue(recommended_price, expected_occupancy, room.inventory),
        }
    }
}

impl Default for PriceRecommendationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MARGIN_RATIO)
    }
}

// ==========================================
// 定价公式
// ==========================================

/// 当前售价（模拟历史已设定价格）
///
/// 周末 ×1.15，活动 ×1.1，叠加 ±5% 基准价扰动后取整
pub fn current_price(base_price: f64, condition: &MarketCondition, noise: &mut NoiseSource) -> f64 {
    let mut price = base_price;
    if condition.is_weekend {
        price *= 1.15;
    }
    if condition.has_event {
        price *= 1.1;
    }
    (price + noise.jitter(base_price * 0.1)).round()
}

/// 建议价
///
/// 依次乘以 需求/弹性/浏览预订比/趋势/活动/天气 调整系数后取整；
/// 结果低于 成本 × min_margin_ratio 时取该下限向上取整
pub fn recommend_price(base_price: f64, forecast: &ForecastData, min_margin_ratio: f64) -> f64 {
    let mut price = base_price;

    // 需求: 以 80 为中性
    let demand_factor = forecast.predicted_demand / 80.0;
    price *= 1.0 + (demand_factor - 1.0) * 0.3;

    // 弹性: 高弹性降价,低弹性提价
    price *= if forecast.price_elasticity.abs() > 2.0 {
        0.9
    } else {
        1.1
    };

    // 浏览预订比: 以 0.12 为中性
    price *= 1.0 + (forecast.look_to_book_ratio - 0.12) * 2.0;

    price *= forecast.trend_price / 100.0;

    if forecast.event_boost > 5.0 {
        price *= 1.0 + forecast.event_boost / 100.0;
    }

    price *= 1.0 + forecast.weather_impact / 200.0;

    price.round().max(forecast.margin_floor(min_margin_ratio).ceil())
}

/// 预计入住率（%）
///
/// demand/100 × (建议价/当前价)^弹性 × 100，钳制到 [10, 95]，保留一位小数
/// 当前价按不低于 1 处理
pub fn expected_occupancy(demand: f64, elasticity: f64, recommended: f64, current: f64) -> f64 {
    let price_ratio = recommended / current.max(1.0);
    let elasticity_impact = price_ratio.powf(elasticity);
    let occupancy = (demand / 100.0 * elasticity_impact * 100.0).clamp(OCCUPANCY_FLOOR, OCCUPANCY_CEILING);
    round_to(occupancy, 1)
}

/// 预计收益 = 价格 × 入住率 × 房量（取整）
pub fn expected_revenue(price: f64, occupancy_pct: f64, inventory: u32) -> f64 {
    (price * occupancy_pct / 100.0 * inventory as f64).round()
}
