// ==========================================
// 酒店收益管理系统 - 定价建议与优化约束
// ==========================================

use crate::domain::types::OptimizationAlgorithm;
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PriceRecommendation - 定价建议
// ==========================================
// 粒度: 房型 × 客群 × 日
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    pub timestamp: NaiveDate,
    pub room_type: String,
    pub segment: String,
    pub recommended_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub current_price: f64,
    /// 预计入住率（%，一位小数）
    pub expected_occupancy: f64,
    pub expected_revenue: f64,
}

impl PriceRecommendation {
    /// 相对当前价的变化百分比
    pub fn change_pct(&self) -> f64 {
        if self.current_price == 0.0 {
            return 0.0;
        }
        (self.recommended_price - self.current_price) / self.current_price * 100.0
    }
}

// ==========================================
// OptimizationConstraints - 优化约束
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConstraints {
    /// 最低售价
    pub min_price: f64,
    /// 最高售价
    pub max_price: f64,
    /// 最低利润率（%）
    pub min_profit_margin: f64,
    /// 单次最大调价幅度（%）
    pub max_price_change: f64,
    /// 目标入住率（%）
    pub occupancy_target: f64,
    pub algorithm: OptimizationAlgorithm,
}

impl Default for OptimizationConstraints {
    fn default() -> Self {
        Self {
            min_price: 80.0,
            max_price: 500.0,
            min_profit_margin: 15.0,
            max_price_change: 10.0,
            occupancy_target: 80.0,
            algorithm: OptimizationAlgorithm::GradientDescent,
        }
    }
}

impl OptimizationConstraints {
    /// 约束校验
    ///
    /// 取值范围与前端滑块一致:
    /// - min_profit_margin ∈ [0, 50]
    /// - max_price_change ∈ [1, 30]
    /// - occupancy_target ∈ [50, 100]
    pub fn validate(&self) -> EngineResult<()> {
        if !self.min_price.is_finite() || self.min_price < 0.0 {
            return Err(EngineError::InvalidConstraints(format!(
                "最低售价无效: {}",
                self.min_price
            )));
        }
        if !self.max_price.is_finite() || self.max_price < self.min_price {
            return Err(EngineError::InvalidConstraints(format!(
                "最高售价必须不小于最低售价: min={}, max={}",
                self.min_price, self.max_price
            )));
        }
        if !(0.0..=50.0).contains(&self.min_profit_margin) {
            return Err(EngineError::InvalidConstraints(format!(
                "最低利润率超出范围[0,50]: {}",
                self.min_profit_margin
            )));
        }
        if !(1.0..=30.0).contains(&self.max_price_change) {
            return Err(EngineError::InvalidConstraints(format!(
                "最大调价幅度超出范围[1,30]: {}",
                self.max_price_change
            )));
        }
        if !(50.0..=100.0).contains(&self.occupancy_target) {
            return Err(EngineError::InvalidConstraints(format!(
                "目标入住率超出范围[50,100]: {}",
                self.occupancy_target
            )));
        }
        Ok(())
    }
}

// ==========================================
// RecommendationSummary - 当日定价建议汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub date: NaiveDate,
    pub total: usize,
    pub increases: usize,
    pub decreases: usize,
    pub unchanged: usize,
    /// 平均调价幅度（%）
    pub average_change_pct: f64,
    pub current_revenue: f64,
    pub recommended_revenue: f64,
    pub revenue_impact: f64,
    pub revenue_impact_pct: f64,
    /// 预计入住率低于目标的建议条数
    pub below_occupancy_target: usize,
}
