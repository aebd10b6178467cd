// ==========================================
// 酒店收益管理系统 - 单代理预测引擎
// ==========================================
// 职责: 按代理公式把市场状况映射为预测值 + 置信区间
// 输入: MarketCondition 列表
// 输出: AgentForecast 列表（与输入逐日对应）
// 红线: 每个公式自行钳制到代理值域,置信区间必须包住预测值
// ==========================================

use crate::domain::forecast::AgentForecast;
use crate::domain::market::MarketCondition;
use crate::domain::types::AgentKind;
use crate::engine::noise::NoiseSource;
use tracing::{debug, instrument};

/// 未知代理的兜底值
pub const FALLBACK_VALUE: f64 = 50.0;
/// 未知代理的兜底置信区间宽度
pub const FALLBACK_CONFIDENCE_RANGE: f64 = 10.0;

/// 代理公式: 返回 (预测值, 置信区间宽度)
pub type AgentFormula = fn(&MarketCondition, &mut NoiseSource) -> (f64, f64);

/// 代理值域（无钳制的代理返回 None）
pub fn value_bounds(kind: AgentKind) -> Option<(f64, f64)> {
    match kind {
        AgentKind::Demand => Some((40.0, 100.0)),
        AgentKind::Elasticity => Some((-3.0, -0.5)),
        AgentKind::Ltb => Some((0.05, 0.25)),
        AgentKind::Trend => Some((80.0, 150.0)),
        AgentKind::Event => None,
        AgentKind::Weather => Some((-20.0, 20.0)),
        AgentKind::Macro => Some((-8.0, 8.0)),
        AgentKind::Cost => Some((30.0, 60.0)),
    }
}

/// 代理 → 公式 查找表
pub fn formula(kind: AgentKind) -> AgentFormula {
    match kind {
        AgentKind::Demand => demand,
        AgentKind::Elasticity => elasticity,
        AgentKind::Ltb => look_to_book,
        AgentKind::Trend => price_trend,
        AgentKind::Event => event_boost,
        AgentKind::Weather => weather,
        AgentKind::Macro => macro_economy,
        AgentKind::Cost => cost,
    }
}

// ==========================================
// 代理公式
// ==========================================

/// 需求: 40~100，周末/节假日/活动抬升
fn demand(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = 70.0 * c.seasonal_factor * c.trend_factor;
    if c.is_weekend {
        value *= 1.25;
    }
    if c.is_holiday {
        value *= 1.4;
    }
    if c.has_event {
        value *= 1.3;
    }
    let value = (value + noise.jitter(8.0)).clamp(40.0, 100.0);
    (value, 8.0)
}

/// 价格弹性（含竞争对手压力）: -3 ~ -0.5，越负越敏感
fn elasticity(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = -1.5;
    if c.is_weekend {
        value *= 0.7;
    }
    if c.has_event {
        value *= 0.6;
    }
    value *= c.economic_sentiment;

    let competitor_pressure = (c.index as f64 / 10.0).sin() * 0.3;
    value += competitor_pressure;

    let value = (value + noise.jitter(0.3)).clamp(-3.0, -0.5);
    (value, 0.5)
}

/// 浏览预订比: 0.05 ~ 0.25
fn look_to_book(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = 0.12 * c.economic_sentiment;
    if c.is_weekend {
        value *= 1.3;
    }
    if c.has_event {
        value *= 1.4;
    }
    let value = (value + noise.jitter(0.03)).clamp(0.05, 0.25);
    (value, 0.02)
}

/// 价格趋势: $80 ~ $150
fn price_trend(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = 100.0 * c.seasonal_factor * c.trend_factor;
    if c.is_weekend {
        value *= 1.2;
    }
    if c.has_event {
        value *= 1.25;
    }
    let value = (value + noise.jitter(10.0)).clamp(80.0, 150.0);
    (value, 12.0)
}

/// 活动加成（%）: 有活动 15~35，否则 0~3；节假日再 +10
fn event_boost(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = if c.has_event {
        15.0 + noise.unit() * 20.0
    } else {
        noise.unit() * 3.0
    };
    if c.is_holiday {
        value += 10.0;
    }
    let range = if c.has_event { 8.0 } else { 2.0 };
    (value, range)
}

/// 天气影响: -20 ~ 20，极端天气放大
fn weather(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = c.base_weather_score;
    if value.abs() > 12.0 {
        value *= 1.5;
    }
    let value = (value + noise.jitter(6.0)).clamp(-20.0, 20.0);
    (value, 5.0)
}

/// 宏观经济: -8 ~ 8
fn macro_economy(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = c.economic_sentiment * 10.0 - 5.0;
    value += (c.index as f64 / 20.0).sin() * 2.0;
    let value = (value + noise.jitter(2.0)).clamp(-8.0, 8.0);
    (value, 3.0)
}

/// 运营成本（每间夜）: $30 ~ $60
fn cost(c: &MarketCondition, noise: &mut NoiseSource) -> (f64, f64) {
    let mut value = 40.0 * c.trend_factor;
    if c.is_weekend {
        value *= 1.1;
    }
    let value = (value + noise.jitter(4.0)).clamp(30.0, 60.0);
    (value, 6.0)
}

// ==========================================
// AgentForecaster - 单代理预测引擎
// ==========================================
pub struct AgentForecaster {
    seed: u64,
}

impl AgentForecaster {
    /// # 参数
    /// - seed: 主种子；每个代理从中派生独立随机流
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// 生成单代理预测序列
    ///
    /// 同一 (seed, 代理, 市场状况) 总是得到相同结果
    #[instrument(skip(self, conditions), fields(agent = %kind, days = conditions.len()))]
    pub fn forecast(&self, kind: AgentKind, conditions: &[MarketCondition]) -> Vec<AgentForecast> {
        let mut noise = NoiseSource::stream(self.seed, kind.stream_id());
        let f = formula(kind);
        conditions
            .iter()
            .map(|c| {
                let (value, range) = f(c, &mut noise);
                build_forecast(c, value, range)
            })
            .collect()
    }

    /// 按字符串 id 生成预测
    ///
    /// 未知 id 不报错，逐日返回兜底值 50 ± 5
    pub fn forecast_by_id(&self, agent_id: &str, conditions: &[MarketCondition]) -> Vec<AgentForecast> {
        match agent_id.parse::<AgentKind>() {
            Ok(kind) => self.forecast(kind, conditions),
            Err(_) => {
                debug!(agent_id, "未知代理，使用兜底预测");
                conditions
                    .iter()
                    .map(|c| build_forecast(c, FALLBACK_VALUE, FALLBACK_CONFIDENCE_RANGE))
                    .collect()
            }
        }
    }
}

/// 构造预测记录（保留两位小数）
fn build_forecast(c: &MarketCondition, value: f64, range: f64) -> AgentForecast {
    AgentForecast {
        timestamp: c.date,
        value: round_to(value, 2),
        confidence: (round_to(value - range / 2.0, 2), round_to(value + range / 2.0, 2)),
    }
}

/// 四舍五入到指定小数位
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::market_conditions::MarketConditionGenerator;
    use chrono::NaiveDate;

    fn condition(index: usize, weekend: bool, holiday: bool, event: bool) -> MarketCondition {
        // 2026-01-05 周一, 2026-01-10 周六
        let date = if weekend {
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
        } else {
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        };
        MarketConditionGenerator::condition_for(date, index, holiday, event)
    }

    fn all_combos() -> Vec<MarketCondition> {
        let mut out = Vec::new();
        for index in 0..30 {
            for mask in 0..8u8 {
                out.push(condition(index, mask & 1 != 0, mask & 2 != 0, mask & 4 != 0));
            }
        }
        out
    }

    #[test]
    fn test_every_agent_within_bounds() {
        let conditions = all_combos();
        let forecaster = AgentForecaster::new(2024);
        for kind in AgentKind::ALL {
            for f in forecaster.forecast(kind, &conditions) {
                if let Some((lo, hi)) = value_bounds(kind) {
                    assert!(f.value >= lo && f.value <= hi, "{} 越界: {}", kind, f.value);
                }
                assert!(f.confidence.0 <= f.value && f.value <= f.confidence.1);
            }
        }
    }

    #[test]
    fn test_event_boost_ranges() {
        let forecaster = AgentForecaster::new(5);
        let plain = vec![condition(3, false, false, false); 50];
        for f in forecaster.forecast(AgentKind::Event, &plain) {
            assert!((0.0..=3.0).contains(&f.value));
            assert!((f.confidence_width() - 2.0).abs() < 0.011);
        }
        let festive = vec![condition(3, false, true, true); 50];
        for f in forecaster.forecast(AgentKind::Event, &festive) {
            assert!((25.0..=45.0).contains(&f.value));
            assert!((f.confidence_width() - 8.0).abs() < 0.011);
        }
    }

    #[test]
    fn test_unknown_agent_falls_back() {
        let conditions = vec![condition(0, false, false, false); 3];
        let out = AgentForecaster::new(1).forecast_by_id("competitor", &conditions);
        assert_eq!(out.len(), 3);
        for f in out {
            assert_eq!(f.value, 50.0);
            assert_eq!(f.confidence, (45.0, 55.0));
        }
    }

    #[test]
    fn test_forecast_by_id_matches_enum() {
        let conditions = all_combos();
        let forecaster = AgentForecaster::new(77);
        assert_eq!(
            forecaster.forecast_by_id("elasticity-graph", &conditions),
            forecaster.forecast(AgentKind::Elasticity, &conditions)
        );
    }

    #[test]
    fn test_weekend_raises_demand_baseline() {
        // 无噪声比较: 基线 70 × 1.25 在 clamp 内
        let weekday = condition(0, false, false, false);
        let weekend = condition(0, true, false, false);
        let forecaster = AgentForecaster::new(3);
        let a = forecaster.forecast(AgentKind::Demand, &[weekday])[0].value;
        let b = forecaster.forecast(AgentKind::Demand, &[weekend])[0].value;
        // 同一随机流的第一次抽样相同，差值只来自周末系数
        assert!((b - a - 17.5).abs() < 0.02);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.005, 1), -0.0);
        assert_eq!(round_to(79.5, 0), 80.0);
    }
}
