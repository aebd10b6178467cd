// ==========================================
// 酒店收益管理系统 - 按日合并预测
// ==========================================
// 职责: 将各代理预测序列按日序号拼接为 ForecastData
// 输入: 代理预测序列（每个代理只生成一次）
// 输出: 每日一条 ForecastData
// 说明: 未启用的代理按中性基线取值
// ==========================================

use crate::domain::forecast::{AgentForecast, ForecastData};
use crate::domain::market::MarketCondition;
use crate::domain::types::AgentKind;
use std::collections::BTreeMap;
use tracing::instrument;

/// 代理未启用时的中性基线
pub fn neutral_value(kind: AgentKind) -> f64 {
    match kind {
        AgentKind::Demand => 80.0,
        AgentKind::Elasticity => -1.5,
        AgentKind::Ltb => 0.12,
        AgentKind::Trend => 100.0,
        AgentKind::Event => 0.0,
        AgentKind::Weather => 0.0,
        AgentKind::Macro => 0.0,
        AgentKind::Cost => 40.0,
    }
}

/// 合并预测
///
/// # 参数
/// - conditions: 市场状况（决定日期与天数）
/// - series: 已启用代理的预测序列；缺失的代理取中性基线
///
/// # 返回
/// 与 conditions 等长的 ForecastData 列表
#[instrument(skip_all, fields(days = conditions.len(), agents = series.len()))]
pub fn combine_forecast_data(
    conditions: &[MarketCondition],
    series: &BTreeMap<AgentKind, Vec<AgentForecast>>,
) -> Vec<ForecastData> {
    conditions
        .iter()
        .map(|c| {
            let pick = |kind: AgentKind| -> f64 {
                series
                    .get(&kind)
                    .and_then(|s| s.get(c.index))
                    .map(|f| f.value)
                    .unwrap_or_else(|| neutral_value(kind))
            };

            ForecastData {
                timestamp: c.date,
                predicted_demand: pick(AgentKind::Demand).round(),
                price_elasticity: pick(AgentKind::Elasticity),
                look_to_book_ratio: pick(AgentKind::Ltb),
                trend_price: pick(AgentKind::Trend),
                weather_impact: pick(AgentKind::Weather),
                event_boost: pick(AgentKind::Event),
                macro_impact: pick(AgentKind::Macro),
                cost_estimate: pick(AgentKind::Cost),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::agent_forecast::AgentForecaster;
    use crate::engine::market_conditions::{generate_dates, MarketConditionGenerator};
    use crate::engine::noise::NoiseSource;
    use chrono::NaiveDate;

    fn conditions() -> Vec<MarketCondition> {
        let dates = generate_dates(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), 10);
        MarketConditionGenerator::default().generate(&dates, &mut NoiseSource::new(11))
    }

    #[test]
    fn test_zip_by_index() {
        let conditions = conditions();
        let forecaster = AgentForecaster::new(11);
        let series: BTreeMap<_, _> = AgentKind::ALL
            .iter()
            .map(|&k| (k, forecaster.forecast(k, &conditions)))
            .collect();

        let data = combine_forecast_data(&conditions, &series);
        assert_eq!(data.len(), conditions.len());
        for (i, d) in data.iter().enumerate() {
            assert_eq!(d.timestamp, conditions[i].date);
            assert_eq!(d.predicted_demand, series[&AgentKind::Demand][i].value.round());
            assert_eq!(d.cost_estimate, series[&AgentKind::Cost][i].value);
            assert_eq!(d.macro_impact, series[&AgentKind::Macro][i].value);
        }
    }

    #[test]
    fn test_missing_agents_use_neutral_values() {
        let conditions = conditions();
        let data = combine_forecast_data(&conditions, &BTreeMap::new());
        for d in data {
            assert_eq!(d.predicted_demand, 80.0);
            assert_eq!(d.price_elasticity, -1.5);
            assert_eq!(d.look_to_book_ratio, 0.12);
            assert_eq!(d.trend_price, 100.0);
            assert_eq!(d.event_boost, 0.0);
            assert_eq!(d.cost_estimate, 40.0);
        }
    }
}
