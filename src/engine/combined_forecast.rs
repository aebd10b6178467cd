// ==========================================
// 酒店收益管理系统 - 多代理综合预测
// ==========================================
// 职责: 已启用代理归一化(0~100)后按权重加权
// 权重: 已启用子因子影响占比之和 / 100
// 输出: 综合值 + 置信区间 + 一致性 + 风险等级
// ==========================================

use crate::domain::agent::AgentRoster;
use crate::domain::forecast::{AgentForecast, CombinedForecast, CombinedForecastInsights};
use crate::domain::types::{AgentKind, Consensus, RiskLevel};
use std::collections::BTreeMap;
use tracing::instrument;

/// 无可用代理时的综合值
pub const NEUTRAL_OUTLOOK: f64 = 50.0;
/// 无置信区间时的默认平均宽度
const DEFAULT_CONFIDENCE_WIDTH: f64 = 10.0;
/// 综合后置信区间收窄系数
const COMBINED_WIDTH_FACTOR: f64 = 0.8;

/// 代理值归一化到 [0, 100]
pub fn normalize(kind: AgentKind, value: f64) -> f64 {
    let scaled = match kind {
        AgentKind::Demand => value,
        AgentKind::Elasticity => (value + 3.0) * 16.67,
        AgentKind::Ltb => value * 500.0,
        AgentKind::Trend => (value - 50.0) * 2.0 + 50.0,
        AgentKind::Event | AgentKind::Weather => value + 50.0,
        AgentKind::Macro => (value + 8.0) * 6.25,
        // 成本越低越好
        AgentKind::Cost => 100.0 - value,
    };
    scaled.clamp(0.0, 100.0)
}

/// 平均置信区间宽度 → 一致性
pub fn consensus_for(avg_width: f64) -> Consensus {
    if avg_width < 5.0 {
        Consensus::High
    } else if avg_width < 15.0 {
        Consensus::Medium
    } else {
        Consensus::Low
    }
}

/// 综合值 + 一致性 → 风险等级
pub fn risk_for(value: f64, consensus: Consensus) -> RiskLevel {
    let extreme = !(20.0..=80.0).contains(&value);
    let stretched = !(30.0..=70.0).contains(&value);
    let low_consensus = consensus == Consensus::Low;

    if extreme && low_consensus {
        RiskLevel::High
    } else if stretched || low_consensus {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// 综合预测
///
/// 天数由 dates 决定；已启用但缺少序列的代理不参与当日计算
#[instrument(skip_all, fields(days = dates.len(), enabled = roster.enabled().count()))]
pub fn combine_agents(
    roster: &AgentRoster,
    series: &BTreeMap<AgentKind, Vec<AgentForecast>>,
    dates: &[chrono::NaiveDate],
) -> Vec<CombinedForecast> {
    dates
        .iter()
        .enumerate()
        .map(|(index, &timestamp)| {
            let mut weighted_sum = 0.0;
            let mut total_weight = 0.0;
            let mut widths = Vec::new();

            for agent in roster.enabled() {
                let Some(forecast) = series.get(&agent.id).and_then(|s| s.get(index)) else {
                    continue;
                };
                let weight = agent.weight();
                weighted_sum += normalize(agent.id, forecast.value) * weight;
                total_weight += weight;
                widths.push(forecast.confidence_width());
            }

            let combined_value = if total_weight > 0.0 {
                weighted_sum / total_weight
            } else {
                NEUTRAL_OUTLOOK
            };
            let avg_width = if widths.is_empty() {
                DEFAULT_CONFIDENCE_WIDTH
            } else {
                widths.iter().sum::<f64>() / widths.len() as f64
            };

            let consensus = consensus_for(avg_width);
            let half = avg_width * COMBINED_WIDTH_FACTOR / 2.0;

            CombinedForecast {
                timestamp,
                combined_value,
                confidence: (
                    (combined_value - half).max(0.0),
                    (combined_value + half).min(100.0),
                ),
                consensus,
                risk_level: risk_for(combined_value, consensus),
            }
        })
        .collect()
}

/// 窗口统计
pub fn insights(combined: &[CombinedForecast]) -> CombinedForecastInsights {
    let average_outlook = if combined.is_empty() {
        NEUTRAL_OUTLOOK
    } else {
        combined.iter().map(|c| c.combined_value).sum::<f64>() / combined.len() as f64
    };

    CombinedForecastInsights {
        average_outlook,
        high_confidence_days: combined.iter().filter(|c| c.consensus == Consensus::High).count(),
        conflicting_days: combined.iter().filter(|c| c.consensus == Consensus::Low).count(),
        high_risk_days: combined.iter().filter(|c| c.risk_level == RiskLevel::High).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dates(n: u32) -> Vec<NaiveDate> {
        crate::engine::market_conditions::generate_dates(
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            n,
        )
    }

    fn flat_series(dates: &[NaiveDate], value: f64, width: f64) -> Vec<AgentForecast> {
        dates
            .iter()
            .map(|&d| AgentForecast {
                timestamp: d,
                value,
                confidence: (value - width / 2.0, value + width / 2.0),
            })
            .collect()
    }

    #[test]
    fn test_normalize_ranges() {
        assert_eq!(normalize(AgentKind::Demand, 120.0), 100.0);
        assert!((normalize(AgentKind::Elasticity, -0.5) - 41.675).abs() < 1e-9);
        assert_eq!(normalize(AgentKind::Ltb, 0.25), 100.0);
        assert_eq!(normalize(AgentKind::Trend, 150.0), 100.0);
        assert_eq!(normalize(AgentKind::Weather, -20.0), 30.0);
        assert_eq!(normalize(AgentKind::Macro, -8.0), 0.0);
        assert_eq!(normalize(AgentKind::Macro, 8.0), 100.0);
        assert_eq!(normalize(AgentKind::Cost, 40.0), 60.0);
    }

    #[test]
    fn test_consensus_and_risk() {
        assert_eq!(consensus_for(4.9), Consensus::High);
        assert_eq!(consensus_for(5.0), Consensus::Medium);
        assert_eq!(consensus_for(15.0), Consensus::Low);

        assert_eq!(risk_for(85.0, Consensus::Low), RiskLevel::High);
        assert_eq!(risk_for(85.0, Consensus::High), RiskLevel::Medium);
        assert_eq!(risk_for(50.0, Consensus::Low), RiskLevel::Medium);
        assert_eq!(risk_for(50.0, Consensus::Medium), RiskLevel::Low);
    }

    #[test]
    fn test_single_agent_passthrough() {
        let dates = dates(3);
        let mut roster = AgentRoster::default();
        for kind in AgentKind::ALL {
            roster.set_agent_enabled(kind, kind == AgentKind::Demand);
        }
        let series = BTreeMap::from([(AgentKind::Demand, flat_series(&dates, 64.0, 8.0))]);

        let combined = combine_agents(&roster, &series, &dates);
        assert_eq!(combined.len(), 3);
        for c in combined {
            assert!((c.combined_value - 64.0).abs() < 1e-9);
            assert_eq!(c.consensus, Consensus::Medium);
            assert!((c.confidence.0 - 60.8).abs() < 1e-9);
            assert!((c.confidence.1 - 67.2).abs() < 1e-9);
            assert_eq!(c.risk_level, RiskLevel::Low);
        }
    }

    #[test]
    fn test_no_enabled_agents_neutral() {
        let dates = dates(2);
        let mut roster = AgentRoster::default();
        for kind in AgentKind::ALL {
            roster.set_agent_enabled(kind, false);
        }
        let combined = combine_agents(&roster, &BTreeMap::new(), &dates);
        for c in &combined {
            assert_eq!(c.combined_value, NEUTRAL_OUTLOOK);
            assert_eq!(c.consensus, Consensus::Medium);
        }
        assert_eq!(insights(&combined).average_outlook, NEUTRAL_OUTLOOK);
    }

    #[test]
    fn test_bounds_stay_in_percent_range() {
        let dates = dates(4);
        let roster = AgentRoster::default();
        let series = BTreeMap::from([
            (AgentKind::Demand, flat_series(&dates, 100.0, 40.0)),
            (AgentKind::Ltb, flat_series(&dates, 0.25, 40.0)),
        ]);
        for c in combine_agents(&roster, &series, &dates) {
            assert!(c.confidence.0 >= 0.0 && c.confidence.1 <= 100.0);
            assert!((0.0..=100.0).contains(&c.combined_value));
            assert_eq!(c.risk_level, RiskLevel::High);
        }
    }
}
