// ==========================================
// 酒店收益管理系统 - 预测代理配置
// ==========================================
// 职责: 代理与子因子的静态配置、启停状态
// 说明: 子因子启停只影响综合预测权重,不改变单代理公式
// ==========================================

use crate::domain::types::AgentKind;
use serde::{Deserialize, Serialize};

/// 子因子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubFactor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    /// 影响占比（%）
    pub impact: f64,
}

/// 预测代理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentKind,
    pub name: String,
    pub description: String,
    /// 展示颜色（十六进制）
    pub color: String,
    pub enabled: bool,
    pub sub_factors: Vec<SubFactor>,
}

impl Agent {
    /// 综合预测权重 = 已启用子因子影响占比之和 / 100
    pub fn weight(&self) -> f64 {
        self.sub_factors
            .iter()
            .filter(|sf| sf.enabled)
            .map(|sf| sf.impact)
            .sum::<f64>()
            / 100.0
    }
}

// ==========================================
// AgentRoster - 代理名册
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoster {
    agents: Vec<Agent>,
}

impl AgentRoster {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, kind: AgentKind) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == kind)
    }

    /// 已启用代理（保持名册顺序）
    pub fn enabled(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.enabled)
    }

    pub fn is_enabled(&self, kind: AgentKind) -> bool {
        self.get(kind).map(|a| a.enabled).unwrap_or(false)
    }

    /// 启停代理
    ///
    /// 返回 false 表示名册中没有该代理
    pub fn set_agent_enabled(&mut self, kind: AgentKind, enabled: bool) -> bool {
        match self.agents.iter_mut().find(|a| a.id == kind) {
            Some(agent) => {
                agent.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// 启停子因子
    ///
    /// 返回 false 表示代理或子因子不存在
    pub fn set_sub_factor_enabled(
        &mut self,
        kind: AgentKind,
        sub_factor_id: &str,
        enabled: bool,
    ) -> bool {
        let Some(agent) = self.agents.iter_mut().find(|a| a.id == kind) else {
            return false;
        };
        match agent.sub_factors.iter_mut().find(|sf| sf.id == sub_factor_id) {
            Some(sf) => {
                sf.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::new(default_agents())
    }
}

// ==========================================
// 默认配置
// ==========================================

fn sf(id: &str, name: &str, description: &str, enabled: bool, impact: f64) -> SubFactor {
    SubFactor {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        enabled,
        impact,
    }
}

fn agent(
    id: AgentKind,
    name: &str,
    description: &str,
    color: &str,
    sub_factors: Vec<SubFactor>,
) -> Agent {
    Agent {
        id,
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        enabled: true,
        sub_factors,
    }
}

/// 默认代理名册（全部启用）
pub fn default_agents() -> Vec<Agent> {
    AgentKind::ALL
        .iter()
        .map(|&kind| match kind {
            AgentKind::Demand => agent(
                kind,
                "Demand Agent",
                "Predicts future room demand based on historical bookings, seasonality, and events",
                "#3b82f6",
                default_sub_factors(kind),
            ),
            AgentKind::Elasticity => agent(
                kind,
                "Elasticity Agent",
                "Estimates price elasticity across room types and customer segments, including competitor pressure",
                "#10b981",
                default_sub_factors(kind),
            ),
            AgentKind::Ltb => agent(
                kind,
                "Look-to-Book Agent",
                "Predicts conversion rate based on traffic and booking trends",
                "#8b5cf6",
                default_sub_factors(kind),
            ),
            AgentKind::Trend => agent(
                kind,
                "Price Trend Agent",
                "Projects future average prices using time-series analysis",
                "#ef4444",
                default_sub_factors(kind),
            ),
            AgentKind::Event => agent(
                kind,
                "Event Impact Agent",
                "Quantifies the impact of nearby events on demand",
                "#f97316",
                default_sub_factors(kind),
            ),
            AgentKind::Weather => agent(
                kind,
                "Weather Impact Agent",
                "Estimates the influence of weather conditions on room occupancy",
                "#06b6d4",
                default_sub_factors(kind),
            ),
            AgentKind::Macro => agent(
                kind,
                "Macro Economy Agent",
                "Tracks macroeconomic conditions that shift travel budgets",
                "#eab308",
                default_sub_factors(kind),
            ),
            AgentKind::Cost => agent(
                kind,
                "Cost Agent",
                "Forecasts operational costs to maintain profitability",
                "#64748b",
                default_sub_factors(kind),
            ),
        })
        .collect()
}

/// 各代理默认子因子
pub fn default_sub_factors(kind: AgentKind) -> Vec<SubFactor> {
    match kind {
        AgentKind::Demand => vec![
            sf("day_of_week", "Day-of-Week Seasonality", "Fourier weekly patterns for booking behavior", true, 35.2),
            sf("long_term_trend", "Long-Term Trend", "Logistic/spline modeling of historical booking trends", true, 28.7),
            sf("lag_momentum", "Lag Momentum", "AR lags 1-14 days for booking momentum effects", true, 22.1),
            sf("school_holiday", "School-Holiday Calendar", "Binary calendar flags for school holiday periods", true, 14.0),
        ],
        AgentKind::Elasticity => vec![
            sf("room_type_segment", "Room-Type Segment", "Lets own-price elasticity differ for standard, deluxe, suite, etc.", true, 38.4),
            sf("lead_time_bucket", "Lead-Time Bucket", "Captures urgency sensitivity (0-1 d, 2-7 d, 8-30 d, 30+ d)", true, 32.1),
            sf("customer_segment", "Customer Segment", "Distinguishes corporate, OTA, leisure, loyalty-member behaviour", true, 29.7),
            sf("our_promo_flag", "Our Promo Flag", "Indicates if today's rate has a promo or discount", true, 24.3),
            sf("median_competitor_price", "Median Competitor Price", "Current market ADR benchmark", true, 35.8),
            sf("competitor_occupancy_proxy", "Competitor Occupancy Proxy", "Rate-closed or rooms-left pressure indicator", true, 28.5),
            sf("competitor_promo_frequency", "Competitor Promo Frequency", "Rolling 7-day share of days each rival ran a promo", true, 22.9),
            sf("competitor_inventory_parity", "Competitor Inventory Parity", "Ratio of competitor rooms left vs. ours", false, 19.6),
            sf("graph_topology_radius", "Graph Topology Radius", "Whether to include rivals within 1 km, 3 km, 5 km", true, 16.8),
            sf("cross_channel_price_gap", "Cross-Channel Price Gap", "Difference between our direct web price and OTA price", false, 12.4),
        ],
        AgentKind::Ltb => vec![
            sf("session_depth", "Session Depth", "Page views and dwell time indicating booking intent", true, 38.9),
            sf("device_family", "Device Family", "Conversion rates vary by mobile, desktop, tablet usage", true, 27.4),
            sf("referral_channel", "Referral Channel", "Booking probability by SEM, social, direct traffic", true, 20.3),
            sf("payment_friction", "Payment Friction", "Failed card rate impact on conversion probability", true, 13.4),
        ],
        AgentKind::Trend => vec![
            sf("market_adr_index", "Market ADR Index", "STR reports and OTA scraping for market benchmarks", true, 45.1),
            sf("hotel_supply_growth", "Hotel Supply Growth", "New rooms pipeline affecting market pricing", true, 32.6),
            sf("tourism_arrivals", "Tourism Arrivals YoY", "Year-over-year tourism growth trends", true, 22.3),
            sf("currency_fx_rate", "Currency FX Rate", "Foreign exchange impact for international guests", false, 15.8),
        ],
        AgentKind::Event => vec![
            sf("conferences_exhibitions", "Conferences & Exhibitions", "Business conferences and trade show impacts", true, 34.7),
            sf("city_festivals", "City Festivals", "Local cultural and entertainment festivals", true, 28.9),
            sf("major_sports_games", "Major Sports Games", "Professional and major sporting events", true, 25.2),
            sf("public_holidays", "Public Holidays", "National and local holiday periods", true, 11.2),
        ],
        AgentKind::Weather => vec![
            sf("temperature_deviation", "Temperature Deviation", "Variance from seasonal norms affecting demand", true, 41.8),
            sf("precipitation_probability", "Precipitation Probability", "Rain and severe weather impact on bookings", true, 35.5),
            sf("severe_weather_alerts", "Severe-Weather Alerts", "Emergency weather warnings affecting travel", true, 22.7),
            sf("uv_heat_index", "UV / Heat Index", "Heat index for resort and leisure demand", false, 16.3),
        ],
        AgentKind::Macro => vec![
            sf("gdp_yoy", "GDP YoY", "Year-over-year GDP growth affecting travel demand", true, 38.4),
            sf("inflation_cpi", "Inflation CPI", "Consumer price index impact on discretionary spending", true, 29.1),
            sf("unemployment_rate", "Unemployment Rate", "Employment levels affecting travel budgets", true, 22.8),
            sf("consumer_sentiment", "Consumer Sentiment Index", "Consumer confidence and spending willingness", true, 16.7),
        ],
        AgentKind::Cost => vec![
            sf("operating_costs_per_room", "Operating Costs per Occupied Room", "Variable costs per occupied room night", true, 39.4),
            sf("energy_cost_index", "Energy Cost Index", "Electricity, heating, and cooling cost trends", true, 28.1),
            sf("labour_hourly_rate", "Labour Hourly Rate", "Staffing and service-related cost escalation", true, 21.7),
            sf("maintenance_capex", "Maintenance Cap-Ex Plan", "Planned capital expenditure for property upkeep", false, 10.8),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_covers_all_agents() {
        let roster = AgentRoster::default();
        assert_eq!(roster.agents().len(), AgentKind::ALL.len());
        for kind in AgentKind::ALL {
            let agent = roster.get(kind).unwrap();
            assert!(agent.enabled);
            assert!(!agent.sub_factors.is_empty());
        }
    }

    #[test]
    fn test_weight_counts_enabled_sub_factors_only() {
        let roster = AgentRoster::default();
        // 成本代理: 39.4 + 28.1 + 21.7 (maintenance_capex 默认关闭)
        let w = roster.get(AgentKind::Cost).unwrap().weight();
        assert!((w - 0.892).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_agent_and_sub_factor() {
        let mut roster = AgentRoster::default();
        assert!(roster.set_agent_enabled(AgentKind::Weather, false));
        assert!(!roster.is_enabled(AgentKind::Weather));
        assert_eq!(roster.enabled().count(), AgentKind::ALL.len() - 1);

        assert!(roster.set_sub_factor_enabled(AgentKind::Demand, "lag_momentum", false));
        let w = roster.get(AgentKind::Demand).unwrap().weight();
        assert!((w - (35.2 + 28.7 + 14.0) / 100.0).abs() < 1e-9);

        assert!(!roster.set_sub_factor_enabled(AgentKind::Demand, "no_such_factor", true));
    }
}
