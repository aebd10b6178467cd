// ==========================================
// 酒店收益管理系统 - 领域类型定义
// ==========================================
// 职责: 预测代理、共识度、风险等级、告警、周期等枚举
// 红线: 代理集合是封闭的,新增代理必须在此登记
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 预测代理类型 (Agent Kind)
// ==========================================
// 规范代理集合: 8 个
// elasticity 采用"弹性图"口径(含竞争对手压力项)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Demand,     // 需求
    Elasticity, // 价格弹性
    Ltb,        // 浏览预订比
    Trend,      // 价格趋势
    Event,      // 活动影响
    Weather,    // 天气影响
    Macro,      // 宏观经济
    Cost,       // 运营成本
}

impl AgentKind {
    /// 全部代理（固定顺序，决定展示与合并顺序）
    pub const ALL: [AgentKind; 8] = [
        AgentKind::Demand,
        AgentKind::Elasticity,
        AgentKind::Ltb,
        AgentKind::Trend,
        AgentKind::Event,
        AgentKind::Weather,
        AgentKind::Macro,
        AgentKind::Cost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Demand => "demand",
            AgentKind::Elasticity => "elasticity",
            AgentKind::Ltb => "ltb",
            AgentKind::Trend => "trend",
            AgentKind::Event => "event",
            AgentKind::Weather => "weather",
            AgentKind::Macro => "macro",
            AgentKind::Cost => "cost",
        }
    }

    /// 随机流编号
    ///
    /// 每个代理使用独立的随机流，启停某个代理不会改变其他代理的抽样结果
    pub fn stream_id(&self) -> u64 {
        match self {
            AgentKind::Demand => 11,
            AgentKind::Elasticity => 12,
            AgentKind::Ltb => 13,
            AgentKind::Trend => 14,
            AgentKind::Event => 15,
            AgentKind::Weather => 16,
            AgentKind::Macro => 17,
            AgentKind::Cost => 18,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demand" => Ok(AgentKind::Demand),
            // 历史别名: elasticity-graph
            "elasticity" | "elasticity-graph" | "elasticity_graph" => Ok(AgentKind::Elasticity),
            "ltb" | "look-to-book" | "look_to_book" => Ok(AgentKind::Ltb),
            "trend" => Ok(AgentKind::Trend),
            "event" => Ok(AgentKind::Event),
            "weather" => Ok(AgentKind::Weather),
            "macro" => Ok(AgentKind::Macro),
            "cost" => Ok(AgentKind::Cost),
            other => Err(format!("未知代理类型: {}", other)),
        }
    }
}

// ==========================================
// 共识度 (Consensus)
// ==========================================
// 由各代理置信区间平均宽度决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consensus {
    High,
    Medium,
    Low,
}

impl fmt::Display for Consensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consensus::High => write!(f, "high"),
            Consensus::Medium => write!(f, "medium"),
            Consensus::Low => write!(f, "low"),
        }
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 告警类型 / 严重度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Demand,     // 需求异常
    Price,      // 价格越限
    Weather,    // 天气事件
    Conversion, // 转化率下降
    Event,      // 活动机会
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Demand => "demand",
            AlertType::Price => "price",
            AlertType::Weather => "weather",
            AlertType::Conversion => "conversion",
            AlertType::Event => "event",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demand" => Ok(AlertType::Demand),
            "price" => Ok(AlertType::Price),
            "weather" => Ok(AlertType::Weather),
            "conversion" => Ok(AlertType::Conversion),
            "event" => Ok(AlertType::Event),
            other => Err(format!("未知告警类型: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "low"),
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 统计周期 (Time Period)
// ==========================================
// 用于预订曲线 / 提前预订曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for TimePeriod {
    fn default() -> Self {
        TimePeriod::Daily
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(TimePeriod::Daily),
            "weekly" => Ok(TimePeriod::Weekly),
            "monthly" => Ok(TimePeriod::Monthly),
            "quarterly" => Ok(TimePeriod::Quarterly),
            "yearly" => Ok(TimePeriod::Yearly),
            other => Err(format!("未知统计周期: {}", other)),
        }
    }
}

// ==========================================
// 优化算法 (Optimization Algorithm)
// ==========================================
// 仅作展示,不影响计算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationAlgorithm {
    GradientDescent,
    Genetic,
    SimulatedAnnealing,
    Bayesian,
}

impl Default for OptimizationAlgorithm {
    fn default() -> Self {
        OptimizationAlgorithm::GradientDescent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_kind_round_trip_str() {
        for kind in AgentKind::ALL {
            assert_eq!(kind.as_str().parse::<AgentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_agent_kind_aliases() {
        assert_eq!("elasticity-graph".parse::<AgentKind>().unwrap(), AgentKind::Elasticity);
        assert_eq!(" LTB ".parse::<AgentKind>().unwrap(), AgentKind::Ltb);
        assert!("competitor".parse::<AgentKind>().is_err());
    }

    #[test]
    fn test_stream_ids_unique() {
        let mut ids: Vec<u64> = AgentKind::ALL.iter().map(|k| k.stream_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), AgentKind::ALL.len());
    }

    #[test]
    fn test_algorithm_serde_kebab() {
        let s = serde_json::to_string(&OptimizationAlgorithm::SimulatedAnnealing).unwrap();
        assert_eq!(s, "\"simulated-annealing\"");
    }
}
