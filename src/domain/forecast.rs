// ==========================================
// 酒店收益管理系统 - 预测数据
// ==========================================
// 职责: 单代理预测、按日合并预测、多代理综合预测
// ==========================================

use crate::domain::types::{AgentKind, Consensus, RiskLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AgentForecast - 单代理单日预测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentForecast {
    pub timestamp: NaiveDate,
    pub value: f64,
    /// 置信区间 [下界, 上界]
    pub confidence: (f64, f64),
}

impl AgentForecast {
    /// 置信区间宽度
    pub fn confidence_width(&self) -> f64 {
        self.confidence.1 - self.confidence.0
    }
}

// ==========================================
// ForecastData - 按日合并的预测记录
// ==========================================
// 字段口径固定,每个代理对应一个字段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub timestamp: NaiveDate,
    /// 预测需求（入住率口径，取整）
    pub predicted_demand: f64,
    pub price_elasticity: f64,
    pub look_to_book_ratio: f64,
    pub trend_price: f64,
    pub weather_impact: f64,
    pub event_boost: f64,
    pub macro_impact: f64,
    pub cost_estimate: f64,
}

impl ForecastData {
    /// 读取某代理对应字段
    pub fn value_of(&self, kind: AgentKind) -> f64 {
        match kind {
            AgentKind::Demand => self.predicted_demand,
            AgentKind::Elasticity => self.price_elasticity,
            AgentKind::Ltb => self.look_to_book_ratio,
            AgentKind::Trend => self.trend_price,
            AgentKind::Event => self.event_boost,
            AgentKind::Weather => self.weather_impact,
            AgentKind::Macro => self.macro_impact,
            AgentKind::Cost => self.cost_estimate,
        }
    }

    /// 最低保本价（成本 × 毛利倍数）
    pub fn margin_floor(&self, min_margin_ratio: f64) -> f64 {
        self.cost_estimate * min_margin_ratio
    }
}

// ==========================================
// CombinedForecast - 多代理综合预测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedForecast {
    pub timestamp: NaiveDate,
    /// 归一化后加权值 [0, 100]
    pub combined_value: f64,
    pub confidence: (f64, f64),
    pub consensus: Consensus,
    pub risk_level: RiskLevel,
}

/// 合并预测概览（窗口内统计）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedForecastInsights {
    pub average_outlook: f64,
    pub high_confidence_days: usize,
    pub conflicting_days: usize,
    pub high_risk_days: usize,
}
