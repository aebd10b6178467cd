// ==========================================
// 酒店收益管理系统 - 市场状况
// ==========================================
// 职责: 每日合成市场特征向量,驱动全部代理公式
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单日市场状况
///
/// 生成后不可变；同一快照内所有代理共享同一组市场状况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCondition {
    /// 日期（序列化为 YYYY-MM-DD）
    pub date: NaiveDate,
    /// 窗口内日序号（0 起）
    pub index: usize,
    pub is_weekend: bool,
    /// 节假日（伯努利抽样）
    pub is_holiday: bool,
    /// 当日有活动（伯努利抽样）
    pub has_event: bool,
    /// 季节因子: sin(index/30·2π)·0.3 + 1
    pub seasonal_factor: f64,
    /// 趋势因子: 1 + index·0.002
    pub trend_factor: f64,
    /// 周度天气基线: sin(index/7·π)·15
    pub base_weather_score: f64,
    /// 经济景气度: 0.8 + sin(index/15·π)·0.2
    pub economic_sentiment: f64,
}

impl MarketCondition {
    /// ISO 日期字符串
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// 日历视图单日汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub has_event: bool,
    pub predicted_demand: f64,
    /// 当日（过滤后）建议价均值，无建议时为 0
    pub average_recommended_price: f64,
    /// 当日预警类型
    pub alert_types: Vec<crate::domain::types::AlertType>,
}
