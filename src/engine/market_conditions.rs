// ==========================================
// 酒店收益管理系统 - 市场状况生成器
// ==========================================
// 职责: 生成预测窗口日期 + 每日市场状况
// 输入: 起始日期 / 日期序列
// 输出: MarketCondition 列表（顺序与输入一致）
// ==========================================

use crate::domain::market::MarketCondition;
use crate::engine::noise::NoiseSource;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use std::f64::consts::PI;
use tracing::instrument;

/// 默认节假日概率
pub const DEFAULT_HOLIDAY_PROBABILITY: f64 = 0.05;
/// 默认活动概率
pub const DEFAULT_EVENT_PROBABILITY: f64 = 0.15;

/// 生成连续日期: start, start+1, …, start+(days-1)
///
/// 超出日历上限的日期被截断
pub fn generate_dates(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64)
        .map_while(|i| start.checked_add_signed(Duration::days(i)))
        .collect()
}

/// 以本地今日为起点生成连续日期
pub fn generate_dates_from_today(days: u32) -> Vec<NaiveDate> {
    generate_dates(Local::now().date_naive(), days)
}

// ==========================================
// MarketConditionGenerator - 市场状况生成器
// ==========================================
pub struct MarketConditionGenerator {
    holiday_probability: f64,
    event_probability: f64,
}

impl MarketConditionGenerator {
    pub fn new(holiday_probability: f64, event_probability: f64) -> Self {
        Self {
            holiday_probability,
            event_probability,
        }
    }

    /// 生成市场状况
    ///
    /// 每日先抽节假日、再抽活动，两者独立
    /// 空输入返回空列表
    #[instrument(skip(self, dates, noise), fields(days = dates.len()))]
    pub fn generate(&self, dates: &[NaiveDate], noise: &mut NoiseSource) -> Vec<MarketCondition> {
        dates
            .iter()
            .enumerate()
            .map(|(index, &date)| {
                let is_holiday = noise.chance(self.holiday_probability);
                let has_event = noise.chance(self.event_probability);
                Self::condition_for(date, index, is_holiday, has_event)
            })
            .collect()
    }

    /// 单日市场状况（确定性部分）
    pub fn condition_for(
        date: NaiveDate,
        index: usize,
        is_holiday: bool,
        has_event: bool,
    ) -> MarketCondition {
        let i = index as f64;
        MarketCondition {
            date,
            index,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_holiday,
            has_event,
            // 30 天一个季节周期
            seasonal_factor: (i / 30.0 * PI * 2.0).sin() * 0.3 + 1.0,
            // 缓慢上行
            trend_factor: 1.0 + i * 0.002,
            base_weather_score: (i / 7.0 * PI).sin() * 15.0,
            economic_sentiment: 0.8 + (i / 15.0 * PI).sin() * 0.2,
        }
    }
}

impl Default for MarketConditionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_HOLIDAY_PROBABILITY, DEFAULT_EVENT_PROBABILITY)
    }
}
