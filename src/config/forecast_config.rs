// ==========================================
// 酒店收益管理系统 - 预测配置
// ==========================================
// 职责: 预测窗口 / 随机种子 / 概率 / 定价约束 的配置对象
// 存储: JSON 文件（字段缺省时取默认值）
// ==========================================

use crate::domain::pricing::OptimizationConstraints;
use crate::engine::market_conditions::{DEFAULT_EVENT_PROBABILITY, DEFAULT_HOLIDAY_PROBABILITY};
use crate::engine::price_recommendation::DEFAULT_MIN_MARGIN_RATIO;
use crate::i18n;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认预测天数
pub const DEFAULT_HORIZON_DAYS: u32 = 30;
/// 预测天数上限
pub const MAX_HORIZON_DAYS: u32 = 366;
/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";
/// 起始日期允许的年份
pub const SUPPORTED_START_YEARS: std::ops::RangeInclusive<i32> = 1900..=9000;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置解析失败: {0}")]
    Parse(String),

    #[error("配置无效: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ForecastConfig - 预测配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 随机种子（None = 每次生成新种子，并记录在快照上）
    pub seed: Option<u64>,

    /// 预测天数
    pub horizon_days: u32,

    /// 起始日期（None = 本地今日）
    pub start_date: Option<NaiveDate>,

    /// 节假日概率
    pub holiday_probability: f64,

    /// 活动概率
    pub event_probability: f64,

    /// 建议价相对成本的最低倍数
    pub min_margin_ratio: f64,

    /// 界面/预警语言
    pub locale: String,

    /// 定价约束
    pub constraints: OptimizationConstraints,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seed: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
            start_date: None,
            holiday_probability: DEFAULT_HOLIDAY_PROBABILITY,
            event_probability: DEFAULT_EVENT_PROBABILITY,
            min_margin_ratio: DEFAULT_MIN_MARGIN_RATIO,
            locale: DEFAULT_LOCALE.to_string(),
            constraints: OptimizationConstraints::default(),
        }
    }
}

impl ForecastConfig {
    /// 固定种子的配置
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::Invalid(format!(
                "预测天数超出范围[1,{}]: {}",
                MAX_HORIZON_DAYS, self.horizon_days
            )));
        }

        if let Some(start) = self.start_date {
            if !SUPPORTED_START_YEARS.contains(&start.year()) {
                return Err(ConfigError::Invalid(format!(
                    "起始日期年份超出范围[{},{}]: {}",
                    SUPPORTED_START_YEARS.start(),
                    SUPPORTED_START_YEARS.end(),
                    start
                )));
            }
        }

        for (name, p) in [
            ("holiday_probability", self.holiday_probability),
            ("event_probability", self.event_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{} 超出范围[0,1]: {}", name, p)));
            }
        }

        if !self.min_margin_ratio.is_finite() || self.min_margin_ratio < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "最低毛利倍数必须 ≥ 1: {}",
                self.min_margin_ratio
            )));
        }

        if !i18n::is_supported(&self.locale) {
            return Err(ConfigError::Invalid(format!("不支持的语言: {}", self.locale)));
        }

        self.constraints
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ForecastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.horizon_days, 30);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{"seed": 7, "constraints": {"max_price": 400}}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.horizon_days, DEFAULT_HORIZON_DAYS);
        assert_eq!(config.constraints.max_price, 400.0);
        assert_eq!(config.constraints.min_price, 80.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad = [
            ForecastConfig {
                horizon_days: 0,
                ..Default::default()
            },
            ForecastConfig {
                event_probability: 1.5,
                ..Default::default()
            },
            ForecastConfig {
                min_margin_ratio: 0.9,
                ..Default::default()
            },
            ForecastConfig {
                locale: "fr".to_string(),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_start_date_outside_supported_years() {
        for date in [NaiveDate::MAX, NaiveDate::MIN, NaiveDate::from_ymd_opt(1800, 1, 1).unwrap()] {
            let config = ForecastConfig {
                start_date: Some(date),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }

        let config = ForecastConfig {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
