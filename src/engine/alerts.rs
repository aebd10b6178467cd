// ==========================================
// 酒店收益管理系统 - 预警检测
// ==========================================
// 职责: 从预测快照派生预警
// 规则:
//   需求 ≥ 90              → demand / high
//   建议价 > 约束最高售价   → price / medium（每日一条,取最高建议价）
//   |天气影响| ≥ 15        → weather / medium
//   浏览预订比 < 0.08       → conversion / high
//   活动加成 > 15           → event / low
// 预警 id = "{类型}-{日期}"
// ==========================================

use crate::domain::alert::Alert;
use crate::domain::forecast::ForecastData;
use crate::domain::pricing::PriceRecommendation;
use crate::domain::types::{AlertSeverity, AlertType};
use crate::i18n::t_with_args;
use chrono::NaiveDate;
use tracing::{debug, instrument};

pub const HIGH_DEMAND_THRESHOLD: f64 = 90.0;
pub const SEVERE_WEATHER_THRESHOLD: f64 = 15.0;
pub const LOW_LOOK_TO_BOOK_THRESHOLD: f64 = 0.08;
pub const EVENT_OPPORTUNITY_THRESHOLD: f64 = 15.0;

// ==========================================
// AlertDetector - 预警检测器
// ==========================================
pub struct AlertDetector {
    max_price: f64,
}

impl AlertDetector {
    /// # 参数
    /// - max_price: 约束中的最高售价
    pub fn new(max_price: f64) -> Self {
        Self { max_price }
    }

    /// 检测预警（按日期、规则顺序输出）
    #[instrument(skip_all, fields(days = forecast_data.len(), max_price = self.max_price))]
    pub fn detect(
        &self,
        forecast_data: &[ForecastData],
        recommendations: &[PriceRecommendation],
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for f in forecast_data {
            let date = f.timestamp;
            let date_str = date.format("%Y-%m-%d").to_string();

            if f.predicted_demand >= HIGH_DEMAND_THRESHOLD {
                alerts.push(build_alert(
                    AlertType::Demand,
                    AlertSeverity::High,
                    date,
                    &[("date", &date_str), ("value", &format!("{:.0}", f.predicted_demand))],
                ));
            }

            if let Some(rec) = self.highest_over_ceiling(recommendations, date) {
                alerts.push(build_alert(
                    AlertType::Price,
                    AlertSeverity::Medium,
                    date,
                    &[
                        ("date", &date_str),
                        ("room", &rec.room_type),
                        ("segment", &rec.segment),
                        ("price", &format!("{:.0}", rec.recommended_price)),
                        ("max", &format!("{:.0}", self.max_price)),
                    ],
                ));
            }

            if f.weather_impact.abs() >= SEVERE_WEATHER_THRESHOLD {
                alerts.push(build_alert(
                    AlertType::Weather,
                    AlertSeverity::Medium,
                    date,
                    &[("date", &date_str), ("value", &format!("{:.1}", f.weather_impact))],
                ));
            }

            if f.look_to_book_ratio < LOW_LOOK_TO_BOOK_THRESHOLD {
                alerts.push(build_alert(
                    AlertType::Conversion,
                    AlertSeverity::High,
                    date,
                    &[("date", &date_str), ("value", &format!("{:.3}", f.look_to_book_ratio))],
                ));
            }

            if f.event_boost > EVENT_OPPORTUNITY_THRESHOLD {
                alerts.push(build_alert(
                    AlertType::Event,
                    AlertSeverity::Low,
                    date,
                    &[("date", &date_str), ("value", &format!("{:.1}", f.event_boost))],
                ));
            }
        }

        debug!(count = alerts.len(), "预警检测完成");
        alerts
    }

    fn highest_over_ceiling<'a>(
        &self,
        recommendations: &'a [PriceRecommendation],
        date: NaiveDate,
    ) -> Option<&'a PriceRecommendation> {
        recommendations
            .iter()
            .filter(|r| r.timestamp == date && r.recommended_price > self.max_price)
            .max_by(|a, b| a.recommended_price.total_cmp(&b.recommended_price))
    }
}

fn build_alert(
    alert_type: AlertType,
    severity: AlertSeverity,
    date: NaiveDate,
    args: &[(&str, &str)],
) -> Alert {
    let key = alert_type.as_str();
    Alert {
        id: format!("{}-{}", key, date.format("%Y-%m-%d")),
        title: t_with_args(&format!("alert.{}.title", key), &[]),
        description: t_with_args(&format!("alert.{}.description", key), args),
        alert_type,
        severity,
        date,
        is_read: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()
    }

    fn calm_day() -> ForecastData {
        ForecastData {
            timestamp: date(),
            predicted_demand: 75.0,
            price_elasticity: -1.5,
            look_to_book_ratio: 0.12,
            trend_price: 100.0,
            weather_impact: 3.0,
            event_boost: 1.0,
            macro_impact: 0.0,
            cost_estimate: 40.0,
        }
    }

    fn rec(room: &str, price: f64) -> PriceRecommendation {
        PriceRecommendation {
            timestamp: date(),
            room_type: room.to_string(),
            segment: "default".to_string(),
            recommended_price: price,
            min_price: 75.0,
            max_price: 630.0,
            current_price: price,
            expected_occupancy: 70.0,
            expected_revenue: 0.0,
        }
    }

    #[test]
    fn test_calm_day_no_alerts() {
        let alerts = AlertDetector::new(500.0).detect(&[calm_day()], &[rec("standard", 110.0)]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let day = ForecastData {
            predicted_demand: 95.0,
            weather_impact: -18.0,
            look_to_book_ratio: 0.06,
            event_boost: 28.0,
            ..calm_day()
        };
        let recs = vec![rec("suite", 520.0), rec("executive", 610.0)];
        let alerts = AlertDetector::new(500.0).detect(&[day], &recs);

        let types: Vec<AlertType> = alerts.iter().map(|a| a.alert_type).collect();
        assert_eq!(
            types,
            vec![
                AlertType::Demand,
                AlertType::Price,
                AlertType::Weather,
                AlertType::Conversion,
                AlertType::Event
            ]
        );
        assert_eq!(alerts[0].id, "demand-2026-07-10");
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[1].severity, AlertSeverity::Medium);
        assert!(alerts[1].description.contains("executive"));
        assert_eq!(alerts[3].severity, AlertSeverity::High);
        assert_eq!(alerts[4].severity, AlertSeverity::Low);
        assert!(alerts.iter().all(|a| !a.is_read));
    }

    #[test]
    fn test_thresholds_are_inclusive_where_stated() {
        let day = ForecastData {
            predicted_demand: 90.0,
            weather_impact: 15.0,
            look_to_book_ratio: 0.08,
            event_boost: 15.0,
            ..calm_day()
        };
        let types: Vec<AlertType> = AlertDetector::new(500.0)
            .detect(&[day], &[rec("standard", 500.0)])
            .iter()
            .map(|a| a.alert_type)
            .collect();
        assert_eq!(types, vec![AlertType::Demand, AlertType::Weather]);
    }
}
