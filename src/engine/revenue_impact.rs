// ==========================================
// 酒店收益管理系统 - 收益影响分析
// ==========================================
// 职责: [from, to] 区间内 预计 / 优化 / 实际 日收益及汇总
// 规则: 优化收益较预计提升 8%~15%；实际收益仅存在于 as_of 及之前
// ==========================================

use crate::config::forecast_config::MAX_HORIZON_DAYS;
use crate::domain::revenue::{RevenueImpactMetrics, RevenueImpactPoint, RevenueImpactReport};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::noise::NoiseSource;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::instrument;

const BASE_DAILY_REVENUE: f64 = 45000.0;
const SEASONAL_AMPLITUDE: f64 = 5000.0;
const REVENUE_JITTER: f64 = 3000.0;
const WEEKEND_MULTIPLIER: f64 = 1.25;

/// 分析区间最长天数
pub const MAX_ANALYSIS_DAYS: i64 = MAX_HORIZON_DAYS as i64 * 10;

/// 校验分析区间: from ≤ to 且不超过 MAX_ANALYSIS_DAYS 天
pub fn check_range(from: NaiveDate, to: NaiveDate) -> EngineResult<()> {
    if from > to {
        return Err(EngineError::ReversedRange { from, to });
    }
    let days = (to - from).num_days() + 1;
    if days > MAX_ANALYSIS_DAYS {
        return Err(EngineError::RangeTooLong {
            days,
            max: MAX_ANALYSIS_DAYS,
        });
    }
    Ok(())
}

/// 收益影响分析
///
/// # 错误
/// from > to 或区间超过 MAX_ANALYSIS_DAYS 天
#[instrument(skip(noise))]
pub fn analyze_revenue_impact(
    from: NaiveDate,
    to: NaiveDate,
    as_of: NaiveDate,
    noise: &mut NoiseSource,
) -> EngineResult<RevenueImpactReport> {
    check_range(from, to)?;

    let day_count = (to - from).num_days() as usize + 1;
    let mut points = Vec::with_capacity(day_count);

    for offset in 0..day_count {
        let date = from + Duration::days(offset as i64);
        let base = BASE_DAILY_REVENUE
            + (offset as f64 * 0.2).sin() * SEASONAL_AMPLITUDE
            + noise.jitter(REVENUE_JITTER);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let projected = (base * if weekend { WEEKEND_MULTIPLIER } else { 1.0 }).round();

        let lift = 0.08 + noise.unit() * 0.07;
        let optimized = (projected * (1.0 + lift)).round();

        let actual = if date <= as_of {
            Some((projected * (1.0 + lift) * (0.9 + noise.unit() * 0.2)).round())
        } else {
            None
        };

        points.push(RevenueImpactPoint {
            date,
            projected_revenue: projected,
            optimized_revenue: optimized,
            actual_revenue: actual,
        });
    }

    let metrics = summarize_points(&points);
    Ok(RevenueImpactReport {
        from,
        to,
        as_of,
        points,
        metrics,
    })
}

/// 区间汇总（缺失的实际收益按 0 计）
pub fn summarize_points(points: &[RevenueImpactPoint]) -> RevenueImpactMetrics {
    let total_projected: f64 = points.iter().map(|p| p.projected_revenue).sum();
    let total_optimized: f64 = points.iter().map(|p| p.optimized_revenue).sum();
    let total_actual: f64 = points.iter().filter_map(|p| p.actual_revenue).sum();

    let projected_vs_actual = total_actual - total_projected;
    let day_count = points.len();

    RevenueImpactMetrics {
        total_projected,
        total_optimized,
        total_actual,
        projected_vs_actual,
        optimized_vs_actual: total_actual - total_optimized,
        projected_vs_actual_pct: if total_projected > 0.0 {
            projected_vs_actual / total_projected * 100.0
        } else {
            0.0
        },
        avg_daily_impact: if day_count > 0 {
            projected_vs_actual / day_count as f64
        } else {
            0.0
        },
        day_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_actual_only_up_to_as_of() {
        let report =
            analyze_revenue_impact(d(5, 15), d(6, 15), d(5, 28), &mut NoiseSource::new(8)).unwrap();
        assert_eq!(report.points.len(), 32);
        assert_eq!(report.metrics.day_count, 32);
        for p in &report.points {
            assert_eq!(p.actual_revenue.is_some(), p.date <= d(5, 28));
            assert!(p.optimized_revenue >= p.projected_revenue);
            // 8%~15% 提升（取整容差 1）
            assert!(p.optimized_revenue <= (p.projected_revenue * 1.15).round() + 1.0);
        }
    }

    #[test]
    fn test_single_day_range() {
        let report =
            analyze_revenue_impact(d(5, 20), d(5, 20), d(5, 1), &mut NoiseSource::new(1)).unwrap();
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.metrics.total_actual, 0.0);
        assert!(report.metrics.projected_vs_actual < 0.0);
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            analyze_revenue_impact(d(6, 1), d(5, 1), d(5, 1), &mut NoiseSource::new(1)),
            Err(EngineError::ReversedRange { .. })
        ));
    }

    #[test]
    fn test_overlong_range_rejected() {
        let from = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(matches!(
            analyze_revenue_impact(from, to, from, &mut NoiseSource::new(1)),
            Err(EngineError::RangeTooLong { .. })
        ));

        // 恰好上限天数仍可分析
        let to = d(1, 1) + Duration::days(MAX_ANALYSIS_DAYS - 1);
        assert!(check_range(d(1, 1), to).is_ok());
        assert!(check_range(d(1, 1), to + Duration::days(1)).is_err());
    }

    #[test]
    fn test_summarize_points() {
        let points = vec![
            RevenueImpactPoint {
                date: d(5, 1),
                projected_revenue: 100.0,
                optimized_revenue: 110.0,
                actual_revenue: Some(120.0),
            },
            RevenueImpactPoint {
                date: d(5, 2),
                projected_revenue: 100.0,
                optimized_revenue: 112.0,
                actual_revenue: None,
            },
        ];
        let m = summarize_points(&points);
        assert_eq!(m.total_projected, 200.0);
        assert_eq!(m.total_optimized, 222.0);
        assert_eq!(m.total_actual, 120.0);
        assert_eq!(m.projected_vs_actual, -80.0);
        assert_eq!(m.optimized_vs_actual, -102.0);
        assert_eq!(m.projected_vs_actual_pct, -40.0);
        assert_eq!(m.avg_daily_impact, -40.0);
    }
}
