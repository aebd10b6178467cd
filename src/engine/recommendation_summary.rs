// ==========================================
// 酒店收益管理系统 - 定价建议汇总
// ==========================================
// 职责: 单日定价建议的涨/降/持平统计与收益影响估算
// ==========================================

use crate::domain::pricing::{PriceRecommendation, RecommendationSummary};
use chrono::NaiveDate;

/// 汇总指定日期的定价建议
///
/// # 参数
/// - recommendations: 全部建议（内部按日期过滤）
/// - date: 统计日期
/// - occupancy_target: 目标入住率（%），用于统计未达标条数
///
/// 当前价收益按 入住率 × (当前价/建议价) 折算，
/// 建议价收益按 建议价 × 入住率
pub fn summarize(
    recommendations: &[PriceRecommendation],
    date: NaiveDate,
    occupancy_target: f64,
) -> RecommendationSummary {
    let todays: Vec<&PriceRecommendation> =
        recommendations.iter().filter(|r| r.timestamp == date).collect();

    let increases = todays
        .iter()
        .filter(|r| r.recommended_price > r.current_price)
        .count();
    let decreases = todays
        .iter()
        .filter(|r| r.recommended_price < r.current_price)
        .count();
    let unchanged = todays.len() - increases - decreases;

    let average_change_pct = if todays.is_empty() {
        0.0
    } else {
        todays.iter().map(|r| r.change_pct()).sum::<f64>() / todays.len() as f64
    };

    let current_revenue: f64 = todays
        .iter()
        .filter(|r| r.recommended_price > 0.0)
        .map(|r| {
            let occupancy = r.expected_occupancy / 100.0 * (r.current_price / r.recommended_price);
            r.current_price * occupancy
        })
        .sum();
    let recommended_revenue: f64 = todays
        .iter()
        .map(|r| r.recommended_price * r.expected_occupancy / 100.0)
        .sum();

    let revenue_impact = recommended_revenue - current_revenue;
    let revenue_impact_pct = if current_revenue > 0.0 {
        revenue_impact / current_revenue * 100.0
    } else {
        0.0
    };

    RecommendationSummary {
        date,
        total: todays.len(),
        increases,
        decreases,
        unchanged,
        average_change_pct,
        current_revenue,
        recommended_revenue,
        revenue_impact,
        revenue_impact_pct,
        below_occupancy_target: todays
            .iter()
            .filter(|r| r.expected_occupancy < occupancy_target)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn rec(date: NaiveDate, recommended: f64, current: f64, occupancy: f64) -> PriceRecommendation {
        PriceRecommendation {
            timestamp: date,
            room_type: "standard".to_string(),
            segment: "default".to_string(),
            recommended_price: recommended,
            min_price: 75.0,
            max_price: 180.0,
            current_price: current,
            expected_occupancy: occupancy,
            expected_revenue: 0.0,
        }
    }

    #[test]
    fn test_counts_and_average() {
        let recs = vec![
            rec(date(), 110.0, 100.0, 80.0),
            rec(date(), 90.0, 100.0, 90.0),
            rec(date(), 100.0, 100.0, 60.0),
            rec(date().succ_opt().unwrap(), 200.0, 100.0, 50.0),
        ];
        let s = summarize(&recs, date(), 80.0);
        assert_eq!(s.total, 3);
        assert_eq!((s.increases, s.decreases, s.unchanged), (1, 1, 1));
        assert!(s.average_change_pct.abs() < 1e-9);
        assert_eq!(s.below_occupancy_target, 1);
    }

    #[test]
    fn test_revenue_impact() {
        let s = summarize(&[rec(date(), 120.0, 100.0, 60.0)], date(), 80.0);
        // 当前: 100 × 0.6 × (100/120) = 50；建议: 120 × 0.6 = 72
        assert!((s.current_revenue - 50.0).abs() < 1e-9);
        assert!((s.recommended_revenue - 72.0).abs() < 1e-9);
        assert!((s.revenue_impact - 22.0).abs() < 1e-9);
        assert!((s.revenue_impact_pct - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_day() {
        let s = summarize(&[], date(), 80.0);
        assert_eq!(s.total, 0);
        assert_eq!(s.average_change_pct, 0.0);
        assert_eq!(s.revenue_impact_pct, 0.0);
    }
}
