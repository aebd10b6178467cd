// ==========================================
// 酒店收益管理系统 - 入住曲线 / 提前预订曲线
// ==========================================
// 职责: 按统计周期生成历史入住曲线与到店日提前预订曲线
// 顺序: 由远及近,最后一点为基准日
// ==========================================

use crate::domain::revenue::{BookingCurvePoint, PickupCurvePoint};
use crate::domain::types::TimePeriod;
use crate::engine::noise::NoiseSource;
use chrono::{Datelike, Duration, Months, NaiveDate};
use tracing::instrument;

/// 周期参数: (期数, 入住基数, 预订基数)
pub fn period_parameters(period: TimePeriod) -> (u32, f64, f64) {
    match period {
        TimePeriod::Daily => (30, 45.0, 15.0),
        TimePeriod::Weekly => (12, 315.0, 105.0),
        TimePeriod::Monthly => (12, 1350.0, 450.0),
        TimePeriod::Quarterly => (8, 4050.0, 1350.0),
        TimePeriod::Yearly => (5, 16425.0, 5475.0),
    }
}

/// 基准日往前推 steps 个周期
pub fn step_back(anchor: NaiveDate, period: TimePeriod, steps: u32) -> Option<NaiveDate> {
    match period {
        TimePeriod::Daily => anchor.checked_sub_signed(Duration::days(steps as i64)),
        TimePeriod::Weekly => anchor.checked_sub_signed(Duration::weeks(steps as i64)),
        TimePeriod::Monthly => anchor.checked_sub_months(Months::new(steps)),
        TimePeriod::Quarterly => anchor.checked_sub_months(Months::new(steps * 3)),
        TimePeriod::Yearly => anchor.checked_sub_months(Months::new(steps * 12)),
    }
}

/// 周期标签: "Jan 05" / "Jan 2026" / "Q1 2026" / "2026"
pub fn period_label(date: NaiveDate, period: TimePeriod) -> String {
    match period {
        TimePeriod::Daily | TimePeriod::Weekly => date.format("%b %d").to_string(),
        TimePeriod::Monthly => date.format("%b %Y").to_string(),
        TimePeriod::Quarterly => format!("Q{} {}", (date.month0() / 3) + 1, date.year()),
        TimePeriod::Yearly => date.format("%Y").to_string(),
    }
}

fn days_out_label(steps: u32, period: TimePeriod) -> String {
    if steps == 0 {
        return "Arrival Day".to_string();
    }
    let unit = match period {
        TimePeriod::Daily => "days",
        TimePeriod::Weekly => "week",
        TimePeriod::Monthly => "month",
        TimePeriod::Quarterly => "quarter",
        TimePeriod::Yearly => "year",
    };
    format!("{} {} before", steps, unit)
}

/// 入住曲线（预测 vs 实际入住）
#[instrument(skip(noise))]
pub fn booking_curve(
    period: TimePeriod,
    anchor: NaiveDate,
    noise: &mut NoiseSource,
) -> Vec<BookingCurvePoint> {
    let (periods, base, _) = period_parameters(period);

    (0..periods)
        .rev()
        .filter_map(|i| {
            let period_start = step_back(anchor, period, i)?;
            let predicted = base + (i as f64 * 0.3).sin() * base * 0.2 + noise.jitter(base * 0.1);
            let actual = predicted + noise.jitter(base * 0.3);
            Some(BookingCurvePoint {
                period_start,
                label: period_label(period_start, period),
                predicted: predicted.max(0.0).round(),
                actual: actual.max(0.0).round(),
            })
        })
        .collect()
}

/// 提前预订曲线（越接近到店日预订越多）
#[instrument(skip(noise))]
pub fn pickup_curve(
    period: TimePeriod,
    arrival: NaiveDate,
    noise: &mut NoiseSource,
) -> Vec<PickupCurvePoint> {
    let (periods, _, base) = period_parameters(period);

    (0..periods)
        .rev()
        .filter_map(|i| {
            let booking_date = step_back(arrival, period, i)?;
            let proximity = ((periods - i) as f64 / periods as f64).max(0.1);
            let predicted = (base * proximity * (0.8 + noise.unit() * 0.4)).round();
            let actual = (predicted * (0.85 + noise.unit() * 0.3)).round();
            Some(PickupCurvePoint {
                booking_date,
                label: period_label(booking_date, period),
                days_out: days_out_label(i, period),
                predicted: predicted.max(0.0),
                actual: actual.max(0.0),
            })
        })
        .collect()
}
