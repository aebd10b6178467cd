// ==========================================
// 酒店收益管理系统 - 驾驶舱 API
// ==========================================
// 职责: 基于同一份预测快照,为各看板页面提供查询
// 架构: API 层 → Engine 层（纯计算）→ ForecastSnapshot（不可变）
// ==========================================

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::api::error::{validate_date_range, ApiError, ApiResult};
use crate::domain::agent::AgentRoster;
use crate::domain::alert::{Alert, AlertInbox};
use crate::domain::catalog::{CustomerSegment, RoomType};
use crate::domain::forecast::{
    AgentForecast, CombinedForecast, CombinedForecastInsights, ForecastData,
};
use crate::domain::market::{CalendarDay, MarketCondition};
use crate::domain::pricing::{OptimizationConstraints, PriceRecommendation, RecommendationSummary};
use crate::domain::revenue::{
    BookingCurvePoint, DashboardKpis, PickupCurvePoint, RevenueImpactReport,
};
use crate::domain::types::{AgentKind, AlertType, TimePeriod};
use crate::engine::agent_forecast::AgentForecaster;
use crate::engine::alerts::AlertDetector;
use crate::engine::booking_curve::{booking_curve, pickup_curve};
use crate::engine::combined_forecast::{combine_agents, insights};
use crate::engine::constraints::ConstraintOptimizer;
use crate::engine::kpi::compute_kpis;
use crate::engine::noise::{
    NoiseSource, STREAM_BOOKING_CURVE, STREAM_PICKUP_CURVE, STREAM_REVENUE,
};
use crate::engine::recommendation_summary::summarize;
use crate::engine::revenue_impact::analyze_revenue_impact;
use crate::engine::snapshot::ForecastSnapshot;
use crate::perf::PerfGuard;

/// CSV 导出表头
pub const CSV_HEADER: [&str; 9] = [
    "date",
    "room_type",
    "segment",
    "current_price",
    "recommended_price",
    "min_price",
    "max_price",
    "expected_occupancy",
    "expected_revenue",
];

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    snapshot: Arc<ForecastSnapshot>,
    roster: Arc<RwLock<AgentRoster>>,
    constraints: OptimizationConstraints,
    alerts: RwLock<AlertInbox>,
}

impl DashboardApi {
    /// 创建驾驶舱 API
    ///
    /// 预警在创建时按约束一次性检测
    pub fn new(
        snapshot: Arc<ForecastSnapshot>,
        roster: Arc<RwLock<AgentRoster>>,
        constraints: OptimizationConstraints,
    ) -> Self {
        let alerts = AlertDetector::new(constraints.max_price)
            .detect(&snapshot.forecast_data, &snapshot.recommendations);
        Self {
            snapshot,
            roster,
            constraints,
            alerts: RwLock::new(AlertInbox::new(alerts)),
        }
    }

    pub fn snapshot(&self) -> Arc<ForecastSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn constraints(&self) -> &OptimizationConstraints {
        &self.constraints
    }

    // ==========================================
    // 目录与预测
    // ==========================================

    pub fn rooms(&self) -> &[RoomType] {
        &self.snapshot.rooms
    }

    pub fn segments(&self) -> &[CustomerSegment] {
        &self.snapshot.segments
    }

    pub fn market_conditions(&self) -> &[MarketCondition] {
        &self.snapshot.conditions
    }

    pub fn forecast_data(&self) -> &[ForecastData] {
        &self.snapshot.forecast_data
    }

    /// 单代理预测序列
    ///
    /// 已启用代理直接取快照；停用代理按同一种子现算（数值与启用时一致）
    pub fn agent_forecasts(&self, agent_id: &str) -> ApiResult<Vec<AgentForecast>> {
        let kind = parse_agent(agent_id)?;
        if let Some(series) = self.snapshot.agent_series(kind) {
            return Ok(series.to_vec());
        }
        Ok(AgentForecaster::new(self.snapshot.seed).forecast(kind, &self.snapshot.conditions))
    }

    /// 多代理综合预测（按当前名册启停状态与子因子权重）
    pub fn combined_forecast(&self) -> ApiResult<Vec<CombinedForecast>> {
        let roster = self
            .roster
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        Ok(combine_agents(
            &roster,
            &self.snapshot.agent_forecasts,
            &self.snapshot.dates,
        ))
    }

    pub fn combined_insights(&self) -> ApiResult<CombinedForecastInsights> {
        Ok(insights(&self.combined_forecast()?))
    }

    // ==========================================
    // 定价建议
    // ==========================================

    /// 定价建议（可按房型/客群过滤）
    ///
    /// # 错误
    /// 房型或客群不存在时返回 NotFound
    pub fn recommendations(
        &self,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> ApiResult<Vec<PriceRecommendation>> {
        self.check_filters(room_type, segment)?;
        Ok(self
            .snapshot
            .recommendations_for(room_type, segment)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 在指定约束下重算定价建议
    #[instrument(skip(self, constraints))]
    pub fn constrained_recommendations(
        &self,
        constraints: &OptimizationConstraints,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> ApiResult<Vec<PriceRecommendation>> {
        let optimizer = ConstraintOptimizer::new(constraints.clone())?;
        let base = self.recommendations(room_type, segment)?;
        Ok(optimizer.apply(&base, &self.snapshot.forecast_data, &self.snapshot.rooms))
    }

    /// 单日建议汇总（默认窗口首日）
    pub fn recommendation_summary(&self, date: Option<NaiveDate>) -> ApiResult<RecommendationSummary> {
        let date = self.resolve_date(date)?;
        Ok(summarize(
            &self.snapshot.recommendations,
            date,
            self.constraints.occupancy_target,
        ))
    }

    /// 单日 KPI（默认窗口首日）
    pub fn kpis(&self, date: Option<NaiveDate>) -> ApiResult<DashboardKpis> {
        let date = self.resolve_date(date)?;
        compute_kpis(
            date,
            &self.snapshot.forecast_data,
            &self.snapshot.recommendations,
            &self.snapshot.rooms,
        )
        .ok_or_else(|| ApiError::NotFound(format!("日期不在预测窗口内: {}", date)))
    }

    /// 日历视图
    pub fn calendar(
        &self,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> ApiResult<Vec<CalendarDay>> {
        self.check_filters(room_type, segment)?;
        let recs = self.snapshot.recommendations_for(room_type, segment);
        let alerts = self.alerts(None)?;

        Ok(self
            .snapshot
            .conditions
            .iter()
            .zip(&self.snapshot.forecast_data)
            .map(|(c, f)| {
                let prices: Vec<f64> = recs
                    .iter()
                    .filter(|r| r.timestamp == c.date)
                    .map(|r| r.recommended_price)
                    .collect();
                let average_recommended_price = if prices.is_empty() {
                    0.0
                } else {
                    prices.iter().sum::<f64>() / prices.len() as f64
                };

                CalendarDay {
                    date: c.date,
                    is_weekend: c.is_weekend,
                    is_holiday: c.is_holiday,
                    has_event: c.has_event,
                    predicted_demand: f.predicted_demand,
                    average_recommended_price,
                    alert_types: alerts
                        .iter()
                        .filter(|a| a.date == c.date)
                        .map(|a| a.alert_type)
                        .collect(),
                }
            })
            .collect())
    }

    // ==========================================
    // 收益分析
    // ==========================================

    /// 收益影响分析
    ///
    /// 同一快照、同一区间多次调用结果一致
    pub fn revenue_impact(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        as_of: NaiveDate,
    ) -> ApiResult<RevenueImpactReport> {
        validate_date_range(from, to)?;
        let mut noise = NoiseSource::stream(self.snapshot.seed, STREAM_REVENUE);
        Ok(analyze_revenue_impact(from, to, as_of, &mut noise)?)
    }

    /// 入住曲线（以窗口首日为基准）
    pub fn booking_curve(&self, period: TimePeriod) -> ApiResult<Vec<BookingCurvePoint>> {
        let anchor = self.resolve_date(None)?;
        let mut noise = NoiseSource::stream(self.snapshot.seed, STREAM_BOOKING_CURVE);
        Ok(booking_curve(period, anchor, &mut noise))
    }

    /// 提前预订曲线（默认到店日为窗口首日）
    pub fn pickup_curve(
        &self,
        period: TimePeriod,
        arrival: Option<NaiveDate>,
    ) -> ApiResult<Vec<PickupCurvePoint>> {
        let arrival = match arrival {
            Some(date) => date,
            None => self.resolve_date(None)?,
        };
        let mut noise = NoiseSource::stream(self.snapshot.seed, STREAM_PICKUP_CURVE);
        Ok(pickup_curve(period, arrival, &mut noise))
    }

    // ==========================================
    // 预警
    // ==========================================

    /// 预警列表（可按类型过滤）
    pub fn alerts(&self, alert_type: Option<AlertType>) -> ApiResult<Vec<Alert>> {
        let inbox = self
            .alerts
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        Ok(inbox.filter(alert_type).into_iter().cloned().collect())
    }

    pub fn unread_alert_count(&self) -> ApiResult<usize> {
        let inbox = self
            .alerts
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        Ok(inbox.unread_count())
    }

    pub fn mark_alert_read(&self, alert_id: &str) -> ApiResult<()> {
        let mut inbox = self
            .alerts
            .write()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        if inbox.mark_read(alert_id) {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("预警(id={})不存在", alert_id)))
        }
    }

    pub fn mark_all_alerts_read(&self) -> ApiResult<()> {
        let mut inbox = self
            .alerts
            .write()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        inbox.mark_all_read();
        Ok(())
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出定价建议为 CSV
    ///
    /// # 返回
    /// 写出的数据行数（不含表头）
    pub fn export_recommendations_csv<W: Write>(
        &self,
        writer: W,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> ApiResult<usize> {
        let mut perf = PerfGuard::new("export_recommendations_csv");
        let recs = self.recommendations(room_type, segment)?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for rec in &recs {
            csv_writer.write_record([
                rec.timestamp.format("%Y-%m-%d").to_string(),
                rec.room_type.clone(),
                rec.segment.clone(),
                format!("{:.0}", rec.current_price),
                format!("{:.0}", rec.recommended_price),
                format!("{:.0}", rec.min_price),
                format!("{:.0}", rec.max_price),
                format!("{:.1}", rec.expected_occupancy),
                format!("{:.0}", rec.expected_revenue),
            ])?;
        }
        csv_writer.flush()?;

        perf.set_items(recs.len());
        Ok(recs.len())
    }

    /// 导出定价建议到文件
    pub fn export_recommendations_to_path(
        &self,
        path: &Path,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> ApiResult<usize> {
        let file = std::fs::File::create(path)
            .map_err(|e| ApiError::Export(format!("无法创建文件 {}: {}", path.display(), e)))?;
        let count = self.export_recommendations_csv(file, room_type, segment)?;
        info!(path = %path.display(), count, "定价建议已导出");
        Ok(count)
    }

    // ==========================================
    // 内部工具
    // ==========================================

    fn resolve_date(&self, date: Option<NaiveDate>) -> ApiResult<NaiveDate> {
        match date {
            Some(d) => Ok(d),
            None => self
                .snapshot
                .start_date()
                .ok_or_else(|| ApiError::NotFound("预测窗口为空".to_string())),
        }
    }

    fn check_filters(&self, room_type: Option<&str>, segment: Option<&str>) -> ApiResult<()> {
        if let Some(id) = room_type {
            if !self.snapshot.rooms.iter().any(|r| r.id == id) {
                return Err(ApiError::NotFound(format!("房型(id={})不存在", id)));
            }
        }
        if let Some(id) = segment {
            if !self.snapshot.segments.iter().any(|s| s.id == id) {
                return Err(ApiError::NotFound(format!("客群(id={})不存在", id)));
            }
        }
        Ok(())
    }
}

/// 解析代理 id，未知 id 返回 NotFound
pub(crate) fn parse_agent(agent_id: &str) -> ApiResult<AgentKind> {
    agent_id
        .parse::<AgentKind>()
        .map_err(|_| ApiError::NotFound(format!("代理(id={})不存在", agent_id)))
}
