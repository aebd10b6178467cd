// ==========================================
// 酒店收益管理系统 - 预测快照流水线
// ==========================================
// 职责: 一次性跑完 日期 → 市场状况 → 代理预测 → 合并预测 → 定价建议
// 输出: 不可变 ForecastSnapshot,所有视图读取同一份快照
// 红线: 每个代理序列只生成一次；各阶段使用独立随机流
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::agent::AgentRoster;
use crate::domain::catalog::{default_customer_segments, default_room_types, CustomerSegment, RoomType};
use crate::domain::forecast::{AgentForecast, ForecastData};
use crate::domain::market::MarketCondition;
use crate::domain::pricing::PriceRecommendation;
use crate::domain::types::AgentKind;
use crate::engine::agent_forecast::AgentForecaster;
use crate::engine::forecast_data::combine_forecast_data;
use crate::engine::market_conditions::{
    generate_dates, generate_dates_from_today, MarketConditionGenerator,
};
use crate::engine::noise::{NoiseSource, STREAM_MARKET, STREAM_PRICING};
use crate::engine::price_recommendation::PriceRecommendationEngine;
use crate::perf::PerfGuard;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

// ==========================================
// ForecastSnapshot - 预测快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub snapshot_id: String,
    pub created_at: DateTime<Utc>,
    /// 实际使用的种子（配置未指定时为新生成的种子）
    pub seed: u64,
    pub dates: Vec<NaiveDate>,
    pub conditions: Vec<MarketCondition>,
    /// 已启用代理的预测序列
    pub agent_forecasts: BTreeMap<AgentKind, Vec<AgentForecast>>,
    pub forecast_data: Vec<ForecastData>,
    pub recommendations: Vec<PriceRecommendation>,
    pub rooms: Vec<RoomType>,
    pub segments: Vec<CustomerSegment>,
}

impl ForecastSnapshot {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn forecast_for(&self, date: NaiveDate) -> Option<&ForecastData> {
        self.forecast_data.iter().find(|f| f.timestamp == date)
    }

    pub fn agent_series(&self, kind: AgentKind) -> Option<&[AgentForecast]> {
        self.agent_forecasts.get(&kind).map(Vec::as_slice)
    }

    /// 按房型 / 客群过滤定价建议（None 表示不过滤）
    pub fn recommendations_for(
        &self,
        room_type: Option<&str>,
        segment: Option<&str>,
    ) -> Vec<&PriceRecommendation> {
        self.recommendations
            .iter()
            .filter(|r| room_type.map_or(true, |id| r.room_type == id))
            .filter(|r| segment.map_or(true, |id| r.segment == id))
            .collect()
    }
}

// ==========================================
// ForecastPipeline - 快照流水线
// ==========================================
pub struct ForecastPipeline {
    rooms: Vec<RoomType>,
    segments: Vec<CustomerSegment>,
}

impl ForecastPipeline {
    /// 使用默认房型 / 客群目录
    pub fn new() -> Self {
        Self::with_catalog(default_room_types(), default_customer_segments())
    }

    pub fn with_catalog(rooms: Vec<RoomType>, segments: Vec<CustomerSegment>) -> Self {
        Self { rooms, segments }
    }

    /// 生成快照
    ///
    /// 同一 (种子, 起始日期, 天数, 名册) 得到相同数值；snapshot_id 与 created_at 除外
    pub fn run(&self, config: &ForecastConfig, roster: &AgentRoster) -> ForecastSnapshot {
        let mut perf = PerfGuard::new("forecast_pipeline");

        let seed = config.seed.unwrap_or_else(NoiseSource::fresh_seed);
        let dates = match config.start_date {
            Some(start) => generate_dates(start, config.horizon_days),
            None => generate_dates_from_today(config.horizon_days),
        };

        let conditions = MarketConditionGenerator::new(
            config.holiday_probability,
            config.event_probability,
        )
        .generate(&dates, &mut NoiseSource::stream(seed, STREAM_MARKET));

        let forecaster = AgentForecaster::new(seed);
        let agent_forecasts: BTreeMap<AgentKind, Vec<AgentForecast>> = roster
            .enabled()
            .map(|agent| (agent.id, forecaster.forecast(agent.id, &conditions)))
            .collect();

        let forecast_data = combine_forecast_data(&conditions, &agent_forecasts);

        let recommendations = PriceRecommendationEngine::new(config.min_margin_ratio).generate(
            &self.rooms,
            &self.segments,
            &conditions,
            &forecast_data,
            &mut NoiseSource::stream(seed, STREAM_PRICING),
        );

        perf.set_items(recommendations.len());
        let snapshot_id = Uuid::new_v4().to_string();
        info!(
            snapshot_id = %snapshot_id,
            seed,
            start = ?dates.first(),
            days = dates.len(),
            agents = agent_forecasts.len(),
            recommendations = recommendations.len(),
            "预测快照已生成"
        );

        ForecastSnapshot {
            snapshot_id,
            created_at: Utc::now(),
            seed,
            dates,
            conditions,
            agent_forecasts,
            forecast_data,
            recommendations,
            rooms: self.rooms.clone(),
            segments: self.segments.clone(),
        }
    }
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self::new()
    }
}
