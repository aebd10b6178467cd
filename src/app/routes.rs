// ==========================================
// 酒店收益管理系统 - 看板路由
// ==========================================
// 职责: 路径 → 页面,页面 → JSON 数据载荷
// 说明: 未知路径解析为 NotFound 页面,不视为错误
// ==========================================

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::api::ApiResult;
use crate::app::state::AppState;
use crate::domain::types::TimePeriod;
use crate::i18n;

/// 收益分析页默认回看天数
const ANALYSIS_LOOKBACK_DAYS: i64 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    Dashboard,
    Forecasts,
    Analysis,
    Rooms,
    Segments,
    Calendar,
    Alerts,
    Data,
    Settings,
    NotFound,
}

impl AppRoute {
    pub const ALL: [AppRoute; 9] = [
        AppRoute::Dashboard,
        AppRoute::Forecasts,
        AppRoute::Analysis,
        AppRoute::Rooms,
        AppRoute::Segments,
        AppRoute::Calendar,
        AppRoute::Alerts,
        AppRoute::Data,
        AppRoute::Settings,
    ];

    /// 解析路径（忽略查询串与末尾斜杠）
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("").trim();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => AppRoute::Dashboard,
            "/forecasts" => AppRoute::Forecasts,
            "/analysis" => AppRoute::Analysis,
            "/rooms" => AppRoute::Rooms,
            "/segments" => AppRoute::Segments,
            "/calendar" => AppRoute::Calendar,
            "/alerts" => AppRoute::Alerts,
            "/data" => AppRoute::Data,
            "/settings" => AppRoute::Settings,
            _ => AppRoute::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Dashboard => "/",
            AppRoute::Forecasts => "/forecasts",
            AppRoute::Analysis => "/analysis",
            AppRoute::Rooms => "/rooms",
            AppRoute::Segments => "/segments",
            AppRoute::Calendar => "/calendar",
            AppRoute::Alerts => "/alerts",
            AppRoute::Data => "/data",
            AppRoute::Settings => "/settings",
            AppRoute::NotFound => "*",
        }
    }

    /// 页面数据载荷
    ///
    /// `requested` 为原始请求路径，仅用于 NotFound 提示
    pub fn payload(&self, state: &AppState, requested: &str) -> ApiResult<Value> {
        let api = &state.dashboard_api;
        let snapshot = &state.snapshot;

        let value = match self {
            AppRoute::Dashboard => json!({
                "kpis": api.kpis(None)?,
                "summary": api.recommendation_summary(None)?,
                "combined_insights": api.combined_insights()?,
                "unread_alerts": api.unread_alert_count()?,
            }),
            AppRoute::Forecasts => {
                let mut series = BTreeMap::new();
                for agent in state.agent_api.list_agents()? {
                    series.insert(agent.id.as_str(), api.agent_forecasts(agent.id.as_str())?);
                }
                json!({
                    "agents": state.agent_api.list_agents()?,
                    "agent_forecasts": series,
                    "combined": api.combined_forecast()?,
                    "forecast_data": api.forecast_data(),
                })
            }
            AppRoute::Analysis => {
                let (Some(start), Some(end)) = (snapshot.start_date(), snapshot.end_date()) else {
                    return Ok(json!({ "revenue_impact": Value::Null }));
                };
                let from = start
                    .checked_sub_signed(Duration::days(ANALYSIS_LOOKBACK_DAYS))
                    .unwrap_or(start);
                json!({
                    "revenue_impact": api.revenue_impact(from, end, start)?,
                    "booking_curve": api.booking_curve(TimePeriod::Daily)?,
                    "pickup_curve": api.pickup_curve(TimePeriod::Daily, None)?,
                })
            }
            AppRoute::Rooms => json!({
                "rooms": api.rooms(),
                "competitors": state.mapping_api.list_hotels()?,
                "recommendations": api.recommendations(None, None)?,
            }),
            AppRoute::Segments => json!({
                "segments": api.segments(),
            }),
            AppRoute::Calendar => json!({
                "days": api.calendar(None, None)?,
            }),
            AppRoute::Alerts => json!({
                "alerts": api.alerts(None)?,
                "unread": api.unread_alert_count()?,
            }),
            AppRoute::Data => json!({
                "snapshot_id": snapshot.snapshot_id,
                "created_at": snapshot.created_at,
                "seed": snapshot.seed,
                "start_date": snapshot.start_date(),
                "end_date": snapshot.end_date(),
                "market_conditions": api.market_conditions(),
                "record_counts": {
                    "conditions": snapshot.conditions.len(),
                    "agent_series": snapshot.agent_forecasts.len(),
                    "forecast_data": snapshot.forecast_data.len(),
                    "recommendations": snapshot.recommendations.len(),
                },
            }),
            AppRoute::Settings => json!({
                "config": state.config_manager.current(),
                "locales": i18n::SUPPORTED_LOCALES,
                "current_locale": i18n::current_locale(),
            }),
            AppRoute::NotFound => json!({
                "message": i18n::t_with_args("common.unknown_route", &[("path", requested)]),
            }),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForecastConfig;
    use crate::i18n::tests::locale_guard;
    use chrono::NaiveDate;

    #[test]
    fn test_resolve_known_paths() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::resolve(route.path()), route);
        }
        assert_eq!(AppRoute::resolve("/alerts/"), AppRoute::Alerts);
        assert_eq!(AppRoute::resolve("/calendar?view=month"), AppRoute::Calendar);
    }

    #[test]
    fn test_resolve_unknown_paths() {
        assert_eq!(AppRoute::resolve("/reports"), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/alerts/7"), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("forecasts"), AppRoute::NotFound);
    }

    #[test]
    fn test_every_route_has_payload() {
        let _guard = locale_guard();
        let state = AppState::new(ForecastConfig {
            seed: Some(5),
            horizon_days: 7,
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            ..Default::default()
        })
        .unwrap();

        for route in AppRoute::ALL {
            let payload = route.payload(&state, route.path()).unwrap();
            assert!(payload.is_object(), "{:?}", route);
        }
        let missing = AppRoute::NotFound.payload(&state, "/reports").unwrap();
        assert!(missing["message"].as_str().unwrap().contains("/reports"));
    }
}
