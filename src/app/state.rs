// ==========================================
// 酒店收益管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 快照不可变,经 Arc 共享；名册与映射簿经 RwLock 共享
// ==========================================

use std::sync::{Arc, RwLock};

use crate::api::{AgentApi, ApiError, ApiResult, DashboardApi, MappingApi};
use crate::config::{ConfigManager, ForecastConfig};
use crate::domain::agent::AgentRoster;
use crate::domain::mapping::HotelMappingBook;
use crate::engine::snapshot::{ForecastPipeline, ForecastSnapshot};
use crate::i18n;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 当前预测快照
    pub snapshot: Arc<ForecastSnapshot>,

    /// 代理名册
    pub roster: Arc<RwLock<AgentRoster>>,

    /// 竞品映射簿
    pub mapping_book: Arc<RwLock<HotelMappingBook>>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,

    /// 预测代理API
    pub agent_api: Arc<AgentApi>,

    /// 竞品映射API
    pub mapping_api: Arc<MappingApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 校验配置并设置语言
    /// 2. 生成一次预测快照
    /// 3. 创建所有API实例
    pub fn new(config: ForecastConfig) -> ApiResult<Self> {
        let config_manager = Arc::new(ConfigManager::new(config)?);
        Self::with_manager(
            config_manager,
            Arc::new(RwLock::new(AgentRoster::default())),
            Arc::new(RwLock::new(HotelMappingBook::new())),
        )
    }

    /// 从默认配置文件（含环境变量覆写）创建
    pub fn from_default_config() -> ApiResult<Self> {
        let config_manager = Arc::new(ConfigManager::load_default()?);
        Self::with_manager(
            config_manager,
            Arc::new(RwLock::new(AgentRoster::default())),
            Arc::new(RwLock::new(HotelMappingBook::new())),
        )
    }

    fn with_manager(
        config_manager: Arc<ConfigManager>,
        roster: Arc<RwLock<AgentRoster>>,
        mapping_book: Arc<RwLock<HotelMappingBook>>,
    ) -> ApiResult<Self> {
        let config = config_manager.current();
        tracing::info!(
            seed = ?config.seed,
            days = config.horizon_days,
            locale = %config.locale,
            "初始化AppState"
        );
        i18n::set_locale(&config.locale);

        let roster_now = roster
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?
            .clone();
        let snapshot = Arc::new(ForecastPipeline::new().run(&config, &roster_now));

        let dashboard_api = Arc::new(DashboardApi::new(
            Arc::clone(&snapshot),
            Arc::clone(&roster),
            config.constraints.clone(),
        ));
        let agent_api = Arc::new(AgentApi::new(Arc::clone(&roster)));
        let mapping_api = Arc::new(MappingApi::new(
            Arc::clone(&mapping_book),
            snapshot.rooms.iter().map(|r| r.id.clone()).collect(),
        ));

        Ok(Self {
            config_manager,
            snapshot,
            roster,
            mapping_book,
            dashboard_api,
            agent_api,
            mapping_api,
        })
    }

    /// 按当前配置与名册重新生成快照
    ///
    /// 名册与映射簿沿用；配置未指定种子时沿用当前快照的种子
    pub fn regenerate(&self) -> ApiResult<Self> {
        let mut config = self.config_manager.current();
        if config.seed.is_none() {
            config.seed = Some(self.snapshot.seed);
        }
        Self::with_manager(
            Arc::new(ConfigManager::new(config)?),
            Arc::clone(&self.roster),
            Arc::clone(&self.mapping_book),
        )
    }
}
