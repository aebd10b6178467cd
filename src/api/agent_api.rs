// ==========================================
// 酒店收益管理系统 - 预测代理 API
// ==========================================
// 职责: 代理名册查询与启停、子因子启停
// 说明: 启停只影响综合预测与下一次生成的快照,不改写当前快照
// ==========================================

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::api::dashboard_api::parse_agent;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::agent::{Agent, AgentRoster};

pub struct AgentApi {
    roster: Arc<RwLock<AgentRoster>>,
}

impl AgentApi {
    pub fn new(roster: Arc<RwLock<AgentRoster>>) -> Self {
        Self { roster }
    }

    /// 名册副本（用于生成新快照）
    pub fn roster(&self) -> ApiResult<AgentRoster> {
        let roster = self
            .roster
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        Ok(roster.clone())
    }

    pub fn list_agents(&self) -> ApiResult<Vec<Agent>> {
        Ok(self.roster()?.agents().to_vec())
    }

    pub fn get_agent(&self, agent_id: &str) -> ApiResult<Agent> {
        let kind = parse_agent(agent_id)?;
        let roster = self
            .roster
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
        roster
            .get(kind)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("代理(id={})不存在", agent_id)))
    }

    /// 启停代理
    pub fn set_agent_enabled(&self, agent_id: &str, enabled: bool) -> ApiResult<Agent> {
        let kind = parse_agent(agent_id)?;
        {
            let mut roster = self
                .roster
                .write()
                .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
            if !roster.set_agent_enabled(kind, enabled) {
                return Err(ApiError::NotFound(format!("代理(id={})不存在", agent_id)));
            }
        }
        info!(agent = %kind, enabled, "代理启停已更新");
        self.get_agent(agent_id)
    }

    /// 启停子因子
    pub fn set_sub_factor_enabled(
        &self,
        agent_id: &str,
        sub_factor_id: &str,
        enabled: bool,
    ) -> ApiResult<Agent> {
        let kind = parse_agent(agent_id)?;
        {
            let mut roster = self
                .roster
                .write()
                .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))?;
            if !roster.set_sub_factor_enabled(kind, sub_factor_id, enabled) {
                return Err(ApiError::NotFound(format!(
                    "子因子(agent={}, id={})不存在",
                    agent_id, sub_factor_id
                )));
            }
        }
        info!(agent = %kind, sub_factor_id, enabled, "子因子启停已更新");
        self.get_agent(agent_id)
    }
}
