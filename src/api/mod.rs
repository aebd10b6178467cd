// ==========================================
// 酒店收益管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI 与看板路由调用
// ==========================================

pub mod agent_api;
pub mod dashboard_api;
pub mod error;
pub mod mapping_api;

// 重导出核心类型
pub use agent_api::AgentApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use mapping_api::MappingApi;
