// ==========================================
// 酒店收益管理系统 - 应用层
// ==========================================
// 职责: 组装共享状态,把看板路由映射到 API 查询
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::AppRoute;
pub use state::AppState;
