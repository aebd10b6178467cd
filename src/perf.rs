// ==========================================
// 性能统计
// ==========================================
// PerfGuard 在 drop 时输出 target=perf 的耗时日志
// 超过慢操作阈值时额外输出 target=slow_op 告警
// ==========================================

use std::cell::Cell;
use std::time::Instant;

/// 慢操作阈值（毫秒）环境变量
pub const SLOW_OP_ENV: &str = "HOTEL_RMS_SLOW_OP_MS";

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn slow_threshold_ms() -> u64 {
    std::env::var(SLOW_OP_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 200 } else { 1000 })
}

/// 当前线程上嵌套的 PerfGuard 数量
pub fn depth() -> u32 {
    PERF_DEPTH.with(|d| d.get())
}

/// 性能统计 Guard：记录 elapsed_ms + 产出条数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let mut perf = hotel_rms::perf::PerfGuard::new("run_pipeline");
/// // do work...
/// perf.set_items(recommendations.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            items: 0,
        }
    }

    /// 记录本次操作产出的条数
    pub fn set_items(&mut self, items: usize) {
        self.items = items as u64;
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let depth = PERF_DEPTH.with(|d| d.get());

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            items = self.items,
            depth,
            "done"
        );

        let threshold = slow_threshold_ms();
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "slow_op",
                op = self.op,
                elapsed_ms,
                threshold_ms = threshold,
                "slow operation"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
