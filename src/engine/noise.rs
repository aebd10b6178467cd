// ==========================================
// 酒店收益管理系统 - 随机扰动源
// ==========================================
// 职责: 为各生成阶段提供可复现的随机流
// 红线: 引擎内禁止直接使用 thread_rng,一律经由 NoiseSource
// ==========================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// 各阶段随机流编号（代理使用 AgentKind::stream_id）
pub const STREAM_MARKET: u64 = 1;
pub const STREAM_PRICING: u64 = 2;
pub const STREAM_REVENUE: u64 = 3;
pub const STREAM_BOOKING_CURVE: u64 = 4;
pub const STREAM_PICKUP_CURVE: u64 = 5;

/// 可复现随机源
///
/// 同一 (seed, stream) 组合产生完全相同的抽样序列
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 由主种子派生独立随机流
    pub fn stream(seed: u64, stream_id: u64) -> Self {
        // splitmix64 风格混合，避免相邻种子产生相关序列
        let mut z = seed ^ stream_id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    /// 生成一个新的主种子（未配置种子时使用）
    pub fn fresh_seed() -> u64 {
        rand::thread_rng().gen()
    }

    /// [0, 1) 均匀分布
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// 以 0 为中心的扰动: (U - 0.5) · span
    pub fn jitter(&mut self, span: f64) -> f64 {
        (self.unit() - 0.5) * span
    }

    /// 伯努利抽样
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_stream_is_reproducible() {
        let mut a = NoiseSource::stream(42, STREAM_MARKET);
        let mut b = NoiseSource::stream(42, STREAM_MARKET);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut a = NoiseSource::stream(42, STREAM_MARKET);
        let mut b = NoiseSource::stream(42, STREAM_PRICING);
        let sa: Vec<f64> = (0..8).map(|_| a.unit()).collect();
        let sb: Vec<f64> = (0..8).map(|_| b.unit()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut n = NoiseSource::new(7);
        for _ in 0..1000 {
            let j = n.jitter(8.0);
            assert!((-4.0..4.0).contains(&j));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut n = NoiseSource::new(7);
        for _ in 0..100 {
            assert!(!n.chance(0.0));
            assert!(n.chance(1.0));
        }
    }
}
