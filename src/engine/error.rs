// ==========================================
// 酒店收益管理系统 - 引擎层错误类型
// ==========================================
// 生成器本身不报错；仅校验用户输入（约束、分析区间）的入口返回错误
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("约束无效: {0}")]
    InvalidConstraints(String),

    #[error("起始日期晚于结束日期: from={from}, to={to}")]
    ReversedRange { from: NaiveDate, to: NaiveDate },

    #[error("分析区间过长: {days} 天（上限 {max} 天）")]
    RangeTooLong { days: i64, max: i64 },
}

pub type EngineResult<T> = Result<T, EngineError>;
