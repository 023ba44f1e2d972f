// ==========================================
// 条码装箱系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 箱子来源 (Carton Source)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartonSource {
    Full,      // 单品整箱（恰好装满）
    Remainder, // 尾数合箱（可能混装，末箱可不满）
}

impl fmt::Display for CartonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartonSource::Full => write!(f, "FULL"),
            CartonSource::Remainder => write!(f, "REMAINDER"),
        }
    }
}

// ==========================================
// 分组 (Bucket)
// ==========================================
// 由产品代码前缀推导，同组共享一个装箱容量
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,   // 分组键，如 "WALLET"
    pub capacity: i64, // 每箱最大件数
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(capacity={})", self.key, self.capacity)
    }
}
