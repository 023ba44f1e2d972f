// ==========================================
// 条码装箱系统 - 容量表领域模型
// ==========================================
// 红线: 每个分组只有一个容量；容量必须为正数
// 用途: 产品代码前缀 → (分组, 每箱件数)
// ==========================================

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认分组键（未匹配任何前缀的产品）
pub const DEFAULT_BUCKET: &str = "GENERAL";

/// 默认每箱件数（未匹配任何前缀的产品）
pub const DEFAULT_CAPACITY: i64 = 50;

// ==========================================
// CapacityRule - 容量规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRule {
    pub prefix: String,  // 产品代码前缀（区分大小写）
    pub capacity: i64,   // 每箱件数
    pub bucket: String,  // 分组键
}

impl CapacityRule {
    pub fn new(prefix: impl Into<String>, capacity: i64, bucket: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            capacity,
            bucket: bucket.into(),
        }
    }
}

// ==========================================
// CapacityTable - 有序容量表
// ==========================================
// 匹配规则: 按声明顺序，第一个匹配的前缀生效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
    pub rules: Vec<CapacityRule>,
    pub default_bucket: String,
    pub default_capacity: i64,
}

impl CapacityTable {
    /// 使用默认分组/容量构造
    pub fn new(rules: Vec<CapacityRule>) -> Self {
        Self {
            rules,
            default_bucket: DEFAULT_BUCKET.to_string(),
            default_capacity: DEFAULT_CAPACITY,
        }
    }

    /// 内置容量表（钱包 / 四件套箱包 / 电脑包 + 默认）
    pub fn builtin() -> Self {
        Self::new(vec![
            CapacityRule::new("WALT", 150, "WALLET"),
            CapacityRule::new("4PCS", 4, "LUGGAGE_SET"),
            CapacityRule::new("LAPB", 20, "LAPTOP_BAG"),
        ])
    }

    /// 覆写默认分组与容量
    pub fn with_default(mut self, bucket: impl Into<String>, capacity: i64) -> Self {
        self.default_bucket = bucket.into();
        self.default_capacity = capacity;
        self
    }

    /// 校验容量表
    ///
    /// 规则：
    /// 1) 前缀、分组键非空（仅含空白视为空）
    /// 2) 容量 > 0（含默认容量）
    /// 3) 同一分组键只能对应一个容量
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut declared: HashMap<&str, i64> = HashMap::new();

        let entries = self
            .rules
            .iter()
            .map(|r| (Some(r.prefix.as_str()), r.bucket.as_str(), r.capacity))
            .chain(std::iter::once((
                None,
                self.default_bucket.as_str(),
                self.default_capacity,
            )));

        for (prefix, bucket, capacity) in entries {
            if let Some(prefix) = prefix {
                if prefix.trim().is_empty() {
                    return Err(ConfigError::EmptyPrefix {
                        bucket: bucket.to_string(),
                    });
                }
            }

            if bucket.trim().is_empty() {
                return Err(ConfigError::EmptyBucket {
                    prefix: prefix.unwrap_or("<default>").to_string(),
                });
            }

            if capacity <= 0 {
                return Err(ConfigError::NonPositiveCapacity {
                    bucket: bucket.to_string(),
                    capacity,
                });
            }

            match declared.get(bucket) {
                Some(&first) if first != capacity => {
                    return Err(ConfigError::ConflictingCapacity {
                        bucket: bucket.to_string(),
                        first,
                        second: capacity,
                    });
                }
                Some(_) => {}
                None => {
                    declared.insert(bucket, capacity);
                }
            }
        }

        Ok(())
    }
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(CapacityTable::builtin().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let table = CapacityTable::new(vec![CapacityRule::new("WALT", 0, "WALLET")]);
        assert_eq!(
            table.validate(),
            Err(ConfigError::NonPositiveCapacity {
                bucket: "WALLET".to_string(),
                capacity: 0
            })
        );
    }

    #[test]
    fn test_negative_default_capacity_rejected() {
        let table = CapacityTable::new(vec![]).with_default("GENERAL", -5);
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NonPositiveCapacity { capacity: -5, .. })
        ));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let table = CapacityTable::new(vec![CapacityRule::new("", 10, "ANY")]);
        assert!(matches!(table.validate(), Err(ConfigError::EmptyPrefix { .. })));

        let blank = CapacityTable::new(vec![CapacityRule::new("  ", 10, "ANY")]);
        assert_eq!(
            blank.validate(),
            Err(ConfigError::EmptyPrefix {
                bucket: "ANY".to_string()
            })
        );
    }

    #[test]
    fn test_empty_bucket_rejected() {
        let rule_bucket = CapacityTable::new(vec![CapacityRule::new("WALT", 150, " ")]);
        assert_eq!(
            rule_bucket.validate(),
            Err(ConfigError::EmptyBucket {
                prefix: "WALT".to_string()
            })
        );

        let default_bucket = CapacityTable::builtin().with_default("", 50);
        assert_eq!(
            default_bucket.validate(),
            Err(ConfigError::EmptyBucket {
                prefix: "<default>".to_string()
            })
        );
    }

    #[test]
    fn test_shared_bucket_must_share_capacity() {
        let ok = CapacityTable::new(vec![
            CapacityRule::new("WALT", 150, "WALLET"),
            CapacityRule::new("PRSE", 150, "WALLET"),
        ]);
        assert!(ok.validate().is_ok());

        let conflict = CapacityTable::new(vec![
            CapacityRule::new("WALT", 150, "WALLET"),
            CapacityRule::new("PRSE", 100, "WALLET"),
        ]);
        assert!(matches!(
            conflict.validate(),
            Err(ConfigError::ConflictingCapacity { first: 150, second: 100, .. })
        ));
    }
}
