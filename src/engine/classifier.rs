// ==========================================
// 条码装箱系统 - 产品类型分类器
// ==========================================
// 职责: 产品代码 → (分组, 每箱件数)
// 规则: 有序前缀表，第一个匹配生效；未匹配落入默认分组
// 红线: 全函数，任何代码都能得到一个分组，从不失败
// ==========================================

use crate::domain::capacity::CapacityTable;
use crate::domain::types::Bucket;

// ==========================================
// TypeClassifier - 类型分类器
// ==========================================
pub struct TypeClassifier<'a> {
    table: &'a CapacityTable,
}

impl<'a> TypeClassifier<'a> {
    /// 构造函数
    ///
    /// 说明：调用方负责先执行 `CapacityTable::validate`
    pub fn new(table: &'a CapacityTable) -> Self {
        Self { table }
    }

    /// 获取产品代码对应的分组与容量
    pub fn classify(&self, product_code: &str) -> Bucket {
        match self
            .table
            .rules
            .iter()
            .find(|rule| product_code.starts_with(rule.prefix.as_str()))
        {
            Some(rule) => Bucket {
                key: rule.bucket.clone(),
                capacity: rule.capacity,
            },
            None => Bucket {
                key: self.table.default_bucket.clone(),
                capacity: self.table.default_capacity,
            },
        }
    }

    /// 每箱件数
    pub fn capacity_for(&self, product_code: &str) -> i64 {
        self.classify(product_code).capacity
    }

    /// 分组键
    pub fn bucket_for(&self, product_code: &str) -> String {
        self.classify(product_code).key
    }
}
