// ==========================================
// 条码装箱系统 - 箱子领域模型
// ==========================================
// 红线:
// - total_quantity <= capacity
// - is_mixed 当且仅当箱内不同 product_code 数 > 1
// - 箱子加入结果后不再修改
// ==========================================

use crate::domain::barcode::UnitBarcode;
use crate::domain::run::ProductRun;
use crate::domain::types::{Bucket, CartonSource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// CartonLine - 箱内明细行
// ==========================================
// 一个产品批次中落入某一箱的连续序列号切片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartonLine {
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub start_serial: i64,
    pub end_serial: i64,
    pub quantity: i64,
}

impl CartonLine {
    /// 从产品批次截取 [start_serial, end_serial] 切片
    pub fn from_run_slice(run: &ProductRun, start_serial: i64, end_serial: i64) -> Self {
        Self::new(
            &run.product_code,
            &run.product_name,
            &run.location_code,
            start_serial,
            end_serial,
        )
    }

    pub fn new(
        product_code: &str,
        product_name: &str,
        location_code: &str,
        start_serial: i64,
        end_serial: i64,
    ) -> Self {
        Self {
            product_code: product_code.to_string(),
            product_name: product_name.to_string(),
            location_code: location_code.to_string(),
            start_serial,
            end_serial,
            quantity: end_serial - start_serial + 1,
        }
    }

    /// 逐件生成条码内容（惰性迭代，供标签渲染使用）
    pub fn unit_barcodes(&self) -> impl Iterator<Item = UnitBarcode> + '_ {
        (self.start_serial..=self.end_serial).map(move |serial| UnitBarcode {
            location_code: self.location_code.clone(),
            product_code: self.product_code.clone(),
            serial,
        })
    }
}

// ==========================================
// Carton - 箱子
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carton {
    pub lines: Vec<CartonLine>, // 有序明细
    pub capacity: i64,          // 每箱最大件数
    pub total_quantity: i64,    // 箱内总件数
    pub is_mixed: bool,         // 是否混装（不同产品代码 > 1）
    pub bucket: String,         // 所属分组
    pub source: CartonSource,   // 整箱 / 尾数合箱
}

impl Carton {
    /// 封箱：由明细行计算总件数与混装标记
    pub fn seal(bucket: &Bucket, lines: Vec<CartonLine>, source: CartonSource) -> Self {
        let total_quantity = lines.iter().map(|l| l.quantity).sum();
        let is_mixed = distinct_product_count(&lines) > 1;

        Self {
            lines,
            capacity: bucket.capacity,
            total_quantity,
            is_mixed,
            bucket: bucket.key.clone(),
            source,
        }
    }

    /// 是否装满
    pub fn is_full(&self) -> bool {
        self.total_quantity == self.capacity
    }

    /// 剩余空位
    pub fn free_space(&self) -> i64 {
        (self.capacity - self.total_quantity).max(0)
    }

    /// 箱内不同产品代码（按首次出现顺序）
    pub fn product_codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .map(|l| l.product_code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }
}

/// 统计不同产品代码数量
///
/// 说明：同一产品的两个不相邻切片只算一种，不构成混装
fn distinct_product_count(lines: &[CartonLine]) -> usize {
    lines
        .iter()
        .map(|l| l.product_code.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Bucket {
        Bucket {
            key: "WALLET".to_string(),
            capacity: 150,
        }
    }

    fn line(code: &str, start: i64, end: i64) -> CartonLine {
        CartonLine::new(code, code, "ISB", start, end)
    }

    #[test]
    fn test_seal_computes_total_and_mixed() {
        let carton = Carton::seal(
            &bucket(),
            vec![line("WALT BLCK", 151, 230), line("WALT BRWN", 1, 70)],
            CartonSource::Remainder,
        );
        assert_eq!(carton.total_quantity, 150);
        assert!(carton.is_mixed);
        assert!(carton.is_full());
        assert_eq!(carton.product_codes(), vec!["WALT BLCK", "WALT BRWN"]);
    }

    #[test]
    fn test_two_slices_of_same_product_not_mixed() {
        let carton = Carton::seal(
            &bucket(),
            vec![line("WALT BLCK", 1, 10), line("WALT BLCK", 50, 59)],
            CartonSource::Remainder,
        );
        assert_eq!(carton.total_quantity, 20);
        assert!(!carton.is_mixed);
        assert_eq!(carton.free_space(), 130);
    }

    #[test]
    fn test_unit_barcodes_cover_line() {
        let l = line("WALT BLCK", 9, 11);
        let codes: Vec<String> = l.unit_barcodes().map(|b| b.to_string()).collect();
        assert_eq!(
            codes,
            vec!["ISB-WALT BLCK-0009", "ISB-WALT BLCK-0010", "ISB-WALT BLCK-0011"]
        );
    }
}
