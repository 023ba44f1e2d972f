// ==========================================
// 条码装箱系统 - 装箱清单
// ==========================================
// 职责: 汇总装箱结果（按分组统计件数、箱数、混装箱数）并生成清单文档
// 说明:
// - 只读消费装箱结果，不修改任何箱子
// - 清单编号/生成时间只存在于清单，装箱结果本身保持确定性
// ==========================================

use crate::domain::carton::Carton;
use crate::domain::types::CartonSource;
use crate::engine::labeling::{label_cartons, LabeledCarton};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ==========================================
// 分组汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItemCount {
    pub product_code: String,
    pub product_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// 分组键
    pub bucket: String,

    /// 每箱件数
    pub capacity: i64,

    /// 箱数（整箱 + 合箱）
    pub carton_count: usize,

    /// 单品整箱数
    pub full_carton_count: usize,

    /// 混装箱数
    pub mixed_carton_count: usize,

    /// 总件数
    pub total_items: i64,

    /// 各产品件数（按首次出现顺序）
    pub item_counts: Vec<ProductItemCount>,
}

/// 按分组汇总装箱结果（分组按首次出现顺序）
pub fn summarize(cartons: &[Carton]) -> Vec<BucketSummary> {
    let mut summaries: Vec<BucketSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for carton in cartons {
        let slot = *index.entry(carton.bucket.as_str()).or_insert_with(|| {
            summaries.push(BucketSummary {
                bucket: carton.bucket.clone(),
                capacity: carton.capacity,
                carton_count: 0,
                full_carton_count: 0,
                mixed_carton_count: 0,
                total_items: 0,
                item_counts: Vec::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.carton_count += 1;
        summary.total_items += carton.total_quantity;
        if carton.source == CartonSource::Full {
            summary.full_carton_count += 1;
        }
        if carton.is_mixed {
            summary.mixed_carton_count += 1;
        }

        for line in &carton.lines {
            match summary
                .item_counts
                .iter_mut()
                .find(|c| c.product_code == line.product_code)
            {
                Some(count) => count.quantity += line.quantity,
                None => summary.item_counts.push(ProductItemCount {
                    product_code: line.product_code.clone(),
                    product_name: line.product_name.clone(),
                    quantity: line.quantity,
                }),
            }
        }
    }

    summaries
}

// ==========================================
// 目的地汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub location_code: String,
    pub carton_count: usize, // 含该目的地明细的箱数
    pub total_items: i64,
}

/// 按目的地汇总件数（目的地按首次出现顺序）
///
/// 混装箱可能包含多个目的地，对每个目的地各计一箱
pub fn summarize_locations(cartons: &[Carton]) -> Vec<LocationSummary> {
    let mut summaries: Vec<LocationSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for carton in cartons {
        let mut counted: Vec<usize> = Vec::new();
        for line in &carton.lines {
            let slot = *index.entry(line.location_code.as_str()).or_insert_with(|| {
                summaries.push(LocationSummary {
                    location_code: line.location_code.clone(),
                    carton_count: 0,
                    total_items: 0,
                });
                summaries.len() - 1
            });

            let summary = &mut summaries[slot];
            summary.total_items += line.quantity;
            if !counted.contains(&slot) {
                summary.carton_count += 1;
                counted.push(slot);
            }
        }
    }

    summaries
}

// ==========================================
// PackingManifest - 装箱清单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingManifest {
    pub manifest_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub run_code: String,
    pub total_cartons: usize,
    pub total_items: i64,
    pub cartons: Vec<LabeledCarton>,
    pub buckets: Vec<BucketSummary>,
    pub locations: Vec<LocationSummary>,
}

impl PackingManifest {
    /// 生成清单
    ///
    /// # 参数
    /// - `run_code`: 发货批次号
    /// - `cartons`: 装箱结果
    pub fn build(run_code: &str, cartons: &[Carton]) -> Result<Self, ValidationError> {
        let labeled = label_cartons(run_code, cartons)?;

        Ok(Self {
            manifest_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            run_code: run_code.trim().to_string(),
            total_cartons: cartons.len(),
            total_items: cartons.iter().map(|c| c.total_quantity).sum(),
            cartons: labeled,
            buckets: summarize(cartons),
            locations: summarize_locations(cartons),
        })
    }

    /// 序列化为 JSON（缩进格式）
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capacity::{CapacityRule, CapacityTable};
    use crate::domain::run::ProductRun;
    use crate::engine::assembler::pack;

    fn sample_cartons() -> Vec<Carton> {
        let table = CapacityTable::new(vec![
            CapacityRule::new("WALT", 150, "WALLET"),
            CapacityRule::new("LAPB", 20, "LAPTOP_BAG"),
        ]);
        let runs = vec![
            ProductRun::new("WALT BLCK", "WALLET BLACK", "ISB", 1, 230),
            ProductRun::new("WALT BRWN", "WALLET BROWN", "ISB", 1, 100),
            ProductRun::new("LAPB NVYB", "LAPTOP BAG NAVY BLUE", "LHR", 1, 45),
        ];
        pack(&runs, &table).unwrap()
    }

    #[test]
    fn test_summarize_per_bucket() {
        let summaries = summarize(&sample_cartons());

        assert_eq!(summaries.len(), 2);

        let wallet = &summaries[0];
        assert_eq!(wallet.bucket, "WALLET");
        assert_eq!(wallet.carton_count, 3);
        assert_eq!(wallet.full_carton_count, 1);
        assert_eq!(wallet.mixed_carton_count, 1);
        assert_eq!(wallet.total_items, 330);
        assert_eq!(wallet.item_counts[0].quantity, 230);
        assert_eq!(wallet.item_counts[1].quantity, 100);

        let bags = &summaries[1];
        assert_eq!(bags.bucket, "LAPTOP_BAG");
        assert_eq!(bags.carton_count, 3);
        assert_eq!(bags.full_carton_count, 2);
        assert_eq!(bags.mixed_carton_count, 0);
        assert_eq!(bags.total_items, 45);
    }

    #[test]
    fn test_summarize_per_location() {
        let table = CapacityTable::new(vec![CapacityRule::new("WALT", 150, "WALLET")]);
        let runs = vec![
            ProductRun::new("WALT BLCK", "WALLET BLACK", "ISB", 1, 200),
            ProductRun::new("WALT BRWN", "WALLET BROWN", "LHR", 1, 60),
        ];
        let cartons = pack(&runs, &table).unwrap();

        // 整箱(ISB 150) + 合箱(ISB 50 + LHR 60)
        let locations = summarize_locations(&cartons);
        assert_eq!(
            locations,
            vec![
                LocationSummary {
                    location_code: "ISB".to_string(),
                    carton_count: 2,
                    total_items: 200,
                },
                LocationSummary {
                    location_code: "LHR".to_string(),
                    carton_count: 1,
                    total_items: 60,
                },
            ]
        );
    }

    #[test]
    fn test_manifest_json_contains_labels() {
        let manifest = PackingManifest::build("2B", &sample_cartons()).unwrap();
        assert_eq!(manifest.total_cartons, 6);
        assert_eq!(manifest.total_items, 375);
        assert_eq!(manifest.locations.len(), 2);

        let json = manifest.to_json_pretty().unwrap();
        assert!(json.contains("\"2B/1\""));
        assert!(json.contains("\"2B/6\""));
        assert!(json.contains("\"REMAINDER\""));
    }
}
