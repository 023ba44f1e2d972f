// ==========================================
// 条码装箱系统 - 装箱编排器
// ==========================================
// 用途: 协调分类器、整箱填充、尾数合箱的执行顺序
// 流程: 校验 → 按分组归并（保持首次出现顺序）→ 逐组整箱 + 合箱 → 拼接
// 红线:
// - 校验失败时不产出任何箱子
// - 分组顺序决定箱号，必须由有序结构保证，不能依赖哈希表迭代顺序
// ==========================================

use crate::domain::capacity::CapacityTable;
use crate::domain::carton::Carton;
use crate::domain::run::ProductRun;
use crate::domain::types::Bucket;
use crate::engine::carton_filler::CartonFiller;
use crate::engine::classifier::TypeClassifier;
use crate::engine::remainder_mixer::RemainderMixer;
use crate::error::PackingResult;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

// ==========================================
// BucketGroup - 分组内批次
// ==========================================
#[derive(Debug, Clone)]
pub struct BucketGroup<'r> {
    pub bucket: Bucket,
    pub runs: Vec<&'r ProductRun>,
}

/// 按分组归并批次
///
/// 说明：
/// - groups 保存顺序（首次出现），index 仅用于查找
/// - 组内批次保持输入顺序
pub fn group_by_bucket<'r>(
    classifier: &TypeClassifier<'_>,
    runs: &'r [ProductRun],
) -> Vec<BucketGroup<'r>> {
    let mut groups: Vec<BucketGroup<'r>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for run in runs {
        let bucket = classifier.classify(&run.product_code);
        let slot = *index.entry(bucket.key.clone()).or_insert_with(|| {
            groups.push(BucketGroup {
                bucket,
                runs: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].runs.push(run);
    }

    groups
}

// ==========================================
// CartonAssembler - 装箱编排器
// ==========================================
pub struct CartonAssembler {
    table: CapacityTable,
    filler: CartonFiller,
    mixer: RemainderMixer,
}

impl CartonAssembler {
    /// 创建编排器
    ///
    /// # 参数
    /// - table: 有序容量表（在 pack 时校验）
    pub fn new(table: CapacityTable) -> Self {
        Self {
            table,
            filler: CartonFiller::new(),
            mixer: RemainderMixer::new(),
        }
    }

    /// 装箱
    ///
    /// 规则：
    /// 1) 先校验容量表，再按输入顺序校验每个批次，第一个错误即返回
    /// 2) 分组按首次出现顺序处理
    /// 3) 每组先输出全部整箱（按批次顺序），再输出合箱
    ///
    /// # 返回
    /// 有序箱子列表（调用方按 1..N 编号）
    #[instrument(skip(self, runs), fields(run_count = runs.len()))]
    pub fn pack(&self, runs: &[ProductRun]) -> PackingResult<Vec<Carton>> {
        self.table.validate()?;
        for (index, run) in runs.iter().enumerate() {
            run.validate(index)?;
        }

        let classifier = TypeClassifier::new(&self.table);
        let groups = group_by_bucket(&classifier, runs);

        let mut result = Vec::new();
        for group in groups {
            let mut full_cartons = Vec::new();
            let mut remainders = Vec::new();

            for run in &group.runs {
                let fill = self.filler.fill(run, &group.bucket);
                full_cartons.extend(fill.cartons);
                remainders.extend(fill.remainder);
            }

            let mixed_cartons = self.mixer.mix(&group.bucket, remainders);

            debug!(
                bucket = %group.bucket.key,
                runs = group.runs.len(),
                full_cartons = full_cartons.len(),
                remainder_cartons = mixed_cartons.len(),
                "分组装箱完成"
            );

            result.extend(full_cartons);
            result.extend(mixed_cartons);
        }

        info!(
            cartons = result.len(),
            mixed = result.iter().filter(|c| c.is_mixed).count(),
            "装箱完成"
        );

        Ok(result)
    }
}

impl Default for CartonAssembler {
    fn default() -> Self {
        Self::new(CapacityTable::builtin())
    }
}

/// 装箱（函数式入口）
pub fn pack(runs: &[ProductRun], table: &CapacityTable) -> PackingResult<Vec<Carton>> {
    CartonAssembler::new(table.clone()).pack(runs)
}
