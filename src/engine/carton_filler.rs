// ==========================================
// 条码装箱系统 - 单品整箱填充引擎
// ==========================================
// 职责: 单个产品批次按容量切出整箱，尾数交给合箱引擎
// 输入: 产品批次 + 所属分组（容量）
// 输出: 整箱列表（恰好装满、非混装）+ 可选尾数
// ==========================================

use crate::domain::carton::{Carton, CartonLine};
use crate::domain::run::ProductRun;
use crate::domain::types::{Bucket, CartonSource};
use tracing::{debug, instrument};

// ==========================================
// Remainder - 尾数
// ==========================================
// 批次末尾不足一整箱的连续切片，随合箱逐段消耗
// 游标不越过 end_serial（end_serial 可为 i64::MAX）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remainder {
    pub product_code: String,
    pub product_name: String,
    pub location_code: String,
    pub start_serial: i64, // 当前未装箱部分的起点（随消耗前移）
    pub end_serial: i64,
    exhausted: bool,
}

impl Remainder {
    /// 从批次的 [start_serial, end_serial] 尾部切片构造
    pub fn from_run_tail(run: &ProductRun, start_serial: i64) -> Self {
        Self {
            product_code: run.product_code.clone(),
            product_name: run.product_name.clone(),
            location_code: run.location_code.clone(),
            start_serial,
            end_serial: run.end_serial,
            exhausted: start_serial > run.end_serial,
        }
    }

    /// 剩余件数
    pub fn quantity(&self) -> i64 {
        if self.exhausted {
            0
        } else {
            self.end_serial - self.start_serial + 1
        }
    }

    /// 是否已全部装箱
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// 取出前 count 件作为一行明细，起点前移
    ///
    /// 说明：count 超过剩余件数时按剩余件数截断；取到 end_serial 时标记耗尽，起点不再前移
    pub fn take_front(&mut self, count: i64) -> CartonLine {
        let count = count.min(self.quantity());
        let end = self.start_serial + (count - 1);
        let line = CartonLine::new(
            &self.product_code,
            &self.product_name,
            &self.location_code,
            self.start_serial,
            end,
        );
        if end == self.end_serial {
            self.exhausted = true;
        } else {
            self.start_serial = end + 1;
        }
        line
    }
}

/// 单批次填充结果
#[derive(Debug, Clone)]
pub struct FillResult {
    pub cartons: Vec<Carton>,
    pub remainder: Option<Remainder>,
}

// ==========================================
// CartonFiller - 单品整箱填充引擎
// ==========================================
pub struct CartonFiller {
    // 无状态引擎，不需要注入依赖
}

impl CartonFiller {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 填充单个批次
    ///
    /// 规则：
    /// 1) 剩余跨度 >= 容量时切出一整箱 [current, current + capacity - 1]
    /// 2) 剩余跨度不足一箱时不出箱，整段作为尾数
    /// 3) 件数恰为容量整数倍时无尾数
    ///
    /// # 参数
    /// - `run`: 已校验的产品批次
    /// - `bucket`: 批次所属分组（容量 > 0）
    #[instrument(skip(self, run, bucket), fields(
        product_code = %run.product_code,
        bucket = %bucket.key,
        quantity = run.quantity
    ))]
    pub fn fill(&self, run: &ProductRun, bucket: &Bucket) -> FillResult {
        let span = run.span();
        let full_count = span / bucket.capacity;
        let mut cartons = Vec::with_capacity(full_count.max(0) as usize);

        // 第 i 箱起点 = start + i * capacity，不计算越过 end_serial 的游标
        for i in 0..full_count {
            let start = run.start_serial + i * bucket.capacity;
            let end = start + (bucket.capacity - 1);
            cartons.push(Carton::seal(
                bucket,
                vec![CartonLine::from_run_slice(run, start, end)],
                CartonSource::Full,
            ));
        }

        let packed = full_count * bucket.capacity;
        let remainder = if packed < span {
            Some(Remainder::from_run_tail(run, run.start_serial + packed))
        } else {
            None
        };

        debug!(
            full_cartons = cartons.len(),
            remainder_qty = remainder.as_ref().map(|r| r.quantity()).unwrap_or(0),
            "单品整箱填充完成"
        );

        FillResult { cartons, remainder }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CartonFiller {
    fn default() -> Self {
        Self::new()
    }
}
