// ==========================================
// 条码装箱系统 - 尾数合箱引擎
// ==========================================
// 职责: 同一分组的尾数按声明顺序合入共享箱（首次适配，不重排）
// 状态机: ACCUMULATING → EMIT_AND_RESET
// 红线:
// - 只有分组内最后一箱允许不满
// - 尾数可跨箱拆分，但序列号不重不漏
// ==========================================

use crate::domain::carton::{Carton, CartonLine};
use crate::domain::types::{Bucket, CartonSource};
use crate::engine::carton_filler::Remainder;
use tracing::{debug, instrument};

// ==========================================
// MixTransition - 单步转移结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixTransition {
    /// 缓冲箱未满，继续累积
    Accumulating,
    /// 缓冲箱已满：封箱输出并清空
    EmitAndReset(Carton),
}

// ==========================================
// MixBuffer - 合箱缓冲（当前箱 + 已装件数）
// ==========================================
#[derive(Debug, Clone)]
pub struct MixBuffer {
    bucket: Bucket,
    lines: Vec<CartonLine>,
    filled: i64,
}

impl MixBuffer {
    pub fn new(bucket: Bucket) -> Self {
        Self {
            bucket,
            lines: Vec::new(),
            filled: 0,
        }
    }

    /// 已装件数
    pub fn filled(&self) -> i64 {
        self.filled
    }

    /// 剩余空位
    pub fn free(&self) -> i64 {
        self.bucket.capacity - self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 状态转移：把尾数的前 min(剩余, 空位) 件装入当前箱
    ///
    /// 规则：
    /// 1) 尾数剩余 <= 空位：整段装入，尾数耗尽
    /// 2) 尾数剩余 > 空位：装入前 free 件，尾数起点前移
    /// 3) 装入后恰好满箱：立即封箱并清空（不等下一段尾数）
    ///
    /// 调用方需保证尾数未耗尽
    pub fn step(&mut self, remainder: &mut Remainder) -> MixTransition {
        let take = remainder.quantity().min(self.free());
        self.lines.push(remainder.take_front(take));
        self.filled += take;

        if self.filled == self.bucket.capacity {
            MixTransition::EmitAndReset(self.seal())
        } else {
            MixTransition::Accumulating
        }
    }

    /// 收尾：缓冲非空时输出最后一箱（可不满）
    pub fn flush(mut self) -> Option<Carton> {
        if self.is_empty() {
            None
        } else {
            Some(self.seal())
        }
    }

    fn seal(&mut self) -> Carton {
        let lines = std::mem::take(&mut self.lines);
        self.filled = 0;
        Carton::seal(&self.bucket, lines, CartonSource::Remainder)
    }
}

// ==========================================
// RemainderMixer - 尾数合箱引擎
// ==========================================
pub struct RemainderMixer {
    // 无状态引擎，缓冲只存在于单次调用内
}

impl RemainderMixer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 合箱（单个分组）
    ///
    /// # 参数
    /// - `bucket`: 分组（容量 > 0）
    /// - `remainders`: 该分组尾数，按源批次声明顺序
    ///
    /// # 返回
    /// 合箱列表，按封箱顺序
    #[instrument(skip(self, bucket, remainders), fields(
        bucket = %bucket.key,
        capacity = bucket.capacity,
        remainder_count = remainders.len()
    ))]
    pub fn mix(&self, bucket: &Bucket, remainders: Vec<Remainder>) -> Vec<Carton> {
        let mut buffer = MixBuffer::new(bucket.clone());
        let mut cartons = Vec::new();

        for mut remainder in remainders {
            while !remainder.is_exhausted() {
                if let MixTransition::EmitAndReset(carton) = buffer.step(&mut remainder) {
                    cartons.push(carton);
                }
            }
        }

        if let Some(last) = buffer.flush() {
            cartons.push(last);
        }

        debug!(
            cartons = cartons.len(),
            mixed = cartons.iter().filter(|c| c.is_mixed).count(),
            "尾数合箱完成"
        );

        cartons
    }
}

impl Default for RemainderMixer {
    fn default() -> Self {
        Self::new()
    }
}
