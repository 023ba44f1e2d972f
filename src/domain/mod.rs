// ==========================================
// 条码装箱系统 - 领域模型层
// ==========================================
// 职责: 定义批次、箱子、容量表等领域实体
// 红线: 不含 I/O，不含引擎逻辑
// ==========================================

pub mod barcode;
pub mod capacity;
pub mod carton;
pub mod run;
pub mod types;

// 重导出核心类型
pub use barcode::UnitBarcode;
pub use capacity::{CapacityRule, CapacityTable, DEFAULT_BUCKET, DEFAULT_CAPACITY};
pub use carton::{Carton, CartonLine};
pub use run::ProductRun;
pub use types::{Bucket, CartonSource};
