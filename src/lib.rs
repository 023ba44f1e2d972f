// ==========================================
// 条码装箱系统 - 核心库
// ==========================================
// 职责: 按产品批次分配序列号并装箱（整箱 + 尾数合箱）
// 系统定位: 纯计算引擎，标签渲染/打印/清单导出由外部协作方完成
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 装箱规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 容量表
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Bucket, CapacityRule, CapacityTable, Carton, CartonLine, CartonSource, ProductRun,
    UnitBarcode, DEFAULT_BUCKET, DEFAULT_CAPACITY,
};

// 引擎
pub use engine::{
    label_cartons, pack, CartonAssembler, CartonFiller, LabeledCarton, PackingManifest,
    RemainderMixer, TypeClassifier,
};

// 错误
pub use error::{ConfigError, PackingError, PackingResult, ValidationError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "条码装箱系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
