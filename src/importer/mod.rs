// ==========================================
// 条码装箱系统 - 导入层
// ==========================================
// 职责: 从外部文件读取产品批次
// ==========================================

pub mod error;
pub mod run_csv;

pub use error::{ImportError, ImportResult};
pub use run_csv::RunCsvImporter;
