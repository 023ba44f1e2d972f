// ==========================================
// 条码装箱系统 - 配置层
// ==========================================
// 职责: 容量表加载与校验
// 存储: JSON 文件 / 内置容量表
// ==========================================

pub mod capacity_config;

// 重导出核心配置类型
pub use capacity_config::{
    default_config_path, load_capacity_table, resolve_config_path, BuiltinCapacityConfig,
    CapacityConfigReader, CapacityRuleConfig, CapacityTableConfig, JsonCapacityConfig,
    CONFIG_PATH_ENV,
};
