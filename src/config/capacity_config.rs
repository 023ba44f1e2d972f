// ==========================================
// 条码装箱系统 - 容量表配置
// ==========================================
// 职责: 容量表加载、校验、默认路径解析
// 存储: JSON 文件（缺省时使用内置容量表）
// ==========================================
// 文件格式:
// {
//   "rules": [{"prefix": "WALT", "bucket": "WALLET", "capacity": 150}],
//   "default_bucket": "GENERAL",
//   "default_capacity": 50
// }
// ==========================================

use crate::domain::capacity::{CapacityRule, CapacityTable, DEFAULT_BUCKET, DEFAULT_CAPACITY};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CARTON_PACKING_CONFIG";

/// 用户配置目录下的子目录名
pub const CONFIG_DIR_NAME: &str = "carton-packing";

/// 容量表文件名
pub const CONFIG_FILE_NAME: &str = "capacity_table.json";

// ==========================================
// 配置文件结构（原始形态，未校验）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRuleConfig {
    pub prefix: String,
    pub bucket: String,

    /// 缺失时报 MissingCapacity，不做推断
    #[serde(default)]
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CapacityTableConfig {
    #[serde(default)]
    pub rules: Vec<CapacityRuleConfig>,

    #[serde(default)]
    pub default_bucket: Option<String>,

    #[serde(default)]
    pub default_capacity: Option<i64>,
}

impl CapacityTableConfig {
    /// 解析 JSON 文本
    ///
    /// # 参数
    /// - `source`: 来源描述（用于错误信息，通常是文件路径）
    pub fn from_json_str(json: &str, source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    /// 转换为已校验的容量表
    pub fn into_table(self) -> Result<CapacityTable, ConfigError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for rule in self.rules {
            let capacity = rule.capacity.ok_or_else(|| ConfigError::MissingCapacity {
                prefix: rule.prefix.clone(),
                bucket: rule.bucket.clone(),
            })?;
            rules.push(CapacityRule::new(rule.prefix, capacity, rule.bucket));
        }

        let table = CapacityTable::new(rules).with_default(
            self.default_bucket
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            self.default_capacity.unwrap_or(DEFAULT_CAPACITY),
        );
        table.validate()?;
        Ok(table)
    }
}

impl From<&CapacityTable> for CapacityTableConfig {
    fn from(table: &CapacityTable) -> Self {
        Self {
            rules: table
                .rules
                .iter()
                .map(|r| CapacityRuleConfig {
                    prefix: r.prefix.clone(),
                    bucket: r.bucket.clone(),
                    capacity: Some(r.capacity),
                })
                .collect(),
            default_bucket: Some(table.default_bucket.clone()),
            default_capacity: Some(table.default_capacity),
        }
    }
}

// ==========================================
// Trait: CapacityConfigReader
// ==========================================
// 用途: 装箱调用方获取容量表的统一接口
pub trait CapacityConfigReader {
    /// 读取并校验容量表
    fn load_capacity_table(&self) -> Result<CapacityTable, ConfigError>;
}

/// 内置容量表
#[derive(Debug, Clone, Default)]
pub struct BuiltinCapacityConfig;

impl CapacityConfigReader for BuiltinCapacityConfig {
    fn load_capacity_table(&self) -> Result<CapacityTable, ConfigError> {
        let table = CapacityTable::builtin();
        table.validate()?;
        Ok(table)
    }
}

/// JSON 文件容量表
#[derive(Debug, Clone)]
pub struct JsonCapacityConfig {
    path: PathBuf,
}

impl JsonCapacityConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CapacityConfigReader for JsonCapacityConfig {
    fn load_capacity_table(&self) -> Result<CapacityTable, ConfigError> {
        let source = self.path.display().to_string();
        let raw = fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadFailed {
            path: source.clone(),
            message: e.to_string(),
        })?;

        let table = CapacityTableConfig::from_json_str(&raw, &source)?.into_table()?;
        debug!(path = %source, rules = table.rules.len(), "容量表加载完成");
        Ok(table)
    }
}

// ==========================================
// 配置路径解析
// ==========================================

/// 默认配置文件路径（用户配置目录）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 解析容量表配置文件
///
/// 优先级：
/// 1) 显式路径
/// 2) 环境变量 CARTON_PACKING_CONFIG（非空）
/// 3) 用户配置目录下的 capacity_table.json（存在时）
/// 4) None：使用内置容量表
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// 按优先级加载容量表
pub fn load_capacity_table(explicit: Option<&Path>) -> Result<CapacityTable, ConfigError> {
    match resolve_config_path(explicit) {
        Some(path) => {
            info!(path = %path.display(), "使用容量表配置文件");
            JsonCapacityConfig::new(path).load_capacity_table()
        }
        None => {
            info!("未找到容量表配置文件，使用内置容量表");
            BuiltinCapacityConfig.load_capacity_table()
        }
    }
}
