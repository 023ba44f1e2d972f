// ==========================================
// 条码装箱系统 - 统一错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 校验错误（输入不合法） / 配置错误（容量表不合法）
// 红线: 任何错误都在产出第一个箱子之前抛出，不返回部分结果
// ==========================================

use thiserror::Error;

/// 批次输入校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("数量必须为正数 (行 {index}, 产品 {product_code}): quantity={quantity}")]
    NonPositiveQuantity {
        index: usize,
        product_code: String,
        quantity: i64,
    },

    #[error("起始序列号必须 >= 1 (行 {index}, 产品 {product_code}): start_serial={start_serial}")]
    StartSerialOutOfRange {
        index: usize,
        product_code: String,
        start_serial: i64,
    },

    #[error("序列号区间倒置 (行 {index}, 产品 {product_code}): {start_serial} > {end_serial}")]
    InvertedRange {
        index: usize,
        product_code: String,
        start_serial: i64,
        end_serial: i64,
    },

    #[error("数量与序列号区间不一致 (行 {index}, 产品 {product_code}): quantity={quantity}, 区间 [{start_serial}, {end_serial}] 共 {span} 件")]
    QuantityMismatch {
        index: usize,
        product_code: String,
        quantity: i64,
        start_serial: i64,
        end_serial: i64,
        span: i64,
    },

    #[error("发货批次号为空")]
    EmptyRunCode,
}

/// 容量表配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("容量必须为正数 (bucket: {bucket}): capacity={capacity}")]
    NonPositiveCapacity { bucket: String, capacity: i64 },

    #[error("容量缺失 (prefix: {prefix}, bucket: {bucket})")]
    MissingCapacity { prefix: String, bucket: String },

    #[error("前缀为空 (bucket: {bucket})")]
    EmptyPrefix { bucket: String },

    #[error("分组键为空 (prefix: {prefix})")]
    EmptyBucket { prefix: String },

    #[error("同一分组声明了不同容量 (bucket: {bucket}): {first} != {second}")]
    ConflictingCapacity {
        bucket: String,
        first: i64,
        second: i64,
    },

    #[error("配置文件读取失败 ({path}): {message}")]
    ReadFailed { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Malformed { path: String, message: String },
}

/// 装箱调用的错误（校验 / 配置）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),

    #[error("容量配置错误: {0}")]
    Configuration(#[from] ConfigError),
}

impl PackingError {
    /// 是否为输入校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, PackingError::Validation(_))
    }

    /// 是否为配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, PackingError::Configuration(_))
    }
}

/// Result 类型别名
pub type PackingResult<T> = Result<T, PackingError>;
