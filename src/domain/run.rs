// ==========================================
// 条码装箱系统 - 产品批次领域模型
// ==========================================
// 职责: 定义一个产品发往一个目的地的连续序列号区间
// 红线: quantity 必须等于 end_serial - start_serial + 1
// ==========================================

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRun - 产品批次（输入，不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRun {
    // ===== 产品与目的地 =====
    pub product_code: String,  // 产品代码，如 "WALT BLCK"
    pub product_name: String,  // 产品名称
    pub location_code: String, // 目的地代码，如 "ISB"

    // ===== 序列号区间 =====
    pub start_serial: i64, // 起始序列号 (>= 1)
    pub end_serial: i64,   // 结束序列号 (>= start_serial)
    pub quantity: i64,     // 件数 (= end_serial - start_serial + 1)
}

impl ProductRun {
    /// 按起始序列号与件数构造批次（结束序列号自动推导）
    pub fn new(
        product_code: impl Into<String>,
        product_name: impl Into<String>,
        location_code: impl Into<String>,
        start_serial: i64,
        quantity: i64,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            product_name: product_name.into(),
            location_code: location_code.into(),
            start_serial,
            end_serial: start_serial.saturating_add(quantity.saturating_sub(1)),
            quantity,
        }
    }

    /// 序列号区间覆盖的件数
    pub fn span(&self) -> i64 {
        self.end_serial - self.start_serial + 1
    }

    /// 校验批次
    ///
    /// # 参数
    /// - `index`: 批次在输入列表中的位置（用于错误定位，0 起）
    ///
    /// # 返回
    /// - Ok(()): 批次合法
    /// - Err: 第一个违反的规则
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity {
                index,
                product_code: self.product_code.clone(),
                quantity: self.quantity,
            });
        }

        if self.start_serial < 1 {
            return Err(ValidationError::StartSerialOutOfRange {
                index,
                product_code: self.product_code.clone(),
                start_serial: self.start_serial,
            });
        }

        if self.end_serial < self.start_serial {
            return Err(ValidationError::InvertedRange {
                index,
                product_code: self.product_code.clone(),
                start_serial: self.start_serial,
                end_serial: self.end_serial,
            });
        }

        if self.quantity != self.span() {
            return Err(ValidationError::QuantityMismatch {
                index,
                product_code: self.product_code.clone(),
                quantity: self.quantity,
                start_serial: self.start_serial,
                end_serial: self.end_serial,
                span: self.span(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: i64, end: i64, quantity: i64) -> ProductRun {
        ProductRun {
            product_code: "WALT BLCK".to_string(),
            product_name: "WALLET BLACK".to_string(),
            location_code: "ISB".to_string(),
            start_serial: start,
            end_serial: end,
            quantity,
        }
    }

    #[test]
    fn test_new_derives_end_serial() {
        let r = ProductRun::new("WALT BLCK", "WALLET BLACK", "ISB", 151, 80);
        assert_eq!(r.end_serial, 230);
        assert!(r.validate(0).is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = run(1, 0, 0).validate(3).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveQuantity { index: 3, .. }));
    }

    #[test]
    fn test_start_serial_below_one_rejected() {
        let err = run(0, 9, 10).validate(0).unwrap_err();
        assert!(matches!(err, ValidationError::StartSerialOutOfRange { .. }));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = run(10, 5, 6).validate(0).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn test_quantity_mismatch_rejected() {
        let err = run(1, 150, 149).validate(0).unwrap_err();
        assert!(matches!(err, ValidationError::QuantityMismatch { span: 150, .. }));
    }

    #[test]
    fn test_single_unit_run_is_valid() {
        assert!(run(7, 7, 1).validate(0).is_ok());
    }
}
