// ==========================================
// 条码装箱系统 - 单件条码内容
// ==========================================
// 格式: {LOCATION}-{PRODUCT}-{SERIAL}
// 示例: ISB-WALT BLCK-0001
// 说明: 产品代码可含空格或 '-'，序列号取最后一个 '-' 之后的部分
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 序列号最小显示位数（不足补零）
pub const SERIAL_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitBarcode {
    pub location_code: String,
    pub product_code: String,
    pub serial: i64,
}

impl fmt::Display for UnitBarcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            self.location_code,
            self.product_code,
            self.serial,
            width = SERIAL_WIDTH
        )
    }
}

impl UnitBarcode {
    /// 解析条码内容
    ///
    /// # 返回
    /// - Some: 三段齐全且序列号为整数
    /// - None: 格式不符
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (location_code, rest) = text.split_once('-')?;
        let (product_code, serial) = rest.rsplit_once('-')?;

        if location_code.is_empty() || product_code.is_empty() {
            return None;
        }

        Some(Self {
            location_code: location_code.to_string(),
            product_code: product_code.to_string(),
            serial: serial.parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_code_with_space() {
        let parsed = UnitBarcode::parse("ISB-WALT BLCK-0001").unwrap();
        assert_eq!(parsed.location_code, "ISB");
        assert_eq!(parsed.product_code, "WALT BLCK");
        assert_eq!(parsed.serial, 1);
    }

    #[test]
    fn test_wide_serial_not_truncated() {
        let code = UnitBarcode {
            location_code: "LHR".to_string(),
            product_code: "LAPB NVYB".to_string(),
            serial: 12345,
        };
        assert_eq!(code.to_string(), "LHR-LAPB NVYB-12345");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UnitBarcode::parse("ISB").is_none());
        assert!(UnitBarcode::parse("ISB-WALT").is_none());
        assert!(UnitBarcode::parse("ISB-WALT-abc").is_none());
    }
}
