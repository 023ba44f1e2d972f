// ==========================================
// 条码装箱系统 - 箱标签编号
// ==========================================
// 职责: 按装箱结果顺序编号 1..N，生成箱标签 "{发货批次号}/{箱号}"
// 说明: 标签渲染与打印由外部协作方负责，这里只产出文本内容
// ==========================================

use crate::domain::barcode::UnitBarcode;
use crate::domain::carton::Carton;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 带编号的箱子（供标签渲染）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledCarton {
    pub sequence_no: usize, // 1 起
    pub label: String,      // 如 "1A/3"
    pub carton: Carton,
}

impl LabeledCarton {
    /// 是否需要打印 "MIXED" 标记
    pub fn needs_mixed_marker(&self) -> bool {
        self.carton.is_mixed
    }
}

/// 箱标签文本
pub fn carton_label(run_code: &str, sequence_no: usize) -> String {
    format!("{}/{}", run_code.trim(), sequence_no)
}

/// 为装箱结果编号
///
/// # 参数
/// - `run_code`: 发货批次号（如 "1A"），去除首尾空白后不可为空
/// - `cartons`: 装箱结果（顺序即箱号顺序）
pub fn label_cartons(
    run_code: &str,
    cartons: &[Carton],
) -> Result<Vec<LabeledCarton>, ValidationError> {
    if run_code.trim().is_empty() {
        return Err(ValidationError::EmptyRunCode);
    }

    Ok(cartons
        .iter()
        .enumerate()
        .map(|(i, carton)| LabeledCarton {
            sequence_no: i + 1,
            label: carton_label(run_code, i + 1),
            carton: carton.clone(),
        })
        .collect())
}

/// 单件条码内容，如 "ISB-WALT BLCK-0001"
pub fn unit_barcode(location_code: &str, product_code: &str, serial: i64) -> String {
    UnitBarcode {
        location_code: location_code.to_string(),
        product_code: product_code.to_string(),
        serial,
    }
    .to_string()
}

/// 解析单件条码内容
pub fn parse_unit_barcode(text: &str) -> Option<UnitBarcode> {
    UnitBarcode::parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::carton::CartonLine;
    use crate::domain::types::{Bucket, CartonSource};

    fn carton(code: &str) -> Carton {
        let bucket = Bucket {
            key: "WALLET".to_string(),
            capacity: 150,
        };
        Carton::seal(
            &bucket,
            vec![CartonLine::new(code, code, "ISB", 1, 10)],
            CartonSource::Remainder,
        )
    }

    #[test]
    fn test_labels_numbered_from_one() {
        let labeled = label_cartons(" 1A ", &[carton("WALT BLCK"), carton("WALT TAN")]).unwrap();

        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].label, "1A/1");
        assert_eq!(labeled[1].label, "1A/2");
        assert_eq!(labeled[1].sequence_no, 2);
        assert!(!labeled[0].needs_mixed_marker());
    }

    #[test]
    fn test_empty_run_code_rejected() {
        assert_eq!(
            label_cartons("  ", &[carton("WALT BLCK")]),
            Err(ValidationError::EmptyRunCode)
        );
    }

    #[test]
    fn test_unit_barcode_round_trip() {
        let text = unit_barcode("ISB", "WALT BLCK", 1);
        assert_eq!(text, "ISB-WALT BLCK-0001");

        let parsed = parse_unit_barcode(&text).unwrap();
        assert_eq!(parsed.product_code, "WALT BLCK");
        assert_eq!(parsed.serial, 1);
    }
}
