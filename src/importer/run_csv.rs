// ==========================================
// 条码装箱系统 - 产品批次 CSV 导入
// ==========================================
// 表头: product_code, product_name, location_code, start_serial, end_serial, quantity
// 规则:
// - 表头与单元格去除首尾空白，完全空白的行跳过
// - quantity 为空时由区间推导；end_serial 为空时由 start_serial + quantity - 1 推导
// - 只做字段映射，不做业务校验（由装箱编排器统一校验）
// ==========================================

use crate::domain::run::ProductRun;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// 必需列
const REQUIRED_COLUMNS: [&str; 3] = ["product_code", "location_code", "start_serial"];

// ==========================================
// RunCsvImporter - 批次 CSV 导入器
// ==========================================
pub struct RunCsvImporter;

impl RunCsvImporter {
    /// 从文件导入
    pub fn parse_path(path: &Path) -> ImportResult<Vec<ProductRun>> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let runs = Self::parse_reader(file)?;
        info!(path = %path.display(), runs = runs.len(), "批次 CSV 导入完成");
        Ok(runs)
    }

    /// 从任意 reader 导入
    pub fn parse_reader<R: Read>(reader: R) -> ImportResult<Vec<ProductRun>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let mut runs = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = row_idx + 1;

            let mut row_map: HashMap<&str, String> = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.as_str(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                debug!(row, "跳过空白行");
                continue;
            }

            runs.push(Self::map_row(row, &row_map)?);
        }

        Ok(runs)
    }

    /// 行 → ProductRun
    fn map_row(row: usize, fields: &HashMap<&str, String>) -> ImportResult<ProductRun> {
        let product_code = required_text(fields, row, "product_code")?;
        let location_code = required_text(fields, row, "location_code")?;
        let product_name = optional_text(fields, "product_name").unwrap_or_else(|| product_code.clone());

        let start_serial = optional_i64(fields, row, "start_serial")?.ok_or_else(|| {
            ImportError::FieldMissing {
                row,
                field: "start_serial".to_string(),
            }
        })?;
        let end_serial = optional_i64(fields, row, "end_serial")?;
        let quantity = optional_i64(fields, row, "quantity")?;

        let (end_serial, quantity) = match (end_serial, quantity) {
            (Some(end), Some(qty)) => (end, qty),
            (Some(end), None) => {
                let qty = end
                    .checked_sub(start_serial)
                    .and_then(|d| d.checked_add(1))
                    .ok_or_else(|| overflow(row, "quantity"))?;
                (end, qty)
            }
            (None, Some(qty)) => {
                let end = qty
                    .checked_sub(1)
                    .and_then(|d| start_serial.checked_add(d))
                    .ok_or_else(|| overflow(row, "end_serial"))?;
                (end, qty)
            }
            (None, None) => {
                return Err(ImportError::FieldMissing {
                    row,
                    field: "quantity".to_string(),
                })
            }
        };

        Ok(ProductRun {
            product_code,
            product_name,
            location_code,
            start_serial,
            end_serial,
            quantity,
        })
    }
}

fn overflow(row: usize, field: &str) -> ImportError {
    ImportError::DerivedValueOverflow {
        row,
        field: field.to_string(),
    }
}

fn optional_text(fields: &HashMap<&str, String>, field: &str) -> Option<String> {
    fields.get(field).filter(|v| !v.is_empty()).cloned()
}

fn required_text(fields: &HashMap<&str, String>, row: usize, field: &str) -> ImportResult<String> {
    optional_text(fields, field).ok_or_else(|| ImportError::FieldMissing {
        row,
        field: field.to_string(),
    })
}

fn optional_i64(
    fields: &HashMap<&str, String>,
    row: usize,
    field: &str,
) -> ImportResult<Option<i64>> {
    match optional_text(fields, field) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_derived_fields() {
        let csv = "\
product_code,product_name,location_code,start_serial,end_serial,quantity
WALT BLCK,WALLET BLACK,ISB,1,230,230
 WALT BRWN , WALLET BROWN ,ISB,1,,100
LAPB NVYB,,LHR,11,30,
";
        let runs = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap();

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].quantity, 230);
        assert_eq!(runs[1].product_code, "WALT BRWN");
        assert_eq!(runs[1].end_serial, 100);
        assert_eq!(runs[2].product_name, "LAPB NVYB");
        assert_eq!(runs[2].quantity, 20);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let csv = "product_code,location_code,start_serial,quantity\n,,,\nWALT TAN,KAR,1,5\n";
        let runs = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_non_integer_serial_reports_row() {
        let csv = "product_code,location_code,start_serial,quantity\nWALT TAN,KAR,1,5\nWALT BLCK,KAR,x1,5\n";
        let err = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::TypeConversionError { row: 2, ref field, .. } if field == "start_serial"
        ));
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "product_code,start_serial,quantity\nWALT TAN,1,5\n";
        let err = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "location_code"));
    }

    #[test]
    fn test_neither_end_nor_quantity_rejected() {
        let csv = "product_code,location_code,start_serial,end_serial,quantity\nWALT TAN,KAR,1,,\n";
        let err = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::FieldMissing { row: 1, ref field } if field == "quantity"));
    }

    #[test]
    fn test_derived_quantity_overflow_reports_row() {
        let csv = "product_code,location_code,start_serial,end_serial,quantity\nWALT BLCK,ISB,-5,9223372036854775807,\n";
        let err = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::DerivedValueOverflow { row: 1, ref field } if field == "quantity"
        ));
    }

    #[test]
    fn test_derived_end_serial_overflow_reports_row() {
        let csv = "product_code,location_code,start_serial,quantity\nWALT TAN,KAR,1,5\nWALT BLCK,ISB,9223372036854775807,2\n";
        let err = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::DerivedValueOverflow { row: 2, ref field } if field == "end_serial"
        ));
    }

    #[test]
    fn test_derived_end_serial_at_max_is_accepted() {
        let csv = "product_code,location_code,start_serial,quantity\nWALT BLCK,ISB,9223372036854775798,10\n";
        let runs = RunCsvImporter::parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(runs[0].end_serial, i64::MAX);
    }
}
