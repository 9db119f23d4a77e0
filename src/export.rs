use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::data::model::{CellValue, Dataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

/// `<stem>.<ext>` with path separators and whitespace replaced by `_`.
pub fn export_file_name(stem: &str, format: ExportFormat) -> String {
    let clean: String = stem
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{clean}.{}", format.extension())
}

/// Write `dataset` to `path` as header + rows.
pub fn export_dataset(dataset: &Dataset, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let bytes = to_csv_bytes(dataset)?;
            std::fs::write(path, bytes)
                .with_context(|| format!("failed writing CSV to {}", path.display()))?;
        }
        ExportFormat::Xlsx => {
            let mut workbook = Workbook::new();
            {
                let sheet = workbook.add_worksheet();
                write_sheet(sheet, dataset)?;
            }
            workbook
                .save(path)
                .with_context(|| format!("failed writing workbook to {}", path.display()))?;
        }
    }
    info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Pick the format from the path's extension.
pub fn export_to_path(dataset: &Dataset, path: &Path) -> Result<ExportFormat> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let Some(format) = ExportFormat::from_extension(ext) else {
        bail!("cannot export to .{ext}; use .csv or .xlsx");
    };
    export_dataset(dataset, path, format)?;
    Ok(format)
}

/// CSV bytes for in-memory downloads. Nulls are written as empty fields.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&dataset.column_names)
        .context("write CSV header")?;
    for rec in &dataset.records {
        writer
            .write_record(dataset.column_names.iter().map(|c| rec.get(c).to_string()))
            .context("write CSV row")?;
    }
    writer.into_inner().context("flush CSV buffer")
}

fn write_sheet(worksheet: &mut Worksheet, dataset: &Dataset) -> Result<()> {
    for (col_idx, name) in dataset.column_names.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, name)
            .with_context(|| format!("write header ({col_idx})"))?;
    }
    for (row_idx, rec) in dataset.records.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, name) in dataset.column_names.iter().enumerate() {
            let col = col_idx as u16;
            let written = match rec.get(name) {
                CellValue::Null => continue,
                CellValue::Integer(i) => worksheet.write_number(row, col, *i as f64),
                CellValue::Float(f) => worksheet.write_number(row, col, *f),
                CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
                CellValue::String(s) => worksheet.write_string(row, col, s),
            };
            written.with_context(|| format!("write cell ({row},{col})"))?;
        }
    }
    Ok(())
}
