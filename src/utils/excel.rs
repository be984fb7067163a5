//! Reads the first worksheet of an uploaded workbook as rows of text cells.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExcelError {
    #[error("no sheet")]
    NoSheet,
    #[error("failed to read workbook: {0}")]
    Read(String),
}

/// One worksheet row. Missing trailing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn column(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|c| c.trim().is_empty())
    }
}

/// Spreadsheet letter of a zero-based column.
pub fn column_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Vec<Row>, ExcelError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| ExcelError::Read(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ExcelError::NoSheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ExcelError::Read(e.to_string()))?;

    // The range starts at the first used cell; keep columns aligned to A.
    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or_default();

    let mut rows = vec![Row::default(); first_row];
    rows.extend(range.rows().map(|cells| {
        let mut row = vec![String::new(); first_col];
        row.extend(cells.iter().map(cell_text));
        Row(row)
    }));
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::DateTime(dt) => serial_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.chars().take(10).collect(),
        other => other.to_string(),
    }
}

/// Calendar date of a spreadsheet serial day number.
fn serial_date(serial: f64) -> String {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(serial.floor() as i64)))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_column_out_of_range_is_empty() {
        let row = Row(vec!["P1".into(), "S1".into()]);
        assert_eq!(row.column(1), "S1");
        assert_eq!(row.column(9), "");
        assert!(Row(vec![" ".into(), String::new()]).is_blank());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String(" PLAN ".into())), "PLAN");
        assert_eq!(cell_text(&Data::DateTimeIso("2024-03-01T00:00:00".into())), "2024-03-01");
        assert_eq!(serial_date(45352.0), "2024-03-01");
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), 'A');
        assert_eq!(column_letter(9), 'J');
    }

    #[test]
    fn test_unreadable_workbook() {
        assert!(matches!(
            read_first_sheet(b"not a workbook".to_vec()),
            Err(ExcelError::Read(_))
        ));
    }
}
