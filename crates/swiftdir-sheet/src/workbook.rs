//! Spreadsheet reader (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`).
//!
//! Only the first worksheet is read; its first row is the header.

use std::path::Path;

use calamine::{Data, Reader as _, open_workbook_auto};
use swiftdir_core::row::SwiftRow;

use crate::{Error, Result, columns::Columns};

pub(crate) fn read(path: &Path) -> Result<Vec<SwiftRow>> {
  let mut workbook = open_workbook_auto(path)?;
  let sheet = workbook
    .sheet_names()
    .first()
    .cloned()
    .ok_or(Error::EmptyWorkbook)?;
  let range = workbook.worksheet_range(&sheet)?;

  let mut rows = range.rows();
  let Some(header) = rows.next() else {
    return Ok(Vec::new());
  };
  let header: Vec<String> = header.iter().map(cell_text).collect();
  let columns = Columns::from_headers(header.iter().map(String::as_str))?;

  Ok(
    rows
      .filter_map(|cells| {
        let cells: Vec<String> = cells.iter().map(cell_text).collect();
        columns.build(&cells)
      })
      .collect(),
  )
}

fn cell_text(cell: &Data) -> String {
  match cell {
    Data::Empty => String::new(),
    Data::String(s) => s.trim().to_owned(),
    Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
    other => other.to_string().trim().to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integral_floats_render_without_fraction() {
    assert_eq!(cell_text(&Data::Float(1234.0)), "1234");
    assert_eq!(cell_text(&Data::Int(7)), "7");
    assert_eq!(cell_text(&Data::String("  x ".into())), "x");
    assert_eq!(cell_text(&Data::Empty), "");
  }
}
