//! CSV reader. Rows may be shorter than the header.

use std::path::Path;

use swiftdir_core::row::SwiftRow;

use crate::{Result, columns::Columns};

pub(crate) fn read(path: &Path) -> Result<Vec<SwiftRow>> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .trim(csv::Trim::All)
    .from_path(path)?;

  let columns = Columns::from_headers(reader.headers()?.iter())?;

  let mut rows = Vec::new();
  for record in reader.records() {
    let cells: Vec<String> = record?.iter().map(str::to_owned).collect();
    rows.extend(columns.build(&cells));
  }
  Ok(rows)
}
