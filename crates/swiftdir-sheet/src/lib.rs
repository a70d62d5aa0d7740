//! Reads the bank directory source sheet into ordered [`SwiftRow`]s.
//!
//! Pure synchronous; no HTTP or database dependencies. Call it from
//! `spawn_blocking` inside async code.
//!
//! # Quick start
//!
//! ```no_run
//! let rows = swiftdir_sheet::read_rows("swift.xlsx").unwrap();
//! println!("{} rows, headquarters first", rows.len());
//! ```

mod columns;
mod delimited;
pub mod error;
mod workbook;

use std::path::Path;

pub use error::{Error, Result};
use swiftdir_core::row::{SwiftRow, partition_headquarters_first};

/// Source formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Csv,
  Workbook,
}

impl Format {
  pub fn of(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
      _ => Format::Workbook,
    }
  }
}

/// Read every record from `path`, headquarters first.
///
/// Either the whole file parses or an error is returned; there is no partial
/// result.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<SwiftRow>> {
  let path = path.as_ref();
  if !path.try_exists()? {
    return Err(Error::NotFound(path.to_path_buf()));
  }

  let rows = match Format::of(path) {
    Format::Csv => delimited::read(path)?,
    Format::Workbook => workbook::read(path)?,
  };
  Ok(partition_headquarters_first(rows))
}
