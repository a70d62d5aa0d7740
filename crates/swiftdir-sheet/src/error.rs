//! Error types for the sheet reader.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("workbook error: {0}")]
  Workbook(#[from] calamine::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("workbook has no worksheets")]
  EmptyWorkbook,

  #[error("missing required column {0:?}")]
  MissingColumn(&'static str),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
