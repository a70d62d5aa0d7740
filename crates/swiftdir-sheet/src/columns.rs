//! Header matching and row construction shared by both readers.

use swiftdir_core::row::SwiftRow;

use crate::{Error, Result};

pub const SWIFT_CODE: &str = "SWIFT CODE";
pub const CODE_TYPE: &str = "CODE TYPE";
pub const NAME: &str = "NAME";
pub const ADDRESS: &str = "ADDRESS";
pub const TOWN_NAME: &str = "TOWN NAME";
pub const COUNTRY_ISO2: &str = "COUNTRY ISO2 CODE";
pub const COUNTRY_NAME: &str = "COUNTRY NAME";
pub const TIME_ZONE: &str = "TIME ZONE";

/// Column positions resolved from a header row. Optional columns that are
/// absent read as empty strings.
#[derive(Debug)]
pub(crate) struct Columns {
  swift_code:   usize,
  code_type:    Option<usize>,
  name:         Option<usize>,
  address:      Option<usize>,
  town_name:    Option<usize>,
  country_iso2: usize,
  country_name: Option<usize>,
  time_zone:    Option<usize>,
}

impl Columns {
  pub(crate) fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
    let headers: Vec<String> = headers
      .into_iter()
      .map(|h| h.trim().to_uppercase())
      .collect();
    let find = |name: &str| headers.iter().position(|h| h == name);

    Ok(Self {
      swift_code:   find(SWIFT_CODE).ok_or(Error::MissingColumn(SWIFT_CODE))?,
      code_type:    find(CODE_TYPE),
      name:         find(NAME),
      address:      find(ADDRESS),
      town_name:    find(TOWN_NAME),
      country_iso2: find(COUNTRY_ISO2).ok_or(Error::MissingColumn(COUNTRY_ISO2))?,
      country_name: find(COUNTRY_NAME),
      time_zone:    find(TIME_ZONE),
    })
  }

  /// Build a row from cell texts. Returns `None` for a fully blank line.
  pub(crate) fn build(&self, cells: &[String]) -> Option<SwiftRow> {
    if cells.iter().all(|c| c.trim().is_empty()) {
      return None;
    }
    let at = |i: usize| cells.get(i).cloned().unwrap_or_default();
    let opt = |i: Option<usize>| i.map(at).unwrap_or_default();

    Some(
      SwiftRow {
        swift_code:   at(self.swift_code),
        code_type:    opt(self.code_type),
        name:         opt(self.name),
        address:      opt(self.address),
        town_name:    opt(self.town_name),
        country_iso2: at(self.country_iso2),
        country_name: opt(self.country_name),
        time_zone:    opt(self.time_zone),
      }
      .normalized(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn headers_match_case_insensitively_in_any_order() {
    let cols = Columns::from_headers([" country iso2 code", "Swift Code", "NAME"]).unwrap();
    let row = cols.build(&cells(&["pl", "aaaaplpwxxx", "Alpha"])).unwrap();
    assert_eq!(row.swift_code, "AAAAPLPWXXX");
    assert_eq!(row.country_iso2, "PL");
    assert_eq!(row.name, "Alpha");
    assert_eq!(row.address, "");
  }

  #[test]
  fn missing_required_column() {
    let err = Columns::from_headers(["NAME", "COUNTRY ISO2 CODE"]).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(SWIFT_CODE)));
  }

  #[test]
  fn short_rows_default_to_empty() {
    let cols = Columns::from_headers([SWIFT_CODE, COUNTRY_ISO2, TIME_ZONE]).unwrap();
    let row = cols.build(&cells(&["AAAAPLPW001"])).unwrap();
    assert_eq!(row.country_iso2, "");
    assert_eq!(row.time_zone, "");
  }

  #[test]
  fn blank_rows_are_skipped() {
    let cols = Columns::from_headers([SWIFT_CODE, COUNTRY_ISO2]).unwrap();
    assert!(cols.build(&cells(&["", "  "])).is_none());
    assert!(cols.build(&[]).is_none());
  }
}
