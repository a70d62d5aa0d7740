//! Normalised source rows, as produced by the spreadsheet reader.

use serde::{Deserialize, Serialize};

use crate::{
  code::{self, is_headquarter_code},
  model::{Branch, Country, Headquarter},
};

/// One record of the source sheet. Missing cells are empty strings, never
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftRow {
  pub swift_code:   String,
  pub code_type:    String,
  pub name:         String,
  pub address:      String,
  pub town_name:    String,
  pub country_iso2: String,
  pub country_name: String,
  pub time_zone:    String,
}

impl SwiftRow {
  /// Trim every field and upper-case the code and ISO2 columns.
  pub fn normalized(self) -> Self {
    Self {
      swift_code:   code::normalize(&self.swift_code),
      code_type:    self.code_type.trim().to_owned(),
      name:         self.name.trim().to_owned(),
      address:      self.address.trim().to_owned(),
      town_name:    self.town_name.trim().to_owned(),
      country_iso2: code::normalize(&self.country_iso2),
      country_name: self.country_name.trim().to_owned(),
      time_zone:    self.time_zone.trim().to_owned(),
    }
  }

  pub fn is_headquarter(&self) -> bool { is_headquarter_code(&self.swift_code) }

  pub fn country(&self) -> Country {
    Country {
      iso2:      self.country_iso2.clone(),
      name:      self.country_name.clone(),
      time_zone: (!self.time_zone.is_empty()).then(|| self.time_zone.clone()),
    }
  }

  pub fn to_headquarter(&self) -> Headquarter {
    Headquarter {
      swift_code:   self.swift_code.clone(),
      code_type:    self.code_type.clone(),
      bank_name:    self.name.clone(),
      address:      self.address.clone(),
      town_name:    self.town_name.clone(),
      country_iso2: self.country_iso2.clone(),
    }
  }

  pub fn to_branch(&self, headquarter: Option<String>) -> Branch {
    Branch {
      swift_code: self.swift_code.clone(),
      code_type: self.code_type.clone(),
      bank_name: self.name.clone(),
      address: self.address.clone(),
      town_name: self.town_name.clone(),
      country_iso2: self.country_iso2.clone(),
      headquarter,
    }
  }
}

/// Stable partition: every headquarter row, then every branch row, each group
/// in its original relative order.
///
/// Branch linking looks the headquarter up at insert time, so headquarters
/// have to be in the store first.
pub fn partition_headquarters_first(rows: Vec<SwiftRow>) -> Vec<SwiftRow> {
  let (mut headquarters, branches): (Vec<_>, Vec<_>) =
    rows.into_iter().partition(SwiftRow::is_headquarter);
  headquarters.extend(branches);
  headquarters
}
