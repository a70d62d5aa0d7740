//! Single-record create and delete.
//!
//! Every mutation is one store transaction: the country upsert, the insert and
//! any re-linking either all land or none do.

use serde::Deserialize;

use crate::{
  Error, Result,
  code::{
    bank_prefix, headquarter_code_of, is_headquarter_code, normalize, validate_iso2,
    validate_swift_code,
  },
  model::{Branch, Country, Headquarter},
  store::{DirectoryStore, DirectoryTx},
};

pub const DEFAULT_CODE_TYPE: &str = "BIC11";

// ─── Input ───────────────────────────────────────────────────────────────────

/// A record submitted for insertion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
  pub swift_code:     String,
  pub bank_name:      Option<String>,
  pub address:        Option<String>,
  pub town_name:      Option<String>,
  pub code_type:      Option<String>,
  #[serde(rename = "countryISO2")]
  pub country_iso2:   String,
  pub country_name:   String,
  pub is_headquarter: bool,
}

impl NewRecord {
  fn normalized(self) -> Self {
    Self {
      swift_code: normalize(&self.swift_code),
      country_iso2: normalize(&self.country_iso2),
      country_name: self.country_name.trim().to_owned(),
      ..self
    }
  }

  fn validate(&self) -> Result<()> {
    validate_swift_code(&self.swift_code)?;
    validate_iso2(&self.country_iso2)?;
    if self.country_name.is_empty() {
      return Err(Error::Validation("countryName is required.".to_owned()));
    }
    match (self.is_headquarter, is_headquarter_code(&self.swift_code)) {
      (true, false) => Err(Error::Validation(format!(
        "Headquarter swiftCode \"{}\" must end with XXX.",
        self.swift_code
      ))),
      (false, true) => Err(Error::Validation(format!(
        "Branch swiftCode \"{}\" must not end with XXX.",
        self.swift_code
      ))),
      _ => Ok(()),
    }
  }

  fn country(&self) -> Country {
    Country {
      iso2:      self.country_iso2.clone(),
      name:      self.country_name.clone(),
      time_zone: None,
    }
  }

  fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_owned()
  }

  fn code_type(&self) -> String {
    match Self::text(&self.code_type) {
      t if t.is_empty() => DEFAULT_CODE_TYPE.to_owned(),
      t => t,
    }
  }

  fn to_headquarter(&self) -> Headquarter {
    Headquarter {
      swift_code:   self.swift_code.clone(),
      code_type:    self.code_type(),
      bank_name:    Self::text(&self.bank_name),
      address:      Self::text(&self.address),
      town_name:    Self::text(&self.town_name),
      country_iso2: self.country_iso2.clone(),
    }
  }

  fn to_branch(&self, headquarter: Option<String>) -> Branch {
    Branch {
      swift_code: self.swift_code.clone(),
      code_type: self.code_type(),
      bank_name: Self::text(&self.bank_name),
      address: Self::text(&self.address),
      town_name: Self::text(&self.town_name),
      country_iso2: self.country_iso2.clone(),
      headquarter,
    }
  }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
  /// A headquarter, and how many existing branches were linked to it.
  Headquarter { relinked: usize },
  /// A branch, and the headquarter it was linked to, if any.
  Branch { headquarter: Option<String> },
}

impl Created {
  pub fn message(&self) -> &'static str {
    match self {
      Created::Headquarter { .. } => "Bank headquarter created successfully.",
      Created::Branch { .. } => "Bank branch created successfully.",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
  Headquarter(String),
  Branch(String),
}

impl Deleted {
  pub fn message(&self) -> String {
    match self {
      Deleted::Headquarter(code) => {
        format!("Headquarter with swiftCode {code} has been deleted.")
      }
      Deleted::Branch(code) => format!("Branch with swiftCode {code} has been deleted."),
    }
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Create a headquarter or branch from `record`.
///
/// Fails with `Conflict` if the code is already registered.
pub async fn add_record<S: DirectoryStore>(store: &S, record: NewRecord) -> Result<Created> {
  let record = record.normalized();
  record.validate()?;

  let code = record.swift_code.clone();
  let created = store
    .transaction(move |tx| {
      tx.upsert_country(&record.country())?;
      if record.is_headquarter {
        create_headquarter(tx, &record)
      } else {
        create_branch(tx, &record)
      }
    })
    .await?;

  tracing::debug!(swift_code = %code, ?created, "record created");
  Ok(created)
}

/// Only branches whose derived headquarter code is this one are re-linked, so a
/// stored link always equals `headquarter_code_of(branch)`.
fn create_headquarter(tx: &dyn DirectoryTx, record: &NewRecord) -> Result<Created> {
  if tx.headquarter(&record.swift_code)?.is_some() {
    return Err(Error::Conflict(format!(
      "Headquarter with swiftCode \"{}\" already exists.",
      record.swift_code
    )));
  }
  tx.insert_headquarter(&record.to_headquarter())?;

  let mut relinked = 0;
  for branch in tx.unlinked_branches(bank_prefix(&record.swift_code))? {
    if headquarter_code_of(&branch.swift_code) == record.swift_code {
      tx.link_branch(&branch.swift_code, &record.swift_code)?;
      relinked += 1;
    }
  }
  Ok(Created::Headquarter { relinked })
}

fn create_branch(tx: &dyn DirectoryTx, record: &NewRecord) -> Result<Created> {
  if tx.branch(&record.swift_code)?.is_some() {
    return Err(Error::Conflict(format!(
      "Branch with swiftCode \"{}\" already exists.",
      record.swift_code
    )));
  }
  let candidate = headquarter_code_of(&record.swift_code);
  let headquarter = tx.headquarter(&candidate)?.map(|hq| hq.swift_code);
  tx.insert_branch(&record.to_branch(headquarter.clone()))?;
  Ok(Created::Branch { headquarter })
}

/// Delete the headquarter or branch registered under `code`.
///
/// Branches of a deleted headquarter stay; the store clears their link.
pub async fn delete_record<S: DirectoryStore>(store: &S, code: &str) -> Result<Deleted> {
  let code = normalize(code);

  let deleted = {
    let code = code.clone();
    store
      .transaction(move |tx| {
        if tx.delete_headquarter(&code)? {
          return Ok(Some(Deleted::Headquarter(code)));
        }
        if tx.delete_branch(&code)? {
          return Ok(Some(Deleted::Branch(code)));
        }
        Ok(None)
      })
      .await?
  };

  let deleted = deleted
    .ok_or_else(|| Error::NotFound(format!("No record found with swiftCode {code}")))?;
  tracing::debug!(?deleted, "record deleted");
  Ok(deleted)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(code: &str, is_headquarter: bool) -> NewRecord {
    NewRecord {
      swift_code: code.into(),
      bank_name: Some("Test Bank".into()),
      address: None,
      town_name: None,
      code_type: None,
      country_iso2: "us".into(),
      country_name: "UNITED STATES".into(),
      is_headquarter,
    }
  }

  #[test]
  fn validation_accepts_consistent_records() {
    assert!(record("TESTUS33XXX", true).normalized().validate().is_ok());
    assert!(record("TESTUS33ABC", false).normalized().validate().is_ok());
  }

  #[test]
  fn validation_rejects_flag_suffix_mismatch() {
    assert!(matches!(
      record("TESTUS33ABC", true).normalized().validate(),
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      record("TESTUS33XXX", false).normalized().validate(),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn validation_rejects_bad_lengths_and_missing_country() {
    assert!(record("TEST", true).normalized().validate().is_err());

    let mut r = record("TESTUS33XXX", true);
    r.country_iso2 = "USA".into();
    assert!(r.normalized().validate().is_err());

    let mut r = record("TESTUS33XXX", true);
    r.country_name = "  ".into();
    assert!(r.normalized().validate().is_err());
  }

  #[test]
  fn missing_optional_fields_default() {
    let hq = record("TESTUS33XXX", true).normalized().to_headquarter();
    assert_eq!(hq.code_type, DEFAULT_CODE_TYPE);
    assert_eq!(hq.address, "");
    assert_eq!(hq.country_iso2, "US");
  }
}
