//! Response shapes served over HTTP, and the pure functions that assemble
//! them from flat store rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Branch, Country, Headquarter};

// ─── Code lookup ─────────────────────────────────────────────────────────────

/// One office as it appears standalone or nested under its headquarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeView {
  pub address:        String,
  pub bank_name:      String,
  #[serde(rename = "countryISO2")]
  pub country_iso2:   String,
  pub country_name:   String,
  pub is_headquarter: bool,
  pub swift_code:     String,
}

/// A headquarter with every branch linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadquarterView {
  pub address:        String,
  pub bank_name:      String,
  #[serde(rename = "countryISO2")]
  pub country_iso2:   String,
  pub country_name:   String,
  pub is_headquarter: bool,
  pub swift_code:     String,
  pub branches:       Vec<OfficeView>,
}

/// Result of a lookup by code. Branches carry no `branches` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwiftCodeView {
  Headquarter(HeadquarterView),
  Branch(OfficeView),
}

// ─── Country lookup ──────────────────────────────────────────────────────────

/// A code listed under its country; the country name appears once, at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCodeEntry {
  pub address:        String,
  pub bank_name:      String,
  #[serde(rename = "countryISO2")]
  pub country_iso2:   String,
  pub is_headquarter: bool,
  pub swift_code:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryView {
  #[serde(rename = "countryISO2")]
  pub country_iso2: String,
  pub country_name: String,
  pub swift_codes:  Vec<CountryCodeEntry>,
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Country names keyed by ISO2, for rows that only carry the code.
pub type CountryNames = HashMap<String, String>;

fn country_name_of(names: &CountryNames, iso2: &str) -> String {
  names.get(iso2).cloned().unwrap_or_default()
}

pub fn branch_view(branch: Branch, names: &CountryNames) -> OfficeView {
  OfficeView {
    country_name:   country_name_of(names, &branch.country_iso2),
    address:        branch.address,
    bank_name:      branch.bank_name,
    country_iso2:   branch.country_iso2,
    is_headquarter: false,
    swift_code:     branch.swift_code,
  }
}

/// Nest `branches` under `hq`. Branch order is preserved.
pub fn headquarter_view(
  hq: Headquarter,
  branches: Vec<Branch>,
  names: &CountryNames,
) -> HeadquarterView {
  HeadquarterView {
    country_name:   country_name_of(names, &hq.country_iso2),
    address:        hq.address,
    bank_name:      hq.bank_name,
    country_iso2:   hq.country_iso2,
    is_headquarter: true,
    swift_code:     hq.swift_code,
    branches:       branches
      .into_iter()
      .map(|b| branch_view(b, names))
      .collect(),
  }
}

/// Flatten a country's headquarters and branches into one list,
/// headquarters first.
pub fn country_view(
  country: Country,
  headquarters: Vec<Headquarter>,
  branches: Vec<Branch>,
) -> CountryView {
  let hq_entries = headquarters.into_iter().map(|hq| CountryCodeEntry {
    address:        hq.address,
    bank_name:      hq.bank_name,
    country_iso2:   hq.country_iso2,
    is_headquarter: true,
    swift_code:     hq.swift_code,
  });
  let branch_entries = branches.into_iter().map(|b| CountryCodeEntry {
    address:        b.address,
    bank_name:      b.bank_name,
    country_iso2:   b.country_iso2,
    is_headquarter: false,
    swift_code:     b.swift_code,
  });

  CountryView {
    country_iso2: country.iso2,
    country_name: country.name,
    swift_codes:  hq_entries.chain(branch_entries).collect(),
  }
}
