//! Read side: lookup by code and by country.
//!
//! Input is validated before the store is touched. Each lookup runs in one
//! read transaction so the assembled view is a consistent snapshot.

use crate::{
  Error, Result,
  code::{normalize, validate_iso2, validate_swift_code},
  store::{DirectoryStore, DirectoryTx},
  view::{self, CountryNames, CountryView, SwiftCodeView},
};

/// Resolve `code` to a headquarter (with its branches) or a single branch.
pub async fn get_by_code<S: DirectoryStore>(
  store: &S,
  code: &str,
) -> Result<SwiftCodeView> {
  let code = normalize(code);
  validate_swift_code(&code)?;

  let found = {
    let code = code.clone();
    store.transaction(move |tx| assemble_code_view(tx, &code)).await?
  };
  found.ok_or_else(|| Error::NotFound(format!("SWIFT code {code} not found.")))
}

/// List every headquarter and branch registered under `iso2`.
pub async fn get_by_country<S: DirectoryStore>(
  store: &S,
  iso2: &str,
) -> Result<CountryView> {
  let iso2 = normalize(iso2);
  validate_iso2(&iso2)?;

  let found = {
    let iso2 = iso2.clone();
    store
      .transaction(move |tx| {
        let Some(country) = tx.country(&iso2)? else {
          return Ok(None);
        };
        let headquarters = tx.headquarters_in_country(&iso2)?;
        let branches = tx.branches_in_country(&iso2)?;
        Ok(Some(view::country_view(country, headquarters, branches)))
      })
      .await?
  };
  found.ok_or_else(|| {
    Error::NotFound(format!("No SWIFT codes found for country with ISO2 code: {iso2}."))
  })
}

fn assemble_code_view(tx: &dyn DirectoryTx, code: &str) -> Result<Option<SwiftCodeView>> {
  if let Some(hq) = tx.headquarter(code)? {
    let branches = tx.branches_of(code)?;
    let names = country_names(
      tx,
      std::iter::once(hq.country_iso2.as_str())
        .chain(branches.iter().map(|b| b.country_iso2.as_str())),
    )?;
    return Ok(Some(SwiftCodeView::Headquarter(view::headquarter_view(
      hq, branches, &names,
    ))));
  }

  if let Some(branch) = tx.branch(code)? {
    let names = country_names(tx, std::iter::once(branch.country_iso2.as_str()))?;
    return Ok(Some(SwiftCodeView::Branch(view::branch_view(branch, &names))));
  }

  Ok(None)
}

/// Resolve each distinct ISO2 code to its stored country name.
fn country_names<'a>(
  tx: &dyn DirectoryTx,
  codes: impl Iterator<Item = &'a str>,
) -> Result<CountryNames> {
  let mut names = CountryNames::new();
  for iso2 in codes {
    if names.contains_key(iso2) {
      continue;
    }
    if let Some(country) = tx.country(iso2)? {
      names.insert(country.iso2, country.name);
    }
  }
  Ok(names)
}
