//! SWIFT/BIC code rules.
//!
//! A code ending in [`HEADQUARTER_SUFFIX`] designates a bank's primary office.
//! Every other code is a branch, and its headquarter is derived by
//! [`headquarter_code_of`]. That function is the only place the prefix rule
//! lives; ingestion, insertion and re-linking all go through it.

use crate::{Error, Result};

pub const HEADQUARTER_SUFFIX: &str = "XXX";

pub const MIN_CODE_LEN: usize = 8;
pub const MAX_CODE_LEN: usize = 11;

/// Length of the bank + country + location part shared by a headquarter and
/// its branches.
pub const BANK_PREFIX_LEN: usize = 8;

/// Trim and upper-case a code or ISO2 value received from the outside.
pub fn normalize(raw: &str) -> String { raw.trim().to_uppercase() }

pub fn is_headquarter_code(code: &str) -> bool {
  code.ends_with(HEADQUARTER_SUFFIX)
}

/// The headquarter code a branch belongs to: the branch code with its last
/// three characters replaced by `XXX`.
///
/// ```
/// use swiftdir_core::code::headquarter_code_of;
///
/// assert_eq!(headquarter_code_of("AAAABBCC123"), "AAAABBCCXXX");
/// ```
pub fn headquarter_code_of(branch_code: &str) -> String {
  let cut = branch_code
    .char_indices()
    .rev()
    .nth(2)
    .map(|(i, _)| i)
    .unwrap_or(0);
  format!("{}{HEADQUARTER_SUFFIX}", &branch_code[..cut])
}

/// The first [`BANK_PREFIX_LEN`] characters of `code`, or all of it if shorter.
pub fn bank_prefix(code: &str) -> &str {
  match code.char_indices().nth(BANK_PREFIX_LEN) {
    Some((i, _)) => &code[..i],
    None => code,
  }
}

pub fn validate_swift_code(code: &str) -> Result<()> {
  let len = code.chars().count();
  if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
    return Err(Error::Validation(
      "Invalid SWIFT code. Please provide a valid 8 or 11 character SWIFT code."
        .to_owned(),
    ));
  }
  Ok(())
}

pub fn validate_iso2(iso2: &str) -> Result<()> {
  if iso2.chars().count() != 2 {
    return Err(Error::Validation(
      "Invalid country ISO2 code. Please provide a valid 2-character ISO2 country code."
        .to_owned(),
    ));
  }
  Ok(())
}
