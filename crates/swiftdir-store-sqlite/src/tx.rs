//! [`SqliteTx`]: the [`DirectoryTx`] implementation over an open SQLite
//! transaction.

use rusqlite::{Connection, OptionalExtension as _, Row, params};

use swiftdir_core::{
  Result,
  model::{Branch, Country, DirectoryStats, Headquarter},
  store::DirectoryTx,
};

use crate::error::classify;

const HQ_COLUMNS: &str =
  "swift_code, code_type, bank_name, address, town_name, country_iso2";

const BRANCH_COLUMNS: &str = "swift_code, code_type, bank_name, address, town_name, \
                              country_iso2, headquarter_swift_code";

/// Borrowed view of a connection with a transaction open on it.
pub(crate) struct SqliteTx<'a> {
  pub(crate) conn: &'a Connection,
}

// ─── Row decoding ────────────────────────────────────────────────────────────

fn country_from_row(row: &Row<'_>) -> rusqlite::Result<Country> {
  Ok(Country {
    iso2:      row.get(0)?,
    name:      row.get(1)?,
    time_zone: row.get(2)?,
  })
}

fn hq_from_row(row: &Row<'_>) -> rusqlite::Result<Headquarter> {
  Ok(Headquarter {
    swift_code:   row.get(0)?,
    code_type:    row.get(1)?,
    bank_name:    row.get(2)?,
    address:      row.get(3)?,
    town_name:    row.get(4)?,
    country_iso2: row.get(5)?,
  })
}

fn branch_from_row(row: &Row<'_>) -> rusqlite::Result<Branch> {
  Ok(Branch {
    swift_code:   row.get(0)?,
    code_type:    row.get(1)?,
    bank_name:    row.get(2)?,
    address:      row.get(3)?,
    town_name:    row.get(4)?,
    country_iso2: row.get(5)?,
    headquarter:  row.get(6)?,
  })
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'`
/// prefix match.
fn like_prefix(prefix: &str) -> String {
  let mut pattern = String::with_capacity(prefix.len() + 1);
  for c in prefix.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

impl SqliteTx<'_> {
  fn query_list<T>(
    &self,
    sql: &str,
    param: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
  ) -> Result<Vec<T>> {
    let run = || -> rusqlite::Result<Vec<T>> {
      let mut stmt = self.conn.prepare(sql)?;
      let rows = stmt.query_map(params![param], map)?;
      rows.collect()
    };
    run().map_err(classify)
  }

  fn count(&self, table: &str) -> Result<u64> {
    self
      .conn
      .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get::<_, i64>(0))
      .map(|n| n as u64)
      .map_err(classify)
  }
}

// ─── DirectoryTx impl ────────────────────────────────────────────────────────

impl DirectoryTx for SqliteTx<'_> {
  // ── Countries ─────────────────────────────────────────────────────────────

  fn country(&self, iso2: &str) -> Result<Option<Country>> {
    self
      .conn
      .query_row(
        "SELECT iso2, country_name, time_zone FROM countries WHERE iso2 = ?1",
        params![iso2],
        country_from_row,
      )
      .optional()
      .map_err(classify)
  }

  fn upsert_country(&self, country: &Country) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO countries (iso2, country_name, time_zone) VALUES (?1, ?2, ?3)
         ON CONFLICT(iso2) DO NOTHING",
        params![country.iso2, country.name, country.time_zone],
      )
      .map_err(classify)?;
    Ok(())
  }

  // ── Headquarters ──────────────────────────────────────────────────────────

  fn headquarter(&self, swift_code: &str) -> Result<Option<Headquarter>> {
    self
      .conn
      .query_row(
        &format!("SELECT {HQ_COLUMNS} FROM headquarters WHERE swift_code = ?1"),
        params![swift_code],
        hq_from_row,
      )
      .optional()
      .map_err(classify)
  }

  fn upsert_headquarter(&self, hq: &Headquarter) -> Result<()> {
    self
      .conn
      .execute(
        &format!(
          "INSERT INTO headquarters ({HQ_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(swift_code) DO UPDATE SET
             code_type    = excluded.code_type,
             bank_name    = excluded.bank_name,
             address      = excluded.address,
             town_name    = excluded.town_name,
             country_iso2 = excluded.country_iso2"
        ),
        params![
          hq.swift_code,
          hq.code_type,
          hq.bank_name,
          hq.address,
          hq.town_name,
          hq.country_iso2,
        ],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn insert_headquarter(&self, hq: &Headquarter) -> Result<()> {
    self
      .conn
      .execute(
        &format!("INSERT INTO headquarters ({HQ_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
          hq.swift_code,
          hq.code_type,
          hq.bank_name,
          hq.address,
          hq.town_name,
          hq.country_iso2,
        ],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn delete_headquarter(&self, swift_code: &str) -> Result<bool> {
    let n = self
      .conn
      .execute("DELETE FROM headquarters WHERE swift_code = ?1", params![swift_code])
      .map_err(classify)?;
    Ok(n > 0)
  }

  fn headquarters_in_country(&self, iso2: &str) -> Result<Vec<Headquarter>> {
    self.query_list(
      &format!(
        "SELECT {HQ_COLUMNS} FROM headquarters WHERE country_iso2 = ?1 ORDER BY swift_code"
      ),
      iso2,
      hq_from_row,
    )
  }

  // ── Branches ──────────────────────────────────────────────────────────────

  fn branch(&self, swift_code: &str) -> Result<Option<Branch>> {
    self
      .conn
      .query_row(
        &format!("SELECT {BRANCH_COLUMNS} FROM branches WHERE swift_code = ?1"),
        params![swift_code],
        branch_from_row,
      )
      .optional()
      .map_err(classify)
  }

  fn upsert_branch(&self, branch: &Branch) -> Result<()> {
    self
      .conn
      .execute(
        &format!(
          "INSERT INTO branches ({BRANCH_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(swift_code) DO UPDATE SET
             code_type              = excluded.code_type,
             bank_name              = excluded.bank_name,
             address                = excluded.address,
             town_name              = excluded.town_name,
             country_iso2           = excluded.country_iso2,
             headquarter_swift_code = excluded.headquarter_swift_code"
        ),
        params![
          branch.swift_code,
          branch.code_type,
          branch.bank_name,
          branch.address,
          branch.town_name,
          branch.country_iso2,
          branch.headquarter,
        ],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn insert_branch(&self, branch: &Branch) -> Result<()> {
    self
      .conn
      .execute(
        &format!("INSERT INTO branches ({BRANCH_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
          branch.swift_code,
          branch.code_type,
          branch.bank_name,
          branch.address,
          branch.town_name,
          branch.country_iso2,
          branch.headquarter,
        ],
      )
      .map_err(classify)?;
    Ok(())
  }

  fn delete_branch(&self, swift_code: &str) -> Result<bool> {
    let n = self
      .conn
      .execute("DELETE FROM branches WHERE swift_code = ?1", params![swift_code])
      .map_err(classify)?;
    Ok(n > 0)
  }

  fn branches_in_country(&self, iso2: &str) -> Result<Vec<Branch>> {
    self.query_list(
      &format!(
        "SELECT {BRANCH_COLUMNS} FROM branches WHERE country_iso2 = ?1 ORDER BY swift_code"
      ),
      iso2,
      branch_from_row,
    )
  }

  fn branches_of(&self, hq_code: &str) -> Result<Vec<Branch>> {
    self.query_list(
      &format!(
        "SELECT {BRANCH_COLUMNS} FROM branches
         WHERE headquarter_swift_code = ?1 ORDER BY swift_code"
      ),
      hq_code,
      branch_from_row,
    )
  }

  fn unlinked_branches(&self, prefix: &str) -> Result<Vec<Branch>> {
    self.query_list(
      &format!(
        "SELECT {BRANCH_COLUMNS} FROM branches
         WHERE headquarter_swift_code IS NULL AND swift_code LIKE ?1 ESCAPE '\\'
         ORDER BY swift_code"
      ),
      &like_prefix(prefix),
      branch_from_row,
    )
  }

  fn link_branch(&self, branch_code: &str, hq_code: &str) -> Result<()> {
    self
      .conn
      .execute(
        "UPDATE branches SET headquarter_swift_code = ?2 WHERE swift_code = ?1",
        params![branch_code, hq_code],
      )
      .map_err(classify)?;
    Ok(())
  }

  // ── Misc ──────────────────────────────────────────────────────────────────

  fn stats(&self) -> Result<DirectoryStats> {
    Ok(DirectoryStats {
      countries:    self.count("countries")?,
      headquarters: self.count("headquarters")?,
      branches:     self.count("branches")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::like_prefix;

  #[test]
  fn like_prefix_escapes_wildcards() {
    assert_eq!(like_prefix("AAAABBCC"), "AAAABBCC%");
    assert_eq!(like_prefix("A_B%"), "A\\_B\\%%");
  }
}
