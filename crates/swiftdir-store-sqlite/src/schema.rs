//! SQL schema for the directory store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Countries are created on first reference and never deleted.
CREATE TABLE IF NOT EXISTS countries (
    iso2          TEXT PRIMARY KEY,
    country_name  TEXT NOT NULL,
    time_zone     TEXT
);

CREATE TABLE IF NOT EXISTS headquarters (
    swift_code    TEXT PRIMARY KEY,  -- ends in 'XXX'
    code_type     TEXT NOT NULL DEFAULT '',
    bank_name     TEXT NOT NULL DEFAULT '',
    address       TEXT NOT NULL DEFAULT '',
    town_name     TEXT NOT NULL DEFAULT '',
    country_iso2  TEXT NOT NULL REFERENCES countries(iso2),
    CHECK (length(swift_code) BETWEEN 8 AND 11)
);

-- headquarter_swift_code is derived from swift_code, never caller-supplied.
-- Deleting a headquarter keeps its branches and clears their link.
CREATE TABLE IF NOT EXISTS branches (
    swift_code              TEXT PRIMARY KEY,
    code_type               TEXT NOT NULL DEFAULT '',
    bank_name               TEXT NOT NULL DEFAULT '',
    address                 TEXT NOT NULL DEFAULT '',
    town_name               TEXT NOT NULL DEFAULT '',
    country_iso2            TEXT NOT NULL REFERENCES countries(iso2),
    headquarter_swift_code  TEXT REFERENCES headquarters(swift_code) ON DELETE SET NULL,
    CHECK (length(swift_code) BETWEEN 8 AND 11)
);

CREATE INDEX IF NOT EXISTS headquarters_country_idx ON headquarters(country_iso2);
CREATE INDEX IF NOT EXISTS branches_country_idx     ON branches(country_iso2);
CREATE INDEX IF NOT EXISTS branches_hq_idx          ON branches(headquarter_swift_code);

PRAGMA user_version = 1;
";
