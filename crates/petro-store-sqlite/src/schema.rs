//! SQL schema for the petroleum sales store.
//!
//! Executed once at connection startup. Table and column names are read by
//! other tools, so they must not change without bumping `user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Dimension tables: one row per distinct value, never updated or deleted.
CREATE TABLE IF NOT EXISTS countries (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    country TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS products (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    product TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS years (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL UNIQUE
);

-- Fact table: append-only. The feed carries no record identifier, so there
-- is no natural key and re-imports add duplicate rows.
CREATE TABLE IF NOT EXISTS sales (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id INTEGER NOT NULL REFERENCES countries(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    year_id    INTEGER NOT NULL REFERENCES years(id),
    sale       INTEGER NOT NULL CHECK (sale >= 0)
);

CREATE INDEX IF NOT EXISTS sales_country_idx ON sales(country_id);
CREATE INDEX IF NOT EXISTS sales_product_idx ON sales(product_id);
CREATE INDEX IF NOT EXISTS sales_year_idx    ON sales(year_id);

PRAGMA user_version = 1;
";
