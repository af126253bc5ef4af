//! SQL DDL for initializing the credential storage.
//! SQLite-first design; column names mirror the API field names.

/// SQLite schema with:
/// - `websites`: parent rows, owned by the surrounding application
/// - `ftp_data` / `database_data`: one table per credential resource
/// - `website_id` foreign keys cascading on website removal, indexed for listing
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS websites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    domain TEXT NULL
);

CREATE TABLE IF NOT EXISTS ftp_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    website_id INTEGER NOT NULL REFERENCES websites(id) ON DELETE CASCADE,
    "type" TEXT NOT NULL,
    "hostname" TEXT NULL,
    "username" TEXT NULL,
    "password" TEXT NULL,
    "path" TEXT NULL,
    "notes" TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_ftp_data_website_id ON ftp_data(website_id);

CREATE TABLE IF NOT EXISTS database_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    website_id INTEGER NOT NULL REFERENCES websites(id) ON DELETE CASCADE,
    "type" TEXT NOT NULL,
    "hostname" TEXT NULL,
    "username" TEXT NULL,
    "password" TEXT NULL,
    "database" TEXT NULL,
    "url" TEXT NULL,
    "notes" TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_database_data_website_id ON database_data(website_id);
"#;
