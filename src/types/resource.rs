//! Static descriptors for each credential resource.
//!
//! Both resources share one table shape: `id`, `website_id`, `type` and a
//! fixed list of nullable text columns. The descriptor is the single source
//! for table names, accepted `type` values, whitelisted fields and length
//! limits, so storage, validation and routing never disagree.

/// A text column of a credential table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column and form-field name.
    pub name: &'static str,
    /// Human label used in validation messages.
    pub label: &'static str,
    /// Maximum length in characters.
    pub max_len: usize,
}

const fn field(name: &'static str, label: &'static str, max_len: usize) -> FieldSpec {
    FieldSpec {
        name,
        label,
        max_len,
    }
}

/// Upper bound for free-form notes (size of an SQL `TEXT` in most engines).
pub const NOTES_MAX_LEN: usize = 65_535;

const FTP_FIELDS: &[FieldSpec] = &[
    field("hostname", "Hostname", 100),
    field("username", "Username", 100),
    field("password", "Password", 100),
    field("path", "Path", 255),
    field("notes", "Notes", NOTES_MAX_LEN),
];

const DATABASE_FIELDS: &[FieldSpec] = &[
    field("hostname", "Hostname", 100),
    field("username", "Username", 100),
    field("password", "Password", 100),
    field("database", "Database", 100),
    field("url", "URL", 255),
    field("notes", "Notes", NOTES_MAX_LEN),
];

const FTP_TYPES: &[&str] = &["ftp", "sftp", "ftps", "webdav", "other"];

const DATABASE_TYPES: &[&str] = &[
    "mysql", "sqlite", "mssql", "oracle", "pgsql", "access", "other",
];

/// Credential resource exposed under `/api/{slug}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Ftp,
    Database,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Ftp, Resource::Database];

    /// Route segment.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Ftp => "ftp",
            Self::Database => "database",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::Ftp => "ftp_data",
            Self::Database => "database_data",
        }
    }

    /// Name used at the start of user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ftp => "FTP",
            Self::Database => "Database",
        }
    }

    /// Accepted values of the `type` column.
    pub fn types(self) -> &'static [&'static str] {
        match self {
            Self::Ftp => FTP_TYPES,
            Self::Database => DATABASE_TYPES,
        }
    }

    /// Text columns in storage order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Ftp => FTP_FIELDS,
            Self::Database => DATABASE_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn accepts_type(self, value: &str) -> bool {
        self.types().contains(&value)
    }

    pub fn not_found_message(self) -> String {
        format!("{} login credentials not found", self.display_name())
    }

    pub fn added_message(self) -> String {
        format!("{} login has been added.", self.display_name())
    }

    pub fn updated_message(self) -> String {
        format!("{} login has been updated.", self.display_name())
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
