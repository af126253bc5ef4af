use crate::db::models::{CredentialDraft, CredentialInput, CredentialRecord, Website};
use crate::db::schema::SQLITE_INIT;
use crate::error::SitekeepError;
use crate::service::validator::{self, ValidationErrors, WebsiteLookup};
use crate::types::resource::Resource;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use std::collections::BTreeMap;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), SitekeepError> {
    // execute statements one by one (sqlx::query runs a single statement)
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// Read access to parent websites.
#[derive(Clone)]
pub struct WebsiteStorage {
    pool: SqlitePool,
}

impl WebsiteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i64) -> Result<bool, SitekeepError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM websites WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0 > 0)
    }

    /// Websites are owned by the surrounding application; this exists for
    /// provisioning and tests.
    pub async fn create(&self, name: &str, domain: Option<&str>) -> Result<Website, SitekeepError> {
        let website = sqlx::query_as::<_, Website>(
            "INSERT INTO websites (name, domain) VALUES (?, ?) RETURNING id, name, domain",
        )
        .bind(name)
        .bind(domain)
        .fetch_one(&self.pool)
        .await?;
        Ok(website)
    }
}

/// Repository for one credential resource table.
#[derive(Clone)]
pub struct CredentialStorage {
    pool: SqlitePool,
    resource: Resource,
}

impl CredentialStorage {
    pub fn new(pool: SqlitePool, resource: Resource) -> Self {
        Self { pool, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Records of a website ordered by id.
    pub async fn list(&self, website_id: i64) -> Result<Vec<CredentialRecord>, SitekeepError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE website_id = ? ORDER BY id",
            self.select_columns(),
            self.resource.table()
        );
        let rows = sqlx::query(&sql)
            .bind(website_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(|row| self.row_to_model(row)).collect()
    }

    /// Look up one record, scoped to `website_id` when given.
    pub async fn details(
        &self,
        id: i64,
        website_id: Option<i64>,
    ) -> Result<Option<CredentialRecord>, SitekeepError> {
        let row = match website_id {
            Some(website_id) => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE id = ? AND website_id = ?",
                    self.select_columns(),
                    self.resource.table()
                );
                sqlx::query(&sql)
                    .bind(id)
                    .bind(website_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE id = ?",
                    self.select_columns(),
                    self.resource.table()
                );
                sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?
            }
        };
        row.map(|row| self.row_to_model(row)).transpose()
    }

    /// Validate and insert. Returns the stored row with its generated id.
    pub async fn add(
        &self,
        website_id: i64,
        input: &CredentialInput,
    ) -> Result<CredentialRecord, SitekeepError> {
        let draft = CredentialDraft::from_input(self.resource, website_id, input);
        self.ensure_valid(&draft).await?;

        let fields = self.resource.fields();
        let columns: Vec<String> = fields.iter().map(|f| quote(f.name)).collect();
        let placeholders = vec!["?"; fields.len() + 2].join(", ");
        let sql = format!(
            r#"INSERT INTO {} (website_id, "type", {}) VALUES ({}) RETURNING {}"#,
            self.resource.table(),
            columns.join(", "),
            placeholders,
            self.select_columns()
        );

        let mut query = sqlx::query(&sql)
            .bind(draft.website_id)
            .bind(draft.kind.clone());
        for col in fields {
            query = query.bind(draft.field(col.name).map(str::to_string));
        }
        let row = query.fetch_one(&self.pool).await?;
        self.row_to_model(row)
    }

    /// Load the record within its website, merge whitelisted incoming fields
    /// over it, re-validate and persist.
    ///
    /// An unknown `website_id` is a validation error even though no record can
    /// be loaded under it.
    pub async fn update(
        &self,
        id: i64,
        website_id: i64,
        input: &CredentialInput,
    ) -> Result<CredentialRecord, SitekeepError> {
        let website = self.website_lookup(website_id).await?;
        if website != WebsiteLookup::Found {
            let incoming = CredentialDraft::from_input(self.resource, website_id, input);
            let errors = validator::validate_incoming(self.resource, &incoming, website);
            return Err(self.rejected(&incoming, errors));
        }

        let existing = self
            .details(id, Some(website_id))
            .await?
            .ok_or(SitekeepError::RecordNotFound(self.resource))?;
        let draft = CredentialDraft::merged(self.resource, &existing, input);
        self.ensure_valid(&draft).await?;

        let fields = self.resource.fields();
        let assignments: Vec<String> = std::iter::once(quote("type"))
            .chain(fields.iter().map(|f| quote(f.name)))
            .map(|col| format!("{col} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? AND website_id = ? RETURNING {}",
            self.resource.table(),
            assignments.join(", "),
            self.select_columns()
        );

        let mut query = sqlx::query(&sql).bind(draft.kind.clone());
        for col in fields {
            query = query.bind(draft.field(col.name).map(str::to_string));
        }
        // Row may vanish between load and write; last writer wins otherwise.
        let row = query
            .bind(id)
            .bind(website_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| self.row_to_model(row))
            .transpose()?
            .ok_or(SitekeepError::RecordNotFound(self.resource))
    }

    /// Hard delete. Deleting a missing id is not an error; the number of
    /// removed rows is returned.
    pub async fn delete(&self, id: i64) -> Result<u64, SitekeepError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.resource.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Run every rule against the draft, looking up the website when an id is present.
    pub async fn validate(&self, draft: &CredentialDraft) -> Result<ValidationErrors, SitekeepError> {
        let lookup = self.website_lookup(draft.website_id).await?;
        Ok(validator::validate(self.resource, draft, lookup))
    }

    async fn website_lookup(&self, website_id: i64) -> Result<WebsiteLookup, SitekeepError> {
        if website_id == 0 {
            return Ok(WebsiteLookup::Unchecked);
        }
        let found = WebsiteStorage::new(self.pool.clone())
            .exists(website_id)
            .await?;
        Ok(if found {
            WebsiteLookup::Found
        } else {
            WebsiteLookup::Missing
        })
    }

    async fn ensure_valid(&self, draft: &CredentialDraft) -> Result<(), SitekeepError> {
        let errors = self.validate(draft).await?;
        if errors.has_errors() {
            return Err(self.rejected(draft, errors));
        }
        Ok(())
    }

    fn rejected(&self, draft: &CredentialDraft, errors: ValidationErrors) -> SitekeepError {
        debug!(
            resource = %self.resource,
            website_id = draft.website_id,
            fields = ?errors.fields().collect::<Vec<_>>(),
            "credential rejected by validation"
        );
        SitekeepError::Validation(errors)
    }

    fn select_columns(&self) -> String {
        ["id".to_string(), "website_id".to_string(), quote("type")]
            .into_iter()
            .chain(self.resource.fields().iter().map(|f| quote(f.name)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn row_to_model(&self, row: SqliteRow) -> Result<CredentialRecord, SitekeepError> {
        let id: i64 = row.try_get("id")?;
        let website_id: i64 = row.try_get("website_id")?;
        let kind: String = row.try_get("type")?;

        let mut fields = BTreeMap::new();
        for col in self.resource.fields() {
            let value: Option<String> = row.try_get(col.name)?;
            fields.insert(col.name.to_string(), value);
        }

        Ok(CredentialRecord {
            id,
            website_id,
            kind,
            fields,
        })
    }
}

/// Column names come from static descriptors only; quoting keeps keywords
/// such as `type` and `database` usable as identifiers.
fn quote(column: &str) -> String {
    format!("\"{column}\"")
}
