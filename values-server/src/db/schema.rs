//! Table naming conventions and first-run bootstrap
//!
//! Tables created by this service use quoted, capitalized identifiers
//! (`"TestTable"`, `"ID"`, `"Name"`, `"Value"`). Tables provisioned by hand
//! often end up with folded lowercase names instead, so every statement can
//! be rendered in either convention.

use sqlx::PgPool;
use tracing::info;

/// Identifier convention of the values table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCasing {
    Capitalized,
    Lowercase,
}

impl ColumnCasing {
    pub fn table(self) -> &'static str {
        match self {
            Self::Capitalized => "\"TestTable\"",
            Self::Lowercase => "testtable",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Capitalized => "\"ID\"",
            Self::Lowercase => "id",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Capitalized => "\"Name\"",
            Self::Lowercase => "name",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Capitalized => "\"Value\"",
            Self::Lowercase => "value",
        }
    }

    pub fn alternate(self) -> Self {
        match self {
            Self::Capitalized => Self::Lowercase,
            Self::Lowercase => Self::Capitalized,
        }
    }

    /// All rows as JSON objects, ascending by id.
    pub fn select_all(self) -> String {
        format!(
            "SELECT row_to_json(t) FROM {} t ORDER BY t.{}",
            self.table(),
            self.id()
        )
    }

    pub fn select_one(self) -> String {
        format!(
            "SELECT row_to_json(t) FROM {} t WHERE t.{} = $1",
            self.table(),
            self.id()
        )
    }

    /// Binds `$1` name, `$2` value.
    pub fn insert(self) -> String {
        format!(
            "INSERT INTO {} AS t ({}, {}) VALUES ($1, $2) RETURNING row_to_json(t)",
            self.table(),
            self.name(),
            self.value()
        )
    }

    /// Binds `$1` name, `$2` value, `$3` id.
    pub fn update(self) -> String {
        format!(
            "UPDATE {} AS t SET {} = $1, {} = $2 WHERE t.{} = $3 RETURNING row_to_json(t)",
            self.table(),
            self.name(),
            self.value(),
            self.id()
        )
    }

    pub fn delete(self) -> String {
        format!("DELETE FROM {} WHERE {} = $1", self.table(), self.id())
    }
}

/// Only the schema unqualified statements resolve to counts. A `testtable`
/// elsewhere in the database is invisible to every query above.
const TABLE_EXISTS: &str = r#"
    SELECT COUNT(*)
    FROM information_schema.tables
    WHERE table_schema = current_schema()
      AND table_name IN ('TestTable', 'testtable')
"#;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "TestTable" (
        "ID" BIGSERIAL PRIMARY KEY,
        "Name" VARCHAR(100) NOT NULL,
        "Value" VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const SEED_ROWS: &str = r#"
    INSERT INTO "TestTable" ("Name", "Value") VALUES
        ('Sample Item 1', 'Sample Value 1'),
        ('Sample Item 2', 'Sample Value 2'),
        ('Sample Item 3', 'Sample Value 3')
"#;

/// Make sure the values table exists, creating and seeding it if absent.
///
/// Create and seed are separate statements; a failure between them leaves
/// an empty table behind. That only happens once, at startup.
pub async fn ensure_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar(TABLE_EXISTS).fetch_one(pool).await?;

    if count == 0 {
        info!("Creating TestTable...");
        sqlx::query(CREATE_TABLE).execute(pool).await?;
        info!("TestTable created");

        sqlx::query(SEED_ROWS).execute(pool).await?;
        info!("Sample data inserted");
    }

    info!("TestTable is ready");
    Ok(())
}
