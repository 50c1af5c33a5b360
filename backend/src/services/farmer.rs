//! Farmer store: registration records keyed by contact number

use std::time::Duration;

use shared::{validate_contact, validate_registration, FarmerRecord, RegisterFarmerInput};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Persists and retrieves farmers.
///
/// `Contact` is unique at the table level and `upsert` checks for an
/// existing row before inserting, so one contact always resolves to one
/// record.
#[derive(Clone)]
pub struct FarmerStore {
    db: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: i64,
    name: String,
    contact: String,
    field_size: f64,
    crop_planted: String,
}

impl From<FarmerRow> for FarmerRecord {
    fn from(r: FarmerRow) -> Self {
        FarmerRecord {
            id: r.id,
            name: r.name,
            contact: r.contact,
            field_size: r.field_size,
            crop_planted: r.crop_planted,
        }
    }
}

const SELECT_FARMER: &str = r#"
    SELECT FarmerID AS id, Name AS name, Contact AS contact,
           FieldSize AS field_size, CropPlanted AS crop_planted
    FROM Farmers
"#;

impl FarmerStore {
    /// Wrap an existing pool. Call [`FarmerStore::init_schema`] before use.
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open the pool described by `config` and make sure the table exists
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let db = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.url)
            .await?;

        let store = Self::new(db);
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `Farmers` table if it does not exist
    pub async fn init_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Farmers (
                FarmerID INTEGER PRIMARY KEY AUTOINCREMENT,
                Name TEXT NOT NULL,
                Contact TEXT NOT NULL UNIQUE,
                FieldSize REAL NOT NULL,
                CropPlanted TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Register a farmer, or return the id already held by this contact.
    ///
    /// An existing record is returned unchanged; the new field values are
    /// ignored. Blank fields or a non-positive field size are rejected and
    /// nothing is written.
    pub async fn upsert(&self, input: &RegisterFarmerInput) -> AppResult<i64> {
        let input = input.normalized();
        validate_registration(&input)?;

        if let Some(existing) = self.find_optional_by_contact(&input.contact).await? {
            tracing::debug!(farmer_id = existing.id, "Contact already registered");
            return Ok(existing.id);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO Farmers (Name, Contact, FieldSize, CropPlanted)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(Contact) DO NOTHING
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact)
        .bind(input.field_size)
        .bind(&input.crop_planted)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            // Another writer registered the contact between check and insert.
            let existing = self
                .find_optional_by_contact(&input.contact)
                .await?
                .ok_or_else(|| AppError::Internal("Farmer vanished after conflict".into()))?;
            return Ok(existing.id);
        }

        let farmer_id = result.last_insert_rowid();
        tracing::info!(farmer_id, crop = %input.crop_planted, "Registered farmer");
        Ok(farmer_id)
    }

    /// Look up a farmer by contact number
    pub async fn find_by_contact(&self, contact: &str) -> AppResult<FarmerRecord> {
        validate_contact(contact).map_err(|m| AppError::validation("contact", m))?;

        self.find_optional_by_contact(contact.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("Farmer not found. Please register.".to_string()))
    }

    /// Look up a farmer by id
    pub async fn find_by_id(&self, farmer_id: i64) -> AppResult<FarmerRecord> {
        let row = sqlx::query_as::<_, FarmerRow>(&format!("{} WHERE FarmerID = ?1", SELECT_FARMER))
            .bind(farmer_id)
            .fetch_optional(&self.db)
            .await?;

        row.map(FarmerRecord::from)
            .ok_or_else(|| AppError::NotFound("Farmer not found".to_string()))
    }

    async fn find_optional_by_contact(&self, contact: &str) -> AppResult<Option<FarmerRecord>> {
        let row = sqlx::query_as::<_, FarmerRow>(&format!("{} WHERE Contact = ?1", SELECT_FARMER))
            .bind(contact)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(FarmerRecord::from))
    }

    /// Cheap connectivity check for the health endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.db.close().await;
    }
}
