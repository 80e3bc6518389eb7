use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{NewProvider, Provider, ProviderId};
use crate::services::seed::sample_providers;
use crate::services::store::{ProviderSource, ProviderStore, StoreError};

const PROVIDER_COLUMNS: &str = r#"
    id, name, services, phone, email, website, address, city, state,
    postal_code, latitude, longitude, description, rating, review_count,
    years_experience
"#;

/// PostgreSQL-backed provider store
///
/// Service labels live in a JSONB column. Rows whose labels are not an
/// array of strings still load, with an empty label list, so a single bad
/// row never fails a whole search.
pub struct PostgresProviderStore {
    pool: PgPool,
}

impl PostgresProviderStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Insert the sample providers if the table is empty
    ///
    /// Returns the number of providers inserted.
    pub async fn seed_if_empty(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM legal_service_providers")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            tracing::debug!("Provider table already holds {} rows, skipping seed", count);
            return Ok(0);
        }

        let samples = sample_providers();
        let inserted = samples.len();
        for provider in samples {
            self.create_provider(provider).await?;
        }

        tracing::info!("Seeded {} sample providers", inserted);
        Ok(inserted)
    }
}

#[async_trait]
impl ProviderSource for PostgresProviderStore {
    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
        let query = format!(
            "SELECT {} FROM legal_service_providers ORDER BY id",
            PROVIDER_COLUMNS
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(provider_from_row).collect()
    }
}

#[async_trait]
impl ProviderStore for PostgresProviderStore {
    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
        let query = format!(
            "SELECT {} FROM legal_service_providers WHERE id = $1",
            PROVIDER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(provider_from_row).transpose()
    }

    async fn create_provider(&self, provider: NewProvider) -> Result<Provider, StoreError> {
        let query = r#"
            INSERT INTO legal_service_providers (
                name, services, phone, email, website, address, city, state,
                postal_code, latitude, longitude, description, rating,
                review_count, years_experience
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
        "#;

        let id: ProviderId = sqlx::query_scalar(query)
            .bind(&provider.name)
            .bind(Value::from(provider.services.clone()))
            .bind(&provider.phone)
            .bind(&provider.email)
            .bind(&provider.website)
            .bind(&provider.address)
            .bind(&provider.city)
            .bind(&provider.state)
            .bind(&provider.postal_code)
            .bind(provider.latitude)
            .bind(provider.longitude)
            .bind(&provider.description)
            .bind(provider.rating)
            .bind(provider.review_count)
            .bind(provider.years_experience)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted provider {} ({})", id, provider.name);

        Ok(provider.into_provider(id))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn provider_from_row(row: &PgRow) -> Result<Provider, StoreError> {
    let id: ProviderId = row.try_get("id")?;
    let services: Value = row.try_get("services")?;

    Ok(Provider {
        id,
        name: row.try_get("name")?,
        services: services_from_json(id, &services),
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        website: row.try_get("website")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        postal_code: row.try_get("postal_code")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        review_count: row.try_get::<Option<i32>, _>("review_count")?.unwrap_or(0),
        years_experience: row.try_get("years_experience")?,
    })
}

/// Decode a JSONB service label column
///
/// Anything other than an array of strings yields no labels.
pub fn services_from_json(provider_id: ProviderId, value: &Value) -> Vec<String> {
    let labels = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
    });

    match labels {
        Some(labels) => labels,
        None => {
            tracing::warn!(
                "Provider {} has malformed service labels, treating as uncategorized: {}",
                provider_id,
                value
            );
            Vec::new()
        }
    }
}
