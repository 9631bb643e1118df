use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ts_rs::TS;

/// Entity counts shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DashboardStats {
    pub properties: i64,
    pub leads: i64,
    pub cities: i64,
    pub neighborhoods: i64,
    pub profiles: i64,
    pub banners: i64,
}

impl DashboardStats {
    pub async fn load(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        async fn count(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(pool)
                .await
        }

        Ok(Self {
            properties: count(pool, "properties").await?,
            leads: count(pool, "leads").await?,
            cities: count(pool, "cities").await?,
            neighborhoods: count(pool, "neighborhoods").await?,
            profiles: count(pool, "profiles").await?,
            banners: count(pool, "banners").await?,
        })
    }
}
