use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, types::Json};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    #[sqlx(json)]
    pub desktop_images: Vec<String>,
    pub mobile_image: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateBanner {
    pub title: String,
    #[serde(default)]
    pub desktop_images: Vec<String>,
    pub mobile_image: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateBanner {
    pub title: Option<String>,
    pub desktop_images: Option<Vec<String>>,
    pub mobile_image: Option<String>,
    pub active: Option<bool>,
}

const BANNER_COLUMNS: &str = "id, title, desktop_images, mobile_image, active, created_at";

impl Banner {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {BANNER_COLUMNS} FROM banners ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {BANNER_COLUMNS} FROM banners WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateBanner) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let active = data.active.unwrap_or(true);
        sqlx::query_as::<_, Self>(&format!(
            "INSERT INTO banners (id, title, desktop_images, mobile_image, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {BANNER_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.title)
        .bind(Json(&data.desktop_images))
        .bind(&data.mobile_image)
        .bind(active)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateBanner,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "UPDATE banners SET
               title          = COALESCE($2, title),
               desktop_images = COALESCE($3, desktop_images),
               mobile_image   = COALESCE($4, mobile_image),
               active         = COALESCE($5, active)
             WHERE id = $1
             RETURNING {BANNER_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.title)
        .bind(data.desktop_images.as_ref().map(Json))
        .bind(&data.mobile_image)
        .bind(data.active)
        .fetch_one(pool)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn banner_images_round_trip_through_json_column() {
        let db = DBService::new_in_memory().await.unwrap();
        let images: Vec<String> = (1..=3)
            .map(|i| format!("https://cdn.example.com/banners/{i}.jpg"))
            .collect();

        let banner = Banner::create(
            &db.pool,
            &CreateBanner {
                title: "Lançamento".to_string(),
                desktop_images: images.clone(),
                mobile_image: Some("https://cdn.example.com/banners/m.jpg".to_string()),
                active: None,
            },
        )
        .await
        .unwrap();

        assert!(banner.active);
        assert_eq!(banner.desktop_images, images);

        let fetched = Banner::find_by_id(&db.pool, banner.id).await.unwrap().unwrap();
        assert_eq!(fetched.desktop_images, images);
    }
}
