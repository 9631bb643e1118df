use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCity {
    pub name: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateCity {
    pub name: Option<String>,
    pub state: Option<String>,
}

impl City {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, state, created_at FROM cities ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, name, state, created_at FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateCity) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Self>(
            "INSERT INTO cities (id, name, state) VALUES ($1, $2, $3)
             RETURNING id, name, state, created_at",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.state)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateCity,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE cities SET
               name  = COALESCE($2, name),
               state = COALESCE($3, state)
             WHERE id = $1
             RETURNING id, name, state, created_at",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.state)
        .fetch_one(pool)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
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
    async fn find_all_orders_by_name() {
        let db = DBService::new_in_memory().await.unwrap();
        for (name, state) in [("Santos", "SP"), ("Campinas", "SP"), ("Niterói", "RJ")] {
            City::create(
                &db.pool,
                &CreateCity {
                    name: name.to_string(),
                    state: state.to_string(),
                },
            )
            .await
            .unwrap();
        }

        let cities = City::find_all(&db.pool).await.unwrap();
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Campinas", "Niterói", "Santos"]);
    }
}
