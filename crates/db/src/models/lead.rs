use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub message: Option<String>,
    pub property_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateLead {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub message: Option<String>,
    pub property_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub message: Option<String>,
    pub property_url: Option<String>,
}

const LEAD_COLUMNS: &str =
    "id, name, phone, email, property_id, status, notes, message, property_url, created_at";

impl Lead {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateLead) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let status = data.status.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            "INSERT INTO leads (id, name, phone, email, property_id, status, notes, message, \
               property_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(data.property_id)
        .bind(status)
        .bind(&data.notes)
        .bind(&data.message)
        .bind(&data.property_url)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateLead,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "UPDATE leads SET
               name         = COALESCE($2, name),
               phone        = COALESCE($3, phone),
               email        = COALESCE($4, email),
               property_id  = COALESCE($5, property_id),
               status       = COALESCE($6, status),
               notes        = COALESCE($7, notes),
               message      = COALESCE($8, message),
               property_url = COALESCE($9, property_url)
             WHERE id = $1
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(data.property_id)
        .bind(&data.status)
        .bind(&data.notes)
        .bind(&data.message)
        .bind(&data.property_url)
        .fetch_one(pool)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
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
    async fn new_leads_default_to_new_status() {
        let db = DBService::new_in_memory().await.unwrap();
        let lead = Lead::create(
            &db.pool,
            &CreateLead {
                name: "Maria Souza".to_string(),
                phone: Some("11 99999-0000".to_string()),
                email: None,
                property_id: None,
                status: None,
                notes: None,
                message: Some("Tenho interesse no imóvel".to_string()),
                property_url: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(lead.status, LeadStatus::New);

        let updated = Lead::update(
            &db.pool,
            lead.id,
            &UpdateLead {
                name: None,
                phone: None,
                email: None,
                property_id: None,
                status: Some(LeadStatus::Contacted),
                notes: Some("Retornou contato".to_string()),
                message: None,
                property_url: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, LeadStatus::Contacted);
        assert_eq!(updated.name, "Maria Souza");
    }
}
