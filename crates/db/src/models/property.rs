use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, Type, types::Json};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PropertyType {
    Apartamento,
    Casa,
    Cobertura,
    Comercial,
    Terreno,
}

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[sqlx(type_name = "property_purpose", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PropertyPurpose {
    Venda,
    Locacao,
}

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Disponivel,
    Vendido,
    Alugado,
    Inativo,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Property {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub purpose: PropertyPurpose,
    pub price: f64,
    pub address: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub suites: Option<i32>,
    pub parking: Option<i32>,
    pub floor: Option<i32>,
    pub furnished: Option<bool>,
    pub financing: Option<bool>,
    pub status: PropertyStatus,
    pub city_id: Option<Uuid>,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateProperty {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub purpose: PropertyPurpose,
    pub price: f64,
    pub address: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub suites: Option<i32>,
    pub parking: Option<i32>,
    pub floor: Option<i32>,
    pub furnished: Option<bool>,
    pub financing: Option<bool>,
    pub status: Option<PropertyStatus>,
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub images: Vec<String>,
    pub cover_image: Option<String>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateProperty {
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub purpose: Option<PropertyPurpose>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub suites: Option<i32>,
    pub parking: Option<i32>,
    pub floor: Option<i32>,
    pub furnished: Option<bool>,
    pub financing: Option<bool>,
    pub status: Option<PropertyStatus>,
    pub city_id: Option<Uuid>,
    pub images: Option<Vec<String>>,
    pub cover_image: Option<String>,
}

const PROPERTY_COLUMNS: &str = "id, code, title, description, property_type, purpose, price, \
     address, area, bedrooms, bathrooms, suites, parking, floor, furnished, financing, status, \
     city_id, images, cover_image, created_at, updated_at";

impl Property {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Snapshot of every assigned property code, for code generation.
    pub async fn find_all_codes(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT code FROM properties ORDER BY code ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateProperty) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let status = data.status.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            "INSERT INTO properties (id, code, title, description, property_type, purpose, \
               price, address, area, bedrooms, bathrooms, suites, parking, floor, furnished, \
               financing, status, city_id, images, cover_image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
               $17, $18, $19, $20)
             RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.code)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.property_type)
        .bind(&data.purpose)
        .bind(data.price)
        .bind(&data.address)
        .bind(data.area)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.suites)
        .bind(data.parking)
        .bind(data.floor)
        .bind(data.furnished)
        .bind(data.financing)
        .bind(status)
        .bind(data.city_id)
        .bind(Json(&data.images))
        .bind(&data.cover_image)
        .fetch_one(pool)
        .await
    }

    /// Applies the provided fields and stamps `updated_at`. Returns
    /// `RowNotFound` when the id does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateProperty,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "UPDATE properties SET
               code          = COALESCE($2, code),
               title         = COALESCE($3, title),
               description   = COALESCE($4, description),
               property_type = COALESCE($5, property_type),
               purpose       = COALESCE($6, purpose),
               price         = COALESCE($7, price),
               address       = COALESCE($8, address),
               area          = COALESCE($9, area),
               bedrooms      = COALESCE($10, bedrooms),
               bathrooms     = COALESCE($11, bathrooms),
               suites        = COALESCE($12, suites),
               parking       = COALESCE($13, parking),
               floor         = COALESCE($14, floor),
               furnished     = COALESCE($15, furnished),
               financing     = COALESCE($16, financing),
               status        = COALESCE($17, status),
               city_id       = COALESCE($18, city_id),
               images        = COALESCE($19, images),
               cover_image   = COALESCE($20, cover_image),
               updated_at    = datetime('now', 'subsec')
             WHERE id = $1
             RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.code)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.property_type)
        .bind(&data.purpose)
        .bind(data.price)
        .bind(&data.address)
        .bind(data.area)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.suites)
        .bind(data.parking)
        .bind(data.floor)
        .bind(data.furnished)
        .bind(data.financing)
        .bind(&data.status)
        .bind(data.city_id)
        .bind(data.images.as_ref().map(Json))
        .bind(&data.cover_image)
        .fetch_one(pool)
        .await
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
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

    fn sample(code: &str) -> CreateProperty {
        CreateProperty {
            code: code.to_string(),
            title: "Apartamento no centro".to_string(),
            description: None,
            property_type: PropertyType::Apartamento,
            purpose: PropertyPurpose::Venda,
            price: 450_000.0,
            address: None,
            area: Some(72.5),
            bedrooms: Some(2),
            bathrooms: Some(1),
            suites: None,
            parking: Some(1),
            floor: Some(4),
            furnished: Some(false),
            financing: Some(true),
            status: None,
            city_id: None,
            images: vec!["https://cdn.example.com/p/1.jpg".to_string()],
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_round_trip() {
        let db = DBService::new_in_memory().await.unwrap();
        let created = Property::create(&db.pool, &sample("SELCX001")).await.unwrap();
        assert_eq!(created.code, "SELCX001");
        assert_eq!(created.status, PropertyStatus::Disponivel);
        assert_eq!(created.images.len(), 1);

        let fetched = Property::find_by_id(&db.pool, created.id)
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(fetched.code, created.code);
        assert_eq!(fetched.images, created.images);
    }

    #[tokio::test]
    async fn code_is_unique_case_insensitively() {
        let db = DBService::new_in_memory().await.unwrap();
        Property::create(&db.pool, &sample("SELCX007")).await.unwrap();

        let err = Property::create(&db.pool, &sample("selcx007"))
            .await
            .expect_err("duplicate code must be rejected");
        match err {
            sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_applies_partial_fields_and_stamps_updated_at() {
        let db = DBService::new_in_memory().await.unwrap();
        let created = Property::create(&db.pool, &sample("SELCX002")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updates = UpdateProperty {
            code: None,
            title: Some("Apartamento reformado".to_string()),
            description: None,
            property_type: None,
            purpose: None,
            price: Some(480_000.0),
            address: None,
            area: None,
            bedrooms: None,
            bathrooms: None,
            suites: None,
            parking: None,
            floor: None,
            furnished: None,
            financing: None,
            status: Some(PropertyStatus::Vendido),
            city_id: None,
            images: None,
            cover_image: None,
        };
        let updated = Property::update(&db.pool, created.id, &updates).await.unwrap();

        assert_eq!(updated.title, "Apartamento reformado");
        assert_eq!(updated.price, 480_000.0);
        assert_eq!(updated.status, PropertyStatus::Vendido);
        // Untouched fields survive
        assert_eq!(updated.code, "SELCX002");
        assert_eq!(updated.bedrooms, Some(2));
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let db = DBService::new_in_memory().await.unwrap();
        let created = Property::create(&db.pool, &sample("SELCX003")).await.unwrap();

        assert_eq!(Property::delete(&db.pool, created.id).await.unwrap(), 1);
        assert_eq!(Property::delete(&db.pool, created.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_all_codes_returns_every_assigned_code() {
        let db = DBService::new_in_memory().await.unwrap();
        Property::create(&db.pool, &sample("SELCX010")).await.unwrap();
        Property::create(&db.pool, &sample("SELCX002")).await.unwrap();

        let codes = Property::find_all_codes(&db.pool).await.unwrap();
        assert_eq!(codes, vec!["SELCX002".to_string(), "SELCX010".to_string()]);
    }
}
