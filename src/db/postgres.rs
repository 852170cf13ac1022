//! PostgreSQL-backed user store
//!
//! One table `users` with the nationality guesses serialized into a JSONB
//! `country` column, so reads stay single-row at the cost of a textual
//! ILIKE for the country filter. Schema migrations are managed out of band.

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::models::{Country, EnrichedUser, UserFilter};

use super::{StorageError, UserStore};

/// User store backed by a PostgreSQL pool.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Decode one `users` row, re-parsing the JSONB column into the ordered
/// country list.
fn row_to_user(row: &PgRow) -> Result<EnrichedUser, sqlx::Error> {
    let countries: Option<Json<Vec<Country>>> = row.try_get("country")?;

    Ok(EnrichedUser {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        surname: row.try_get("surname")?,
        patronymic: row.try_get("patronymic")?,
        age: row.try_get("age")?,
        sex: row.try_get("sex")?,
        countries: countries.map(|json| json.0).unwrap_or_default(),
    })
}

/// Compose the filtered listing query.
///
/// Every provided filter appends one `AND` clause with one bound parameter,
/// in fixed textual order; the builder numbers the placeholders, so they can
/// never drift from the argument list. Age bounds and pagination only apply
/// when positive.
fn build_list_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id, name, surname, patronymic, age, sex, country FROM users WHERE 1=1",
    );

    if let Some(name) = &filter.name {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", name));
    }

    if let Some(surname) = &filter.surname {
        query.push(" AND surname ILIKE ");
        query.push_bind(format!("%{}%", surname));
    }

    if let Some(patronymic) = &filter.patronymic {
        query.push(" AND patronymic ILIKE ");
        query.push_bind(format!("%{}%", patronymic));
    }

    if let Some(age_from) = filter.age_from {
        if age_from > 0 {
            query.push(" AND age >= ");
            query.push_bind(age_from);
        }
    }

    if let Some(age_to) = filter.age_to {
        if age_to > 0 {
            query.push(" AND age <= ");
            query.push_bind(age_to);
        }
    }

    if let Some(sex) = &filter.sex {
        query.push(" AND sex = ");
        query.push_bind(sex.clone());
    }

    if let Some(country) = &filter.country {
        query.push(" AND country::text ILIKE ");
        query.push_bind(format!("%{}%", country));
    }

    query.push(" ORDER BY id ASC");

    if let Some(limit) = filter.limit {
        if limit > 0 {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }
    }

    if let Some(offset) = filter.offset {
        if offset > 0 {
            query.push(" OFFSET ");
            query.push_bind(offset);
        }
    }

    query
}

#[async_trait]
impl UserStore for PostgresStorage {
    async fn save_user(&self, user: &EnrichedUser) -> Result<i64, StorageError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, surname, patronymic, age, sex, country)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.patronymic)
        .bind(user.age)
        .bind(&user.sex)
        .bind(Json(&user.countries))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn edit_user(&self, user: &EnrichedUser) -> Result<EnrichedUser, StorageError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, surname = $2, patronymic = $3, age = $4, sex = $5, country = $6
            WHERE id = $7
            RETURNING id, name, surname, patronymic, age, sex, country
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.patronymic)
        .bind(user.age)
        .bind(&user.sex)
        .bind(Json(&user.countries))
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row_to_user(&row)?),
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_user(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn get_users(&self, filter: &UserFilter) -> Result<Vec<EnrichedUser>, StorageError> {
        let mut query = build_list_query(filter);

        let mut rows = query.build().fetch(&self.pool);
        let mut users = Vec::new();

        while let Some(row) = rows.try_next().await? {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn get_user(&self, id: i64) -> Result<EnrichedUser, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, surname, patronymic, age, sex, country
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row_to_user(&row)?),
            None => Err(StorageError::NotFound),
        }
    }
}
