//! Herb repository
//!
//! Handles herb CRUD against the `herbs` table:
//! - writes validate first and never touch storage with a bad record
//! - list queries are ordered by name
//! - zero affected rows on update/delete is reported as not found

use chrono::{DateTime, Utc};
use herbs_core::Herb;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::{Result, StoreError};

const RESOURCE: &str = "herb";

/// Decode one `herbs` row. Shared by every fetch.
fn herb_from_row(row: &PgRow) -> std::result::Result<Herb, sqlx::Error> {
    Ok(Herb {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        latin_name: row.try_get("latin_name")?,
        description: row.try_get("description")?,
        is_poisonous: row.try_get("is_poisonous")?,
        image_path: row.try_get("image_path")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Decode all rows; the first bad row fails the whole batch.
fn herbs_from_rows(rows: &[PgRow], context: &'static str) -> Result<Vec<Herb>> {
    rows.iter()
        .map(herb_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| StoreError::database(context, e))
}

/// Frame a search term as a literal substring pattern for LIKE.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Herb repository
pub struct HerbRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> HerbRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new herb.
    ///
    /// Storage assigns `id` and `created_at`; both are written back into
    /// `herb`. A record failing validation is rejected before any query.
    pub async fn create(&self, herb: &mut Herb) -> Result<()> {
        herb.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO herbs (name, latin_name, description, is_poisonous, image_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(&herb.name)
        .bind(herb.latin_name.as_deref())
        .bind(herb.description.as_deref())
        .bind(herb.is_poisonous)
        .bind(herb.image_path.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to create herb", e))?;

        herb.id = row
            .try_get("id")
            .map_err(|e| StoreError::database("failed to read new herb id", e))?;
        herb.created_at = row
            .try_get("created_at")
            .map_err(|e| StoreError::database("failed to read new herb timestamp", e))?;

        debug!(id = herb.id, name = %herb.name, "herb created");
        Ok(())
    }

    /// Get a single herb by ID.
    pub async fn get_by_id(&self, id: i32) -> Result<Herb> {
        debug!(id, "fetching herb");

        let row = sqlx::query(
            r#"
            SELECT id, name, latin_name, description, is_poisonous, image_path, created_at
            FROM herbs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to fetch herb", e))?
        .ok_or_else(|| StoreError::not_found(RESOURCE, id))?;

        herb_from_row(&row).map_err(|e| StoreError::database("failed to decode herb", e))
    }

    /// List every herb ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Herb>> {
        debug!("listing herbs");

        let rows = sqlx::query(
            r#"
            SELECT id, name, latin_name, description, is_poisonous, image_path, created_at
            FROM herbs
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to list herbs", e))?;

        herbs_from_rows(&rows, "failed to decode herb list")
    }

    /// Overwrite all mutable columns of an existing herb.
    ///
    /// `id` selects the row; `id` and `created_at` are never written.
    pub async fn update(&self, herb: &Herb) -> Result<()> {
        herb.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE herbs
            SET name = $2, latin_name = $3, description = $4,
                is_poisonous = $5, image_path = $6
            WHERE id = $1
            "#,
        )
        .bind(herb.id)
        .bind(&herb.name)
        .bind(herb.latin_name.as_deref())
        .bind(herb.description.as_deref())
        .bind(herb.is_poisonous)
        .bind(herb.image_path.as_deref())
        .execute(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to update herb", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(RESOURCE, herb.id));
        }

        debug!(id = herb.id, "herb updated");
        Ok(())
    }

    /// Delete a herb by ID.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM herbs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| StoreError::database("failed to delete herb", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(RESOURCE, id));
        }

        debug!(id, "herb deleted");
        Ok(())
    }

    /// Case-insensitive substring search over name and latin name.
    pub async fn search(&self, term: &str) -> Result<Vec<Herb>> {
        debug!(term, "searching herbs");

        let rows = sqlx::query(
            r#"
            SELECT id, name, latin_name, description, is_poisonous, image_path, created_at
            FROM herbs
            WHERE LOWER(name) LIKE LOWER($1) ESCAPE '\'
               OR LOWER(latin_name) LIKE LOWER($1) ESCAPE '\'
            ORDER BY name, id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to search herbs", e))?;

        herbs_from_rows(&rows, "failed to decode search results")
    }

    /// List poisonous herbs ordered by name.
    pub async fn get_poisonous(&self) -> Result<Vec<Herb>> {
        debug!("listing poisonous herbs");

        let rows = sqlx::query(
            r#"
            SELECT id, name, latin_name, description, is_poisonous, image_path, created_at
            FROM herbs
            WHERE is_poisonous = TRUE
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| StoreError::database("failed to list poisonous herbs", e))?;

        herbs_from_rows(&rows, "failed to decode poisonous herbs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbs_core::ValidationError;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern("chamo"), "%chamo%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), r"%50\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\img"), r"%c:\\img%");
    }

    // Validation must fail before the pool is ever touched; a lazy pool
    // pointing nowhere proves no connection is attempted.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .expect("lazy pool")
    }

    #[tokio::test]
    async fn create_rejects_invalid_herb_without_storage() {
        let pool = unreachable_pool();
        let repo = HerbRepo::new(&pool);

        let mut herb = Herb::new(" ");
        let err = repo.create(&mut herb).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Empty { field: "name" })
        ));
        assert_eq!(herb.id, 0);
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn update_rejects_invalid_herb_without_storage() {
        let pool = unreachable_pool();
        let repo = HerbRepo::new(&pool);

        let herb = Herb {
            id: 1,
            image_path: Some("x".repeat(501)),
            ..Herb::new("Yarrow")
        };
        let err = repo.update(&herb).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(pool.size(), 0);
    }
}
