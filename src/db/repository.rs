//! Database repository for CRUD operations.
//!
//! Uses prepared statements; every operation is a single store call.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Director, DirectorPayload, Series, SeriesPayload};

/// Columns for a series row joined against its director.
const SERIES_SELECT: &str = r#"
    SELECT s.id, s.title, s.genres, s.score, s.completed, s.premiere_date,
           s.seasons, s.director_id,
           d.id AS d_id, d.name AS d_name, d.surname AS d_surname,
           d.age AS d_age, d.birthplace AS d_birthplace
    FROM series s
    LEFT JOIN directors d ON d.id = s.director_id
"#;

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== DIRECTOR OPERATIONS ====================

    /// List all directors.
    pub async fn list_directors(&self) -> Result<Vec<Director>, AppError> {
        let rows = sqlx::query("SELECT id, name, surname, age, birthplace FROM directors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(director_from_row).collect())
    }

    /// Get a director by ID.
    pub async fn get_director(&self, id: i64) -> Result<Option<Director>, AppError> {
        let row = sqlx::query("SELECT id, name, surname, age, birthplace FROM directors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(director_from_row))
    }

    /// Create a new director.
    pub async fn create_director(&self, payload: &DirectorPayload) -> Result<Director, AppError> {
        let result =
            sqlx::query("INSERT INTO directors (name, surname, age, birthplace) VALUES (?, ?, ?, ?)")
                .bind(&payload.name)
                .bind(&payload.surname)
                .bind(payload.age)
                .bind(&payload.birthplace)
                .execute(&self.pool)
                .await?;

        Ok(Director {
            id: result.last_insert_rowid(),
            name: payload.name.clone(),
            surname: payload.surname.clone(),
            age: payload.age,
            birthplace: payload.birthplace.clone(),
        })
    }

    /// Replace every field of a director.
    pub async fn replace_director(
        &self,
        id: i64,
        payload: &DirectorPayload,
    ) -> Result<Director, AppError> {
        let result =
            sqlx::query("UPDATE directors SET name = ?, surname = ?, age = ?, birthplace = ? WHERE id = ?")
                .bind(&payload.name)
                .bind(&payload.surname)
                .bind(payload.age)
                .bind(&payload.birthplace)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Director {} not found", id)));
        }

        Ok(Director {
            id,
            name: payload.name.clone(),
            surname: payload.surname.clone(),
            age: payload.age,
            birthplace: payload.birthplace.clone(),
        })
    }

    /// Delete a director.
    pub async fn delete_director(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM directors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Director {} not found", id)));
        }

        Ok(())
    }

    // ==================== SERIES OPERATIONS ====================

    /// List all series with their directors embedded.
    pub async fn list_series(&self) -> Result<Vec<Series>, AppError> {
        let rows = sqlx::query(&format!("{} ORDER BY s.id", SERIES_SELECT))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(series_from_row).collect())
    }

    /// Get a series by ID with its director embedded.
    pub async fn get_series(&self, id: i64) -> Result<Option<Series>, AppError> {
        let row = sqlx::query(&format!("{} WHERE s.id = ?", SERIES_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(series_from_row))
    }

    /// Count series rows. Used by the seed-on-empty check.
    pub async fn count_series(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM series")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// Create a new series. The director reference is not validated.
    pub async fn create_series(&self, payload: &SeriesPayload) -> Result<Series, AppError> {
        let genres_json = genres_to_json(&payload.genres);

        let result = sqlx::query(
            r#"INSERT INTO series (title, genres, score, completed, premiere_date, seasons, director_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&payload.title)
        .bind(&genres_json)
        .bind(payload.score)
        .bind(payload.completed as i32)
        .bind(&payload.premiere_date)
        .bind(payload.seasons)
        .bind(payload.director_id)
        .execute(&self.pool)
        .await?;

        // Reload with the director join so the response embeds it
        let id = result.last_insert_rowid();
        self.get_series(id)
            .await?
            .ok_or_else(|| AppError::Database(format!("Series {} missing after insert", id)))
    }

    /// Replace every field of a series. The director reference is not validated.
    pub async fn replace_series(&self, id: i64, payload: &SeriesPayload) -> Result<Series, AppError> {
        let genres_json = genres_to_json(&payload.genres);

        let result = sqlx::query(
            r#"UPDATE series
               SET title = ?, genres = ?, score = ?, completed = ?,
                   premiere_date = ?, seasons = ?, director_id = ?
               WHERE id = ?"#,
        )
        .bind(&payload.title)
        .bind(&genres_json)
        .bind(payload.score)
        .bind(payload.completed as i32)
        .bind(&payload.premiere_date)
        .bind(payload.seasons)
        .bind(payload.director_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Series {} not found", id)));
        }

        self.get_series(id)
            .await?
            .ok_or_else(|| AppError::Database(format!("Series {} missing after update", id)))
    }

    /// Delete a series.
    pub async fn delete_series(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM series WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Series {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn director_from_row(row: &sqlx::sqlite::SqliteRow) -> Director {
    Director {
        id: row.get("id"),
        name: row.get("name"),
        surname: row.get("surname"),
        age: row.get("age"),
        birthplace: row.get("birthplace"),
    }
}

fn series_from_row(row: &sqlx::sqlite::SqliteRow) -> Series {
    let completed: i32 = row.get("completed");
    let genres_str: String = row.get("genres");

    // LEFT JOIN: director columns are all null when the reference dangles
    let director_id_joined: Option<i64> = row.get("d_id");
    let director = director_id_joined.map(|d_id| Director {
        id: d_id,
        name: row.get("d_name"),
        surname: row.get("d_surname"),
        age: row.get("d_age"),
        birthplace: row.get("d_birthplace"),
    });

    Series {
        id: row.get("id"),
        title: row.get("title"),
        genres: parse_json_array(&genres_str),
        score: row.get("score"),
        completed: completed != 0,
        premiere_date: row.get("premiere_date"),
        seasons: row.get("seasons"),
        director_id: row.get("director_id"),
        director,
    }
}

pub(crate) fn genres_to_json(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
