//! Sample data seeding.
//!
//! Runs once at startup; only inserts when the series table is empty.
//! The emptiness check is the only guard, so two simultaneous cold starts
//! against the same database could double-insert.

use super::{genres_to_json, Repository};
use crate::errors::AppError;
use crate::models::DirectorPayload;

struct SeedSeries {
    title: &'static str,
    genres: &'static [&'static str],
    score: f64,
    completed: bool,
    premiere_date: &'static str,
    seasons: i64,
}

const SEED_DIRECTORS: [(&str, &str, i64, &str); 3] = [
    ("Vince", "Gilligan", 57, "Richmond, Virginia"),
    ("Matt", "Duffer", 40, "Durham, North Carolina"),
    ("Greg", "Daniels", 61, "New York City, New York"),
];

const SEED_SERIES: [SeedSeries; 3] = [
    SeedSeries {
        title: "Breaking Bad",
        genres: &["Drama", "Crime", "Thriller"],
        score: 9.5,
        completed: true,
        premiere_date: "2008-01-20",
        seasons: 5,
    },
    SeedSeries {
        title: "Stranger Things",
        genres: &["Science Fiction", "Horror", "Drama"],
        score: 8.7,
        completed: false,
        premiere_date: "2016-07-15",
        seasons: 4,
    },
    SeedSeries {
        title: "The Office",
        genres: &["Comedy", "Mockumentary"],
        score: 9.0,
        completed: true,
        premiere_date: "2005-03-24",
        seasons: 9,
    },
];

impl Repository {
    /// Insert sample data when the series table is empty.
    ///
    /// Returns true when rows were inserted.
    pub async fn seed_if_empty(&self) -> Result<bool, AppError> {
        if self.count_series().await? > 0 {
            return Ok(false);
        }

        let mut director_ids = Vec::with_capacity(SEED_DIRECTORS.len());
        for (name, surname, age, birthplace) in SEED_DIRECTORS {
            let director = self
                .create_director(&DirectorPayload {
                    name: name.to_string(),
                    surname: surname.to_string(),
                    age,
                    birthplace: birthplace.to_string(),
                })
                .await?;
            director_ids.push(director.id);
        }

        for (seed, director_id) in SEED_SERIES.iter().zip(director_ids) {
            let genres: Vec<String> = seed.genres.iter().map(|g| g.to_string()).collect();
            let genres_json = genres_to_json(&genres);

            // Plain insert; no need for the reload-with-join create_series does
            sqlx::query(
                r#"INSERT INTO series (title, genres, score, completed, premiere_date, seasons, director_id)
                   VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(seed.title)
            .bind(&genres_json)
            .bind(seed.score)
            .bind(seed.completed as i32)
            .bind(seed.premiere_date)
            .bind(seed.seasons)
            .bind(director_id)
            .execute(&self.pool)
            .await?;
        }

        tracing::info!(
            "Seeded {} directors and {} series",
            SEED_DIRECTORS.len(),
            SEED_SERIES.len()
        );

        Ok(true)
    }
}
