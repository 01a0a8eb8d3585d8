//! Series models.

use serde::{Deserialize, Serialize};

use super::Director;

/// A television series as returned by the API, with its director embedded.
///
/// The `director` field is resolved by join at read time and is null when
/// `director_id` references a row that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub genres: Vec<String>,
    pub score: f64,
    pub completed: bool,
    pub premiere_date: String,
    pub seasons: i64,
    pub director_id: i64,
    pub director: Option<Director>,
}

/// Request body for creating or fully replacing a series.
///
/// The referenced `director_id` is not checked for existence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPayload {
    pub title: String,
    pub genres: Vec<String>,
    pub score: f64,
    pub completed: bool,
    pub premiere_date: String,
    pub seasons: i64,
    pub director_id: i64,
}
