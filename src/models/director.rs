//! Director model.

use serde::{Deserialize, Serialize};

/// A director who may own any number of series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub birthplace: String,
}

/// Request body for creating or fully replacing a director.
///
/// Updates are full replaces, so the same payload serves POST and PUT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorPayload {
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub birthplace: String,
}
