//! Data models for the series catalog.

mod director;
mod series;

pub use director::*;
pub use series::*;
