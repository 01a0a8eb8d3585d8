//! REST API module.
//!
//! Contains all API routes and handlers.

mod directors;
mod series;

pub use directors::*;
pub use series::*;

use crate::errors::AppError;

/// Handler result carrying the success response type.
pub type ApiResult<T> = Result<T, AppError>;
