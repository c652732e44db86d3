//! Intake errors.
//!
//! Geometry never fails (fail-empty / fail-open recovery returns a `Region`);
//! only parsing caller-supplied records can.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fact type {fact_type:?} is not a geo operation")]
    NotGeoFact { fact_type: String },

    #[error("expected a lon/lat pair, got {len} components")]
    InvalidPoint { len: usize },

    #[error("invalid coordinate {0:?}; expected \"lon,lat\"")]
    InvalidCoordinate(String),
}
