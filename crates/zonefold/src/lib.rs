//! Area-deduction engine for a hide-and-seek map game.
//!
//! A play area is narrowed, clue by clue, to the territory consistent with
//! every answer so far: circles, compass splits, hotter/colder bisections,
//! uploaded areas, nearest-line questions, and same-polygon questions.
//!
//! Layout
//! - `geom`: `Region`, point primitives, fail-soft boolean algebra.
//! - `bisect`: box-clipped Voronoi cells over an ordered half-plane H-rep.
//! - `nearest_line`: line buffers and the grid-sampling classifier.
//! - `containment`: first polygon feature containing a point.
//! - `geojson`: the one place caller GeoJSON is normalized.
//! - `ops`: clue records, dispatcher, fold, execution strategies.
//!
//! Error policy
//! - Boolean algebra fails empty; bisection fails open; neither panics.
//! - Only intake parsing returns `Result` (`Error`).

pub mod api;
pub mod bisect;
pub mod cfg;
pub mod containment;
mod error;
pub mod geojson;
pub mod geom;
pub mod nearest_line;
pub mod ops;

pub use cfg::{EngineCfg, GridCfg};
pub use error::{Error, Result};
pub use geom::Region;
pub use ops::{compute_aggregate_region, Operation, OperationKind};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geojson::{Feature, GeoJson};
    pub use crate::geom::{distance_km, Region};
    pub use crate::ops::{
        compute_aggregate_region, compute_aggregate_region_with, Executor, FoldRequest, Inline,
        Operation, OperationKind, Worker,
    };
    pub use crate::{EngineCfg, GridCfg};
}
