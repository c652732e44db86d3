//! Planar lon/lat geometry: the `Region` value, point primitives, and the
//! fail-soft boolean algebra every clue operation goes through.
//!
//! References
//! - Code cross-refs: `bisect` (Voronoi cells are intersected here),
//!   `nearest_line` (buffers and grid rectangles are unioned here).

pub mod algebra;
pub mod primitives;
mod region;

pub use algebra::{difference, intersect, union, union_all};
pub use primitives::{
    circle_polygon, distance_km, point_to_line_distance_km, point_to_lines_distance_km,
    relative_heading, Heading, LatHeading, LonHeading,
};
pub use region::Region;
