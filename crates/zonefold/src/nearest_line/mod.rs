//! Nearest-line clues.
//!
//! - `buffer`: closed form via a line buffer at the seeker's distance.
//! - `grid`: raster approximation of the nearest-of-N-lines partition.

mod buffer;
mod grid;

pub use buffer::{closer_to_line, line_buffer, Proximity};
pub use grid::{classify, nearest_line, same_closest_line, Classified};

#[cfg(test)]
mod tests;
