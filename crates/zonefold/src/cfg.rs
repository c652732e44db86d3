//! Engine tunables.
//!
//! Policy
//! - Defaults reproduce the reference behaviour exactly; callers normally use
//!   `EngineCfg::default()` and only the CLI exposes overrides.
//! - Tolerances that are not meant to be tuned stay crate-internal constants.

use std::time::Duration;

/// Absolute per-axis tolerance when matching coordinates of two Voronoi cells.
pub(crate) const BOUNDARY_TOL: f64 = 1e-8;
/// Feasibility slack for half-plane membership and vertex dedup.
pub(crate) const FEAS_EPS: f64 = 1e-9;
/// Parts per cascading-union chunk when merging line-buffer stadiums.
pub(crate) const BUFFER_UNION_CHUNK: usize = 50;
/// Kilometres per metre (geo's haversine helpers work in metres).
pub(crate) const KM_PER_M: f64 = 1e-3;

/// Top-level configuration passed to every `_with` entry point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineCfg {
    /// Vertex count of circle approximations (draw-circle and line buffers).
    pub circle_steps: usize,
    /// Padding (degrees) added around region + sites before building Voronoi cells.
    pub bbox_pad_deg: f64,
    /// Per-axis tolerance for the shared-boundary extraction.
    pub boundary_tol: f64,
    pub grid: GridCfg,
}

impl Default for EngineCfg {
    fn default() -> Self {
        Self {
            circle_steps: 64,
            bbox_pad_deg: 0.5,
            boundary_tol: BOUNDARY_TOL,
            grid: GridCfg::default(),
        }
    }
}

/// Grid-sampling classifier configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCfg {
    /// `(max_lines, grid_size)` pairs, checked in order.
    pub size_limits: [(usize, usize); 2],
    /// Grid size once the line count exceeds every limit.
    pub fallback_size: usize,
    /// Grid rectangles per cascading-union chunk.
    pub chunk: usize,
    /// Rectangle padding as a fraction of one cell's width/height.
    pub pad_frac: f64,
    /// Optional wall-clock budget; on breach the operation leaves the region untouched.
    pub budget: Option<Duration>,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            size_limits: [(50, 80), (200, 60)],
            fallback_size: 40,
            chunk: 50,
            pad_frac: 0.01,
            budget: None,
        }
    }
}

impl GridCfg {
    /// Grid resolution N for an N×N raster given the number of candidate lines.
    pub fn size_for(&self, line_count: usize) -> usize {
        self.size_limits
            .iter()
            .find(|(max_lines, _)| line_count <= *max_lines)
            .map(|(_, n)| *n)
            .unwrap_or(self.fallback_size)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_tiers() {
        let g = GridCfg::default();
        assert_eq!(g.size_for(0), 80);
        assert_eq!(g.size_for(50), 80);
        assert_eq!(g.size_for(51), 60);
        assert_eq!(g.size_for(200), 60);
        assert_eq!(g.size_for(201), 40);
    }
}
