//! Grid-sampling classifier for "is the hider's nearest line the same as mine".
//!
//! There is no closed form for the nearest-of-N-lines partition, so the
//! region's bounding box is rasterized into N×N cells. The nearest line at
//! each cell centre is found by exhaustive scan; contiguous matching cells in
//! a row are merged into one rectangle (padded by `pad_frac` of a cell so
//! neighbouring rows overlap instead of leaving seams), and rectangles are
//! combined with a cascading union.
//!
//! Known approximation: a line thinner than a grid cell in both directions
//! can be nobody's nearest line at any sampled centre and vanish entirely.

use std::time::Instant;

use geo::{coord, MultiLineString, Point, Rect};

use crate::cfg::EngineCfg;
use crate::geom::{self, point_to_lines_distance_km, Region};

/// Outcome of rasterizing the target line's nearest-region.
#[derive(Clone, Debug, PartialEq)]
pub enum Classified {
    /// Union of matching rectangles, already clipped to the region.
    Selected(Region),
    /// No sampled cell is nearest to the target line.
    NoMatch,
    /// The configured wall-clock budget ran out.
    OverBudget,
}

/// Index of the nearest line to `p`; ties go to the lower index.
pub fn nearest_line(p: Point<f64>, lines: &[MultiLineString<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, line) in lines.iter().enumerate() {
        let d = point_to_lines_distance_km(p, line);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Sub-region of `region` whose nearest line is `lines[target]`.
pub fn classify(
    region: &Region,
    lines: &[MultiLineString<f64>],
    target: usize,
    cfg: &EngineCfg,
) -> Classified {
    let Some(bbox) = region.bounding_rect() else {
        return Classified::NoMatch;
    };
    let grid = &cfg.grid;
    let n = grid.size_for(lines.len());
    let (min_x, min_y) = (bbox.min().x, bbox.min().y);
    let cell_w = bbox.width() / n as f64;
    let cell_h = bbox.height() / n as f64;
    let (pad_x, pad_y) = (cell_w * grid.pad_frac, cell_h * grid.pad_frac);

    let started = Instant::now();
    let mut rects: Vec<Region> = Vec::new();
    for row in 0..n {
        if let Some(budget) = grid.budget {
            if started.elapsed() >= budget {
                return Classified::OverBudget;
            }
        }
        let y0 = min_y + row as f64 * cell_h;
        let cy = y0 + cell_h / 2.0;
        let mut run: Option<usize> = None;
        for col in 0..=n {
            let hit = col < n && {
                let cx = min_x + (col as f64 + 0.5) * cell_w;
                nearest_line(Point::new(cx, cy), lines) == Some(target)
            };
            match (hit, run) {
                (true, None) => run = Some(col),
                (false, Some(start)) => {
                    let rect = Rect::new(
                        coord! { x: min_x + start as f64 * cell_w - pad_x, y: y0 - pad_y },
                        coord! { x: min_x + col as f64 * cell_w + pad_x, y: y0 + cell_h + pad_y },
                    );
                    rects.push(Region::from(rect));
                    run = None;
                }
                _ => {}
            }
        }
    }
    if rects.is_empty() {
        return Classified::NoMatch;
    }
    tracing::debug!(grid = n, rects = rects.len(), "grid runs merged");
    let merged = geom::union_all(rects, grid.chunk);
    Classified::Selected(geom::intersect(region, &merged))
}

/// Apply a same-closest-line clue.
///
/// `same == true` keeps the target line's nearest-region, `false` removes it.
/// No matching cell yields the empty region with a warning; a budget breach
/// leaves `region` as it was.
pub fn same_closest_line(
    region: &Region,
    lines: &[MultiLineString<f64>],
    target: usize,
    same: bool,
    cfg: &EngineCfg,
) -> Region {
    match classify(region, lines, target, cfg) {
        Classified::Selected(selected) if same => selected,
        Classified::Selected(selected) => geom::difference(region, &selected),
        Classified::NoMatch => {
            tracing::warn!(target, lines = lines.len(), "no grid cell is nearest to the target line");
            Region::empty()
        }
        Classified::OverBudget => {
            tracing::warn!(budget = ?cfg.grid.budget, "grid sampling over budget; keeping last region");
            region.clone()
        }
    }
}
