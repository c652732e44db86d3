use std::time::Duration;

use super::*;
use crate::cfg::EngineCfg;
use crate::geom::{point_to_lines_distance_km, Region};
use geo::{line_string, point, MultiLineString, Point};

fn vertical(x: f64) -> MultiLineString<f64> {
    MultiLineString::new(vec![line_string![(x: x, y: -2.0), (x: x, y: 2.0)]])
}

fn horizontal(y: f64) -> MultiLineString<f64> {
    MultiLineString::new(vec![line_string![(x: -3.0, y: y), (x: 3.0, y: y)]])
}

fn play() -> Region {
    Region::from_bbox(-2.0, -2.0, 2.0, 2.0)
}

/// Interior sample points of `region` on a regular lattice.
fn samples(region: &Region, step: f64) -> Vec<Point<f64>> {
    let mut out = Vec::new();
    let mut y = -1.99;
    while y < 2.0 {
        let mut x = -1.99;
        while x < 2.0 {
            let p = point! { x: x, y: y };
            if region.contains_point(p) {
                out.push(p);
            }
            x += step;
        }
        y += step;
    }
    out
}

#[test]
fn nearest_line_prefers_lower_index_on_ties() {
    let lines = [vertical(-1.0), vertical(1.0)];
    assert_eq!(nearest_line(point! { x: -0.5, y: 0.0 }, &lines), Some(0));
    assert_eq!(nearest_line(point! { x: 0.5, y: 0.0 }, &lines), Some(1));
    assert_eq!(nearest_line(point! { x: 0.0, y: 0.0 }, &lines), Some(0));
    assert_eq!(nearest_line(point! { x: 0.0, y: 0.0 }, &[]), None);
}

#[test]
fn grid_selection_is_closer_to_the_chosen_line() {
    let lines = [vertical(-1.0), vertical(1.0)];
    let out = same_closest_line(&play(), &lines, 0, true, &EngineCfg::default());
    assert!((out.area_deg2() - 8.0).abs() < 0.1, "area {}", out.area_deg2());
    let pts = samples(&out, 0.037);
    assert!(!pts.is_empty());
    for p in pts.into_iter().filter(|p| p.x().abs() > 0.01) {
        let d0 = point_to_lines_distance_km(p, &lines[0]);
        let d1 = point_to_lines_distance_km(p, &lines[1]);
        assert!(d0 < d1, "{:?} is closer to line 1", p.x_y());
    }
}

#[test]
fn grid_no_answer_removes_the_chosen_lines_area() {
    let lines = [vertical(-1.0), vertical(1.0)];
    let out = same_closest_line(&play(), &lines, 0, false, &EngineCfg::default());
    assert!((out.area_deg2() - 8.0).abs() < 0.1);
    for p in samples(&out, 0.037).into_iter().filter(|p| p.x().abs() > 0.01) {
        assert!(p.x() > 0.0);
    }
}

#[test]
fn duplicated_line_never_wins_and_yields_empty() {
    // Known approximation: a line that is never strictly nearest at any
    // sampled centre is treated as covering nothing.
    let lines = [vertical(-1.0), vertical(-1.0)];
    let out = same_closest_line(&play(), &lines, 1, true, &EngineCfg::default());
    assert!(out.is_empty());
    assert_eq!(classify(&play(), &lines, 1, &EngineCfg::default()), Classified::NoMatch);
}

#[test]
fn zero_budget_keeps_the_region() {
    let mut cfg = EngineCfg::default();
    cfg.grid.budget = Some(Duration::ZERO);
    let lines = [vertical(-1.0), vertical(1.0)];
    let out = same_closest_line(&play(), &lines, 0, true, &cfg);
    assert_eq!(out, play());
}

#[test]
fn empty_region_classifies_to_no_match() {
    let lines = [vertical(-1.0), vertical(1.0)];
    assert_eq!(
        classify(&Region::empty(), &lines, 0, &EngineCfg::default()),
        Classified::NoMatch
    );
}

#[test]
fn buffer_closer_and_further_split_at_seeker_distance() {
    let cfg = EngineCfg::default();
    let line = horizontal(0.0);
    let seeker = point! { x: 0.0, y: 1.0 };
    let closer = closer_to_line(&play(), seeker, &line, Proximity::Closer, &cfg);
    let further = closer_to_line(&play(), seeker, &line, Proximity::Further, &cfg);
    assert!(!closer.is_empty() && !further.is_empty());
    for p in samples(&closer, 0.05) {
        assert!(p.y().abs() <= 1.0 + 1e-3, "{:?}", p.x_y());
    }
    for p in samples(&further, 0.05) {
        assert!(p.y().abs() >= 1.0 - 1e-3, "{:?}", p.x_y());
    }
    let total = closer.area_deg2() + further.area_deg2();
    assert!((total - play().area_deg2()).abs() < 1e-6);
}

#[test]
fn buffer_of_a_single_point_line_is_a_circle() {
    let cfg = EngineCfg::default();
    let dot = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0)]]);
    let b = line_buffer(&dot, 50.0, &cfg);
    assert_eq!(b.polygon_count(), 1);
    let r = b.bounding_rect().unwrap();
    assert!(r.max().x > 0.4 && r.max().x < 0.5);
}

#[test]
fn buffer_ignores_grid_chunking() {
    let line = MultiLineString::new(vec![line_string![
        (x: 0.0, y: 0.0), (x: 0.5, y: 0.3), (x: 1.0, y: 0.0), (x: 1.5, y: 0.4)
    ]]);
    let mut coarse = EngineCfg::default();
    coarse.grid.chunk = 2;
    assert_eq!(
        line_buffer(&line, 20.0, &coarse),
        line_buffer(&line, 20.0, &EngineCfg::default())
    );
}
