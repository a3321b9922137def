//! Example: the four crossings of a `#`, found by the sweep and the all-pairs scan.

use segsweep::api::segment;
use segsweep::{find_intersections_fast, find_intersections_slow, IntersectionResult, DEFAULT_EPS};

fn main() {
    let segs = vec![
        segment((0.0, 7.0), (10.0, 7.0)),
        segment((0.0, 3.0), (10.0, 3.0)),
        segment((3.0, 10.0), (3.0, 0.0)),
        segment((7.0, 10.0), (7.0, 0.0)),
    ];
    let fast = find_intersections_fast(&segs, DEFAULT_EPS);
    let slow = find_intersections_slow(&segs, DEFAULT_EPS);
    assert_eq!(fast, slow);
    for r in &fast {
        match r {
            IntersectionResult::Point { at, segments } => {
                println!("point ({}, {}) from {} segments", at.x, at.y, segments.len());
            }
            IntersectionResult::OverlappingSegment { segment, segments } => {
                let (u, l) = (segment.upper(), segment.lower());
                println!(
                    "overlap ({}, {})-({}, {}) from {} segments",
                    u.x,
                    u.y,
                    l.x,
                    l.y,
                    segments.len()
                );
            }
            IntersectionResult::None => {}
        }
    }
}
