//! JSON shapes for segment input and intersection output.

use anyhow::{Context, Result};
use segsweep::{IntersectionResult, LineSegment, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentDto {
    pub a: [f64; 2],
    pub b: [f64; 2],
}

impl From<SegmentDto> for LineSegment {
    fn from(s: SegmentDto) -> Self {
        LineSegment::from_coords(s.a[0], s.a[1], s.b[0], s.b[1])
    }
}

impl From<&LineSegment> for SegmentDto {
    fn from(s: &LineSegment) -> Self {
        Self {
            a: xy(s.upper()),
            b: xy(s.lower()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultDto {
    Point {
        at: [f64; 2],
        segments: Vec<SegmentDto>,
    },
    Overlap {
        segment: SegmentDto,
        segments: Vec<SegmentDto>,
    },
}

impl ResultDto {
    /// `None` results have no JSON form.
    pub fn from_result(r: &IntersectionResult) -> Option<Self> {
        match r {
            IntersectionResult::None => None,
            IntersectionResult::Point { at, segments } => Some(ResultDto::Point {
                at: xy(*at),
                segments: segments.iter().map(SegmentDto::from).collect(),
            }),
            IntersectionResult::OverlappingSegment { segment, segments } => {
                Some(ResultDto::Overlap {
                    segment: segment.into(),
                    segments: segments.iter().map(SegmentDto::from).collect(),
                })
            }
        }
    }
}

fn xy(p: Vec2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

pub fn read_segments(path: &Path) -> Result<Vec<LineSegment>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let dtos: Vec<SegmentDto> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing segments from {}", path.display()))?;
    Ok(dtos.into_iter().map(LineSegment::from).collect())
}

pub fn write_results(path: &Path, results: &[IntersectionResult]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let dtos: Vec<ResultDto> = results.iter().filter_map(ResultDto::from_result).collect();
    let bytes = serde_json::to_vec_pretty(&dtos).context("serializing results")?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
