//! Walks the wire graph from each anchor to recover strands in physical order.
//!
//! The drawing must decompose into exactly one simple path per anchor: every circle is visited
//! once, every line is consumed once, and no point ever has a choice of where to go next.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;

use crate::classify::Classified;
use crate::error::{Error, Result};
use crate::geom::{Point, Segment};
use crate::strand::StrandId;

type SegmentId = usize;

/// Point to incident segments, with segments stored in a separate arena.
#[derive(Debug, Default)]
pub struct Incidence {
    segments: Vec<Segment>,
    by_point: IndexMap<Point, Vec<SegmentId>>,
}

impl Incidence {
    pub fn build(segments: Vec<Segment>) -> Result<Self> {
        let mut by_point: IndexMap<Point, Vec<SegmentId>> = IndexMap::new();
        for (id, segment) in segments.iter().enumerate() {
            for at in segment.endpoints() {
                let entry = by_point.entry(at).or_default();
                entry.push(id);
                if entry.len() > 2 {
                    return Err(Error::OverconnectedPoint { at });
                }
            }
        }
        Ok(Self { segments, by_point })
    }

    /// Segments still attached to `at`.
    pub fn degree(&self, at: Point) -> usize {
        self.by_point.get(&at).map_or(0, Vec::len)
    }

    fn incident(&self, at: Point) -> &[SegmentId] {
        self.by_point.get(&at).map_or(&[][..], Vec::as_slice)
    }

    fn detach(&mut self, at: Point, segment: SegmentId) {
        if let Some(list) = self.by_point.get_mut(&at) {
            list.retain(|&s| s != segment);
        }
    }

    /// Points that still have segments attached, in first-seen order.
    pub fn dangling(&self) -> Vec<Point> {
        self.by_point
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(at, _)| *at)
            .collect()
    }
}

/// Recovers one drawing-space point list per anchor, in ascending id order.
pub fn reconstruct(classified: Classified) -> Result<BTreeMap<StrandId, Vec<Point>>> {
    let Classified {
        anchors,
        circles,
        segments,
    } = classified;

    let mut incidence = Incidence::build(segments)?;
    let mut remaining: IndexSet<Point> = circles;
    let mut visited: FxHashSet<Point> = FxHashSet::default();
    let mut strands = BTreeMap::new();

    for (&id, &origin) in &anchors {
        let points = walk(id, origin, &mut incidence, &mut remaining, &mut visited)?;
        tracing::debug!(strand = %id, lights = points.len(), "walked strand");
        strands.insert(id, points);
    }

    if !remaining.is_empty() {
        return Err(Error::UnconsumedCircles {
            remaining: remaining.into_iter().collect(),
        });
    }
    let dangling = incidence.dangling();
    if !dangling.is_empty() {
        return Err(Error::UnconsumedSegments {
            remaining: dangling,
        });
    }

    Ok(strands)
}

fn walk(
    strand: StrandId,
    origin: Point,
    incidence: &mut Incidence,
    remaining: &mut IndexSet<Point>,
    visited: &mut FxHashSet<Point>,
) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut current = origin;

    loop {
        let segment = match incidence.incident(current) {
            [] => return Err(Error::DeadEnd { strand, at: current }),
            [only] => *only,
            many => {
                return Err(Error::Branching {
                    strand,
                    at: current,
                    count: many.len(),
                });
            }
        };
        let next = incidence.segments[segment]
            .other_end(current)
            .ok_or(Error::DeadEnd { strand, at: current })?;
        incidence.detach(current, segment);
        incidence.detach(next, segment);

        if !remaining.swap_remove(&next) {
            if visited.contains(&next) {
                return Err(Error::DuplicateLightVisit { strand, at: next });
            }
            return Err(Error::MissingLight { strand, at: next });
        }
        visited.insert(next);
        points.push(next);

        if incidence.degree(next) == 0 {
            return Ok(points);
        }
        current = next;
    }
}
