use std::path::PathBuf;

use crate::dxf::DxfError;
use crate::geom::Point;
use crate::strand::StrandId;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way building a [`crate::Layout`] can fail.
///
/// All of them are fatal: a malformed drawing needs to be fixed at the source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read layout file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dxf(#[from] DxfError),

    #[error("unsupported anchor text {label:?} (expected \"p1\" through \"p8\")")]
    InvalidAnchorLabel { label: String },

    #[error("more than one anchor for strand {id}")]
    DuplicateAnchor { id: StrandId },

    #[error("more than one circle at {center}")]
    DuplicateCircle { center: Point },

    #[error("line of zero length at {at}")]
    ZeroLengthLine { at: Point },

    #[error("unsupported entity type {kind}")]
    UnsupportedEntityType { kind: String },

    #[error("non-zero Z coordinate in ({x}, {y}, {z})")]
    NonPlanarPoint { x: f64, y: f64, z: f64 },

    #[error("non-finite coordinate in ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("more than two lines connected at {at}")]
    OverconnectedPoint { at: Point },

    #[error("no lines originate from {at} (strand {strand})")]
    DeadEnd { strand: StrandId, at: Point },

    #[error("{count} lines start at {at} (strand {strand})")]
    Branching {
        strand: StrandId,
        at: Point,
        count: usize,
    },

    #[error("no circle found at {at} (strand {strand})")]
    MissingLight { strand: StrandId, at: Point },

    #[error("circle at {at} visited twice (strand {strand})")]
    DuplicateLightVisit { strand: StrandId, at: Point },

    #[error("{} circles remain unconsumed: {remaining:?}", .remaining.len())]
    UnconsumedCircles { remaining: Vec<Point> },

    #[error("{} line endpoints remain unconsumed: {remaining:?}", .remaining.len())]
    UnconsumedSegments { remaining: Vec<Point> },

    #[error("cannot normalize layout: {axis} extent is degenerate")]
    DegenerateExtent { axis: &'static str },

    #[error("strand {id} already exists")]
    StrandAlreadyExists { id: StrandId },

    #[error("customization refers to missing strand {id}")]
    UnknownStrand { id: StrandId },

    #[error("cutoff {cutoff} leaves no tail on strand {id} of {len} lights")]
    CutoffOutOfRange {
        id: StrandId,
        cutoff: usize,
        len: usize,
    },

    #[error("{axis} out of range: {value} ({min} / {max})")]
    PointOutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
