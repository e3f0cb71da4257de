#![forbid(unsafe_code)]

//! Drawing-space points (graph node identity) and device-space raster types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Unit tag for coordinates as they appear in the source drawing.
#[derive(Debug, Clone, Copy)]
pub enum DrawingSpace {}

/// Unit tag for the integer LED raster consumed downstream.
#[derive(Debug, Clone, Copy)]
pub enum DeviceSpace {}

pub type DrawingBox = euclid::Box2D<f64, DrawingSpace>;
pub type DevicePoint = euclid::Point2D<i32, DeviceSpace>;
pub type DeviceBox = euclid::Box2D<i32, DeviceSpace>;

pub fn device_point(x: i32, y: i32) -> DevicePoint {
    euclid::point2(x, y)
}

/// A 2D point in drawing space.
///
/// Equality and hashing compare the exact bit patterns of both coordinates: drawings share
/// endpoints exactly, so there is no epsilon snapping. `-0.0` is folded into `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn bits(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    pub fn to_euclid(self) -> euclid::Point2D<f64, DrawingSpace> {
        euclid::point2(self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An undirected wire between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Returns `None` for a zero-length segment.
    pub fn new(start: Point, end: Point) -> Option<Self> {
        if start == end {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    /// The endpoint opposite `from`, or `None` if `from` is not an endpoint.
    pub fn other_end(&self, from: Point) -> Option<Point> {
        if from == self.start {
            Some(self.end)
        } else if from == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

/// Tight axis-aligned bounds of a point set; `max` is inclusive.
pub fn bounding_box<T, U>(
    points: impl IntoIterator<Item = euclid::Point2D<T, U>>,
) -> Option<euclid::Box2D<T, U>>
where
    T: Copy + PartialOrd,
{
    let mut it = points.into_iter();
    let first = it.next()?;
    let mut bounds = euclid::Box2D::new(first, first);
    for p in it {
        if p.x < bounds.min.x {
            bounds.min.x = p.x;
        }
        if p.x > bounds.max.x {
            bounds.max.x = p.x;
        }
        if p.y < bounds.min.y {
            bounds.min.y = p.y;
        }
        if p.y > bounds.max.y {
            bounds.max.y = p.y;
        }
    }
    Some(bounds)
}
