//! Drawing entities as produced by a reader, before any validation.

use crate::error::{Error, Result};
use crate::geom::Point;

/// A 2- or 3-component point as stored in the drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl RawPoint {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Drops the Z component, which must be absent or exactly zero.
    pub fn project(&self) -> Result<Point> {
        if let Some(z) = self.z {
            if z != 0.0 {
                return Err(Error::NonPlanarPoint {
                    x: self.x,
                    y: self.y,
                    z,
                });
            }
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                x: self.x,
                y: self.y,
            });
        }
        Ok(Point::new(self.x, self.y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A label; valid ones name a strand origin (`p1`..`p8`).
    Text { value: String, insert: RawPoint },
    /// A light position.
    Circle { center: RawPoint },
    /// A wire between two points.
    Line { start: RawPoint, end: RawPoint },
    /// Anything else the reader found, kept so it can be rejected with its type name.
    Other { kind: String },
}

impl Entity {
    pub fn text(value: impl Into<String>, insert: RawPoint) -> Self {
        Self::Text {
            value: value.into(),
            insert,
        }
    }

    pub fn circle(center: RawPoint) -> Self {
        Self::Circle { center }
    }

    pub fn line(start: RawPoint, end: RawPoint) -> Self {
        Self::Line { start, end }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "TEXT",
            Self::Circle { .. } => "CIRCLE",
            Self::Line { .. } => "LINE",
            Self::Other { kind } => kind,
        }
    }
}
