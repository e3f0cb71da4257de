//! Rescales drawing coordinates into the device raster.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{DevicePoint, DrawingBox, Point, bounding_box, device_point};
use crate::strand::StrandId;

/// What to do with an axis on which every light shares the same coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DegenerateAxis {
    /// Map the axis to its far extreme before the vertical flip (`x = max_x`, `y = 0`).
    #[default]
    FarEdge,
    /// Refuse to normalize.
    Fail,
}

/// Maps the union of all strands onto `[0, max_x] x [0, max_y]`, flipping Y so that the
/// drawing's lowest point lands on the bottom raster row.
pub fn normalize(
    strands: &BTreeMap<StrandId, Vec<Point>>,
    max_x: u16,
    max_y: u16,
    degenerate: DegenerateAxis,
) -> Result<BTreeMap<StrandId, Vec<DevicePoint>>> {
    let extent: DrawingBox = bounding_box(strands.values().flatten().map(|p| p.to_euclid()))
        .ok_or(Error::DegenerateExtent { axis: "x and y" })?;

    let x_axis = Axis::new("x", extent.min.x, extent.max.x, max_x, degenerate)?;
    let y_axis = Axis::new("y", extent.min.y, extent.max.y, max_y, degenerate)?;

    let out = strands
        .iter()
        .map(|(&id, points)| {
            let coords = points
                .iter()
                .map(|p| {
                    let x = x_axis.scale(p.x);
                    let y = i32::from(max_y) - y_axis.scale(p.y);
                    device_point(x, y)
                })
                .collect();
            (id, coords)
        })
        .collect();
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    span: f64,
    max_out: f64,
}

impl Axis {
    fn new(
        name: &'static str,
        min: f64,
        max: f64,
        max_out: u16,
        degenerate: DegenerateAxis,
    ) -> Result<Self> {
        let span = max - min;
        if span == 0.0 && degenerate == DegenerateAxis::Fail {
            return Err(Error::DegenerateExtent { axis: name });
        }
        Ok(Self {
            min,
            span,
            max_out: f64::from(max_out),
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn scale(&self, v: f64) -> i32 {
        if self.span == 0.0 {
            return self.max_out as i32;
        }
        ((v - self.min) / self.span * self.max_out).round() as i32
    }
}
