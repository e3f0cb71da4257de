//! Declarative generator for procedurally placed strands.
//!
//! A [`StrandBuilder`] owns a device-space bounding box and accumulates points emitted by
//! straight runs of evenly spaced lights. Points are checked against the box as they are
//! emitted; [`StrandBuilder::take`] hands the accumulated points to a strand and resets the
//! builder so it can emit the next one.

use crate::error::{Error, Result};
use crate::geom::{DeviceBox, DevicePoint, DeviceSpace, device_point};

pub type BuilderBox = euclid::Box2D<f64, DeviceSpace>;

#[derive(Debug, Clone)]
pub struct StrandBuilder {
    bounds: BuilderBox,
    mirror: bool,
    coords: Vec<DevicePoint>,
}

impl StrandBuilder {
    /// `bounds` is inclusive on both ends.
    pub fn new(bounds: BuilderBox) -> Self {
        Self {
            bounds,
            mirror: false,
            coords: Vec::new(),
        }
    }

    pub fn from_device_box(bounds: DeviceBox) -> Self {
        Self::new(BuilderBox::new(
            euclid::point2(f64::from(bounds.min.x), f64::from(bounds.min.y)),
            euclid::point2(f64::from(bounds.max.x), f64::from(bounds.max.y)),
        ))
    }

    pub fn bounds(&self) -> BuilderBox {
        self.bounds
    }

    /// Reflect fractional X positions (`x -> 1 - x`) for subsequent horizontal runs.
    pub fn enable_horizontal_mirror(&mut self) -> &mut Self {
        self.mirror = true;
        self
    }

    /// `lights` evenly spaced points along the row at fraction `y`, from fraction `start_x`
    /// to fraction `end_x` of the box width.
    pub fn horizontal(
        &mut self,
        lights: usize,
        start_x: f64,
        end_x: f64,
        y: f64,
    ) -> Result<&mut Self> {
        let (start_x, end_x) = if self.mirror {
            (1.0 - start_x, 1.0 - end_x)
        } else {
            (start_x, end_x)
        };
        let width = self.bounds.max.x - self.bounds.min.x;
        let height = self.bounds.max.y - self.bounds.min.y;
        for fx in run(lights, start_x, end_x) {
            self.single(
                fx * width + self.bounds.min.x,
                y * height + self.bounds.min.y,
            )?;
        }
        Ok(self)
    }

    /// `lights` evenly spaced points along column `x`, from `start_y` to `end_y`. Coordinates are
    /// offsets from the box origin, not fractions.
    pub fn vertical(
        &mut self,
        lights: usize,
        x: f64,
        start_y: f64,
        end_y: f64,
    ) -> Result<&mut Self> {
        for y in run(lights, start_y, end_y) {
            self.single(x + self.bounds.min.x, y + self.bounds.min.y)?;
        }
        Ok(self)
    }

    /// One point in absolute device coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub fn single(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        check_range("x", x, self.bounds.min.x, self.bounds.max.x)?;
        check_range("y", y, self.bounds.min.y, self.bounds.max.y)?;
        self.coords.push(device_point(x.round() as i32, y.round() as i32));
        Ok(self)
    }

    pub fn coords(&self) -> &[DevicePoint] {
        &self.coords
    }

    /// Moves the accumulated points out, leaving the builder empty (bounds and mirroring stay).
    pub fn take(&mut self) -> Vec<DevicePoint> {
        std::mem::take(&mut self.coords)
    }
}

/// `count` evenly spaced values from `start` to `end`, each computed as `start + step * i`.
/// A single light sits at `start`.
#[allow(clippy::cast_precision_loss)]
fn run(count: usize, start: f64, end: f64) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| start + step * i as f64)
}

fn check_range(axis: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max || value.is_nan() {
        return Err(Error::PointOutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(())
}
