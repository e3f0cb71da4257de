//! Per-sculpture patches for drawings whose wiring is incomplete.
//!
//! Each patch is data: a list of grafts (flippers, tails) or a fully synthetic strand set,
//! interpreted by [`Customization::apply`] through a [`StrandBuilder`].

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{DeviceBox, bounding_box, device_point};
use crate::strand::{Strand, StrandId};
use crate::synth::{BuilderBox, StrandBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Customization {
    /// Use the parsed strands as they are.
    #[default]
    Plain,
    /// Adds two mirrored flippers between parsed strands and re-synthesizes both tails.
    FlippersAndTails,
    /// Replaces the whole layout with eight columns of a vertical fin.
    DorsalFin,
}

impl Customization {
    /// Picks the patch for a known layout file (`layout1.*`, `layout3.*`).
    pub fn detect(source: &Path) -> Self {
        match source.file_stem().and_then(OsStr::to_str) {
            Some("layout1") => Self::FlippersAndTails,
            Some("layout3") => Self::DorsalFin,
            _ => Self::Plain,
        }
    }

    pub fn apply(self, strands: &mut BTreeMap<StrandId, Strand>) -> Result<()> {
        match self {
            Self::Plain => Ok(()),
            Self::FlippersAndTails => {
                for graft in FLIPPERS_AND_TAILS {
                    graft.apply(strands)?;
                }
                Ok(())
            }
            Self::DorsalFin => {
                strands.clear();
                let mut builder = StrandBuilder::new(dorsal_fin_bounds());
                for fin in DORSAL_FIN {
                    for stroke in fin.strokes {
                        stroke.emit(&mut builder)?;
                    }
                    commit(strands, fin.id, &mut builder);
                }
                Ok(())
            }
        }
    }
}

/// Which side of the sculpture a graft sits on. Passenger-side panels are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Driver,
    Passenger,
}

/// A serpentine panel: rows stacked evenly from top (`y = 0`) to bottom (`y = 1`), each row
/// starting at the left edge and `width / span` wide.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    pub span: f64,
    pub rows: &'static [Row],
}

#[derive(Debug, Clone, Copy)]
pub struct Row {
    pub lights: usize,
    pub width: f64,
}

const fn row(lights: usize, width: f64) -> Row {
    Row { lights, width }
}

impl Panel {
    #[allow(clippy::cast_precision_loss)]
    pub fn emit(&self, builder: &mut StrandBuilder) -> Result<()> {
        let y_step = 1.0 / self.rows.len().saturating_sub(1).max(1) as f64;
        for (i, r) in self.rows.iter().enumerate() {
            builder.horizontal(r.lights, 0.0, r.width / self.span, y_step * i as f64)?;
        }
        Ok(())
    }
}

/// A strand added on top of the parsed layout.
#[derive(Debug, Clone, Copy)]
pub enum Graft {
    /// Fills the gap between two parsed strands (`left` then `right` in X), 2 units clear of each.
    Flipper {
        left: StrandId,
        right: StrandId,
        new_id: StrandId,
        side: Side,
    },
    /// Cuts `from` at `cutoff` and regrows the discarded tail as its own strand.
    Tail {
        from: StrandId,
        cutoff: usize,
        new_id: StrandId,
        side: Side,
    },
}

impl Graft {
    pub fn apply(&self, strands: &mut BTreeMap<StrandId, Strand>) -> Result<()> {
        match *self {
            Self::Flipper {
                left,
                right,
                new_id,
                side,
            } => {
                let panel = match side {
                    Side::Driver => &FLIPPER_DRIVER,
                    Side::Passenger => &FLIPPER_PASSENGER,
                };
                graft_between(strands, left, right, new_id, side, panel)
            }
            Self::Tail {
                from,
                cutoff,
                new_id,
                side,
            } => replace_tail(strands, from, cutoff, new_id, side, &TAIL),
        }
    }
}

/// Truncates `from` at `cutoff` and fills the bounding box of the removed points with `panel`,
/// registered as `new_id`.
pub fn replace_tail(
    strands: &mut BTreeMap<StrandId, Strand>,
    from: StrandId,
    cutoff: usize,
    new_id: StrandId,
    side: Side,
    panel: &Panel,
) -> Result<()> {
    if strands.contains_key(&new_id) {
        return Err(Error::StrandAlreadyExists { id: new_id });
    }
    let strand = strands
        .get_mut(&from)
        .ok_or(Error::UnknownStrand { id: from })?;
    let len = strand.len();
    let bounds = strand
        .coords()
        .get(cutoff..)
        .and_then(|tail| bounding_box(tail.iter().copied()))
        .ok_or(Error::CutoffOutOfRange {
            id: from,
            cutoff,
            len,
        })?;
    strand.truncate(cutoff);

    let mut builder = panel_builder(bounds, side);
    panel.emit(&mut builder)?;
    commit(strands, new_id, &mut builder);
    Ok(())
}

/// Fills the horizontal gap between two strands with `panel`, registered as `new_id`.
pub fn graft_between(
    strands: &mut BTreeMap<StrandId, Strand>,
    left: StrandId,
    right: StrandId,
    new_id: StrandId,
    side: Side,
    panel: &Panel,
) -> Result<()> {
    if strands.contains_key(&new_id) {
        return Err(Error::StrandAlreadyExists { id: new_id });
    }
    let a = strand_bounds(strands, left)?;
    let b = strand_bounds(strands, right)?;
    let gap = DeviceBox::new(
        device_point(a.max.x + 2, a.min.y.min(b.min.y)),
        device_point(b.min.x - 2, a.max.y.max(b.max.y)),
    );

    let mut builder = panel_builder(gap, side);
    panel.emit(&mut builder)?;
    commit(strands, new_id, &mut builder);
    Ok(())
}

fn strand_bounds(strands: &BTreeMap<StrandId, Strand>, id: StrandId) -> Result<DeviceBox> {
    strands
        .get(&id)
        .and_then(|s| bounding_box(s.coords().iter().copied()))
        .ok_or(Error::UnknownStrand { id })
}

fn panel_builder(bounds: DeviceBox, side: Side) -> StrandBuilder {
    let mut builder = StrandBuilder::from_device_box(bounds);
    if side == Side::Passenger {
        builder.enable_horizontal_mirror();
    }
    builder
}

/// Moves the builder's points into strand `id`, creating or overwriting it.
pub fn commit(
    strands: &mut BTreeMap<StrandId, Strand>,
    id: StrandId,
    builder: &mut StrandBuilder,
) {
    let coords = builder.take();
    tracing::debug!(strand = %id, lights = coords.len(), "committed synthesized strand");
    strands.insert(id, Strand::new(id, coords));
}

/// A step of a hand-placed strand, in builder offsets.
#[derive(Debug, Clone, Copy)]
pub enum Stroke {
    Column {
        lights: usize,
        x: f64,
        from_y: f64,
        to_y: f64,
    },
    Dot {
        x: f64,
        y: f64,
    },
}

impl Stroke {
    fn emit(&self, builder: &mut StrandBuilder) -> Result<()> {
        match *self {
            Self::Column {
                lights,
                x,
                from_y,
                to_y,
            } => builder.vertical(lights, x, from_y, to_y)?,
            Self::Dot { x, y } => builder.single(x, y)?,
        };
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FinStrand {
    pub id: StrandId,
    pub strokes: &'static [Stroke],
}

const fn column(lights: usize, x: f64, from_y: f64, to_y: f64) -> Stroke {
    Stroke::Column {
        lights,
        x,
        from_y,
        to_y,
    }
}

const fn dot(x: f64, y: f64) -> Stroke {
    Stroke::Dot { x, y }
}

pub const TAIL_CUTOFF: usize = 202;

pub static FLIPPERS_AND_TAILS: &[Graft] = &[
    Graft::Flipper {
        left: StrandId(2),
        right: StrandId(0),
        new_id: StrandId(4),
        side: Side::Passenger,
    },
    Graft::Flipper {
        left: StrandId(1),
        right: StrandId(3),
        new_id: StrandId(5),
        side: Side::Driver,
    },
    Graft::Tail {
        from: StrandId(2),
        cutoff: TAIL_CUTOFF,
        new_id: StrandId(6),
        side: Side::Passenger,
    },
    Graft::Tail {
        from: StrandId(3),
        cutoff: TAIL_CUTOFF,
        new_id: StrandId(7),
        side: Side::Driver,
    },
];

// Widths in feet.
pub static TAIL: Panel = Panel {
    span: 20.0,
    rows: &[
        row(62, 20.0),
        row(51, 20.0),
        row(41, 16.0),
        row(39, 14.0),
        row(36, 13.0),
        row(38, 14.0),
        row(42, 16.0),
        row(51, 20.0),
    ],
};

pub static FLIPPER_DRIVER: Panel = Panel {
    span: 5.0,
    rows: &[
        row(32, 5.0),
        row(25, 5.0),
        row(25, 5.0),
        row(17, 3.0),
        row(18, 3.0),
        row(18, 3.0),
        row(18, 3.0),
        row(18, 3.0),
        row(15, 3.0),
        row(14, 3.0),
    ],
};

pub static FLIPPER_PASSENGER: Panel = Panel {
    span: 5.0,
    rows: &[
        row(32, 5.0),
        row(26, 5.0),
        row(26, 5.0),
        row(18, 3.0),
        row(18, 3.0),
        row(18, 3.0),
        row(17, 3.0),
        row(17, 3.0),
        row(15, 3.0),
        row(15, 3.0),
    ],
};

pub fn dorsal_fin_bounds() -> BuilderBox {
    BuilderBox::new(euclid::point2(0.0, 0.0), euclid::point2(65.0, 249.0))
}

pub static DORSAL_FIN: &[FinStrand] = &[
    FinStrand {
        id: StrandId(0),
        strokes: &[
            column(45, 3.0, 249.0, 0.0),
            dot(4.0, 249.0),
            column(45, 8.0, 249.0, 0.0),
            dot(9.0, 249.0),
        ],
    },
    FinStrand {
        id: StrandId(1),
        strokes: &[
            column(45, 14.0, 249.0, 0.0),
            dot(15.0, 249.0),
            column(45, 19.0, 249.0, 0.0),
            dot(20.0, 249.0),
        ],
    },
    FinStrand {
        id: StrandId(2),
        strokes: &[
            column(45, 25.0, 249.0, 0.0),
            dot(26.0, 249.0),
            column(45, 31.0, 249.0, 0.0),
            dot(32.0, 249.0),
        ],
    },
    FinStrand {
        id: StrandId(3),
        strokes: &[
            column(45, 36.0, 249.0, 0.0),
            dot(37.0, 249.0),
            column(45, 42.0, 249.0, 0.0),
            dot(43.0, 249.0),
        ],
    },
    FinStrand {
        id: StrandId(4),
        strokes: &[column(35, 47.0, 249.0, 57.0), dot(48.0, 249.0)],
    },
    FinStrand {
        id: StrandId(5),
        strokes: &[column(35, 53.0, 249.0, 57.0), dot(54.0, 249.0)],
    },
    FinStrand {
        id: StrandId(6),
        strokes: &[column(35, 58.0, 249.0, 57.0), dot(59.0, 249.0)],
    },
    FinStrand {
        id: StrandId(7),
        strokes: &[column(35, 64.0, 249.0, 57.0), dot(65.0, 249.0)],
    },
];
