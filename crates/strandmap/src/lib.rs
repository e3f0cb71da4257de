#![forbid(unsafe_code)]

//! LED strand recovery from CAD layout drawings (headless).
//!
//! A layout drawing marks each strand origin with a text label (`p1`..`p8`), each light with a
//! circle and the wiring between them with line segments. [`Layout`] reads such a drawing,
//! walks the wiring from every origin, rescales the lights onto a fixed device raster and
//! applies the per-sculpture patches for drawings known to be incomplete.
//!
//! Pipeline, in order:
//! - [`classify`]: entities into anchors, lights and wires
//! - [`reconstruct`]: one simple path per anchor, every light and wire consumed once
//! - [`normalize`]: drawing space to `[0, max_x] x [0, max_y]`, Y flipped
//! - [`customize`]: procedural grafts or replacement strands

pub mod classify;
pub mod customize;
pub mod dxf;
pub mod entities;
pub mod error;
pub mod geom;
pub mod layout;
pub mod normalize;
pub mod options;
pub mod reconstruct;
pub mod strand;
pub mod synth;

pub use customize::Customization;
pub use entities::{Entity, RawPoint};
pub use error::{Error, Result};
pub use geom::{DevicePoint, Point, Segment};
pub use layout::Layout;
pub use normalize::DegenerateAxis;
pub use options::LayoutOptions;
pub use strand::{Strand, StrandId};
pub use synth::StrandBuilder;
