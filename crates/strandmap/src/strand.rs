use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::geom::DevicePoint;

/// Strand identifier. Anchors `p1`..`p8` map to ids 0..7; synthesized strands may use
/// any id not already taken.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StrandId(pub u8);

impl fmt::Display for StrandId {
    // Matches the anchor label printed on the drawing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", u16::from(self.0) + 1)
    }
}

/// One physically wired chain of lights, in wiring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strand {
    id: StrandId,
    #[serde(serialize_with = "serialize_coords")]
    coords: Vec<DevicePoint>,
}

impl Strand {
    pub fn new(id: StrandId, coords: Vec<DevicePoint>) -> Self {
        Self { id, coords }
    }

    pub fn id(&self) -> StrandId {
        self.id
    }

    pub fn coords(&self) -> &[DevicePoint] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.coords.truncate(len);
    }
}

fn serialize_coords<S: Serializer>(
    coords: &[DevicePoint],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(coords.len()))?;
    for c in coords {
        seq.serialize_element(&[c.x, c.y])?;
    }
    seq.end()
}
