use std::collections::BTreeMap;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::classify::classify;
use crate::customize::Customization;
use crate::dxf;
use crate::entities::Entity;
use crate::error::Result;
use crate::geom::{DevicePoint, bounding_box};
use crate::normalize::normalize;
use crate::options::LayoutOptions;
use crate::reconstruct::reconstruct;
use crate::strand::{Strand, StrandId};

/// The strands of one installation, in device coordinates.
///
/// Built once from a drawing and read-only afterwards. Strands are keyed by their (sparse)
/// id; iteration is always in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    source: String,
    max_x: u16,
    max_y: u16,
    customization: Customization,
    #[serde(serialize_with = "serialize_strands")]
    strands: BTreeMap<StrandId, Strand>,
}

impl Layout {
    /// Reads and processes a DXF drawing.
    pub fn open(path: impl AsRef<Path>, options: LayoutOptions) -> Result<Self> {
        let path = path.as_ref();
        let entities = dxf::read_file(path)?;
        Self::from_entities(path.display().to_string(), &entities, options)
    }

    /// Builds a layout from already-read entities. `source` names the drawing; it is used to
    /// pick a customization when `options` does not set one.
    pub fn from_entities(
        source: impl Into<String>,
        entities: &[Entity],
        options: LayoutOptions,
    ) -> Result<Self> {
        let source = source.into();
        let customization = options
            .customization
            .unwrap_or_else(|| Customization::detect(Path::new(&source)));

        let classified = classify(entities)?;
        let raw = reconstruct(classified)?;
        let normalized = normalize(&raw, options.max_x, options.max_y, options.degenerate_axis)?;

        let mut strands: BTreeMap<StrandId, Strand> = normalized
            .into_iter()
            .map(|(id, coords)| (id, Strand::new(id, coords)))
            .collect();
        customization.apply(&mut strands)?;

        let layout = Self {
            source,
            max_x: options.max_x,
            max_y: options.max_y,
            customization,
            strands,
        };
        layout.log_summary();
        Ok(layout)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn max_x(&self) -> u16 {
        self.max_x
    }

    pub fn max_y(&self) -> u16 {
        self.max_y
    }

    pub fn dst_width(&self) -> u32 {
        u32::from(self.max_x) + 1
    }

    pub fn dst_height(&self) -> u32 {
        u32::from(self.max_y) + 1
    }

    pub fn customization(&self) -> Customization {
        self.customization
    }

    pub fn strands(&self) -> impl Iterator<Item = &Strand> {
        self.strands.values()
    }

    pub fn strand(&self, id: StrandId) -> Option<&Strand> {
        self.strands.get(&id)
    }

    /// Coordinates of strand `id`, or `None` if no strand has that id.
    pub fn strand_coords(&self, id: StrandId) -> Option<&[DevicePoint]> {
        self.strand(id).map(Strand::coords)
    }

    pub fn strand_count(&self) -> usize {
        self.strands.len()
    }

    pub fn led_count(&self, id: StrandId) -> Option<usize> {
        self.strand(id).map(Strand::len)
    }

    pub fn led_coord(&self, id: StrandId, led: usize) -> Option<DevicePoint> {
        self.strand_coords(id)?.get(led).copied()
    }

    pub fn total_led_count(&self) -> usize {
        self.strands.values().map(Strand::len).sum()
    }

    /// Every coordinate of every strand, concatenated in strand id order.
    pub fn all_coords(&self) -> Vec<DevicePoint> {
        self.strands
            .values()
            .flat_map(|s| s.coords().iter().copied())
            .collect()
    }

    fn log_summary(&self) {
        tracing::info!(
            source = %self.source,
            dst_width = self.dst_width(),
            dst_height = self.dst_height(),
            customization = ?self.customization,
            "loaded layout"
        );
        for s in self.strands.values() {
            let Some(b) = bounding_box(s.coords().iter().copied()) else {
                tracing::info!(strand = %s.id(), led_count = 0, "strand");
                continue;
            };
            tracing::info!(
                strand = %s.id(),
                led_count = s.len(),
                min_x = b.min.x,
                max_x = b.max.x,
                min_y = b.min.y,
                max_y = b.max.y,
                "strand"
            );
        }
    }
}

fn serialize_strands<S: Serializer>(
    strands: &BTreeMap<StrandId, Strand>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(strands.values())
}
