use serde::{Deserialize, Serialize};

use crate::customize::Customization;
use crate::normalize::DegenerateAxis;

/// How a drawing is turned into device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Largest device X (raster width minus one).
    pub max_x: u16,
    /// Largest device Y (raster height minus one).
    pub max_y: u16,
    /// Overrides detection from the file name when set.
    pub customization: Option<Customization>,
    pub degenerate_axis: DegenerateAxis,
}

impl LayoutOptions {
    pub fn new(max_x: u16, max_y: u16) -> Self {
        Self {
            max_x,
            max_y,
            ..Default::default()
        }
    }

    /// Options for a `width` x `height` raster.
    pub fn for_resolution(width: u16, height: u16) -> Self {
        Self::new(width.saturating_sub(1), height.saturating_sub(1))
    }

    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = Some(customization);
        self
    }

    pub fn with_degenerate_axis(mut self, policy: DegenerateAxis) -> Self {
        self.degenerate_axis = policy;
        self
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_inclusive() {
        let o = LayoutOptions::for_resolution(512, 64);
        assert_eq!((o.max_x, o.max_y), (511, 63));
        assert_eq!(LayoutOptions::for_resolution(0, 1).max_x, 0);
    }

    #[test]
    fn json_uses_camel_case_and_defaults() {
        let o = LayoutOptions::from_json(r#"{"maxX": 99, "maxY": 9, "customization": "dorsalFin"}"#)
            .unwrap();
        assert_eq!(
            o,
            LayoutOptions::new(99, 9).with_customization(Customization::DorsalFin)
        );

        let o = LayoutOptions::from_json(r#"{"maxX": 1, "degenerateAxis": "fail"}"#).unwrap();
        assert_eq!(o.max_y, 0);
        assert_eq!(o.customization, None);
        assert_eq!(o.degenerate_axis, DegenerateAxis::Fail);
    }
}
