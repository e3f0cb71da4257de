//! Sorts raw entities into anchors, light positions and wires.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use crate::entities::Entity;
use crate::error::{Error, Result};
use crate::geom::{Point, Segment};
use crate::strand::StrandId;

/// Validated drawing content, ready for strand reconstruction.
#[derive(Debug, Default, Clone)]
pub struct Classified {
    /// Strand origins keyed by id.
    pub anchors: BTreeMap<StrandId, Point>,
    /// Circle centers in drawing order.
    pub circles: IndexSet<Point>,
    pub segments: Vec<Segment>,
}

pub fn classify<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Result<Classified> {
    let mut out = Classified::default();

    for entity in entities {
        match entity {
            Entity::Text { value, insert } => {
                let id = parse_anchor_label(value)?;
                let at = insert.project()?;
                if out.anchors.insert(id, at).is_some() {
                    return Err(Error::DuplicateAnchor { id });
                }
            }
            Entity::Circle { center } => {
                let center = center.project()?;
                if !out.circles.insert(center) {
                    return Err(Error::DuplicateCircle { center });
                }
            }
            Entity::Line { start, end } => {
                let start = start.project()?;
                let end = end.project()?;
                let segment =
                    Segment::new(start, end).ok_or(Error::ZeroLengthLine { at: start })?;
                out.segments.push(segment);
            }
            Entity::Other { kind } => {
                return Err(Error::UnsupportedEntityType { kind: kind.clone() });
            }
        }
    }

    tracing::debug!(
        anchors = out.anchors.len(),
        circles = out.circles.len(),
        segments = out.segments.len(),
        "classified layout entities"
    );
    Ok(out)
}

/// `"p1"`..`"p8"` map to strand ids 0..7.
pub fn parse_anchor_label(label: &str) -> Result<StrandId> {
    match label.as_bytes() {
        [b'p', digit @ b'1'..=b'8'] => Ok(StrandId(digit - b'1')),
        _ => Err(Error::InvalidAnchorLabel {
            label: label.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RawPoint;

    #[test]
    fn anchor_labels() {
        assert_eq!(parse_anchor_label("p1").unwrap(), StrandId(0));
        assert_eq!(parse_anchor_label("p8").unwrap(), StrandId(7));
        for bad in ["p9", "p0", "P1", "p", "p12", "q1", "", "pé"] {
            assert!(
                matches!(
                    parse_anchor_label(bad),
                    Err(Error::InvalidAnchorLabel { ref label }) if label == bad
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn buckets_entities() {
        let entities = vec![
            Entity::text("p2", RawPoint::xy(0.0, 0.0)),
            Entity::circle(RawPoint::xyz(1.0, 0.0, 0.0)),
            Entity::circle(RawPoint::xy(2.0, 0.0)),
            Entity::line(RawPoint::xy(0.0, 0.0), RawPoint::xy(1.0, 0.0)),
        ];
        let c = classify(&entities).unwrap();
        assert_eq!(c.anchors.get(&StrandId(1)), Some(&Point::new(0.0, 0.0)));
        assert_eq!(
            c.circles.iter().copied().collect::<Vec<_>>(),
            vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]
        );
        assert_eq!(c.segments.len(), 1);
    }

    #[test]
    fn rejects_p9_label() {
        let entities = vec![Entity::text("p9", RawPoint::xy(0.0, 0.0))];
        assert!(matches!(
            classify(&entities),
            Err(Error::InvalidAnchorLabel { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_anchor() {
        let entities = vec![
            Entity::text("p1", RawPoint::xy(0.0, 0.0)),
            Entity::text("p1", RawPoint::xy(5.0, 0.0)),
        ];
        assert!(matches!(
            classify(&entities),
            Err(Error::DuplicateAnchor { id: StrandId(0) })
        ));
    }

    #[test]
    fn rejects_duplicate_circle_after_projection() {
        let entities = vec![
            Entity::circle(RawPoint::xy(3.0, 4.0)),
            Entity::circle(RawPoint::xyz(3.0, 4.0, 0.0)),
        ];
        assert!(matches!(
            classify(&entities),
            Err(Error::DuplicateCircle { center }) if center == Point::new(3.0, 4.0)
        ));
    }

    #[test]
    fn rejects_zero_length_line() {
        let entities = vec![Entity::line(RawPoint::xy(1.0, 1.0), RawPoint::xy(1.0, 1.0))];
        assert!(matches!(
            classify(&entities),
            Err(Error::ZeroLengthLine { at }) if at == Point::new(1.0, 1.0)
        ));
    }

    #[test]
    fn rejects_unknown_and_non_planar_entities() {
        let other = vec![Entity::Other {
            kind: "POLYLINE".to_string(),
        }];
        assert!(matches!(
            classify(&other),
            Err(Error::UnsupportedEntityType { ref kind }) if kind == "POLYLINE"
        ));

        let lifted = vec![Entity::circle(RawPoint::xyz(0.0, 0.0, 1.0))];
        assert!(matches!(
            classify(&lifted),
            Err(Error::NonPlanarPoint { .. })
        ));
    }
}
