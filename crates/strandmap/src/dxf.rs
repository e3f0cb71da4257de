//! Minimal ASCII DXF reader.
//!
//! Only the `ENTITIES` section is scanned, and only the group codes the layout needs are
//! interpreted: `0` (entity type), `1` (text value), `10/20/30` (insertion point, circle center
//! or line start) and `11/21/31` (line end). Everything else is skipped.

use std::path::Path;

use crate::entities::{Entity, RawPoint};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DxfError {
    #[error("DXF line {line}: expected a numeric group code, found {found:?}")]
    GroupCode { line: usize, found: String },

    #[error("DXF line {line}: group code {code} has no value")]
    MissingValue { line: usize, code: i32 },

    #[error("DXF line {line}: invalid number {value:?} for group code {code}")]
    Number {
        line: usize,
        code: i32,
        value: String,
    },

    #[error("DXF line {line}: {kind} entity is missing group code {code}")]
    MissingField {
        line: usize,
        kind: String,
        code: i32,
    },

    #[error("DXF section {section} is not terminated by ENDSEC")]
    UnterminatedSection { section: String },
}

/// Reads a layout drawing from disk.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Entity>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_str(&text)?)
}

pub fn read_str(input: &str) -> std::result::Result<Vec<Entity>, DxfError> {
    let mut pairs = GroupPairs::new(input);
    let mut entities = Vec::new();

    while let Some(pair) = pairs.next_pair()? {
        if pair.code != 0 {
            continue;
        }
        match pair.value {
            "SECTION" => {
                let Some(name) = pairs.next_pair()? else {
                    return Err(DxfError::UnterminatedSection {
                        section: String::new(),
                    });
                };
                let section = name.value.to_string();
                if name.code == 2 && section == "ENTITIES" {
                    read_entities(&mut pairs, &mut entities)?;
                } else {
                    skip_section(&mut pairs, &section)?;
                }
            }
            "EOF" => break,
            _ => {}
        }
    }

    tracing::debug!(count = entities.len(), "read DXF entities");
    Ok(entities)
}

#[derive(Debug, Clone, Copy)]
struct GroupPair<'a> {
    line: usize,
    code: i32,
    value: &'a str,
}

struct GroupPairs<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> GroupPairs<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
        }
    }

    fn next_pair(&mut self) -> std::result::Result<Option<GroupPair<'a>>, DxfError> {
        let (idx, raw_code) = loop {
            match self.lines.next() {
                None => return Ok(None),
                // Tolerate blank padding between pairs and at the end of the file.
                Some((_, l)) if l.trim().is_empty() => continue,
                Some(next) => break next,
            }
        };
        let line = idx + 1;
        let code = raw_code
            .trim()
            .parse::<i32>()
            .map_err(|_| DxfError::GroupCode {
                line,
                found: raw_code.to_string(),
            })?;
        let Some((_, value)) = self.lines.next() else {
            return Err(DxfError::MissingValue { line, code });
        };
        Ok(Some(GroupPair {
            line: line + 1,
            code,
            value: value.trim(),
        }))
    }
}

fn skip_section(pairs: &mut GroupPairs<'_>, section: &str) -> std::result::Result<(), DxfError> {
    while let Some(pair) = pairs.next_pair()? {
        if pair.code == 0 && pair.value == "ENDSEC" {
            return Ok(());
        }
    }
    Err(DxfError::UnterminatedSection {
        section: section.to_string(),
    })
}

fn read_entities(
    pairs: &mut GroupPairs<'_>,
    out: &mut Vec<Entity>,
) -> std::result::Result<(), DxfError> {
    let mut current: Option<EntityBuilder> = None;
    while let Some(pair) = pairs.next_pair()? {
        if pair.code == 0 {
            if let Some(done) = current.take() {
                out.push(done.finish()?);
            }
            if pair.value == "ENDSEC" {
                return Ok(());
            }
            current = Some(EntityBuilder::new(pair.value, pair.line));
            continue;
        }
        if let Some(builder) = current.as_mut() {
            builder.apply(pair)?;
        }
    }
    Err(DxfError::UnterminatedSection {
        section: "ENTITIES".to_string(),
    })
}

#[derive(Debug, Default, Clone, Copy)]
struct PartialPoint {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

#[derive(Debug)]
struct EntityBuilder {
    kind: String,
    line: usize,
    text: Option<String>,
    primary: PartialPoint,
    secondary: PartialPoint,
}

impl EntityBuilder {
    fn new(kind: &str, line: usize) -> Self {
        Self {
            kind: kind.to_string(),
            line,
            text: None,
            primary: PartialPoint::default(),
            secondary: PartialPoint::default(),
        }
    }

    fn apply(&mut self, pair: GroupPair<'_>) -> std::result::Result<(), DxfError> {
        let slot = match pair.code {
            1 => {
                self.text = Some(pair.value.to_string());
                return Ok(());
            }
            10 => &mut self.primary.x,
            20 => &mut self.primary.y,
            30 => &mut self.primary.z,
            11 => &mut self.secondary.x,
            21 => &mut self.secondary.y,
            31 => &mut self.secondary.z,
            _ => return Ok(()),
        };
        let value = pair.value.parse::<f64>().map_err(|_| DxfError::Number {
            line: pair.line,
            code: pair.code,
            value: pair.value.to_string(),
        })?;
        *slot = Some(value);
        Ok(())
    }

    fn point(&self, p: PartialPoint, x_code: i32) -> std::result::Result<RawPoint, DxfError> {
        let missing = |code| DxfError::MissingField {
            line: self.line,
            kind: self.kind.clone(),
            code,
        };
        let x = p.x.ok_or_else(|| missing(x_code))?;
        let y = p.y.ok_or_else(|| missing(x_code + 10))?;
        Ok(match p.z {
            Some(z) => RawPoint::xyz(x, y, z),
            None => RawPoint::xy(x, y),
        })
    }

    fn finish(self) -> std::result::Result<Entity, DxfError> {
        match self.kind.as_str() {
            "TEXT" => {
                let insert = self.point(self.primary, 10)?;
                let value = self.text.clone().ok_or_else(|| DxfError::MissingField {
                    line: self.line,
                    kind: self.kind.clone(),
                    code: 1,
                })?;
                Ok(Entity::Text { value, insert })
            }
            "CIRCLE" => Ok(Entity::Circle {
                center: self.point(self.primary, 10)?,
            }),
            "LINE" => Ok(Entity::Line {
                start: self.point(self.primary, 10)?,
                end: self.point(self.secondary, 11)?,
            }),
            _ => Ok(Entity::Other { kind: self.kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dxf(body: &[&str]) -> String {
        let mut lines = vec!["0", "SECTION", "2", "HEADER", "9", "$ACADVER", "1", "AC1009"];
        lines.extend(["0", "ENDSEC", "0", "SECTION", "2", "ENTITIES"]);
        lines.extend_from_slice(body);
        lines.extend(["0", "ENDSEC", "0", "EOF"]);
        lines.join("\n")
    }

    #[test]
    fn reads_text_circle_and_line() {
        let input = dxf(&[
            "0", "TEXT", "8", "0", "10", "0.0", "20", "0.0", "30", "0.0", "40", "1.0", "1", "p1",
            "0", "CIRCLE", "8", "0", "10", "10.0", "20", "0.0", "40", "0.5",
            "0", "LINE", "8", "0", "10", "0.0", "20", "0.0", "11", "10.0", "21", "0.0",
        ]);
        let entities = read_str(&input).unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::text("p1", RawPoint::xyz(0.0, 0.0, 0.0)),
                Entity::circle(RawPoint::xy(10.0, 0.0)),
                Entity::line(RawPoint::xy(0.0, 0.0), RawPoint::xy(10.0, 0.0)),
            ]
        );
    }

    #[test]
    fn unknown_entities_are_kept_by_kind() {
        let input = dxf(&["0", "ARC", "10", "1", "20", "2", "40", "3"]);
        assert_eq!(
            read_str(&input).unwrap(),
            vec![Entity::Other {
                kind: "ARC".to_string()
            }]
        );
    }

    #[test]
    fn tolerates_padding_and_crlf() {
        let input = "  0\r\nSECTION\r\n  2\r\nENTITIES\r\n  0\r\nCIRCLE\r\n 10\r\n1.5\r\n 20\r\n-2\r\n  0\r\nENDSEC\r\n  0\r\nEOF\r\n\r\n";
        assert_eq!(
            read_str(input).unwrap(),
            vec![Entity::circle(RawPoint::xy(1.5, -2.0))]
        );
    }

    #[test]
    fn missing_line_end_is_reported() {
        let input = dxf(&["0", "LINE", "10", "0", "20", "0", "11", "1"]);
        let err = read_str(&input).unwrap_err();
        assert!(matches!(
            err,
            DxfError::MissingField { code: 21, ref kind, .. } if kind == "LINE"
        ));
    }

    #[test]
    fn bad_numbers_and_codes_are_reported() {
        let input = dxf(&["0", "CIRCLE", "10", "abc", "20", "0"]);
        assert!(matches!(
            read_str(&input).unwrap_err(),
            DxfError::Number { code: 10, .. }
        ));

        assert!(matches!(
            read_str("x\nSECTION\n").unwrap_err(),
            DxfError::GroupCode { line: 1, .. }
        ));
    }

    #[test]
    fn unterminated_entities_section_fails() {
        let input = "0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n10\n0\n20\n0\n";
        assert_eq!(
            read_str(input).unwrap_err(),
            DxfError::UnterminatedSection {
                section: "ENTITIES".to_string()
            }
        );
    }
}
