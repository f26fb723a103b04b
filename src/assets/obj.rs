//! Geometry parser. The viewer does not rasterize triangles itself, so
//! only what picking and scene construction need survives parsing: named
//! groups, their material binding, and a bounding sphere over the group's
//! vertices. Material availability is a correctness precondition; an
//! unknown `usemtl` is a parse failure, not a fallback.

use glam::Vec3;

use super::mtl::{MaterialLib, ParseIssue};
use crate::scene::BoundingSphere;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupDef {
    pub name: String,
    pub material: Option<String>,
    pub bounds: BoundingSphere,
    pub vertex_count: usize,
}

struct OpenGroup {
    name: String,
    material: Option<String>,
    min: Vec3,
    max: Vec3,
    vertex_count: usize,
}

impl OpenGroup {
    fn new(name: String) -> Self {
        Self {
            name,
            material: None,
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
            vertex_count: 0,
        }
    }

    fn close(self) -> Option<GroupDef> {
        if self.vertex_count == 0 {
            return None;
        }
        let center = (self.min + self.max) * 0.5;
        Some(GroupDef {
            name: self.name,
            material: self.material,
            bounds: BoundingSphere {
                center,
                radius: (self.max - center).length(),
            },
            vertex_count: self.vertex_count,
        })
    }
}

pub fn parse(text: &str, materials: &MaterialLib) -> Result<Vec<GroupDef>, ParseIssue> {
    let mut groups = Vec::new();
    let mut current: Option<OpenGroup> = None;

    for (number, raw) in text.lines().enumerate() {
        let line = number + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        match parts.next().unwrap_or_default() {
            "o" | "g" => {
                let name = parts.next().ok_or_else(|| ParseIssue {
                    line,
                    reason: "group without a name".to_string(),
                })?;
                if let Some(finished) = current.take().and_then(OpenGroup::close) {
                    groups.push(finished);
                }
                current = Some(OpenGroup::new(name.to_string()));
            }
            "usemtl" => {
                let name = parts.next().ok_or_else(|| ParseIssue {
                    line,
                    reason: "usemtl without a name".to_string(),
                })?;
                if !materials.contains(name) {
                    return Err(ParseIssue {
                        line,
                        reason: format!("unknown material '{name}'"),
                    });
                }
                let group = current.as_mut().ok_or_else(|| ParseIssue {
                    line,
                    reason: "usemtl before any group".to_string(),
                })?;
                group.material = Some(name.to_string());
            }
            "v" => {
                let group = current.as_mut().ok_or_else(|| ParseIssue {
                    line,
                    reason: "vertex before any group".to_string(),
                })?;
                let vertex = parse_vertex(parts, line)?;
                group.min = group.min.min(vertex);
                group.max = group.max.max(vertex);
                group.vertex_count += 1;
            }
            _ => {}
        }
    }

    if let Some(finished) = current.take().and_then(OpenGroup::close) {
        groups.push(finished);
    }
    if groups.is_empty() {
        return Err(ParseIssue {
            line: text.lines().count().max(1),
            reason: "no geometry groups found".to_string(),
        });
    }
    Ok(groups)
}

fn parse_vertex<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, ParseIssue> {
    let mut coords = [0.0f32; 3];
    for coord in &mut coords {
        let token = parts.next().ok_or_else(|| ParseIssue {
            line,
            reason: "vertex needs three coordinates".to_string(),
        })?;
        *coord = token.parse().map_err(|_| ParseIssue {
            line,
            reason: format!("bad vertex coordinate '{token}'"),
        })?;
    }
    Ok(Vec3::from(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::mtl;

    fn lib() -> MaterialLib {
        mtl::parse("newmtl inner\nKd 0.5 0.5 0.5\n").unwrap()
    }

    #[test]
    fn groups_carry_bounds_and_material() {
        let text = "o nucleus\n\
                    usemtl inner\n\
                    v -1 -1 -1\n\
                    v 1 1 1\n\
                    f 1 2 1\n\
                    g pores\n\
                    v 4 0 0\n\
                    v 6 0 0\n";
        let groups = parse(text, &lib()).unwrap();
        assert_eq!(groups.len(), 2);

        let nucleus = &groups[0];
        assert_eq!(nucleus.name, "nucleus");
        assert_eq!(nucleus.material.as_deref(), Some("inner"));
        assert!(nucleus.bounds.center.length() < 1e-6);
        assert!((nucleus.bounds.radius - Vec3::ONE.length()).abs() < 1e-5);

        let pores = &groups[1];
        assert_eq!(pores.material, None);
        assert!((pores.bounds.center - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
        assert!((pores.bounds.radius - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_material_is_rejected() {
        let err = parse("o a\nusemtl missing\nv 0 0 0\n", &lib()).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("missing"));
    }

    #[test]
    fn empty_geometry_is_rejected() {
        assert!(parse("# nothing here\n", &lib()).is_err());
    }
}
