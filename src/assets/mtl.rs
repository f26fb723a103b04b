//! Material definition parser. Only the channels the viewer consumes are
//! kept: diffuse (Kd) and emissive (Ke). Unknown directives are skipped.

use std::collections::HashMap;

use glam::Vec3;

use crate::scene::Material;

/// Parse failure with the 1-based source line, wrapped into a stage error
/// by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLib {
    materials: HashMap<String, Material>,
}

impl MaterialLib {
    pub fn get(&self, name: &str) -> Option<Material> {
        self.materials.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

pub fn parse(text: &str) -> Result<MaterialLib, ParseIssue> {
    let mut lib = MaterialLib::default();
    let mut current: Option<String> = None;

    for (number, raw) in text.lines().enumerate() {
        let line = number + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let directive = parts.next().unwrap_or_default();
        match directive {
            "newmtl" => {
                let name = parts.next().ok_or_else(|| ParseIssue {
                    line,
                    reason: "newmtl without a name".to_string(),
                })?;
                lib.materials.insert(name.to_string(), Material::default());
                current = Some(name.to_string());
            }
            "Kd" | "Ke" => {
                let name = current.as_deref().ok_or_else(|| ParseIssue {
                    line,
                    reason: format!("{directive} before any newmtl"),
                })?;
                let color = parse_color(parts, line)?;
                let material = lib
                    .materials
                    .get_mut(name)
                    .expect("current always names an inserted material");
                if directive == "Kd" {
                    material.diffuse = color;
                } else {
                    material.emissive = color;
                }
            }
            _ => {}
        }
    }

    Ok(lib)
}

fn parse_color<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, ParseIssue> {
    let mut channels = [0.0f32; 3];
    for channel in &mut channels {
        let token = parts.next().ok_or_else(|| ParseIssue {
            line,
            reason: "color needs three components".to_string(),
        })?;
        *channel = token.parse().map_err(|_| ParseIssue {
            line,
            reason: format!("bad color component '{token}'"),
        })?;
    }
    Ok(Vec3::from(channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_diffuse_and_emissive() {
        let lib = parse(
            "# comment\n\
             newmtl membrane\n\
             Kd 0.8 0.2 0.1\n\
             Ke 0.0 0.1 0.0\n\
             Ns 96.0\n\
             newmtl plain\n",
        )
        .unwrap();
        assert_eq!(lib.len(), 2);
        let membrane = lib.get("membrane").unwrap();
        assert_eq!(membrane.diffuse, Vec3::new(0.8, 0.2, 0.1));
        assert_eq!(membrane.emissive, Vec3::new(0.0, 0.1, 0.0));
        assert_eq!(lib.get("plain").unwrap(), Material::default());
    }

    #[test]
    fn color_before_newmtl_is_an_error() {
        let err = parse("Kd 1 0 0\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.reason.contains("before any newmtl"));
    }

    #[test]
    fn malformed_component_reports_line() {
        let err = parse("newmtl a\nKd 1 x 0\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
