//! Pointer picking and the highlight state machine.
//!
//! A pointer-down becomes a camera ray tested against every indexed node's
//! world bounding sphere. The nearest hit wins; background bodies can
//! occlude but a nearest hit on one clears the selection instead of
//! selecting it. At most one node is highlighted at a time, and its
//! pre-highlight emissive is restored before the highlight moves or
//! clears - never skipped, never approximated.

use glam::Vec3;

use super::camera::Camera;
use crate::scene::index::{self, SceneIndex};
use crate::scene::{NodeId, SceneGraph};

/// Fixed highlight tint written to the selected node's emissive channel.
pub const HIGHLIGHT_EMISSIVE: Vec3 = Vec3::new(1.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Nearest non-negative intersection distance with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let projected = to_center.dot(self.direction);
        let closest_sq = to_center.length_squared() - projected * projected;
        let radius_sq = radius * radius;
        if closest_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - closest_sq).sqrt();
        let near = projected - half_chord;
        let far = projected + half_chord;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(far)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// A new pickable node was selected; the panel should show this part.
    Selected(String),
    /// Re-pick of the current node; nothing changed.
    Unchanged,
    /// Miss or excluded hit; any highlight was cleared, panel untouched.
    Cleared,
}

/// At most one highlighted node plus its saved emissive color.
#[derive(Debug, Default)]
pub struct Picker {
    current: Option<(NodeId, Vec3)>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current.map(|(id, _)| id)
    }

    pub fn pick(
        &mut self,
        graph: &mut SceneGraph,
        index: &SceneIndex,
        camera: &Camera,
        pointer: (f32, f32),
        viewport: (u32, u32),
    ) -> PickOutcome {
        let ray = camera.ray_from_pointer(pointer.0, pointer.1, viewport.0, viewport.1);
        let hit = nearest_hit(&ray, graph, index);

        match hit {
            Some(id) if index::is_pickable(&graph.node(id).name) => {
                if self.current() == Some(id) {
                    return PickOutcome::Unchanged;
                }
                // Restore the outgoing highlight before anything else.
                self.clear(graph);
                let saved = graph
                    .node(id)
                    .material
                    .map(|material| material.emissive)
                    .unwrap_or(Vec3::ZERO);
                if let Some(material) = graph.node_mut(id).material.as_mut() {
                    material.emissive = HIGHLIGHT_EMISSIVE;
                }
                self.current = Some((id, saved));
                let name = graph.node(id).name.clone();
                log::debug!("picked '{name}'");
                PickOutcome::Selected(name)
            }
            _ => {
                self.clear(graph);
                PickOutcome::Cleared
            }
        }
    }

    /// Restore the saved emissive and drop the highlight.
    pub fn clear(&mut self, graph: &mut SceneGraph) {
        if let Some((id, saved)) = self.current.take() {
            if let Some(material) = graph.node_mut(id).material.as_mut() {
                material.emissive = saved;
            }
        }
    }
}

/// Nearest intersection over every indexed node, excluded names included
/// so background bodies participate in occlusion.
fn nearest_hit(ray: &Ray, graph: &SceneGraph, index: &SceneIndex) -> Option<NodeId> {
    let mut best: Option<(f32, NodeId)> = None;
    for (_, id) in index.entries() {
        let Some(bounds) = graph.world_bounds(id) else {
            continue;
        };
        if let Some(distance) = ray.intersect_sphere(bounds.center, bounds.radius) {
            if best.map_or(true, |(nearest, _)| distance < nearest) {
                best = Some((distance, id));
            }
        }
    }
    best.map(|(_, id)| id)
}
