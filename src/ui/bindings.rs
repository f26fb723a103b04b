//! Numeric control bindings for the loaded model's transform. Created once
//! when the asset finishes loading and kept for the session. Mutation is
//! strictly one-way: control edit -> transform write -> redraw request.

use std::f32::consts::TAU;

use crate::render::RenderContext;
use crate::scene::{NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformAxis {
    /// One control drives all three scale components uniformly.
    ScaleUniform,
    RotationY,
    TranslationX,
    TranslationY,
    TranslationZ,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlBinding {
    pub axis: TransformAxis,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
}

/// The control set the original exposes: uniform scale, Y rotation, and
/// three independent translation axes.
pub fn standard_bindings() -> Vec<ControlBinding> {
    vec![
        ControlBinding {
            axis: TransformAxis::ScaleUniform,
            label: "Scale",
            min: 0.1,
            max: 2.0,
        },
        ControlBinding {
            axis: TransformAxis::RotationY,
            label: "Rotate",
            min: 0.0,
            max: TAU,
        },
        ControlBinding {
            axis: TransformAxis::TranslationX,
            label: "x Translation",
            min: -20.0,
            max: 20.0,
        },
        ControlBinding {
            axis: TransformAxis::TranslationY,
            label: "y Translation",
            min: -20.0,
            max: 20.0,
        },
        ControlBinding {
            axis: TransformAxis::TranslationZ,
            label: "z Translation",
            min: -20.0,
            max: 20.0,
        },
    ]
}

/// Wires the standard controls to one target node.
#[derive(Debug)]
pub struct TransformBinder {
    target: NodeId,
    bindings: Vec<ControlBinding>,
}

impl TransformBinder {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            bindings: standard_bindings(),
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    /// Current value of an axis, read from the live transform. The scale
    /// control reports Y, which the uniform write keeps equal to X and Z.
    pub fn value(&self, graph: &SceneGraph, axis: TransformAxis) -> f32 {
        let transform = &graph.node(self.target).transform;
        match axis {
            TransformAxis::ScaleUniform => transform.scale.y,
            TransformAxis::RotationY => transform.rotation.y,
            TransformAxis::TranslationX => transform.position.x,
            TransformAxis::TranslationY => transform.position.y,
            TransformAxis::TranslationZ => transform.position.z,
        }
    }

    /// Write a control edit into the transform and request one redraw.
    /// The value arrives already clamped by the widget and is trusted.
    pub fn apply(
        &self,
        graph: &mut SceneGraph,
        render: &mut RenderContext,
        axis: TransformAxis,
        value: f32,
    ) {
        let transform = &mut graph.node_mut(self.target).transform;
        match axis {
            TransformAxis::ScaleUniform => {
                transform.scale.x = value;
                transform.scale.y = value;
                transform.scale.z = value;
            }
            TransformAxis::RotationY => transform.rotation.y = value,
            TransformAxis::TranslationX => transform.position.x = value,
            TransformAxis::TranslationY => transform.position.y = value,
            TransformAxis::TranslationZ => transform.position.z = value,
        }
        render.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    fn graph_with_target() -> (SceneGraph, NodeId) {
        let mut graph = SceneGraph::new();
        let target = graph.add_root(SceneNode::group("cellObject"));
        (graph, target)
    }

    #[test]
    fn scale_control_drives_all_components_with_one_redraw() {
        let (mut graph, target) = graph_with_target();
        let mut render = RenderContext::new(100, 100);
        render.take_redraw_request();
        let requests_before = render.redraw_requests();

        let binder = TransformBinder::new(target);
        binder.apply(&mut graph, &mut render, TransformAxis::ScaleUniform, 0.5);

        let scale = graph.node(target).transform.scale;
        assert_eq!((scale.x, scale.y, scale.z), (0.5, 0.5, 0.5));
        assert_eq!(render.redraw_requests() - requests_before, 1);
        assert!(render.take_redraw_request());
    }

    #[test]
    fn translation_axes_are_independent() {
        let (mut graph, target) = graph_with_target();
        let mut render = RenderContext::new(100, 100);
        let binder = TransformBinder::new(target);

        binder.apply(&mut graph, &mut render, TransformAxis::TranslationX, -12.0);
        binder.apply(&mut graph, &mut render, TransformAxis::TranslationZ, 7.5);

        let position = graph.node(target).transform.position;
        assert_eq!(position.x, -12.0);
        assert_eq!(position.y, 0.0);
        assert_eq!(position.z, 7.5);
    }

    #[test]
    fn values_reflect_live_transform() {
        let (mut graph, target) = graph_with_target();
        let mut render = RenderContext::new(100, 100);
        let binder = TransformBinder::new(target);

        binder.apply(&mut graph, &mut render, TransformAxis::RotationY, 1.25);
        assert_eq!(binder.value(&graph, TransformAxis::RotationY), 1.25);
        assert_eq!(binder.value(&graph, TransformAxis::ScaleUniform), 1.0);
    }

    #[test]
    fn standard_bindings_cover_the_documented_ranges() {
        let bindings = standard_bindings();
        assert_eq!(bindings.len(), 5);
        let scale = &bindings[0];
        assert_eq!((scale.min, scale.max), (0.1, 2.0));
        let rotate = &bindings[1];
        assert!((rotate.max - TAU).abs() < 1e-6);
        assert!(bindings[2..]
            .iter()
            .all(|binding| binding.min == -20.0 && binding.max == 20.0));
    }
}
