//! Fixed scene dressing: the decorative neighbor-cell spheres and the
//! three-point directional light rig. Added once at startup, before the
//! index rebuild.

use glam::Vec3;

use super::{BoundingSphere, DirectionalLight, Material, SceneGraph, SceneNode};

pub const NEIGHBOR_CELL_RADIUS: f32 = 35.0;

/// Fixed positions for the nine background cells.
pub const NEIGHBOR_CELL_POSITIONS: [[f32; 3]; 9] = [
    [-89.383_728, -142.132_87, -349.875_5],
    [-223.327_21, -297.894_26, 489.406_01],
    [-297.937_59, -179.998, 434.857_06],
    [-103.145_17, -224.563_36, -262.546_08],
    [-27.395_086, -385.540_08, -352.198_9],
    [-360.832_58, -100.648_13, -97.027_966],
    [-398.329_73, -66.229_307, -225.598_75],
    [405.113_1, 143.881_14, 310.402_22],
    [-264.324_55, -228.868_46, 0.883_859_7],
];

/// Spawn the background cells. Named "neighborCell" so the index exclusion
/// predicate keeps them out of picking.
pub fn spawn_neighbor_cells(graph: &mut SceneGraph) {
    for position in NEIGHBOR_CELL_POSITIONS {
        let mut node = SceneNode::mesh(
            "neighborCell",
            Material::default(),
            BoundingSphere {
                center: Vec3::ZERO,
                radius: NEIGHBOR_CELL_RADIUS,
            },
        );
        node.transform.position = Vec3::from(position);
        graph.add_root(node);
    }
}

/// Key / fill / back directional lights with the original rig's values.
pub fn spawn_lights(graph: &mut SceneGraph) {
    let rig = [
        ("Light1", 1.0, Vec3::new(3.0, 10.0, 3.0)),
        ("Light2", 1.2, Vec3::new(0.0, -5.0, -1.0)),
        ("Light3", 0.5, Vec3::new(-10.0, 0.0, 0.0)),
    ];
    for (name, intensity, direction) in rig {
        graph.add_root(SceneNode::light(
            name,
            DirectionalLight {
                color: Vec3::ONE,
                intensity,
                direction: direction.normalize(),
            },
        ));
    }
}
