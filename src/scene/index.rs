//! Flat, rebuildable name → node mapping over the whole scene graph.
//!
//! Rebuilt once the scene is structurally complete for the session; nodes
//! are never added or removed afterwards, so there is no incremental path.
//! Duplicate names overwrite (last write wins) - an accepted limitation the
//! content table relies on.

use std::collections::HashMap;

use super::{NodeId, SceneGraph};

/// Background bodies excluded from picking by name convention.
pub const EXCLUDED_NAMES: [&str; 2] = ["mainBody", "neighborCell"];

pub fn is_pickable(name: &str) -> bool {
    !EXCLUDED_NAMES.contains(&name)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SceneIndex {
    by_name: HashMap<String, NodeId>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full traversal; records every reachable node keyed by name.
    pub fn rebuild(&mut self, graph: &SceneGraph) {
        self.by_name.clear();
        graph.traverse(|id, node| {
            self.by_name.insert(node.name.clone(), id);
        });
        log::debug!("scene index rebuilt: {} entries", self.by_name.len());
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Every indexed entry, excluded names included. The picker ray-tests
    /// against all of these so that background bodies can occlude, then
    /// rejects an excluded nearest hit.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.by_name.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Entries eligible to become the selected part.
    pub fn pickable_entries(&self) -> Vec<(&str, NodeId)> {
        self.entries()
            .filter(|(name, _)| is_pickable(name))
            .collect()
    }
}
