// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable per-floor overview of a scene

use serde::Serialize;

use crate::graph::Scene;
use crate::registry::FloorGroupRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub floor: i32,
    pub label: String,
    pub name: String,
    pub visible: bool,
    pub meshes: usize,
    pub segments: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub groups: Vec<GroupSummary>,
    pub total_meshes: usize,
    pub total_segments: usize,
}

impl SceneSummary {
    pub fn collect(scene: &Scene, registry: &FloorGroupRegistry) -> Self {
        let groups: Vec<GroupSummary> = registry
            .floors()
            .iter()
            .filter_map(|floor| {
                let group = scene.group(floor.id)?;
                Some(GroupSummary {
                    floor: floor.floor.value(),
                    label: floor.label.clone(),
                    name: group.name.clone(),
                    visible: group.visible,
                    meshes: group.children().len(),
                    segments: group.segment_count(),
                })
            })
            .collect();

        Self {
            total_meshes: groups.iter().map(|g| g.meshes).sum(),
            total_segments: groups.iter().map(|g| g.segments).sum(),
            groups,
        }
    }
}
