// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor group registry
//!
//! One scene group per declared level, created once at startup and never
//! removed. Lookups for a level outside the declared range return `None`;
//! no group is created on demand.

use std::ops::RangeInclusive;

use geofloor_core::FloorIndex;

use crate::error::{Error, Result};
use crate::graph::{GroupId, LineSegments, Scene};

/// Levels present in the terminal dataset: B3 up to 4F
pub const DECLARED_FLOORS: RangeInclusive<i32> = -3..=4;

#[derive(Debug, Clone)]
pub struct FloorGroup {
    pub floor: FloorIndex,
    pub label: String,
    pub id: GroupId,
}

#[derive(Debug, Clone, Default)]
pub struct FloorGroupRegistry {
    groups: Vec<FloorGroup>,
}

impl FloorGroupRegistry {
    /// Create the groups for [`DECLARED_FLOORS`] under the scene root
    pub fn install(scene: &mut Scene) -> Result<Self> {
        Self::install_range(scene, DECLARED_FLOORS)
    }

    pub fn install_range(scene: &mut Scene, floors: RangeInclusive<i32>) -> Result<Self> {
        let mut groups = Vec::with_capacity(floors.clone().count());
        for value in floors {
            let floor = FloorIndex::new(value);
            let id = scene.add_group(floor.group_name())?;
            groups.push(FloorGroup {
                floor,
                label: floor.label(),
                id,
            });
        }
        Ok(Self { groups })
    }

    pub fn group(&self, floor: FloorIndex) -> Option<GroupId> {
        self.groups.iter().find(|g| g.floor == floor).map(|g| g.id)
    }

    /// Lookup by display label (`B1`, `Road`, `2F`)
    pub fn group_by_label(&self, label: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.label.eq_ignore_ascii_case(label))
            .map(|g| g.id)
    }

    pub fn contains(&self, floor: FloorIndex) -> bool {
        self.group(floor).is_some()
    }

    /// Registered groups from the lowest level up
    pub fn floors(&self) -> &[FloorGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Attach an object to the group of `floor`
    pub fn attach(&self, scene: &mut Scene, floor: FloorIndex, object: LineSegments) -> Result<()> {
        let id = self.group(floor).ok_or(Error::UnknownFloor(floor))?;
        scene.attach(id, object)
    }
}
