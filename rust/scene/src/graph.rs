// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph: a root holding named groups of wireframe line objects
//!
//! The tree is exactly two levels deep. Groups are created once and never
//! removed, so a [`GroupId`] stays valid for the lifetime of its scene.

use geofloor_geometry::EdgesGeometry;
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Handle to a group inside one [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Solid line color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMaterial {
    pub color: [u8; 3],
}

impl LineMaterial {
    pub const WHITE: LineMaterial = LineMaterial {
        color: [0xff, 0xff, 0xff],
    };
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Wireframe object: line segments in local space plus a translation
#[derive(Debug, Clone)]
pub struct LineSegments {
    /// Display name carried over from the source feature
    pub name: String,
    pub geometry: EdgesGeometry,
    pub material: LineMaterial,
    /// Translation relative to the parent group
    pub position: Vector3<f64>,
}

impl LineSegments {
    pub fn new(name: impl Into<String>, geometry: EdgesGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            material: LineMaterial::WHITE,
            position: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.geometry.segment_count()
    }

    /// Segments translated into world space
    pub fn world_segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        let offset = self.position;
        self.geometry
            .segments()
            .map(move |(a, b)| (a + offset, b + offset))
    }
}

#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub visible: bool,
    children: Vec<LineSegments>,
}

impl Group {
    fn new(name: String) -> Self {
        Self {
            name,
            visible: true,
            children: Vec::new(),
        }
    }

    /// Children in insertion order
    pub fn children(&self) -> &[LineSegments] {
        &self.children
    }

    pub fn add(&mut self, object: LineSegments) {
        self.children.push(object);
    }

    pub fn segment_count(&self) -> usize {
        self.children.iter().map(LineSegments::segment_count).sum()
    }
}

/// Scene root
#[derive(Debug, Default)]
pub struct Scene {
    groups: Vec<Group>,
    by_name: FxHashMap<String, GroupId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty, visible group under the root
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<GroupId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateGroup(name));
        }
        let id = GroupId(self.groups.len());
        self.by_name.insert(name.clone(), id);
        self.groups.push(Group::new(name));
        Ok(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(id.0)
    }

    pub fn group_by_name(&self, name: &str) -> Option<GroupId> {
        self.by_name.get(name).copied()
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    /// Append an object to a group's children
    pub fn attach(&mut self, id: GroupId, object: LineSegments) -> Result<()> {
        let group = self.group_mut(id).ok_or(Error::UnknownGroup(id.0))?;
        group.add(object);
        Ok(())
    }

    pub fn set_visible(&mut self, id: GroupId, visible: bool) -> Result<()> {
        let group = self.group_mut(id).ok_or(Error::UnknownGroup(id.0))?;
        group.visible = visible;
        Ok(())
    }

    /// Objects whose group is visible
    pub fn visible_objects(&self) -> impl Iterator<Item = &LineSegments> {
        self.groups
            .iter()
            .filter(|g| g.visible)
            .flat_map(|g| g.children.iter())
    }

    pub fn object_count(&self) -> usize {
        self.groups.iter().map(|g| g.children.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_segment() -> EdgesGeometry {
        EdgesGeometry {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_add_group() {
        let mut scene = Scene::new();
        let a = scene.add_group("group0").unwrap();
        let b = scene.add_group("group1").unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.group_by_name("group1"), Some(b));
        assert!(scene.group(a).unwrap().visible);
        assert!(matches!(
            scene.add_group("group0"),
            Err(Error::DuplicateGroup(_))
        ));
    }

    #[test]
    fn test_visible_objects_follow_group_flag() {
        let mut scene = Scene::new();
        let a = scene.add_group("a").unwrap();
        let b = scene.add_group("b").unwrap();
        scene.attach(a, LineSegments::new("one", unit_segment())).unwrap();
        scene.attach(b, LineSegments::new("two", unit_segment())).unwrap();
        assert_eq!(scene.visible_objects().count(), 2);

        scene.set_visible(a, false).unwrap();
        let names: Vec<_> = scene.visible_objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["two"]);
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn test_world_segments_apply_position() {
        let mut object = LineSegments::new("x", unit_segment());
        object.position = Vector3::new(0.0, 59.0, 0.0);
        let (a, b) = object.world_segments().next().unwrap();
        assert_eq!(a, Point3::new(0.0, 59.0, 0.0));
        assert_eq!(b, Point3::new(1.0, 59.0, 0.0));
        assert_eq!(object.material, LineMaterial::WHITE);
    }

    #[test]
    fn test_unknown_group() {
        let mut scene = Scene::new();
        let mut other = Scene::new();
        other.add_group("a").unwrap();
        let foreign = other.group_by_name("a").unwrap();
        assert!(scene.attach(foreign, LineSegments::new("x", unit_segment())).is_err());
    }
}
