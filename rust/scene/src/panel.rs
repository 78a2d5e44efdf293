// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Visibility control panel
//!
//! One checkbox per floor group. Every change is written straight through to
//! the bound group's `visible` flag and touches no other group.

use crate::error::{Error, Result};
use crate::graph::{GroupId, Scene};
use crate::registry::FloorGroupRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub label: String,
    pub group: GroupId,
    pub checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityPanel {
    checkboxes: Vec<Checkbox>,
}

impl VisibilityPanel {
    /// One checkbox per registered group, initialized from the group's flag
    pub fn new(registry: &FloorGroupRegistry, scene: &Scene) -> Self {
        let checkboxes = registry
            .floors()
            .iter()
            .map(|floor| Checkbox {
                label: floor.label.clone(),
                group: floor.id,
                checked: scene.group(floor.id).is_some_and(|g| g.visible),
            })
            .collect();
        Self { checkboxes }
    }

    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    pub fn checked(&self, label: &str) -> Option<bool> {
        self.find(label).map(|i| self.checkboxes[i].checked)
    }

    pub fn set(&mut self, scene: &mut Scene, label: &str, checked: bool) -> Result<()> {
        let index = self
            .find(label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))?;
        let checkbox = &mut self.checkboxes[index];
        scene.set_visible(checkbox.group, checked)?;
        checkbox.checked = checked;
        Ok(())
    }

    /// Flip a checkbox; returns the new state
    pub fn toggle(&mut self, scene: &mut Scene, label: &str) -> Result<bool> {
        let checked = !self
            .checked(label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))?;
        self.set(scene, label, checked)?;
        Ok(checked)
    }

    fn find(&self, label: &str) -> Option<usize> {
        self.checkboxes
            .iter()
            .position(|c| c.label.eq_ignore_ascii_case(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Scene, FloorGroupRegistry, VisibilityPanel) {
        let mut scene = Scene::new();
        let registry = FloorGroupRegistry::install(&mut scene).unwrap();
        let panel = VisibilityPanel::new(&registry, &scene);
        (scene, registry, panel)
    }

    #[test]
    fn test_one_checkbox_per_group() {
        let (_, registry, panel) = setup();
        assert_eq!(panel.checkboxes().len(), registry.len());
        assert!(panel.checkboxes().iter().all(|c| c.checked));
    }

    #[test]
    fn test_toggle_is_isolated() {
        let (mut scene, _, mut panel) = setup();
        let labels: Vec<String> = panel.checkboxes().iter().map(|c| c.label.clone()).collect();

        for label in &labels {
            let before: Vec<(GroupId, bool)> =
                scene.groups().map(|(id, g)| (id, g.visible)).collect();
            let target = panel
                .checkboxes()
                .iter()
                .find(|c| &c.label == label)
                .unwrap()
                .group;

            let now = panel.toggle(&mut scene, label).unwrap();
            assert!(!now);

            for (id, visible) in before {
                let after = scene.group(id).unwrap().visible;
                if id == target {
                    assert_eq!(after, !visible);
                } else {
                    assert_eq!(after, visible);
                }
            }
            panel.toggle(&mut scene, label).unwrap();
        }
    }

    #[test]
    fn test_set_mirrors_group() {
        let (mut scene, registry, mut panel) = setup();
        panel.set(&mut scene, "B1", false).unwrap();
        let id = registry.group_by_label("B1").unwrap();
        assert!(!scene.group(id).unwrap().visible);
        assert_eq!(panel.checked("B1"), Some(false));

        // Idempotent
        panel.set(&mut scene, "B1", false).unwrap();
        assert!(!scene.group(id).unwrap().visible);
    }

    #[test]
    fn test_unknown_label() {
        let (mut scene, _, mut panel) = setup();
        assert!(panel.checked("9F").is_none());
        assert!(matches!(
            panel.toggle(&mut scene, "9F"),
            Err(Error::UnknownLabel(_))
        ));
    }
}
