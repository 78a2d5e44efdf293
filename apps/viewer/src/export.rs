// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export of the visible wireframe and JSON scene summaries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geofloor_scene::{FloorGroupRegistry, Scene, SceneSummary};

use crate::error::Result;

/// Write every visible object as an `o` block of `v` and `l` records.
///
/// Coordinates are world space, Y up. Returns the number of objects written.
pub fn write_obj<W: Write>(out: &mut W, scene: &Scene) -> Result<usize> {
    writeln!(out, "# geofloor wireframe export")?;
    writeln!(out, "# Coordinate system: Y-up")?;

    let mut vertex_offset: usize = 1;
    let mut objects = 0;

    for (group_id, group) in scene.groups() {
        if !group.visible {
            continue;
        }
        for (index, object) in group.children().iter().enumerate() {
            let name = if object.name.is_empty() {
                format!("{}_{}", group.name, index)
            } else {
                // OBJ names end at whitespace
                object.name.split_whitespace().collect::<Vec<_>>().join("_")
            };
            writeln!(out, "o {}", name)?;
            writeln!(out, "# group {} ({})", group.name, group_id.index())?;

            let mut segments = 0;
            for (a, b) in object.world_segments() {
                writeln!(out, "v {:.6} {:.6} {:.6}", a.x, a.y, a.z)?;
                writeln!(out, "v {:.6} {:.6} {:.6}", b.x, b.y, b.z)?;
                segments += 1;
            }
            for s in 0..segments {
                let first = vertex_offset + s * 2;
                writeln!(out, "l {} {}", first, first + 1)?;
            }
            vertex_offset += segments * 2;
            objects += 1;
        }
    }

    Ok(objects)
}

pub fn write_obj_file(path: &Path, scene: &Scene) -> Result<usize> {
    let mut out = BufWriter::new(File::create(path)?);
    let objects = write_obj(&mut out, scene)?;
    out.flush()?;
    Ok(objects)
}

pub fn summary_json(scene: &Scene, registry: &FloorGroupRegistry) -> Result<String> {
    let summary = SceneSummary::collect(scene, registry);
    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofloor_geometry::EdgesGeometry;
    use geofloor_scene::LineSegments;
    use nalgebra::Vector3;

    fn scene() -> (Scene, FloorGroupRegistry) {
        let mut scene = Scene::new();
        let registry = FloorGroupRegistry::install(&mut scene).unwrap();
        let geometry = EdgesGeometry {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        };
        let mut object = LineSegments::new("Shop A", geometry);
        object.position = Vector3::new(0.0, 59.0, 0.0);
        let id = registry.group_by_label("2F").unwrap();
        scene.attach(id, object).unwrap();
        (scene, registry)
    }

    #[test]
    fn test_obj_records() {
        let (scene, _) = scene();
        let mut out = Vec::new();
        assert_eq!(write_obj(&mut out, &scene).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("o Shop_A\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert!(text.contains("v 1.000000 59.000000 0.000000"));
        assert!(text.contains("l 1 2\n"));
        assert!(text.contains("l 3 4\n"));
    }

    #[test]
    fn test_obj_skips_hidden_groups() {
        let (mut scene, registry) = scene();
        let id = registry.group_by_label("2F").unwrap();
        scene.set_visible(id, false).unwrap();

        let mut out = Vec::new();
        assert_eq!(write_obj(&mut out, &scene).unwrap(), 0);
        assert!(!String::from_utf8(out).unwrap().contains("\nv "));
    }

    #[test]
    fn test_summary_json() {
        let (scene, registry) = scene();
        let json: serde_json::Value =
            serde_json::from_str(&summary_json(&scene, &registry).unwrap()).unwrap();
        assert_eq!(json["total_meshes"], 1);
        assert_eq!(json["total_segments"], 2);
        let floors = json["groups"].as_array().unwrap();
        assert_eq!(floors.len(), 8);
        assert_eq!(floors[5]["label"], "2F");
        assert_eq!(floors[5]["meshes"], 1);
    }
}
