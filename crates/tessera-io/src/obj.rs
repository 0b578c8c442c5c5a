// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OBJ/MTL mesh source backed by `tobj`.

use crate::error::LoadError;
use crate::source::MeshSource;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tessera_core::math::{Vec2, Vec3};
use tessera_core::mesh::{MaterialDescriptor, MeshFragment};

/// Loads Wavefront OBJ files, with materials from the referenced MTL libraries.
///
/// Faces are triangulated and each vertex gets a single index shared by all its
/// attributes. Every model `tobj` reports (one per object, group or material
/// switch) becomes one fragment, in file order. MTL libraries are resolved
/// relative to the OBJ file; a library that fails to load only costs the
/// fragments their materials.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjMeshSource;

impl ObjMeshSource {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }
}

impl MeshSource for ObjMeshSource {
    fn load(&self, path: &Path) -> Result<Vec<MeshFragment>, LoadError> {
        log::debug!("ObjMeshSource: loading '{}'", path.display());

        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let mut reader = BufReader::new(file);
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let (models, materials) =
            tobj::load_obj_buf(&mut reader, &Self::load_options(), |mtl_path| {
                tobj::load_mtl(base_dir.join(mtl_path))
            })
            .map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let materials: Vec<MaterialDescriptor> = match materials {
            Ok(materials) => materials.iter().map(material_from_mtl).collect(),
            Err(e) => {
                log::warn!(
                    "ObjMeshSource: materials of '{}' unavailable ({e}), using defaults",
                    path.display()
                );
                Vec::new()
            }
        };

        let fragments: Vec<MeshFragment> = models
            .into_iter()
            .map(|model| fragment_from_model(model, &materials))
            .collect();

        log::debug!(
            "ObjMeshSource: '{}' yielded {} fragment(s) and {} material(s)",
            path.display(),
            fragments.len(),
            materials.len()
        );
        Ok(fragments)
    }
}

fn material_from_mtl(material: &tobj::Material) -> MaterialDescriptor {
    let color = |value: Option<[f32; 3]>| value.map(Vec3::from_array).unwrap_or(Vec3::ZERO);
    MaterialDescriptor {
        name: material.name.clone(),
        ambient: color(material.ambient),
        diffuse: color(material.diffuse),
        specular: color(material.specular),
        shininess: material.shininess.unwrap_or(0.0),
    }
}

fn fragment_from_model(model: tobj::Model, materials: &[MaterialDescriptor]) -> MeshFragment {
    let mesh = model.mesh;
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
        .collect();
    let vertex_count = positions.len();

    // Absent arrays are zero-filled; short ones are kept short on purpose.
    let tex_coords = if mesh.texcoords.is_empty() {
        vec![Vec2::ZERO; vertex_count]
    } else {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| Vec2::new(t[0], t[1]))
            .collect()
    };
    let normals = if mesh.normals.is_empty() {
        vec![Vec3::ZERO; vertex_count]
    } else {
        mesh.normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect()
    };

    let material = match mesh.material_id.and_then(|id| materials.get(id)) {
        Some(material) => material.clone(),
        None => {
            log::debug!(
                "ObjMeshSource: fragment '{}' has no material, using default",
                model.name
            );
            MaterialDescriptor::default()
        }
    };

    MeshFragment {
        name: model.name,
        positions,
        tex_coords,
        normals,
        indices: mesh.indices,
        material,
    }
}
