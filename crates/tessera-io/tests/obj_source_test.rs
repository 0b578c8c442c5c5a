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

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tessera_core::math::{Vec2, Vec3};
use tessera_io::{LoadError, MeshSource, ObjMeshSource};

const TWO_OBJECTS_OBJ: &str = "\
mtllib scene.mtl
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl red
f 1/1/1 2/2/1 3/3/1 4/4/1
o tri
v 2 0 0
v 3 0 0
v 2 1 0
vt 0.5 0.5
vn 0 1 0
usemtl blue
f 5/5/2 6/5/2 7/5/2
";

const SCENE_MTL: &str = "\
newmtl red
Ka 0.1 0 0
Kd 1 0 0
Ks 1 1 1
Ns 32
newmtl blue
Kd 0 0 1
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn objects_become_fragments_in_file_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "scene.mtl", SCENE_MTL);
    let obj = write(dir.path(), "scene.obj", TWO_OBJECTS_OBJ);

    let fragments = ObjMeshSource.load(&obj).unwrap();
    assert_eq!(fragments.len(), 2);

    let quad = &fragments[0];
    assert_eq!(quad.name, "quad");
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.indices.len(), 6, "quad is triangulated into two triangles");
    assert!(quad.indices.iter().all(|&i| (i as usize) < quad.vertex_count()));
    assert!(quad.has_complete_attributes());
    assert!(quad.normals.iter().all(|n| *n == Vec3::Z));

    let tri = &fragments[1];
    assert_eq!(tri.name, "tri");
    assert_eq!(tri.vertex_count(), 3);
    assert_eq!(tri.indices, vec![0, 1, 2], "indices are local to the fragment");
    assert!(tri.tex_coords.iter().all(|t| *t == Vec2::new(0.5, 0.5)));
}

#[test]
fn materials_follow_their_fragments() {
    let dir = tempdir().unwrap();
    write(dir.path(), "scene.mtl", SCENE_MTL);
    let obj = write(dir.path(), "scene.obj", TWO_OBJECTS_OBJ);

    let fragments = ObjMeshSource.load(&obj).unwrap();

    let red = &fragments[0].material;
    assert_eq!(red.name, "red");
    assert_eq!(red.ambient, Vec3::new(0.1, 0.0, 0.0));
    assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(red.specular, Vec3::ONE);
    assert_eq!(red.shininess, 32.0);

    let blue = &fragments[1].material;
    assert_eq!(blue.name, "blue");
    assert_eq!(blue.diffuse, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(blue.ambient, Vec3::ZERO);
    assert_eq!(blue.shininess, 0.0);
}

#[test]
fn missing_material_library_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let obj = write(dir.path(), "scene.obj", TWO_OBJECTS_OBJ);

    let fragments = ObjMeshSource.load(&obj).unwrap();
    assert_eq!(fragments.len(), 2);
    assert!(fragments.iter().all(|f| f.material.name == "default"));
}

#[test]
fn faces_without_uvs_or_normals_are_zero_filled() {
    let dir = tempdir().unwrap();
    let obj = write(dir.path(), "bare.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

    let fragments = ObjMeshSource.load(&obj).unwrap();
    assert_eq!(fragments.len(), 1);
    let fragment = &fragments[0];
    assert!(fragment.has_complete_attributes());
    assert!(fragment.tex_coords.iter().all(|t| *t == Vec2::ZERO));
    assert!(fragment.normals.iter().all(|n| *n == Vec3::ZERO));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = ObjMeshSource.load(&dir.path().join("absent.obj")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }), "got {err:?}");
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let obj = write(dir.path(), "broken.obj", "v 0 zero 0\nf 1 1 1\n");
    let err = ObjMeshSource.load(&obj).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
}
