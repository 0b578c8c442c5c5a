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

use super::MaterialDescriptor;
use crate::math::{Vec2, Vec3};

/// One named sub-part of a multi-material model.
///
/// `positions`, `tex_coords` and `normals` are parallel arrays. `indices` are
/// local: `0` is this fragment's first vertex, whatever came before it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshFragment {
    /// Name of the fragment in the source file (object or group name).
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex texture coordinates, one per position.
    pub tex_coords: Vec<Vec2>,
    /// Vertex normals, one per position.
    pub normals: Vec<Vec3>,
    /// Triangle list of local vertex indices.
    pub indices: Vec<u32>,
    /// The material this fragment is drawn with.
    pub material: MaterialDescriptor,
}

impl MeshFragment {
    /// Creates an empty fragment with the given name and the default material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of vertices, as given by the position array.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// `true` when the texcoord and normal arrays are as long as the position array.
    pub fn has_complete_attributes(&self) -> bool {
        self.tex_coords.len() == self.positions.len() && self.normals.len() == self.positions.len()
    }
}
