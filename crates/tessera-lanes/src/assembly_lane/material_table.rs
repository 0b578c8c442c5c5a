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

//! The per-fragment material list and its pairing with draw ranges.

use super::DrawRange;
use crate::error::ModelError;
use crate::settings::ModelSettings;
use tessera_core::mesh::{MeshFragment, PhongMaterial};

/// A draw range together with the material it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentDraw {
    /// The fragment's slice of the merged index store.
    pub range: DrawRange,
    /// The material applied before drawing the range.
    pub material: PhongMaterial,
}

/// Materials in fragment order, positionally aligned with the draw ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    materials: Vec<PhongMaterial>,
}

impl MaterialTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// One material per fragment, built from each fragment's descriptor.
    pub fn from_fragments(fragments: &[MeshFragment], settings: &ModelSettings) -> Self {
        Self {
            materials: fragments
                .iter()
                .map(|f| settings.material_for(&f.material))
                .collect(),
        }
    }

    /// Appends a material for the next fragment.
    pub fn push(&mut self, material: PhongMaterial) {
        self.materials.push(material);
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// `true` if the table holds no material.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// The material of fragment `index`.
    pub fn get(&self, index: usize) -> Option<&PhongMaterial> {
        self.materials.get(index)
    }

    /// Pairs each range with the material at the same position.
    ///
    /// # Errors
    ///
    /// [`ModelError::MaterialCountMismatch`] if the lengths differ.
    pub fn pair_with(&self, ranges: &[DrawRange]) -> Result<Vec<FragmentDraw>, ModelError> {
        if self.materials.len() != ranges.len() {
            return Err(ModelError::MaterialCountMismatch {
                materials: self.materials.len(),
                ranges: ranges.len(),
            });
        }
        Ok(ranges
            .iter()
            .zip(&self.materials)
            .map(|(range, material)| FragmentDraw {
                range: *range,
                material: *material,
            })
            .collect())
    }
}

impl FromIterator<PhongMaterial> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = PhongMaterial>>(iter: I) -> Self {
        Self {
            materials: iter.into_iter().collect(),
        }
    }
}
