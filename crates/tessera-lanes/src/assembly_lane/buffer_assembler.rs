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

//! Merges a fragment list into one vertex store and one index store.

use crate::error::ModelError;
use crate::settings::ModelSettings;
use std::ops::Range;
use tessera_core::mesh::{MeshFragment, Vertex};

/// One fragment's slice of the merged index store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DrawRange {
    /// Offset of the first index of the fragment.
    pub start_index: u32,
    /// Number of indices of the fragment.
    pub length: u32,
}

impl DrawRange {
    /// One past the last index of the fragment.
    pub const fn end(&self) -> u32 {
        self.start_index + self.length
    }

    /// `true` for a fragment without indices.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The range handed to `draw_indexed`.
    pub const fn as_range(&self) -> Range<u32> {
        self.start_index..self.end()
    }
}

/// The output of [`BufferAssembler::assemble`].
///
/// `ranges` are tightly packed: the first starts at `0`, each next one starts
/// where the previous ended, and the last ends at `indices.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    ranges: Vec<DrawRange>,
    fragment_names: Vec<String>,
}

impl MergedGeometry {
    /// The merged vertex store, fragments concatenated in source order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The merged, rebased index store.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// One draw range per fragment, in source order.
    pub fn ranges(&self) -> &[DrawRange] {
        &self.ranges
    }

    /// Fragment names, aligned with [`MergedGeometry::ranges`].
    pub fn fragment_names(&self) -> &[String] {
        &self.fragment_names
    }

    /// Keeps the fragment names and drops the CPU-side stores.
    pub(crate) fn into_fragment_names(self) -> Vec<String> {
        self.fragment_names
    }
}

/// Flattens fragments into shared buffers in a single pass.
///
/// No sorting, welding or deduplication happens: a vertex used by two
/// fragments is stored twice.
#[derive(Debug, Clone, Copy)]
pub struct BufferAssembler {
    validate_indices: bool,
}

impl Default for BufferAssembler {
    fn default() -> Self {
        Self {
            validate_indices: true,
        }
    }
}

impl BufferAssembler {
    /// Creates an assembler configured from `settings`.
    pub fn new(settings: &ModelSettings) -> Self {
        Self {
            validate_indices: settings.validate_indices,
        }
    }

    /// Merges `fragments` into one vertex store, one index store and their draw ranges.
    ///
    /// Each fragment's local indices are offset by the number of vertices of
    /// all the fragments before it.
    ///
    /// # Errors
    ///
    /// * [`ModelError::EmptyModel`] if `fragments` is empty.
    /// * [`ModelError::MissingAttribute`] if a texcoord or normal array is not
    ///   as long as its position array.
    /// * [`ModelError::IndexOutOfRange`] if index validation is on and a local
    ///   index is not below its fragment's vertex count.
    /// * [`ModelError::TooManyVertices`] if the total does not fit in `u32`.
    pub fn assemble(&self, fragments: &[MeshFragment]) -> Result<MergedGeometry, ModelError> {
        if fragments.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        let total_vertices: usize = fragments.iter().map(MeshFragment::vertex_count).sum();
        let total_indices: usize = fragments.iter().map(|f| f.indices.len()).sum();
        if u32::try_from(total_vertices).is_err() || u32::try_from(total_indices).is_err() {
            return Err(ModelError::TooManyVertices {
                vertex_count: total_vertices,
            });
        }

        let mut merged = MergedGeometry {
            vertices: Vec::with_capacity(total_vertices),
            indices: Vec::with_capacity(total_indices),
            ranges: Vec::with_capacity(fragments.len()),
            fragment_names: Vec::with_capacity(fragments.len()),
        };
        let mut running_vertex_offset: u32 = 0;

        for (i, fragment) in fragments.iter().enumerate() {
            if !fragment.has_complete_attributes() {
                return Err(ModelError::MissingAttribute {
                    fragment: i,
                    name: fragment.name.clone(),
                    positions: fragment.positions.len(),
                    tex_coords: fragment.tex_coords.len(),
                    normals: fragment.normals.len(),
                });
            }

            let vertex_count = fragment.vertex_count();
            if self.validate_indices {
                if let Some(&index) = fragment.indices.iter().find(|&&k| k as usize >= vertex_count) {
                    return Err(ModelError::IndexOutOfRange {
                        fragment: i,
                        name: fragment.name.clone(),
                        index,
                        vertex_count,
                    });
                }
            }

            merged.vertices.extend(
                fragment
                    .positions
                    .iter()
                    .zip(&fragment.tex_coords)
                    .zip(&fragment.normals)
                    .map(|((p, t), n)| Vertex::new(*p, *t, *n)),
            );

            // Both totals were checked against u32 above.
            let start_index = merged.indices.len() as u32;
            // Unvalidated indices may be arbitrary; they wrap instead of panicking.
            merged.indices.extend(
                fragment
                    .indices
                    .iter()
                    .map(|&k| k.wrapping_add(running_vertex_offset)),
            );
            let range = DrawRange {
                start_index,
                length: fragment.indices.len() as u32,
            };

            if vertex_count == 0 || range.is_empty() {
                log::warn!(
                    "BufferAssembler: fragment {i} ('{}') is empty ({vertex_count} vertices, {} indices)",
                    fragment.name,
                    range.length
                );
            } else {
                log::trace!(
                    "BufferAssembler: fragment {i} ('{}') -> indices {:?}, vertex offset {running_vertex_offset}",
                    fragment.name,
                    range.as_range()
                );
            }

            merged.ranges.push(range);
            merged.fragment_names.push(fragment.name.clone());
            running_vertex_offset += vertex_count as u32;
        }

        log::debug!(
            "BufferAssembler: merged {} fragments into {} vertices and {} indices",
            merged.ranges.len(),
            merged.vertices.len(),
            merged.indices.len()
        );
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::math::{Vec2, Vec3};

    fn fragment(name: &str, vertex_count: usize, indices: &[u32]) -> MeshFragment {
        MeshFragment {
            name: name.to_owned(),
            positions: (0..vertex_count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect(),
            tex_coords: vec![Vec2::ZERO; vertex_count],
            normals: vec![Vec3::Z; vertex_count],
            indices: indices.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn second_fragment_is_rebased_by_first_vertex_count() {
        let merged = BufferAssembler::default()
            .assemble(&[fragment("a", 4, &[0, 1, 2]), fragment("b", 3, &[0, 1, 2])])
            .unwrap();

        assert_eq!(merged.indices(), &[0, 1, 2, 4, 5, 6]);
        assert_eq!(merged.vertices().len(), 7);
        assert_eq!(
            merged.ranges(),
            &[
                DrawRange {
                    start_index: 0,
                    length: 3
                },
                DrawRange {
                    start_index: 3,
                    length: 3
                }
            ]
        );
    }

    #[test]
    fn vertices_keep_source_order() {
        let merged = BufferAssembler::default()
            .assemble(&[fragment("a", 2, &[0, 1, 1]), fragment("b", 2, &[1, 0, 0])])
            .unwrap();
        let xs: Vec<f32> = merged.vertices().iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(merged.indices(), &[0, 1, 1, 3, 2, 2]);
    }

    #[test]
    fn empty_fragment_keeps_following_offsets_intact() {
        let merged = BufferAssembler::default()
            .assemble(&[
                fragment("a", 3, &[0, 1, 2]),
                fragment("empty", 0, &[]),
                fragment("c", 3, &[2, 1, 0]),
            ])
            .unwrap();

        assert_eq!(merged.indices(), &[0, 1, 2, 5, 4, 3]);
        assert_eq!(merged.ranges()[1], DrawRange { start_index: 3, length: 0 });
        assert_eq!(merged.ranges()[2], DrawRange { start_index: 3, length: 3 });
        assert_eq!(merged.fragment_names(), &["a", "empty", "c"]);
    }

    #[test]
    fn no_fragment_is_an_empty_model() {
        let err = BufferAssembler::default().assemble(&[]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyModel));
    }

    #[test]
    fn short_texcoords_are_a_missing_attribute() {
        let mut broken = fragment("broken", 3, &[0, 1, 2]);
        broken.tex_coords.pop();
        let err = BufferAssembler::default()
            .assemble(&[fragment("ok", 3, &[0, 1, 2]), broken])
            .unwrap_err();
        match err {
            ModelError::MissingAttribute {
                fragment,
                positions,
                tex_coords,
                ..
            } => assert_eq!((fragment, positions, tex_coords), (1, 3, 2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_normals_are_a_missing_attribute() {
        let mut broken = fragment("broken", 3, &[0, 1, 2]);
        broken.normals.clear();
        let err = BufferAssembler::default().assemble(&[broken]).unwrap_err();
        assert!(matches!(err, ModelError::MissingAttribute { normals: 0, .. }));
    }

    #[test]
    fn out_of_range_index_is_rejected_when_validating() {
        let err = BufferAssembler::default()
            .assemble(&[fragment("a", 3, &[0, 1, 2]), fragment("b", 3, &[0, 3, 1])])
            .unwrap_err();
        match err {
            ModelError::IndexOutOfRange {
                fragment,
                index,
                vertex_count,
                ..
            } => assert_eq!((fragment, index, vertex_count), (1, 3, 3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_index_is_rebased_when_not_validating() {
        let settings = ModelSettings {
            validate_indices: false,
            ..Default::default()
        };
        let merged = BufferAssembler::new(&settings)
            .assemble(&[fragment("a", 3, &[0, 1, 2]), fragment("b", 3, &[0, 3, 1])])
            .unwrap();
        assert_eq!(merged.indices(), &[0, 1, 2, 3, 6, 4]);
    }
}
