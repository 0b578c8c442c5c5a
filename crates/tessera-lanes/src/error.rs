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

//! Errors raised while building a [`crate::Model`].

use tessera_core::renderer::ResourceError;
use tessera_io::LoadError;
use thiserror::Error;

/// Why a model could not be created.
///
/// Every variant surfaces during model creation. Drawing a model that was
/// created successfully cannot fail.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The mesh source produced no fragment at all.
    #[error("model has no fragments")]
    EmptyModel,

    /// A fragment's texcoord or normal array is not as long as its position array.
    #[error(
        "fragment {fragment} ('{name}') has {positions} positions, \
         {tex_coords} texcoords and {normals} normals"
    )]
    MissingAttribute {
        /// Position of the fragment in the source list.
        fragment: usize,
        /// Name of the fragment.
        name: String,
        /// Length of the position array.
        positions: usize,
        /// Length of the texcoord array.
        tex_coords: usize,
        /// Length of the normal array.
        normals: usize,
    },

    /// The material table and the draw range list have different lengths.
    #[error("{materials} materials for {ranges} draw ranges")]
    MaterialCountMismatch {
        /// Number of materials.
        materials: usize,
        /// Number of draw ranges.
        ranges: usize,
    },

    /// A local index points past the end of its fragment's vertices.
    #[error(
        "fragment {fragment} ('{name}') references vertex {index} \
         but only has {vertex_count} vertices"
    )]
    IndexOutOfRange {
        /// Position of the fragment in the source list.
        fragment: usize,
        /// Name of the fragment.
        name: String,
        /// The offending local index.
        index: u32,
        /// Number of vertices in the fragment.
        vertex_count: usize,
    },

    /// The merged vertex store cannot be addressed with 32-bit indices.
    #[error("{vertex_count} vertices cannot be addressed with 32-bit indices")]
    TooManyVertices {
        /// Total number of vertices across fragments.
        vertex_count: usize,
    },

    /// The mesh source failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The backend refused a buffer, shader or pipeline.
    #[error("failed to upload model resources")]
    Upload(#[from] ResourceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn load_errors_pass_through_unchanged() {
        let err: ModelError = LoadError::NotFound {
            path: PathBuf::from("a.obj"),
        }
        .into();
        assert_eq!(err.to_string(), "mesh file not found: a.obj");
    }

    #[test]
    fn upload_errors_keep_their_source() {
        let err: ModelError = ResourceError::OutOfBounds.into();
        assert_eq!(err.to_string(), "failed to upload model resources");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Resource access out of bounds.".to_string())
        );
    }
}
