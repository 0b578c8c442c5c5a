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

//! The mesh source contract and an in-memory implementation.

use crate::error::LoadError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tessera_core::mesh::MeshFragment;

/// Produces the ordered fragment list of a model.
///
/// Fragment order is the order the model will be drawn in. An empty list is
/// a valid answer; deciding whether it is usable is up to the caller.
pub trait MeshSource {
    /// Loads every fragment stored at `path`.
    fn load(&self, path: &Path) -> Result<Vec<MeshFragment>, LoadError>;
}

/// A mesh source serving fragment lists registered in memory.
///
/// Useful for procedurally built models and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryMeshSource {
    models: HashMap<PathBuf, Vec<MeshFragment>>,
}

impl MemoryMeshSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `fragments` under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, fragments: Vec<MeshFragment>) {
        self.models.insert(path.into(), fragments);
    }

    /// Builder form of [`MemoryMeshSource::insert`].
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>, fragments: Vec<MeshFragment>) -> Self {
        self.insert(path, fragments);
        self
    }
}

impl MeshSource for MemoryMeshSource {
    fn load(&self, path: &Path) -> Result<Vec<MeshFragment>, LoadError> {
        self.models
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_registered_fragments_in_order() {
        let source = MemoryMeshSource::new().with_model(
            "memory://pair",
            vec![MeshFragment::new("a"), MeshFragment::new("b")],
        );
        let fragments = source.load(Path::new("memory://pair")).unwrap();
        let names: Vec<_> = fragments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let err = MemoryMeshSource::new()
            .load(Path::new("nowhere.obj"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "mesh file not found: nowhere.obj");
    }
}
