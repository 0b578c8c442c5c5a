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

//! Errors reported by mesh sources.

use std::path::PathBuf;
use thiserror::Error;

/// Why a mesh source could not produce fragments for a path.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing exists at the path.
    #[error("mesh file not found: {}", .path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read mesh file {}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its contents are not a valid OBJ.
    #[error("malformed OBJ file {}: {source}", .path.display())]
    Parse {
        /// The path that was requested.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: tobj::LoadError,
    },
}
