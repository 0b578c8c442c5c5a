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

//! # Tessera Lanes
//!
//! The hot paths of multi-fragment model handling:
//!
//! - [`assembly_lane`]: flattens a fragment list into one vertex store, one
//!   rebased index store and a draw range per fragment, and pairs the ranges
//!   with their materials.
//! - [`model`]: uploads the merged buffers and owns the resulting GPU handles.
//! - [`render_lane`]: binds a model once and issues one draw per fragment.

pub mod assembly_lane;
pub mod error;
pub mod model;
pub mod render_lane;
pub mod settings;

pub use assembly_lane::{BufferAssembler, DrawRange, FragmentDraw, MaterialTable, MergedGeometry};
pub use error::ModelError;
pub use model::{GpuGeometry, Model};
pub use render_lane::{ModelRenderLane, PassState};
pub use settings::ModelSettings;
