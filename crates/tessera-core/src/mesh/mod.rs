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

//! The in-memory mesh description consumed by model assembly.
//!
//! A model arrives as an ordered list of [`MeshFragment`]s. Each fragment owns
//! its attribute arrays, a locally numbered index list and a
//! [`MaterialDescriptor`]. Assembly flattens these into one [`Vertex`] store.

mod fragment;
mod material;
mod vertex;

pub use self::fragment::MeshFragment;
pub use self::material::{MaterialDescriptor, PhongMaterial};
pub use self::vertex::Vertex;
