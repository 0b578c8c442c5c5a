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

//! Built-in shader sources for model rendering.
//!
//! ```ignore
//! use tessera_lanes::render_lane::shaders::MODEL_DEFAULT_WGSL;
//! use tessera_core::renderer::{ShaderModuleDescriptor, ShaderSourceData};
//! use std::borrow::Cow;
//!
//! let descriptor = ShaderModuleDescriptor {
//!     label: Some("model_default"),
//!     source: ShaderSourceData::Wgsl(Cow::Borrowed(MODEL_DEFAULT_WGSL)),
//! };
//! ```

/// Default model program.
///
/// Reads the transform block at binding 0 and the material block at binding 1.
/// Colors fragments by their normal; with the material's error check on,
/// out-of-range colors are shown in magenta.
pub const MODEL_DEFAULT_WGSL: &str = include_str!("model_default.wgsl");

/// Vertex entry point of [`MODEL_DEFAULT_WGSL`].
pub const MODEL_VS_ENTRY: &str = "vs_main";

/// Fragment entry point of [`MODEL_DEFAULT_WGSL`].
pub const MODEL_FS_ENTRY: &str = "fs_main";
