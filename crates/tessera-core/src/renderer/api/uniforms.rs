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

//! Transform and material uniform structures, formatted for GPU consumption.
//!
//! Both structs are `#[repr(C)]`, `Pod` and a multiple of 16 bytes, so they
//! can be written as-is into WGSL uniform blocks.

use crate::math::Mat4;

/// Uniform binding slot of [`TransformUniforms`].
pub const TRANSFORM_BINDING: u32 = 0;
/// Uniform binding slot of [`MaterialUniforms`].
pub const MATERIAL_BINDING: u32 = 1;

/// Projection, view and model matrices for one draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniforms {
    /// The view-to-clip projection matrix.
    pub projection: [[f32; 4]; 4],
    /// The world-to-view matrix.
    pub view: [[f32; 4]; 4],
    /// The model-to-world matrix.
    pub model: [[f32; 4]; 4],
}

impl TransformUniforms {
    /// Packs the three matrices in column-major order.
    pub fn new(projection: &Mat4, view: &Mat4, model: &Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

/// Phong material state for one fragment.
///
/// Each color carries its intensity in the fourth component.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    /// Ambient color (rgb) and ambient intensity (a).
    pub ambient: [f32; 4],
    /// Diffuse color (rgb) and diffuse intensity (a).
    pub diffuse: [f32; 4],
    /// Specular color (rgb) and specular intensity (a).
    pub specular: [f32; 4],
    /// Shininess (x), error-check flag as 0.0 / 1.0 (y), padding (zw).
    pub params: [f32; 4],
}
