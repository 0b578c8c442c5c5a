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

use crate::math::{Vec2, Vec3};
use crate::renderer::api::{
    VertexAttributeDescriptor, VertexBufferLayoutDescriptor, VertexFormat, VertexStepMode,
};
use std::borrow::Cow;
use std::mem;

const VERTEX_ATTRIBUTES: [VertexAttributeDescriptor; 3] = [
    // @location(0): position
    VertexAttributeDescriptor {
        shader_location: 0,
        format: VertexFormat::Float32x3,
        offset: 0,
    },
    // @location(1): texture coordinate
    VertexAttributeDescriptor {
        shader_location: 1,
        format: VertexFormat::Float32x2,
        offset: mem::size_of::<[f32; 3]>() as u64,
    },
    // @location(2): normal
    VertexAttributeDescriptor {
        shader_location: 2,
        format: VertexFormat::Float32x3,
        offset: mem::size_of::<[f32; 5]>() as u64,
    },
];

/// One interleaved vertex of the merged vertex store.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub tex_coord: [f32; 2],
    /// Object-space normal.
    pub normal: [f32; 3],
}

impl Vertex {
    /// Interleaves the three attributes of one vertex.
    pub fn new(position: Vec3, tex_coord: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            normal: normal.to_array(),
        }
    }

    /// The buffer layout matching this struct: position, texcoord, normal.
    pub fn layout() -> VertexBufferLayoutDescriptor<'static> {
        VertexBufferLayoutDescriptor {
            array_stride: mem::size_of::<Vertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: Cow::Borrowed(&VERTEX_ATTRIBUTES),
        }
    }
}
