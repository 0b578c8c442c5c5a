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

//! Vertex layouts, primitive state and render pipeline descriptors.

use super::buffer::IndexFormat;
use super::shader::ShaderModuleId;
use std::borrow::Cow;

/// The memory format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// One 32-bit float component.
    Float32,
    /// Two 32-bit float components.
    Float32x2,
    /// Three 32-bit float components.
    Float32x3,
    /// Four 32-bit float components.
    Float32x4,
    /// One 32-bit unsigned integer component.
    Uint32,
}

impl VertexFormat {
    /// Size of one attribute of this format, in bytes.
    pub const fn size(&self) -> u64 {
        match self {
            VertexFormat::Float32 | VertexFormat::Uint32 => 4,
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// Whether a vertex buffer advances per vertex or per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexStepMode {
    /// One element per vertex.
    #[default]
    Vertex,
    /// One element per instance.
    Instance,
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Consecutive vertices form a connected line.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Consecutive vertices form a triangle strip.
    TriangleStrip,
}

/// Winding order that identifies a front-facing triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFace {
    /// Counter-clockwise triangles face the viewer.
    #[default]
    Ccw,
    /// Clockwise triangles face the viewer.
    Cw,
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// Discard front faces.
    Front,
    /// Discard back faces.
    Back,
}

/// One attribute inside a vertex buffer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttributeDescriptor {
    /// The `@location(n)` the attribute is bound to in the shader.
    pub shader_location: u32,
    /// The format of the attribute.
    pub format: VertexFormat,
    /// Byte offset of the attribute from the start of the element.
    pub offset: u64,
}

/// The layout of one element of a vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayoutDescriptor<'a> {
    /// Distance in bytes between two consecutive elements.
    pub array_stride: u64,
    /// How often the buffer advances.
    pub step_mode: VertexStepMode,
    /// The attributes making up one element.
    pub attributes: Cow<'a, [VertexAttributeDescriptor]>,
}

impl VertexBufferLayoutDescriptor<'_> {
    /// `true` when every attribute fits inside `array_stride` and no two overlap.
    pub fn is_well_formed(&self) -> bool {
        let mut spans: Vec<(u64, u64)> = self
            .attributes
            .iter()
            .map(|a| (a.offset, a.offset + a.format.size()))
            .collect();
        spans.sort_unstable();
        spans.iter().all(|&(_, end)| end <= self.array_stride)
            && spans.windows(2).all(|pair| pair[0].1 <= pair[1].0)
    }
}

/// Primitive assembly and rasterization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveStateDescriptor {
    /// The primitive topology.
    pub topology: PrimitiveTopology,
    /// Index format for strip topologies; `None` for list topologies.
    pub strip_index_format: Option<IndexFormat>,
    /// The front face winding.
    pub front_face: FrontFace,
    /// The face culling mode, if any.
    pub cull_mode: Option<CullMode>,
}

/// An opaque handle to a compiled render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderPipelineId(pub usize);

/// Everything a backend needs to build a render pipeline.
#[derive(Debug, Clone)]
pub struct RenderPipelineDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The module holding the vertex stage.
    pub vertex_shader_module: ShaderModuleId,
    /// The vertex stage entry point.
    pub vertex_entry_point: Cow<'a, str>,
    /// The module holding the fragment stage, if any.
    pub fragment_shader_module: Option<ShaderModuleId>,
    /// The fragment stage entry point, required when a fragment module is set.
    pub fragment_entry_point: Option<Cow<'a, str>>,
    /// Layouts of the vertex buffers, by slot.
    pub vertex_buffers_layout: Cow<'a, [VertexBufferLayoutDescriptor<'a>]>,
    /// Primitive assembly state.
    pub primitive_state: PrimitiveStateDescriptor,
}
